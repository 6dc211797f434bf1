//! Township/range (rectangular survey) descriptions.
//!
//! Only the township and range numbers are used. They shift a fixed base
//! point, and a placeholder square is drawn there. This is not a PLSS grid
//! lookup: the square marks roughly where the township sits relative to
//! the other results, nothing more.

use std::sync::LazyLock;

use parcel_trace_legal_description_models::{
    DescriptionPoint, DescriptionSegment, PointKind, SegmentKind,
};
use regex::Regex;

use crate::ParseError;
use crate::accumulator::DescriptionBuilder;
use crate::bearing::Cardinal;
use crate::config::ParserConfig;

/// `T12N R5E`, `Twp. 3 S, Rng. 14 W`, `Township 12 North, Range 5 East`.
static TOWNSHIP_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)\b(?:township|twp|t)\.?\s*(?P<township>\d+)\s*(?P<ns>north|south|n|s)\b.*?\b(?:range|rng|r)\.?\s*(?P<range>\d+)\s*(?P<ew>east|west|e|w)\b",
    )
    .expect("valid regex")
});

/// `Section 9`, `Sec. 9`.
static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsec(?:tion)?\.?\s*(?P<section>\d+)\b").expect("valid regex"));

/// Fills township, range and section and draws the placeholder square.
///
/// A description without a recognizable township/range pair caps
/// confidence at 0.2 and produces no geometry.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if a township or range number is
/// too large to represent.
pub fn extract(
    text: &str,
    config: &ParserConfig,
    builder: &mut DescriptionBuilder,
) -> Result<(), ParseError> {
    if let Some(caps) = SECTION_RE.captures(text) {
        builder.set_section(caps["section"].to_string());
    }

    let Some(caps) = TOWNSHIP_RANGE_RE.captures(text) else {
        builder.cap_confidence(0.2, "Could not parse township/range information");
        return Ok(());
    };

    let township = parse_grid_number(&caps["township"])?;
    let range = parse_grid_number(&caps["range"])?;
    let north = Cardinal::from_token(&caps["ns"]) == Some(Cardinal::North);
    let east = Cardinal::from_token(&caps["ew"]) == Some(Cardinal::East);

    builder.set_township(format!("{township}{}", if north { 'N' } else { 'S' }));
    builder.set_range(format!("{range}{}", if east { 'E' } else { 'W' }));

    let lat_sign = if north { 1.0 } else { -1.0 };
    let lng_sign = if east { 1.0 } else { -1.0 };
    let step = config.survey_offset_per_unit;
    let size = config.survey_square_size;

    let sw = config.origin.offset(
        lat_sign * f64::from(township) * step,
        lng_sign * f64::from(range) * step,
    );
    let corners = [
        ("SW Corner", sw),
        ("SE Corner", sw.offset(0.0, size)),
        ("NE Corner", sw.offset(size, size)),
        ("NW Corner", sw.offset(size, 0.0)),
    ];
    log::debug!("Township {township} range {range} placeholder square at {sw:?}");

    let points: Vec<DescriptionPoint> = corners
        .iter()
        .map(|(label, coordinate)| DescriptionPoint::new(*coordinate, *label, PointKind::Corner))
        .collect();

    // Edges run SW -> SE -> NE -> NW, and NW -> SW closes the square.
    for (index, (start, bearing)) in points.iter().zip(["E", "N", "W", "S"]).enumerate() {
        let end = &points[(index + 1) % points.len()];
        builder.push_segment(DescriptionSegment {
            start: start.clone(),
            end: end.clone(),
            kind: SegmentKind::Boundary,
            bearing: Some(bearing.to_string()),
            distance: None,
        });
    }
    for point in points {
        builder.push_point(point);
    }

    builder.try_assemble_polygon();
    Ok(())
}

fn parse_grid_number(raw: &str) -> Result<u32, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidNumber {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use parcel_trace_legal_description_models::DescriptionDialect;

    use super::*;

    fn run(text: &str) -> (DescriptionBuilder, Result<(), ParseError>) {
        let mut builder = DescriptionBuilder::new(text, DescriptionDialect::RectangularSurvey);
        let outcome = extract(text, &ParserConfig::default(), &mut builder);
        (builder, outcome)
    }

    #[test]
    fn parses_compact_township_range() {
        let (builder, outcome) = run("T12N R5E Section 9");
        outcome.unwrap();
        assert!((builder.confidence() - 0.6).abs() < f64::EPSILON);
        assert!(builder.issues().is_empty());
        assert_eq!(builder.points().len(), 4);
        assert_eq!(builder.segments().len(), 4);

        let result = builder.finish();
        assert_eq!(result.township, "12N");
        assert_eq!(result.range, "5E");
        assert_eq!(result.section, "9");
        let ring = result.polygon.unwrap();
        assert_eq!(ring.exterior().len(), 5);
        assert_eq!(ring.exterior().first(), ring.exterior().last());
    }

    #[test]
    fn parses_spelled_out_township_range() {
        let (builder, outcome) = run("Township 3 South, Range 14 West of the Fifth Principal Meridian");
        outcome.unwrap();
        let result = builder.finish();
        assert_eq!(result.township, "3S");
        assert_eq!(result.range, "14W");
        assert!(result.section.is_empty());
    }

    #[test]
    fn offsets_square_from_origin() {
        let config = ParserConfig::default();
        let (builder, _) = run("T2S R3W");
        let sw = builder.points()[0].coordinate;
        assert!((sw.lat - (config.origin.lat - 0.2)).abs() < 1e-9);
        assert!((sw.lng - (config.origin.lng - 0.3)).abs() < 1e-9);

        let ne = builder.points()[2].coordinate;
        assert!((ne.lat - sw.lat - config.survey_square_size).abs() < 1e-9);
        assert!((ne.lng - sw.lng - config.survey_square_size).abs() < 1e-9);
    }

    #[test]
    fn closing_segment_returns_to_first_corner() {
        let (builder, _) = run("T1N R1E");
        let last = builder.segments().last().unwrap();
        assert_eq!(last.start.label.as_deref(), Some("NW Corner"));
        assert_eq!(last.end.label.as_deref(), Some("SW Corner"));
        assert_eq!(last.bearing.as_deref(), Some("S"));
    }

    #[test]
    fn missing_township_range_caps_confidence() {
        let (builder, outcome) = run("The north quarter of Section 12");
        outcome.unwrap();
        assert!((builder.confidence() - 0.2).abs() < f64::EPSILON);
        assert_eq!(builder.issues(), ["Could not parse township/range information"]);
        assert!(builder.points().is_empty());
        assert_eq!(builder.finish().section, "12");
    }

    #[test]
    fn oversized_township_is_an_error() {
        let (_, outcome) = run("T99999999999N R5E");
        assert!(matches!(outcome, Err(ParseError::InvalidNumber { .. })));
    }
}
