//! Metes-and-bounds traversal.
//!
//! Finds the point of beginning, then walks every bearing/distance call
//! left to right, synthesizing one corner per call from the previous one
//! (see [`crate::bearing::advance`]).

use std::sync::LazyLock;

use parcel_trace_legal_description_models::{
    DescriptionPoint, DescriptionSegment, PointKind, SegmentKind,
};
use regex::{Captures, Regex};

use crate::ParseError;
use crate::accumulator::DescriptionBuilder;
use crate::bearing::{Bearing, Cardinal, Distance, advance};
use crate::config::ParserConfig;

/// Point of beginning / point of commencement markers.
static POB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bpoint\s+of\s+beginning\b|\bpoint\s+of\s+commencement\b|\bP\.\s*O\.\s*B\.?|\bPOB\b|\bcommencing\s+at\b",
    )
    .expect("valid regex")
});

/// One bearing/distance call, e.g. `thence N 45°30' E, 150.25 feet`.
static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?ix)
        (?:\b(?:thence|then)\s+)?
        \b(?P<primary>north|south|east|west|n|s|e|w)\.?
        (?:\s*(?P<degrees>\d+(?:\.\d+)?)\s*(?:degrees|degree|deg\b|°))?
        (?:\s*(?P<minutes>\d+(?:\.\d+)?)\s*(?:minutes|minute|min\b|'|′))?
        (?:\s*(?P<seconds>\d+(?:\.\d+)?)\s*(?:seconds|second|sec\b|"|″))?
        (?:\s*(?P<secondary>north|south|east|west|n|s|e|w)\b)?\.?
        \s*,?\s*(?:a\s+distance\s+of\s+)?
        (?P<distance>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)\s*
        (?P<unit>feet|foot|ft|meters|meter|metres|metre|m|chains|chain|ch|rods|rod)\b
        "#,
    )
    .expect("valid regex")
});

/// A parsed bearing/distance call.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalCall {
    /// Direction of the call.
    pub bearing: Bearing,
    /// Length of the call.
    pub distance: Distance,
}

impl TraversalCall {
    fn from_captures(caps: &Captures<'_>) -> Result<Self, ParseError> {
        let text = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        let primary = caps
            .name("primary")
            .and_then(|m| Cardinal::from_token(m.as_str()))
            .ok_or_else(|| ParseError::MalformedCall {
                call: caps[0].to_string(),
            })?;

        let bearing = Bearing {
            primary,
            degrees: text("degrees"),
            minutes: text("minutes"),
            seconds: text("seconds"),
            secondary: caps
                .name("secondary")
                .and_then(|m| Cardinal::from_token(m.as_str())),
        };
        let distance = Distance::parse(&caps["distance"], &caps["unit"])?;

        Ok(Self { bearing, distance })
    }
}

/// Reads up to `limit` calls from `text`, in order.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if a matched call carries a
/// number that does not parse.
pub fn parse_calls(text: &str, limit: usize) -> Result<Vec<TraversalCall>, ParseError> {
    CALL_RE
        .captures_iter(text)
        .filter(|caps| !is_split_word(caps))
        .take(limit)
        .map(|caps| TraversalCall::from_captures(&caps))
        .collect()
}

/// Whether the two direction tokens are just letters of one ordinary word,
/// like `we` in `we 40 feet`. Adjacent letters only read as a bearing when
/// they form a quadrant pair (`NE`, `southwest`).
fn is_split_word(caps: &Captures<'_>) -> bool {
    let (Some(primary), Some(secondary)) = (caps.name("primary"), caps.name("secondary")) else {
        return false;
    };
    if primary.end() != secondary.start() {
        return false;
    }
    match (
        Cardinal::from_token(primary.as_str()),
        Cardinal::from_token(secondary.as_str()),
    ) {
        (Some(primary), Some(secondary)) => {
            !primary.is_meridional() || secondary.is_meridional()
        }
        _ => true,
    }
}

/// Reconstructs points, segments and polygon from a metes-and-bounds
/// description.
///
/// # Errors
///
/// Returns a [`ParseError`] if a call cannot be read or a step lands on a
/// non-finite coordinate. Points recorded before the failure are kept.
pub fn extract(
    text: &str,
    config: &ParserConfig,
    builder: &mut DescriptionBuilder,
) -> Result<(), ParseError> {
    let (remainder, start) = if let Some(marker) = POB_RE.find(text) {
        let start = DescriptionPoint::new(config.origin, "Point of Beginning", PointKind::Corner);
        (&text[marker.end()..], start)
    } else {
        builder.penalize(0.2, "No clear point of beginning found");
        let start = DescriptionPoint::new(
            config.origin,
            "Assumed Starting Point",
            PointKind::Reference,
        );
        (text, start)
    };
    builder.push_point(start.clone());

    // One extra call tells us whether the cap cut anything off.
    let limit = config.max_traversal_steps.saturating_add(1);
    let mut calls = parse_calls(remainder, limit)?;
    if calls.is_empty() && remainder.len() < text.len() {
        log::debug!("No calls after the point of beginning marker, scanning full text");
        calls = parse_calls(text, limit)?;
    }
    if calls.len() > config.max_traversal_steps {
        calls.truncate(config.max_traversal_steps);
        builder.penalize(
            0.1,
            format!(
                "Traversal truncated after {} steps",
                config.max_traversal_steps
            ),
        );
    }

    log::debug!("Matched {} traversal calls", calls.len());

    let mut previous = start;
    for (index, call) in calls.iter().enumerate() {
        let step = index + 1;
        let angle = call.bearing.angle(config.bearing_resolution)?;
        let coordinate = advance(
            previous.coordinate,
            angle,
            call.distance.value,
            config.traversal_scale,
        );
        if !coordinate.is_finite() {
            return Err(ParseError::NonFiniteCoordinate { step });
        }

        let bearing = call.bearing.label();
        let distance = call.distance.label();
        log::trace!("Step {step}: {bearing} {distance} -> {coordinate:?}");

        let point = DescriptionPoint::new(coordinate, format!("Point {step}"), PointKind::Corner);
        builder.push_point(point.clone());
        builder.push_segment(DescriptionSegment {
            start: previous,
            end: point.clone(),
            kind: SegmentKind::Boundary,
            bearing: Some(bearing),
            distance: Some(distance),
        });
        previous = point;
    }

    if builder.can_form_polygon() {
        builder.try_assemble_polygon();
    } else {
        builder.penalize(0.3, "Not enough points to create a polygon");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use parcel_trace_legal_description_models::DescriptionDialect;

    use super::*;
    use crate::bearing::DistanceUnit;

    fn run(text: &str, config: &ParserConfig) -> (DescriptionBuilder, Result<(), ParseError>) {
        let mut builder = DescriptionBuilder::new(text, DescriptionDialect::MetesAndBounds);
        let outcome = extract(text, config, &mut builder);
        (builder, outcome)
    }

    #[test]
    fn parses_spelled_out_calls() {
        let calls = parse_calls(
            "thence North 45 degrees East 150 feet thence South 300 feet",
            10,
        )
        .unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].bearing.label(), "N45°E");
        assert_eq!(calls[0].distance.label(), "150 feet");
        assert_eq!(calls[1].bearing.label(), "S");
        assert_eq!(calls[1].distance.label(), "300 feet");
    }

    #[test]
    fn parses_compact_calls() {
        let calls = parse_calls("N45°E 100 ft; S 10°30'15\" W, 20.5 m", 10).unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].bearing.label(), "N45°E");
        assert_eq!(calls[0].distance.unit, DistanceUnit::Feet);
        assert_eq!(calls[1].bearing.label(), "S10°30'15\"W");
        assert_eq!(calls[1].distance.label(), "20.5 meters");
    }

    #[test]
    fn parses_distance_of_phrase_and_separators() {
        let calls = parse_calls("thence S 89° W a distance of 1,320 feet", 10).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].bearing.label(), "S89°W");
        assert!((calls[0].distance.value - 1320.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ignores_words_that_only_contain_directions() {
        let calls = parse_calls("the westerly line of the tract is 40 feet wide", 10).unwrap();
        assert!(calls.is_empty());
    }

    #[test]
    fn ignores_two_letter_words_before_distances() {
        let calls = parse_calls("we 40 feet; so 20 feet; ew 10 ft", 10).unwrap();
        assert!(calls.is_empty());
    }

    #[test]
    fn keeps_adjacent_quadrant_pairs() {
        let calls = parse_calls("thence NE 100 ft thence Southwest 50 feet", 10).unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].bearing.label(), "NE");
        assert_eq!(calls[1].bearing.label(), "SW");
    }

    #[test]
    fn builds_polygon_from_traversal() {
        let text = "Commencing at the point of beginning thence North 45 degrees East 150 feet \
                    thence South 300 feet thence West 100 feet";
        let (builder, outcome) = run(text, &ParserConfig::default());
        outcome.unwrap();
        assert_eq!(builder.points().len(), 4);
        assert_eq!(builder.segments().len(), 3);
        assert!(builder.has_polygon());
        assert!(builder.issues().is_empty());

        let result = builder.finish();
        assert_eq!(result.points[0].label.as_deref(), Some("Point of Beginning"));
        assert_eq!(result.points[3].label.as_deref(), Some("Point 3"));
        assert_eq!(result.segments[0].start, result.points[0]);
        assert_eq!(result.segments[2].end, result.points[3]);
        assert_eq!(result.segments[0].bearing.as_deref(), Some("N45°E"));
        assert_eq!(result.polygon.unwrap().exterior().len(), 5);
    }

    #[test]
    fn synthesizes_planar_offsets() {
        let config = ParserConfig::default();
        let (builder, _) = run("POB thence North 100 feet thence East 100 feet", &config);
        let points = builder.points();
        let step = 100.0 * config.traversal_scale;

        assert!((points[1].coordinate.lat - (config.origin.lat + step)).abs() < 1e-12);
        assert!((points[1].coordinate.lng - config.origin.lng).abs() < 1e-12);
        assert!((points[2].coordinate.lng - (config.origin.lng + step)).abs() < 1e-12);
    }

    #[test]
    fn missing_point_of_beginning_costs_confidence() {
        let text = "thence North 45 degrees East 150 feet thence South 300 feet";
        let (builder, outcome) = run(text, &ParserConfig::default());
        outcome.unwrap();
        assert!(builder.issues().contains(&"No clear point of beginning found".to_string()));
        assert_eq!(builder.points()[0].kind, PointKind::Reference);
        assert!((builder.confidence() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn too_few_points_costs_confidence() {
        let (builder, outcome) = run("POB thence North 100 feet", &ParserConfig::default());
        outcome.unwrap();
        assert_eq!(builder.points().len(), 2);
        assert!(!builder.has_polygon());
        assert_eq!(builder.issues(), ["Not enough points to create a polygon"]);
        assert!((builder.confidence() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn trailing_point_of_beginning_scans_full_text() {
        let text = "Beginning at an iron pin; thence N 45° E 100 ft; thence S 45° E 100 ft; \
                    thence West 141 ft to the point of beginning";
        let (builder, outcome) = run(text, &ParserConfig::default());
        outcome.unwrap();
        assert_eq!(builder.points().len(), 4);
        assert!(builder.has_polygon());
    }

    #[test]
    fn caps_traversal_steps() {
        let config = ParserConfig {
            max_traversal_steps: 2,
            ..ParserConfig::default()
        };
        let text = "POB thence North 10 feet thence East 10 feet thence South 10 feet";
        let (builder, outcome) = run(text, &config);
        outcome.unwrap();
        assert_eq!(builder.segments().len(), 2);
        assert!(builder.issues().contains(&"Traversal truncated after 2 steps".to_string()));
        assert!((builder.confidence() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn infinite_distance_is_an_error() {
        let huge = format!("1{}", "0".repeat(400));
        let text = format!("POB thence North {huge} feet");
        let (builder, outcome) = run(&text, &ParserConfig::default());
        assert!(matches!(
            outcome,
            Err(ParseError::NonFiniteCoordinate { step: 1 })
        ));
        assert_eq!(builder.points().len(), 1);
    }
}
