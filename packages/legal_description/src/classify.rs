//! Legal description dialect classification.
//!
//! Probes run against normalized text in a fixed order. Rectangular-survey
//! cues are checked first because township/range text routinely contains
//! direction words that would otherwise read as bearings.

use std::sync::LazyLock;

use parcel_trace_legal_description_models::DescriptionDialect;
use regex::Regex;

/// Township/range/section vocabulary, or abbreviated forms such as `T12N`,
/// `T. 12 N.`, `Twp. 3 S`, `R 5 E`, `Rng. 14 W` and `Sec. 9`.
static RECTANGULAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \b(?:township|range|section|quarter)\b
        | \bt(?:wp)?\.?\s*\d+\s*[ns]\b
        | \br(?:ng)?\.?\s*\d+\s*[ew]\b
        | \bsec\.?\s*\d+\b
        ",
    )
    .expect("valid regex")
});

/// A cardinal direction token, spelled out or abbreviated.
static DIRECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:north|south|east|west|n|s|e|w)(?:\b|\d)").expect("valid regex")
});

/// A degree marker.
static DEGREE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bdegrees?\b|°").expect("valid regex"));

/// A distance unit.
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\b|\d)(?:feet|foot|ft|meters?|metres?|m|chains?|rods?)\b").expect("valid regex")
});

/// Lot, block, subdivision or plat references.
static LOT_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\blot\s+\d+|\bblock\s+\d+|\bsubdivision\b|\bplat\b").expect("valid regex")
});

/// Lower-cases and collapses runs of whitespace into single spaces.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classifies a legal description into one of the four dialects.
///
/// Total and deterministic: text matching no probe is
/// [`DescriptionDialect::Informal`].
#[must_use]
pub fn classify(text: &str) -> DescriptionDialect {
    let normalized = normalize(text);

    let dialect = if RECTANGULAR_RE.is_match(&normalized) {
        DescriptionDialect::RectangularSurvey
    } else if is_metes_and_bounds(&normalized) {
        DescriptionDialect::MetesAndBounds
    } else if LOT_BLOCK_RE.is_match(&normalized) {
        DescriptionDialect::LotAndBlock
    } else {
        DescriptionDialect::Informal
    };

    log::debug!("Classified legal description as {dialect}");
    dialect
}

fn is_metes_and_bounds(normalized: &str) -> bool {
    DIRECTION_RE.is_match(normalized)
        && DEGREE_RE.is_match(normalized)
        && UNIT_RE.is_match(normalized)
}
