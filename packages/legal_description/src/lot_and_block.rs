//! Lot-and-block descriptions.
//!
//! Geometry for a platted lot needs the recorded plat, which this parser
//! does not have. The lot, block and subdivision references are pulled out
//! so a caller can look the plat up; no points are produced.

use std::sync::LazyLock;

use parcel_trace_legal_description_models::LotBlock;
use regex::Regex;

use crate::accumulator::DescriptionBuilder;

static LOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\blot\s+(?:no\.?\s*)?(?P<lot>\d+[a-z]?)\b").expect("valid regex")
});

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:block|blk)\.?\s+(?:no\.?\s*)?(?P<block>\d+[a-z]?)\b")
        .expect("valid regex")
});

/// Capitalized words ending in a plat keyword, e.g. "Sunnyside Addition".
static SUBDIVISION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?P<name>(?:[A-Z][\w'&\-]*\s+)+(?i:addition|subdivision|estates|heights|plat))\b",
    )
    .expect("valid regex")
});

/// Pulls lot/block references out of `text` and records the dialect as
/// not fully supported.
pub fn extract(text: &str, builder: &mut DescriptionBuilder) {
    let lot_block = LotBlock {
        lot: capture(&LOT_RE, text, "lot"),
        block: capture(&BLOCK_RE, text, "block"),
        subdivision: capture(&SUBDIVISION_RE, text, "name"),
    };
    log::debug!("Lot/block references: {lot_block:?}");

    if lot_block != LotBlock::default() {
        builder.set_lot_block(lot_block);
    }
    builder.note("Lot and block description parsing not fully implemented");
}

fn capture(re: &Regex, text: &str, group: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.name(group).map(|m| m.as_str().trim().to_string()))
}

#[cfg(test)]
mod tests {
    use parcel_trace_legal_description_models::DescriptionDialect;

    use super::*;

    fn run(text: &str) -> parcel_trace_legal_description_models::ParsedLegalDescription {
        let mut builder = DescriptionBuilder::new(text, DescriptionDialect::LotAndBlock);
        extract(text, &mut builder);
        builder.finish()
    }

    #[test]
    fn extracts_lot_block_and_subdivision() {
        let result = run("Lot 7, Block 3, Sunnyside Addition");
        let lot_block = result.lot_block.unwrap();
        assert_eq!(lot_block.lot.as_deref(), Some("7"));
        assert_eq!(lot_block.block.as_deref(), Some("3"));
        assert_eq!(lot_block.subdivision.as_deref(), Some("Sunnyside Addition"));
    }

    #[test]
    fn keeps_stub_semantics() {
        let result = run("Lot 12A of Green Acres Subdivision");
        assert!(result.points.is_empty());
        assert!(result.segments.is_empty());
        assert!(result.township.is_empty());
        assert!((result.confidence - 0.4).abs() < f64::EPSILON);
        assert_eq!(
            result.issues,
            ["Lot and block description parsing not fully implemented"]
        );

        let lot_block = result.lot_block.unwrap();
        assert_eq!(lot_block.lot.as_deref(), Some("12A"));
        assert_eq!(lot_block.block, None);
        assert_eq!(lot_block.subdivision.as_deref(), Some("Green Acres Subdivision"));
    }

    #[test]
    fn omits_empty_references() {
        let result = run("as shown on the recorded plat");
        assert!(result.lot_block.is_none());
    }
}
