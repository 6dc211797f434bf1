//! Informal descriptions ("the old Miller farm by the river").
//!
//! Nothing geometric can be recovered from prose without a geocoder, so
//! the result only records why it is empty.

use crate::accumulator::DescriptionBuilder;

/// Records the dialect as not fully supported.
pub fn extract(builder: &mut DescriptionBuilder) {
    builder.note("Informal description parsing not fully implemented");
}
