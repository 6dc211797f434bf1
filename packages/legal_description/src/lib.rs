#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Legal description parsing and geometry reconstruction.
//!
//! Takes the free-form text of a property legal description and rebuilds
//! an approximate parcel outline from it:
//!
//! 1. [`classify`] decides which dialect the text is written in
//!    (metes and bounds, township/range, lot and block, or informal).
//! 2. The matching extractor pulls out what it can: bearing/distance calls
//!    for [`metes_and_bounds`], township/range numbers for [`rectangular`],
//!    plat references for [`lot_and_block`].
//! 3. Points are closed into a polygon once at least three exist.
//!
//! Every stage reports problems through a [`DescriptionBuilder`] that lowers
//! confidence and records issues. Parsing never fails: the worst outcome
//! is an empty result with confidence 0 and an issue explaining why.
//!
//! The coordinates are local placeholders anchored at a configurable origin
//! ([`ParserConfig`]); they are meant for visualization, not for surveying.

pub mod accumulator;
pub mod bearing;
pub mod classify;
pub mod config;
pub mod informal;
pub mod lot_and_block;
pub mod metes_and_bounds;
pub mod rectangular;

pub use accumulator::DescriptionBuilder;
pub use classify::classify;
pub use config::{BearingResolution, ConfigError, ParserConfig};
pub use parcel_trace_legal_description_models::{DescriptionDialect, ParsedLegalDescription};

/// Errors raised inside an extractor.
///
/// These never leave [`LegalDescriptionParser::parse`]; they are turned
/// into an issue and a confidence of 0.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A number in the text could not be read.
    #[error("invalid number '{value}'")]
    InvalidNumber {
        /// The offending text.
        value: String,
    },

    /// A call matched but one of its parts could not be interpreted.
    #[error("malformed call '{call}'")]
    MalformedCall {
        /// The offending text.
        call: String,
    },

    /// A traversal step produced a NaN or infinite coordinate.
    #[error("traversal step {step} produced a non-finite coordinate")]
    NonFiniteCoordinate {
        /// 1-based index of the step.
        step: usize,
    },
}

/// Parses legal descriptions with a fixed configuration.
///
/// Holds no per-call state, so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct LegalDescriptionParser {
    config: ParserConfig,
}

impl LegalDescriptionParser {
    /// Creates a parser with the given configuration.
    #[must_use]
    pub const fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses one legal description.
    ///
    /// Always returns a complete result; failures show up as issues and
    /// lowered confidence.
    #[must_use]
    pub fn parse(&self, text: &str) -> ParsedLegalDescription {
        let dialect = classify(text);
        let mut builder = DescriptionBuilder::new(text, dialect);

        let outcome = match dialect {
            DescriptionDialect::MetesAndBounds => {
                metes_and_bounds::extract(text, &self.config, &mut builder)
            }
            DescriptionDialect::RectangularSurvey => {
                rectangular::extract(text, &self.config, &mut builder)
            }
            DescriptionDialect::LotAndBlock => {
                lot_and_block::extract(text, &mut builder);
                Ok(())
            }
            DescriptionDialect::Informal => {
                informal::extract(&mut builder);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            log::warn!("Failed to parse {dialect} legal description: {e}");
            builder.fail(format!("Error parsing description: {e}"));
        }

        if builder.can_form_polygon() && !builder.has_polygon() && !builder.polygon_attempted() {
            builder.try_assemble_polygon();
        }

        let result = builder.finish();
        log::debug!(
            "Parsed {dialect} legal description: {} points, polygon={}, confidence={:.2}",
            result.points.len(),
            result.has_polygon(),
            result.confidence
        );
        result
    }
}

/// Parses one legal description with the default configuration.
#[must_use]
pub fn parse_legal_description(text: &str) -> ParsedLegalDescription {
    LegalDescriptionParser::default().parse(text)
}
