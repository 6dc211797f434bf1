//! Parser configuration.
//!
//! The defaults mirror `config/default.toml`, which is embedded at compile
//! time so callers can inspect or copy it. Overrides are loaded with
//! [`ParserConfig::from_toml_str`]; any key left out keeps its default.

use parcel_trace_legal_description_models::Coordinate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The default configuration, as shipped in `config/default.toml`.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

const DEFAULT_ORIGIN: Coordinate = Coordinate::new(39.8283, -98.5795);
const DEFAULT_TRAVERSAL_SCALE: f64 = 0.000_01;
const DEFAULT_SURVEY_OFFSET_PER_UNIT: f64 = 0.1;
const DEFAULT_SURVEY_SQUARE_SIZE: f64 = 0.05;
const DEFAULT_MAX_TRAVERSAL_STEPS: usize = 1000;

/// Errors raised while loading a [`ParserConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML could not be parsed into a configuration.
    #[error("invalid parser config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid parser config: {0}")]
    Invalid(String),
}

/// How a bearing call is turned into a direction angle.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BearingResolution {
    /// Snap to the 8-point compass table; degree values are ignored.
    #[default]
    Compass,
    /// Use the degree/minute/second value of quadrant bearings
    /// (`N 45°30' E`), falling back to the compass table otherwise.
    Quadrant,
}

/// Settings for coordinate synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Local origin for the point of beginning and the township/range
    /// base point.
    pub origin: Coordinate,
    /// Degrees per unit of traversal distance.
    pub traversal_scale: f64,
    /// Degrees per township/range number.
    pub survey_offset_per_unit: f64,
    /// Edge length in degrees of the township placeholder square.
    pub survey_square_size: f64,
    /// Maximum number of traversal calls followed per description.
    pub max_traversal_steps: usize,
    /// How bearing calls become angles.
    pub bearing_resolution: BearingResolution,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            traversal_scale: DEFAULT_TRAVERSAL_SCALE,
            survey_offset_per_unit: DEFAULT_SURVEY_OFFSET_PER_UNIT,
            survey_square_size: DEFAULT_SURVEY_SQUARE_SIZE,
            max_traversal_steps: DEFAULT_MAX_TRAVERSAL_STEPS,
            bearing_resolution: BearingResolution::default(),
        }
    }
}

impl ParserConfig {
    /// Parses and validates a configuration from TOML.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Toml`] if the TOML is malformed or has wrongly typed
    ///   values
    /// * [`ConfigError::Invalid`] if a value is out of range
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.origin.is_finite() {
            return Err(ConfigError::Invalid("origin must be finite".to_string()));
        }
        for (name, value) in [
            ("traversal_scale", self.traversal_scale),
            ("survey_square_size", self.survey_square_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !self.survey_offset_per_unit.is_finite() || self.survey_offset_per_unit < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "survey_offset_per_unit must be zero or positive, got {}",
                self.survey_offset_per_unit
            )));
        }
        if self.max_traversal_steps == 0 {
            return Err(ConfigError::Invalid(
                "max_traversal_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
