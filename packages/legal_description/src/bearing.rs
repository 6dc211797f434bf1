//! Bearings, distances and the planar traversal step.
//!
//! Bearings resolve to an angle measured clockwise from north, in radians.
//! The default resolution snaps every bearing to the 8-point compass table
//! ([`Compass`]); quadrant resolution honors the degree value of bearings
//! such as `N 45°30' E`.
//!
//! [`advance`] applies one call as a flat offset:
//! `Δlat = cos(angle) × distance × scale`, `Δlng = sin(angle) × distance × scale`.
//! This is a visual placeholder, not a geodesic computation.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use parcel_trace_legal_description_models::Coordinate;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::ParseError;
use crate::config::BearingResolution;

/// One of the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinal {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
}

impl Cardinal {
    /// Reads a direction token by its first letter (`"North"`, `"n"`,
    /// `"N."` all give [`Cardinal::North`]).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::from_letter(token.trim().chars().next()?)
    }

    /// Reads a single direction letter, in either case.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'S' => Some(Self::South),
            'E' => Some(Self::East),
            'W' => Some(Self::West),
            _ => None,
        }
    }

    /// Single-letter abbreviation.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }

    /// North or south.
    #[must_use]
    pub const fn is_meridional(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

/// The 8-point compass.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
pub enum Compass {
    /// North, 0.
    N,
    /// Northeast, π/4.
    NE,
    /// East, π/2.
    E,
    /// Southeast, 3π/4.
    SE,
    /// South, π.
    S,
    /// Southwest, 5π/4.
    SW,
    /// West, 3π/2.
    W,
    /// Northwest, 7π/4.
    NW,
}

impl Compass {
    /// All points, clockwise from north.
    pub const ALL: &[Self] = &[
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Angle clockwise from north, in radians.
    #[must_use]
    pub const fn angle(self) -> f64 {
        match self {
            Self::N => 0.0,
            Self::NE => FRAC_PI_4,
            Self::E => FRAC_PI_2,
            Self::SE => 3.0 * FRAC_PI_4,
            Self::S => PI,
            Self::SW => 5.0 * FRAC_PI_4,
            Self::W => 3.0 * FRAC_PI_2,
            Self::NW => 7.0 * FRAC_PI_4,
        }
    }

    /// Combines a primary and optional secondary direction.
    ///
    /// The north/south component always comes first (`East` + `North` is
    /// [`Compass::NE`]). A secondary on the same axis as the primary is
    /// ignored.
    #[must_use]
    pub const fn from_cardinals(primary: Cardinal, secondary: Option<Cardinal>) -> Self {
        let (meridional, lateral) = match secondary {
            Some(secondary) if primary.is_meridional() != secondary.is_meridional() => {
                if primary.is_meridional() {
                    (Some(primary), Some(secondary))
                } else {
                    (Some(secondary), Some(primary))
                }
            }
            _ if primary.is_meridional() => (Some(primary), None),
            _ => (None, Some(primary)),
        };

        match (meridional, lateral) {
            (Some(Cardinal::North), Some(Cardinal::East)) => Self::NE,
            (Some(Cardinal::North), Some(Cardinal::West)) => Self::NW,
            (Some(Cardinal::South), Some(Cardinal::East)) => Self::SE,
            (Some(Cardinal::South), Some(Cardinal::West)) => Self::SW,
            (Some(Cardinal::South), _) => Self::S,
            (None, Some(Cardinal::East)) => Self::E,
            (None, Some(Cardinal::West)) => Self::W,
            _ => Self::N,
        }
    }
}

/// Angle for a bearing label such as `"N45°E"`, `"S"` or `"NW"`.
///
/// Only the direction letters matter: the first gives the primary
/// direction and the next the secondary. Labels with no direction letter
/// resolve to 0.
#[must_use]
pub fn compass_angle(label: &str) -> f64 {
    let mut letters = label.chars().filter_map(Cardinal::from_letter);
    letters.next().map_or(0.0, |primary| {
        Compass::from_cardinals(primary, letters.next()).angle()
    })
}

/// A bearing call as written in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bearing {
    /// First direction of the call.
    pub primary: Cardinal,
    /// Degrees, verbatim.
    pub degrees: Option<String>,
    /// Minutes, verbatim.
    pub minutes: Option<String>,
    /// Seconds, verbatim.
    pub seconds: Option<String>,
    /// Direction the angle is turned toward (the `E` in `N45°E`).
    pub secondary: Option<Cardinal>,
}

impl Bearing {
    /// Canonical label, e.g. `N45°E`, `S10°30'W` or `S`.
    #[must_use]
    pub fn label(&self) -> String {
        let mut label = String::new();
        label.push(self.primary.letter());
        if let Some(degrees) = &self.degrees {
            label.push_str(degrees);
            label.push('°');
            if let Some(minutes) = &self.minutes {
                label.push_str(minutes);
                label.push('\'');
            }
            if let Some(seconds) = &self.seconds {
                label.push_str(seconds);
                label.push('"');
            }
        }
        if let Some(secondary) = self.secondary {
            label.push(secondary.letter());
        }
        label
    }

    /// Direction angle in radians, clockwise from north.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidNumber`] if a degree, minute or second
    /// value is not a number.
    pub fn angle(&self, resolution: BearingResolution) -> Result<f64, ParseError> {
        match resolution {
            BearingResolution::Compass => Ok(compass_angle(&self.label())),
            BearingResolution::Quadrant => self.quadrant_angle(),
        }
    }

    fn quadrant_angle(&self) -> Result<f64, ParseError> {
        let (Some(degrees), Some(secondary)) = (&self.degrees, self.secondary) else {
            return Ok(compass_angle(&self.label()));
        };
        if !self.primary.is_meridional() || secondary.is_meridional() {
            return Ok(compass_angle(&self.label()));
        }

        let mut theta = parse_number(degrees)?;
        if let Some(minutes) = &self.minutes {
            theta += parse_number(minutes)? / 60.0;
        }
        if let Some(seconds) = &self.seconds {
            theta += parse_number(seconds)? / 3600.0;
        }
        let theta = theta.to_radians();

        let angle = match (self.primary, secondary) {
            (Cardinal::North, Cardinal::East) => theta,
            (Cardinal::North, _) => TAU - theta,
            (_, Cardinal::East) => PI - theta,
            _ => PI + theta,
        };
        Ok(angle.rem_euclid(TAU))
    }
}

/// Unit of a distance call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum DistanceUnit {
    /// Feet (`feet`, `foot`, `ft`).
    Feet,
    /// Meters (`meters`, `metres`, `m`).
    Meters,
    /// Gunter's chains.
    Chains,
    /// Rods.
    Rods,
}

impl DistanceUnit {
    /// Reads a unit token as written in the text.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "feet" | "foot" | "ft" => Some(Self::Feet),
            "meters" | "meter" | "metres" | "metre" | "m" => Some(Self::Meters),
            "chains" | "chain" | "ch" => Some(Self::Chains),
            "rods" | "rod" => Some(Self::Rods),
            _ => None,
        }
    }
}

/// A distance call.
#[derive(Debug, Clone, PartialEq)]
pub struct Distance {
    /// Numeric value, in the call's own unit.
    pub value: f64,
    /// The number as written (e.g. `"1,320.5"`).
    pub raw: String,
    /// Unit of the call.
    pub unit: DistanceUnit,
}

impl Distance {
    /// Reads a distance from its number and unit tokens.
    ///
    /// # Errors
    ///
    /// * [`ParseError::MalformedCall`] if the unit is unknown
    /// * [`ParseError::InvalidNumber`] if the number does not parse
    pub fn parse(raw: &str, unit: &str) -> Result<Self, ParseError> {
        let unit = DistanceUnit::from_token(unit).ok_or_else(|| ParseError::MalformedCall {
            call: format!("{raw} {unit}"),
        })?;
        Ok(Self {
            value: parse_number(raw)?,
            raw: raw.to_string(),
            unit,
        })
    }

    /// Canonical label, e.g. `150 feet`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.raw, self.unit)
    }
}

/// Parses a decimal number, ignoring thousands separators.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if `raw` is not a number.
pub fn parse_number(raw: &str) -> Result<f64, ParseError> {
    raw.replace(',', "")
        .parse()
        .map_err(|_| ParseError::InvalidNumber {
            value: raw.to_string(),
        })
}

/// Moves `from` by `distance × scale` in the direction of `angle`.
#[must_use]
pub fn advance(from: Coordinate, angle: f64, distance: f64, scale: f64) -> Coordinate {
    from.offset(
        angle.cos() * distance * scale,
        angle.sin() * distance * scale,
    )
}
