#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Parsed legal description types.
//!
//! A [`ParsedLegalDescription`] is the single result produced by the legal
//! description parser: the original text, the township/range/section
//! breakdown, the reconstructed points and boundary segments, an optional
//! closed polygon, and a confidence score with the issues that lowered it.
//!
//! These types carry no parsing logic. They serialize to the JSON shape
//! returned to API clients unchanged.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Confidence of a result that never went through a dialect extractor.
pub const UNDETECTED_CONFIDENCE: f64 = 0.1;

/// A `(latitude, longitude)` pair.
///
/// No real-world bounds are enforced. Coordinates produced by the parser
/// are local placeholders, not georeferenced positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns this coordinate shifted by the given deltas.
    #[must_use]
    pub fn offset(self, d_lat: f64, d_lng: f64) -> Self {
        Self {
            lat: self.lat + d_lat,
            lng: self.lng + d_lng,
        }
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Returns the `[longitude, latitude]` pair used by polygon rings.
    #[must_use]
    pub const fn to_lng_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// The legal description style a text was classified as.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DescriptionDialect {
    /// Point of beginning followed by bearing and distance calls.
    MetesAndBounds,
    /// Township/range/section grid references (PLSS style).
    RectangularSurvey,
    /// Lot and block references into a recorded plat.
    LotAndBlock,
    /// Unstructured prose with no recognizable survey language.
    Informal,
}

impl DescriptionDialect {
    /// Every dialect, in classifier precedence order.
    pub const ALL: &[Self] = &[
        Self::RectangularSurvey,
        Self::MetesAndBounds,
        Self::LotAndBlock,
        Self::Informal,
    ];

    /// Confidence a result of this dialect starts at before any issue is
    /// recorded.
    #[must_use]
    pub const fn baseline_confidence(self) -> f64 {
        match self {
            Self::MetesAndBounds => 0.7,
            Self::RectangularSurvey => 0.6,
            Self::LotAndBlock => 0.4,
            Self::Informal => 0.2,
        }
    }
}

/// What a [`DescriptionPoint`] represents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    /// A boundary corner.
    Corner,
    /// A point part way along a boundary.
    Midpoint,
    /// A reference point that is not itself on the boundary.
    Reference,
    /// Any kind not known to this version.
    #[serde(untagged)]
    Other(String),
}

impl PointKind {
    /// The serialized name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Corner => "corner",
            Self::Midpoint => "midpoint",
            Self::Reference => "reference",
            Self::Other(kind) => kind,
        }
    }
}

impl std::fmt::Display for PointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point reconstructed from a legal description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionPoint {
    /// Position of the point.
    #[serde(flatten)]
    pub coordinate: Coordinate,
    /// Human-readable label (e.g. "Point 3", "NE Corner").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// What the point represents.
    pub kind: PointKind,
}

impl DescriptionPoint {
    /// Creates a labeled point.
    #[must_use]
    pub fn new(coordinate: Coordinate, label: impl Into<String>, kind: PointKind) -> Self {
        Self {
            coordinate,
            label: Some(label.into()),
            kind,
        }
    }
}

/// What a [`DescriptionSegment`] represents.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum SegmentKind {
    /// A call along the parcel boundary.
    Boundary,
    /// A tie line to a reference point.
    Reference,
    /// A line extended past the boundary.
    Extension,
}

/// One step of a traversal, from `start` to `end`.
///
/// `bearing` and `distance` are the canonical labels rendered from the
/// source call (e.g. `"N45°E"`, `"150 feet"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionSegment {
    /// Where the step starts.
    pub start: DescriptionPoint,
    /// Where the step ends.
    pub end: DescriptionPoint,
    /// What the segment represents.
    pub kind: SegmentKind,
    /// Bearing label, when the step came from a bearing call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<String>,
    /// Distance label, when the step came from a distance call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
}

/// A single-ring polygon in `[longitude, latitude]` order.
///
/// Serializes as a `GeoJSON` `Polygon` geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Polygon {
    coordinates: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    /// Wraps a closed ring.
    ///
    /// Returns `None` unless the ring has at least 4 positions and its
    /// first and last positions are identical.
    #[must_use]
    pub fn from_closed_ring(ring: Vec<[f64; 2]>) -> Option<Self> {
        if ring.len() < 4 || ring.first() != ring.last() {
            return None;
        }
        Some(Self {
            coordinates: vec![ring],
        })
    }

    /// The outer ring, closing position included.
    #[must_use]
    pub fn exterior(&self) -> &[[f64; 2]] {
        self.coordinates.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// All rings of the polygon (only ever one for parsed descriptions).
    #[must_use]
    pub fn rings(&self) -> &[Vec<[f64; 2]>] {
        &self.coordinates
    }
}

/// Lot, block and subdivision references pulled from a lot-and-block
/// description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotBlock {
    /// Lot number or identifier.
    pub lot: Option<String>,
    /// Block number or identifier.
    pub block: Option<String>,
    /// Subdivision, addition or plat name.
    pub subdivision: Option<String>,
}

/// The result of parsing one legal description.
///
/// `township`, `range`, `section` and `description` are always present
/// (the first three empty when the dialect has no such notion). Everything
/// else is filled in by the parser as it goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLegalDescription {
    /// Township with its direction letter (e.g. "12N").
    pub township: String,
    /// Range with its direction letter (e.g. "5E").
    pub range: String,
    /// Section number.
    pub section: String,
    /// The original input, verbatim.
    pub description: String,
    /// The dialect the text was classified as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<DescriptionDialect>,
    /// Points in traversal order.
    #[serde(default)]
    pub points: Vec<DescriptionPoint>,
    /// One segment per traversal step.
    #[serde(default)]
    pub segments: Vec<DescriptionSegment>,
    /// Closed polygon, present once at least 3 points exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Polygon>,
    /// Confidence in `[0, 1]`.
    #[serde(default = "undetected_confidence")]
    pub confidence: f64,
    /// Human-readable parsing issues, in the order they were found.
    #[serde(default)]
    pub issues: Vec<String>,
    /// Lot/block references, for lot-and-block descriptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_block: Option<LotBlock>,
}

const fn undetected_confidence() -> f64 {
    UNDETECTED_CONFIDENCE
}

impl ParsedLegalDescription {
    /// Creates an empty result for `description` at the undetected
    /// confidence level.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            township: String::new(),
            range: String::new(),
            section: String::new(),
            description: description.into(),
            dialect: None,
            points: Vec::new(),
            segments: Vec::new(),
            polygon: None,
            confidence: UNDETECTED_CONFIDENCE,
            issues: Vec::new(),
            lot_block: None,
        }
    }

    /// Whether the parser reconstructed a polygon.
    #[must_use]
    pub const fn has_polygon(&self) -> bool {
        self.polygon.is_some()
    }
}

impl Default for ParsedLegalDescription {
    fn default() -> Self {
        Self::new(String::new())
    }
}
