#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Polygon assembly for reconstructed legal descriptions.
//!
//! Turns an ordered list of traversal points into a closed single-ring
//! [`Polygon`] in `[longitude, latitude]` order, and bridges those
//! polygons to [`geo`] for centroid computation and to [`geojson`] for
//! map export (see [`feature`]).

pub mod feature;

use geo::Centroid;
use parcel_trace_legal_description_models::{Coordinate, Polygon};

/// Minimum number of distinct points a polygon needs.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Errors produced while assembling a polygon.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Fewer points than a polygon needs.
    #[error("need at least 3 points to create a polygon, found {found}")]
    InsufficientPoints {
        /// Number of points supplied.
        found: usize,
    },

    /// A point had a NaN or infinite component.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Position of the offending point in the input.
        index: usize,
    },

    /// The ring collapsed to fewer than 3 distinct positions.
    #[error("ring has only {distinct} distinct positions")]
    DegenerateRing {
        /// Number of distinct positions before closure.
        distinct: usize,
    },
}

/// Assembles a closed polygon from points in traversal order.
///
/// Each point becomes a `[lng, lat]` position. The first position is
/// appended again unless the traversal already ends on it.
///
/// # Errors
///
/// * [`GeometryError::InsufficientPoints`] if fewer than 3 points are given
/// * [`GeometryError::NonFiniteCoordinate`] if any point is NaN or infinite
/// * [`GeometryError::DegenerateRing`] if the points do not span at least 3
///   distinct positions
pub fn assemble(points: &[Coordinate]) -> Result<Polygon, GeometryError> {
    if points.len() < MIN_POLYGON_POINTS {
        return Err(GeometryError::InsufficientPoints {
            found: points.len(),
        });
    }

    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(GeometryError::NonFiniteCoordinate { index });
    }

    let mut ring: Vec<[f64; 2]> = points.iter().map(|p| p.to_lng_lat()).collect();
    if ring.first() != ring.last() {
        ring.push(ring[0]);
    }

    let distinct = count_distinct(&ring[..ring.len() - 1]);
    if distinct < MIN_POLYGON_POINTS {
        return Err(GeometryError::DegenerateRing { distinct });
    }

    log::debug!("Assembled polygon ring with {} positions", ring.len());

    Polygon::from_closed_ring(ring).ok_or(GeometryError::DegenerateRing { distinct })
}

fn count_distinct(positions: &[[f64; 2]]) -> usize {
    let mut seen: Vec<[f64; 2]> = Vec::with_capacity(positions.len());
    for position in positions {
        if !seen.contains(position) {
            seen.push(*position);
        }
    }
    seen.len()
}

/// Converts a parsed polygon into a [`geo::Polygon`] (x = longitude,
/// y = latitude).
#[must_use]
pub fn to_geo_polygon(polygon: &Polygon) -> geo::Polygon<f64> {
    let exterior: Vec<(f64, f64)> = polygon.exterior().iter().map(|p| (p[0], p[1])).collect();
    geo::Polygon::new(geo::LineString::from(exterior), vec![])
}

/// Planar centroid of the polygon.
#[must_use]
pub fn centroid(polygon: &Polygon) -> Option<Coordinate> {
    to_geo_polygon(polygon)
        .centroid()
        .map(|point| Coordinate::new(point.y(), point.x()))
}
