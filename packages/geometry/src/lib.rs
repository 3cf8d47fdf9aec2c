#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Point and polyline geometry model for the fire impact map.
//!
//! Facilities in the cable inventory are stored as `LINESTRING` text in
//! lon/lat order. This crate parses that format into typed geometry with
//! the coordinate order swapped to (lat, lon) at the parse boundary —
//! everything downstream works in (lat, lon) exclusively — and provides
//! the great-circle distance used for all radius filtering and ranking.

pub mod parse;

use serde::Serialize;
use thiserror::Error;

pub use parse::parse_linestring;

/// Errors from geometry construction and parsing.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A coordinate is outside the valid WGS84 range.
    #[error("Coordinate out of range: latitude {latitude}, longitude {longitude}")]
    OutOfRange {
        /// The offending latitude.
        latitude: f64,
        /// The offending longitude.
        longitude: f64,
    },

    /// Geometry text could not be parsed.
    #[error("Malformed geometry: {message}")]
    Malformed {
        /// Description of the parsing failure.
        message: String,
    },
}

/// A WGS84 coordinate in (latitude, longitude) order, degrees.
///
/// Immutable value type. Construction validates the coordinate ranges, so
/// a `GeoPoint` in hand is always a plausible location on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Creates a point, validating latitude ∈ [-90, 90] and
    /// longitude ∈ [-180, 180].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OutOfRange`] if either coordinate is
    /// outside its valid range or is not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeometryError> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(GeometryError::OutOfRange {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// An ordered, non-empty polyline of [`GeoPoint`]s.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoLine {
    points: Vec<GeoPoint>,
}

impl GeoLine {
    /// Creates a polyline from at least one point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Malformed`] if `points` is empty.
    pub fn new(points: Vec<GeoPoint>) -> Result<Self, GeometryError> {
        if points.is_empty() {
            return Err(GeometryError::Malformed {
                message: "polyline requires at least one point".to_string(),
            });
        }
        Ok(Self { points })
    }

    /// All points in order.
    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// The point at the index midpoint, `⌊(n-1)/2⌋`.
    ///
    /// This is NOT the geometric centroid and not the closest point on the
    /// line to anything: the cable inventory ranks lines by a single
    /// representative vertex, tie-breaking toward the earlier vertex for
    /// even-length lines. A 2-point line yields its first point.
    #[must_use]
    pub fn midpoint(&self) -> GeoPoint {
        self.points[(self.points.len() - 1) / 2]
    }

    /// The first vertex.
    #[must_use]
    pub fn first_point(&self) -> GeoPoint {
        self.points[0]
    }

    /// The last vertex.
    #[must_use]
    pub fn last_point(&self) -> GeoPoint {
        self.points[self.points.len() - 1]
    }

    /// The single vertex used to approximate this line's position for
    /// distance ranking. Currently the index [`midpoint`](Self::midpoint);
    /// a single-point line reduces to that point.
    #[must_use]
    pub fn representative_point(&self) -> GeoPoint {
        self.midpoint()
    }
}

/// Great-circle (haversine) distance between two points, in meters.
#[must_use]
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    use geo::{Distance, Haversine};

    // geo points are (x, y) = (lon, lat)
    Haversine.distance(
        geo::Point::new(a.longitude(), a.latitude()),
        geo::Point::new(b.longitude(), b.latitude()),
    )
}

/// Distance from `center` to a line's representative point, in meters.
#[must_use]
pub fn distance_to_line_m(center: GeoPoint, line: &GeoLine) -> f64 {
    distance_m(center, line.representative_point())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(GeoPoint::new(90.1, 0.0).is_err());
        assert!(GeoPoint::new(-90.1, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(35.3, 129.0).is_ok());
    }

    #[test]
    fn rejects_empty_polyline() {
        assert!(GeoLine::new(Vec::new()).is_err());
    }

    #[test]
    fn midpoint_of_two_points_is_the_first() {
        let line = GeoLine::new(vec![point(35.0, 127.0), point(35.001, 127.001)]).unwrap();
        assert_eq!(line.midpoint(), point(35.0, 127.0));
    }

    #[test]
    fn midpoint_of_odd_length_line_is_the_middle_vertex() {
        let line = GeoLine::new(vec![
            point(35.0, 127.0),
            point(35.001, 127.001),
            point(35.002, 127.002),
        ])
        .unwrap();
        assert_eq!(line.midpoint(), point(35.001, 127.001));
    }

    #[test]
    fn single_point_line_is_its_own_representative() {
        let line = GeoLine::new(vec![point(35.3, 129.0)]).unwrap();
        assert_eq!(line.representative_point(), point(35.3, 129.0));
        assert_eq!(line.first_point(), line.last_point());
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = point(35.0, 127.0);
        assert!(distance_m(p, p).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_one_hundredth_degree_latitude() {
        // 0.01° of latitude is ~1112 m anywhere on the globe.
        let d = distance_m(point(35.0, 127.0), point(35.01, 127.0));
        assert!((d - 1112.0).abs() < 1112.0 * 0.05, "got {d}");
    }
}
