//! KMA DFS forecast grid conversion.
//!
//! The observation feed is keyed by cells of a 5 km Lambert conformal
//! conic grid, not by lat/lon. This is the standard DFS conversion
//! published by the KMA alongside the API guide.

use fire_map_geometry::GeoPoint;
use serde::Serialize;

/// Earth radius used by the DFS projection, km.
const EARTH_RADIUS_KM: f64 = 6371.008_77;
/// Grid spacing, km.
const GRID_KM: f64 = 5.0;
/// First standard parallel, degrees.
const STANDARD_PARALLEL_1: f64 = 30.0;
/// Second standard parallel, degrees.
const STANDARD_PARALLEL_2: f64 = 60.0;
/// Projection origin longitude, degrees.
const ORIGIN_LON: f64 = 126.0;
/// Projection origin latitude, degrees.
const ORIGIN_LAT: f64 = 38.0;
/// Grid x of the origin cell.
const ORIGIN_X: f64 = 43.0;
/// Grid y of the origin cell.
const ORIGIN_Y: f64 = 136.0;

/// A cell of the KMA forecast grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    /// Grid column (`nx` request parameter).
    pub nx: i32,
    /// Grid row (`ny` request parameter).
    pub ny: i32,
}

impl GridCell {
    /// Converts a WGS84 point to its forecast grid cell.
    #[must_use]
    #[allow(clippy::suboptimal_flops, clippy::cast_possible_truncation)]
    pub fn from_point(point: GeoPoint) -> Self {
        let re = EARTH_RADIUS_KM / GRID_KM;
        let slat1 = STANDARD_PARALLEL_1.to_radians();
        let slat2 = STANDARD_PARALLEL_2.to_radians();
        let olon = ORIGIN_LON.to_radians();
        let olat = ORIGIN_LAT.to_radians();

        let sn = ((slat1.cos() / slat2.cos()).ln())
            / ((std::f64::consts::FRAC_PI_4 + slat2 * 0.5).tan()
                / (std::f64::consts::FRAC_PI_4 + slat1 * 0.5).tan())
            .ln();
        let sf =
            (std::f64::consts::FRAC_PI_4 + slat1 * 0.5).tan().powf(sn) * slat1.cos() / sn;
        let ro = re * sf / (std::f64::consts::FRAC_PI_4 + olat * 0.5).tan().powf(sn);

        let ra = re * sf
            / (std::f64::consts::FRAC_PI_4 + point.latitude().to_radians() * 0.5)
                .tan()
                .powf(sn);

        let mut theta = point.longitude().to_radians() - olon;
        if theta > std::f64::consts::PI {
            theta -= 2.0 * std::f64::consts::PI;
        }
        if theta < -std::f64::consts::PI {
            theta += 2.0 * std::f64::consts::PI;
        }
        theta *= sn;

        Self {
            nx: (ra * theta.sin() + ORIGIN_X + 0.5).floor() as i32,
            ny: (ro - ra * theta.cos() + ORIGIN_Y + 0.5).floor() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fire_map_geometry::GeoPoint;

    #[test]
    fn seoul_maps_to_the_published_reference_cell() {
        // Reference pair from the KMA API guide's sample conversion.
        let cell =
            GridCell::from_point(GeoPoint::new(37.579_871, 126.989_352).unwrap());
        assert_eq!(cell, GridCell { nx: 60, ny: 127 });
    }

    #[test]
    fn origin_maps_to_the_origin_cell() {
        let cell = GridCell::from_point(GeoPoint::new(38.0, 126.0).unwrap());
        assert_eq!(cell, GridCell { nx: 43, ny: 136 });
    }

    #[test]
    fn moving_east_increases_nx() {
        let west = GridCell::from_point(GeoPoint::new(35.3, 128.0).unwrap());
        let east = GridCell::from_point(GeoPoint::new(35.3, 129.0).unwrap());
        assert!(east.nx > west.nx);
    }
}
