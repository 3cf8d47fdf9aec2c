#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spread prediction result types.
//!
//! The prediction oracle is non-deterministic and occasionally malformed,
//! so its output is classified into an explicit tagged union rather than
//! branched on ad hoc: geometry, area labels, or unparsable. "No zones"
//! is a valid outcome in both usable modes.

use fire_map_geometry::GeoPoint;
use serde::Serialize;

/// A predicted circular region the fire may reach by a time horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadZone {
    /// Time horizon label, e.g. `+1h`.
    pub label: String,
    /// Center of the predicted region.
    pub center: GeoPoint,
    /// Radius of the predicted region, meters.
    pub radius_m: f64,
}

/// Classified oracle output.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedPrediction {
    /// Structured geometry: zones with verbatim centers and radii,
    /// ordered by time-horizon label.
    Geometry(Vec<SpreadZone>),
    /// Free-text place names to be re-resolved through the geocoder.
    AreaLabels(Vec<String>),
    /// Output matching neither shape, kept raw for logging.
    Unparsable(String),
}

impl ParsedPrediction {
    /// Whether this output yields anything drawable without further
    /// resolution work.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        matches!(self, Self::Geometry(_) | Self::AreaLabels(_))
    }
}
