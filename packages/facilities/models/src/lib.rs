#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Facility record types shared across the fire impact map.
//!
//! A facility is one underground cable segment from the regional inventory
//! export. Records are loaded read-only once per query and discarded
//! afterwards; nothing in the core mutates them.

use fire_map_geometry::{GeoLine, GeoPoint};
use serde::Serialize;

/// One cable segment from the facility inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRecord {
    /// Cable management number — the inventory's unique identifier.
    pub cable_id: String,
    /// Raw geometry text as exported (`LINESTRING (lon lat, ...)`).
    pub geometry_text: String,
    /// Parsed geometry. `None` when the geometry text was malformed; such
    /// records have no known position and are excluded from every
    /// distance-based operation, but remain listable.
    pub geometry: Option<GeoLine>,
    /// Whether this is a critical trunk route.
    pub critical: bool,
    /// City/district name (시군구).
    pub district: String,
    /// Town/neighborhood name (읍면동).
    pub neighborhood: String,
    /// Number of copper/fiber cores in the segment, when recorded.
    pub core_count: Option<u32>,
}

impl FacilityRecord {
    /// The single point standing in for this segment's position, used for
    /// all distance ranking. `None` when the geometry failed to parse.
    #[must_use]
    pub fn representative_point(&self) -> Option<GeoPoint> {
        self.geometry.as_ref().map(GeoLine::representative_point)
    }
}

/// A facility annotated with its computed distance from a reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedFacility {
    /// The underlying inventory record.
    pub record: FacilityRecord,
    /// Great-circle distance in meters from the reference point to the
    /// record's representative point.
    pub distance_m: f64,
}
