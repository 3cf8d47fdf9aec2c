#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Facility dataset loading and proximity queries.
//!
//! Loads the cable inventory CSV read-only, annotates each record with its
//! great-circle distance from an incident point, and answers the two
//! queries the impact pipeline needs: "everything within this radius,
//! closest first" and "the single nearest segment". A full linear scan per
//! query is deliberate — the inventory is a few thousand rows.

pub mod dataset;

use fire_map_facilities_models::{FacilityRecord, RankedFacility};
use fire_map_geometry::{GeoPoint, distance_m};
use thiserror::Error;

/// Errors from dataset loading.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV structure itself was unreadable (not a per-row problem).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Annotates a record with its distance from `center`, or `None` when the
/// record's geometry is unknown.
#[must_use]
pub fn annotate(record: &FacilityRecord, center: GeoPoint) -> Option<RankedFacility> {
    record.representative_point().map(|point| RankedFacility {
        record: record.clone(),
        distance_m: distance_m(center, point),
    })
}

/// Returns the records whose representative point lies within `radius_m`
/// of `center`, sorted ascending by distance.
///
/// Records with unknown geometry are skipped. The sort is stable: records
/// at identical distances keep their dataset order, so repeated calls with
/// identical inputs yield identical output.
#[must_use]
pub fn filter_within_radius(
    records: &[FacilityRecord],
    center: GeoPoint,
    radius_m: f64,
) -> Vec<RankedFacility> {
    let mut hits: Vec<RankedFacility> = records
        .iter()
        .filter_map(|record| annotate(record, center))
        .filter(|ranked| ranked.distance_m <= radius_m)
        .collect();

    hits.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    hits
}

/// Returns the record nearest to `center`, or `None` when no record has a
/// known geometry. Ties resolve to the earliest dataset row.
#[must_use]
pub fn nearest(records: &[FacilityRecord], center: GeoPoint) -> Option<RankedFacility> {
    records
        .iter()
        .filter_map(|record| annotate(record, center))
        .min_by(|a, b| a.distance_m.total_cmp(&b.distance_m))
}
