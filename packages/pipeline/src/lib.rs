#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query orchestration for the fire impact map.
//!
//! One incident is processed start-to-finish, synchronously from the
//! caller's point of view: validate the radius, geocode the address,
//! resolve the weather window, load and filter the facility dataset, ask
//! the oracle for spread predictions, and hand back a single report.
//!
//! Propagation policy: geocoding failure is the only hard stop among the
//! external calls — everything downstream needs a resolved incident
//! location. Weather and prediction failures degrade the report with an
//! explanatory [`StageStatus`] instead of aborting; the filtered facility
//! list is always returned once the incident is resolved.

pub mod collaborators;

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use fire_map_facilities::DatasetError;
use fire_map_facilities_models::{FacilityRecord, RankedFacility};
use fire_map_geocoder::GeocodeError;
use fire_map_geometry::GeoPoint;
use fire_map_prediction::{PredictionRequest, prompt};
use fire_map_prediction_models::{ParsedPrediction, SpreadZone};
use fire_map_weather::{GridCell, ObservationWindow, WeatherObservation};
use serde::Serialize;
use thiserror::Error;

pub use collaborators::{AddressResolver, Collaborators, WeatherSource};

/// Stand-in radius for zones produced from re-resolved area labels, where
/// the oracle gave no radius of its own.
pub const AREA_LABEL_RADIUS_M: f64 = 300.0;

/// Errors that halt a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The search radius is not a positive number of meters. Checked
    /// before any network call.
    #[error("Search radius must be a positive number of meters, got {radius_m}")]
    InvalidRadius {
        /// The rejected input.
        radius_m: f64,
    },

    /// The incident address could not be resolved to a location.
    #[error("Address not found: {address}")]
    GeocodeNotFound {
        /// The unresolvable address.
        address: String,
    },

    /// The geocoding call itself failed.
    #[error("Geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),

    /// The facility dataset could not be loaded.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

/// A recovered degradation, recorded in the report instead of failing
/// the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StageStatus {
    /// The weather feed could not be read; prediction ran without it.
    WeatherUnavailable {
        /// What went wrong.
        message: String,
    },
    /// The oracle call failed; the report carries no spread zones.
    PredictionUnavailable {
        /// What went wrong.
        message: String,
    },
    /// The oracle answered, but with output matching neither supported
    /// shape; the report carries no spread zones.
    PredictionUnparsable,
    /// An area label from the oracle did not resolve to a location and
    /// was dropped.
    AreaLabelDropped {
        /// The dropped place name.
        label: String,
    },
}

/// One incident query as entered by the user.
#[derive(Debug, Clone)]
pub struct IncidentQuery {
    /// Free-text address of the reported fire.
    pub address: String,
    /// Search radius around the incident, meters.
    pub radius_m: f64,
    /// Reported fire time (KST).
    pub fire_time: DateTime<FixedOffset>,
}

/// Pipeline configuration. Explicit and passed in — no globals.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Path to the facility inventory CSV.
    pub dataset_path: PathBuf,
    /// Regional qualifier prefixed to oracle area labels before
    /// re-resolution, e.g. `경상남도 양산시`.
    pub region_qualifier: String,
    /// Maximum facility lines included in the oracle prompt.
    pub facility_prompt_cap: usize,
}

/// Everything one query produced, including partial results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    /// Resolved incident location.
    pub incident: GeoPoint,
    /// The radius that was searched, meters.
    pub radius_m: f64,
    /// Weather observation, when the feed was readable.
    pub weather: Option<WeatherObservation>,
    /// Facilities within the radius, closest first.
    pub facilities: Vec<RankedFacility>,
    /// The single nearest facility, when any facility has a known
    /// position.
    pub nearest: Option<RankedFacility>,
    /// Predicted spread zones; empty when prediction degraded or the
    /// oracle predicted no spread.
    pub zones: Vec<SpreadZone>,
    /// Recovered degradations, in pipeline order.
    pub statuses: Vec<StageStatus>,
}

/// Runs one query end-to-end, loading the dataset from
/// [`QueryConfig::dataset_path`].
///
/// # Errors
///
/// Returns [`QueryError`] for the hard-stop cases: invalid radius,
/// unresolvable address, failed geocoding call, unreadable dataset.
pub async fn run_query(
    config: &QueryConfig,
    collaborators: &Collaborators<'_>,
    query: &IncidentQuery,
) -> Result<ImpactReport, QueryError> {
    // Radius is validated before any I/O happens.
    if !query.radius_m.is_finite() || query.radius_m <= 0.0 {
        return Err(QueryError::InvalidRadius {
            radius_m: query.radius_m,
        });
    }

    let records = fire_map_facilities::dataset::load_dataset(&config.dataset_path)?;
    run_query_with_records(config, collaborators, query, &records).await
}

/// Runs one query against an already-loaded dataset.
///
/// # Errors
///
/// Returns [`QueryError`] for the hard-stop cases; see [`run_query`].
pub async fn run_query_with_records(
    config: &QueryConfig,
    collaborators: &Collaborators<'_>,
    query: &IncidentQuery,
    records: &[FacilityRecord],
) -> Result<ImpactReport, QueryError> {
    if !query.radius_m.is_finite() || query.radius_m <= 0.0 {
        return Err(QueryError::InvalidRadius {
            radius_m: query.radius_m,
        });
    }

    let incident = collaborators
        .resolver
        .resolve(&query.address)
        .await?
        .ok_or_else(|| QueryError::GeocodeNotFound {
            address: query.address.clone(),
        })?;
    log::info!(
        "Incident resolved to ({:.5}, {:.5})",
        incident.latitude(),
        incident.longitude()
    );

    let mut statuses = Vec::new();

    let window = ObservationWindow::for_time(query.fire_time);
    let grid = GridCell::from_point(incident);
    let weather = match collaborators.weather.observe(grid, window).await {
        Ok(observation) => Some(observation),
        Err(e) => {
            log::warn!("Proceeding without weather: {e}");
            statuses.push(StageStatus::WeatherUnavailable {
                message: e.to_string(),
            });
            None
        }
    };

    let facilities = fire_map_facilities::filter_within_radius(records, incident, query.radius_m);
    let nearest = fire_map_facilities::nearest(records, incident);
    log::info!(
        "{} of {} facilities within {:.0} m",
        facilities.len(),
        records.len(),
        query.radius_m
    );

    let zones = predict_zones(
        config,
        collaborators,
        incident,
        query.fire_time,
        weather.as_ref(),
        &facilities,
        &mut statuses,
    )
    .await;

    Ok(ImpactReport {
        incident,
        radius_m: query.radius_m,
        weather,
        facilities,
        nearest,
        zones,
        statuses,
    })
}

/// Runs the prediction stage. Never fails: every problem becomes a status
/// and an empty (or shortened) zone list.
async fn predict_zones(
    config: &QueryConfig,
    collaborators: &Collaborators<'_>,
    incident: GeoPoint,
    fire_time: DateTime<FixedOffset>,
    weather: Option<&WeatherObservation>,
    facilities: &[RankedFacility],
    statuses: &mut Vec<StageStatus>,
) -> Vec<SpreadZone> {
    let request = PredictionRequest {
        incident,
        fire_time,
        weather,
        facilities,
        facility_cap: config.facility_prompt_cap,
    };
    let user_prompt = prompt::build_prompt(&request);

    let raw = match collaborators
        .oracle
        .predict(prompt::SYSTEM_PROMPT, &user_prompt)
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Proceeding without spread prediction: {e}");
            statuses.push(StageStatus::PredictionUnavailable {
                message: e.to_string(),
            });
            return Vec::new();
        }
    };

    match fire_map_prediction::parse::classify_response(&raw) {
        ParsedPrediction::Geometry(zones) => {
            log::info!("Oracle returned {} spread zones", zones.len());
            zones
        }
        ParsedPrediction::AreaLabels(labels) => {
            log::info!("Oracle returned {} area labels", labels.len());
            resolve_area_labels(config, collaborators, &labels, statuses).await
        }
        ParsedPrediction::Unparsable(raw) => {
            log::warn!(
                "Oracle output matched no supported shape ({} chars); no spread prediction",
                raw.len()
            );
            statuses.push(StageStatus::PredictionUnparsable);
            Vec::new()
        }
    }
}

/// Re-resolves oracle area labels to zones with the fixed stand-in
/// radius. Labels that fail to resolve are dropped with a status, never
/// fatal.
async fn resolve_area_labels(
    config: &QueryConfig,
    collaborators: &Collaborators<'_>,
    labels: &[String],
    statuses: &mut Vec<StageStatus>,
) -> Vec<SpreadZone> {
    let mut zones = Vec::with_capacity(labels.len());

    for label in labels {
        let qualified = format!("{} {label}", config.region_qualifier);
        match collaborators.resolver.resolve(&qualified).await {
            Ok(Some(center)) => zones.push(SpreadZone {
                label: label.clone(),
                center,
                radius_m: AREA_LABEL_RADIUS_M,
            }),
            Ok(None) => {
                log::warn!("Dropping unresolvable area label {label:?}");
                statuses.push(StageStatus::AreaLabelDropped {
                    label: label.clone(),
                });
            }
            Err(e) => {
                log::warn!("Dropping area label {label:?} after geocode error: {e}");
                statuses.push(StageStatus::AreaLabelDropped {
                    label: label.clone(),
                });
            }
        }
    }

    zones
}
