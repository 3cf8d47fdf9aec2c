//! Deterministic prompt construction.
//!
//! Identical inputs must produce byte-identical prompts: weather lines
//! follow the fixed category order, facilities keep their distance-ranked
//! order and are capped, and every float is printed at fixed precision.
//! The size bound keeps the request well under the oracle's context
//! limit even for dense urban datasets.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset};
use fire_map_facilities_models::RankedFacility;
use fire_map_geometry::GeoPoint;
use fire_map_weather::{WeatherCategory, WeatherObservation};

/// Default cap on facility lines in the prompt.
pub const DEFAULT_FACILITY_CAP: usize = 20;

/// The system instruction sent with every prediction request.
pub const SYSTEM_PROMPT: &str = "You are an expert in urban fire spread prediction. \
Using the provided fire location, time, weather data, and nearby underground cable \
facilities, predict the fire spread areas 1, 2, and 3 hours after ignition. \
Respond with only a JSON object keyed by time horizon (\"+1h\", \"+2h\", \"+3h\"), \
each value an object with \"lat\", \"lon\" (WGS84 degrees) and \"radius\" (meters). \
If no meaningful spread is expected, respond with an empty JSON object.";

/// Everything the oracle gets to see for one query.
#[derive(Debug, Clone)]
pub struct PredictionRequest<'a> {
    /// Resolved fire location.
    pub incident: GeoPoint,
    /// Reported fire time (KST).
    pub fire_time: DateTime<FixedOffset>,
    /// Weather observation, when the resolver succeeded.
    pub weather: Option<&'a WeatherObservation>,
    /// Facilities within the query radius, already ranked by distance.
    pub facilities: &'a [RankedFacility],
    /// Maximum facility lines to include.
    pub facility_cap: usize,
}

/// Renders the user prompt for a request.
#[must_use]
pub fn build_prompt(request: &PredictionRequest<'_>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Fire location: lat {:.5}, lon {:.5}",
        request.incident.latitude(),
        request.incident.longitude()
    );
    let _ = writeln!(
        out,
        "Fire time: {}",
        request.fire_time.format("%Y-%m-%d %H:%M %z")
    );

    match request.weather {
        Some(observation) => {
            let _ = writeln!(
                out,
                "Weather observation ({} {}):",
                observation.window.base_date(),
                observation.window.base_time()
            );
            for category in WeatherCategory::ALL {
                if let Some(value) = observation.value(*category) {
                    let _ = writeln!(out, "- {}: {value:.1}", category.label());
                }
            }
        }
        None => {
            let _ = writeln!(out, "Weather observation: unavailable");
        }
    }

    let _ = writeln!(
        out,
        "Underground cable facilities within the query radius ({} total):",
        request.facilities.len()
    );
    for ranked in request.facilities.iter().take(request.facility_cap) {
        let _ = writeln!(
            out,
            "- {}: {:.0} m away, {} {}, {} cores{}",
            ranked.record.cable_id,
            ranked.distance_m,
            ranked.record.district,
            ranked.record.neighborhood,
            ranked
                .record
                .core_count
                .map_or_else(|| "?".to_string(), |n| n.to_string()),
            if ranked.record.critical {
                ", critical route"
            } else {
                ""
            }
        );
    }
    if request.facilities.len() > request.facility_cap {
        let _ = writeln!(
            out,
            "... and {} more segments",
            request.facilities.len() - request.facility_cap
        );
    }

    out.push_str("Predict the fire spread as described.");
    out
}
