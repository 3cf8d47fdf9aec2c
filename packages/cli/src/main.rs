#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the fire impact map.
//!
//! Runs one incident query end-to-end — geocode, weather, facility
//! filter, spread prediction — prints a ranked summary, and writes the
//! renderer's `GeoJSON` payload. Collaborator credentials come from the
//! environment; everything else is explicit flags.

mod env_config;

use std::path::PathBuf;

use chrono::{NaiveTime, Utc};
use clap::Parser;
use fire_map_pipeline::{Collaborators, IncidentQuery, QueryConfig, run_query};
use fire_map_prediction::prompt::DEFAULT_FACILITY_CAP;
use fire_map_weather::kst;

/// Locate cable facilities around a fire incident and predict spread.
#[derive(Parser, Debug)]
#[command(name = "fire_map_cli")]
struct Args {
    /// Free-text incident address, e.g. "경상남도 양산시 중앙로 39".
    #[arg(long)]
    address: String,

    /// Search radius around the incident, meters.
    #[arg(long)]
    radius: f64,

    /// Fire time as HH:MM (KST, today). Defaults to the current time.
    #[arg(long)]
    time: Option<String>,

    /// Path to the facility inventory CSV.
    #[arg(long, default_value = "data/cable_inventory.csv")]
    dataset: PathBuf,

    /// Where to write the GeoJSON map payload.
    #[arg(long, default_value = "fire_map.geojson")]
    output: PathBuf,

    /// Regional qualifier prefixed to predicted area labels before
    /// re-resolution.
    #[arg(long, default_value = "경상남도 양산시")]
    region: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let now = Utc::now().with_timezone(&kst());
    let fire_time = match &args.time {
        Some(text) => {
            let time = NaiveTime::parse_from_str(text, "%H:%M")
                .map_err(|e| format!("invalid --time {text:?}: {e}"))?;
            now.date_naive()
                .and_time(time)
                .and_local_timezone(kst())
                .single()
                .ok_or_else(|| format!("ambiguous --time {text:?}"))?
        }
        None => now,
    };

    let resolver = fire_map_pipeline::collaborators::NaverResolver::new(env_config::geocoder()?);
    let weather = fire_map_pipeline::collaborators::KmaWeatherSource::new(env_config::weather()?);
    let oracle = env_config::oracle()?;

    let config = QueryConfig {
        dataset_path: args.dataset.clone(),
        region_qualifier: args.region.clone(),
        facility_prompt_cap: DEFAULT_FACILITY_CAP,
    };
    let query = IncidentQuery {
        address: args.address.clone(),
        radius_m: args.radius,
        fire_time,
    };
    let collaborators = Collaborators {
        resolver: &resolver,
        weather: &weather,
        oracle: &oracle,
    };

    let report = run_query(&config, &collaborators, &query).await?;

    println!(
        "Incident at ({:.5}, {:.5}), {} facilities within {:.0} m:",
        report.incident.latitude(),
        report.incident.longitude(),
        report.facilities.len(),
        report.radius_m,
    );
    for ranked in &report.facilities {
        println!(
            "  {:>7.0} m  {}  {} {}{}",
            ranked.distance_m,
            ranked.record.cable_id,
            ranked.record.district,
            ranked.record.neighborhood,
            if ranked.record.critical { "  [critical]" } else { "" },
        );
    }

    if report.zones.is_empty() {
        println!("No spread zones predicted.");
    } else {
        println!("Predicted spread zones:");
        for zone in &report.zones {
            println!(
                "  {}  ({:.5}, {:.5})  r={:.0} m",
                zone.label,
                zone.center.latitude(),
                zone.center.longitude(),
                zone.radius_m,
            );
        }
    }

    for status in &report.statuses {
        log::warn!("Degraded: {status:?}");
    }

    let payload = fire_map_map::build_map(report.incident, &report.facilities, &report.zones);
    std::fs::write(&args.output, serde_json::to_string_pretty(&payload)?)?;
    println!("Wrote map payload to {}", args.output.display());

    Ok(())
}
