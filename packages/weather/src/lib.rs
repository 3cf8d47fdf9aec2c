#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Weather snapshot resolution for the fire impact map.
//!
//! Maps an incident point and timestamp to the nearest available KMA
//! ultra-short-term observation: the timestamp is truncated to the top of
//! the hour and stepped back one hour (the observation feed only carries
//! the prior completed hour), the point is converted to the KMA forecast
//! grid, and the returned category list is normalized into the five codes
//! the spread predictor understands. Unknown categories are dropped
//! silently so new feed codes never break a query.
//!
//! Weather is an optional input: every failure here is recoverable and
//! callers proceed without an observation.

pub mod client;
pub mod grid;
pub mod window;

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

pub use client::{WeatherConfig, fetch_observation};
pub use grid::GridCell;
pub use window::{ObservationWindow, kst};

/// Errors from weather observation fetching.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

/// The observation categories the predictor consumes, in the fixed order
/// used for deterministic prompt construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WeatherCategory {
    /// Temperature, °C (feed code `T1H`).
    Temperature,
    /// Precipitation over the last hour, mm (feed code `RN1`).
    Precipitation1h,
    /// Relative humidity, % (feed code `REH`).
    Humidity,
    /// Wind direction, degrees (feed code `VEC`).
    WindDirection,
    /// Wind speed, m/s (feed code `WSD`).
    WindSpeed,
}

impl WeatherCategory {
    /// All known categories, in prompt order.
    pub const ALL: &[Self] = &[
        Self::Temperature,
        Self::Precipitation1h,
        Self::Humidity,
        Self::WindDirection,
        Self::WindSpeed,
    ];

    /// Maps a feed category code to a known category, `None` for unknown
    /// codes (which callers drop silently).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "T1H" => Some(Self::Temperature),
            "RN1" => Some(Self::Precipitation1h),
            "REH" => Some(Self::Humidity),
            "VEC" => Some(Self::WindDirection),
            "WSD" => Some(Self::WindSpeed),
            _ => None,
        }
    }

    /// The feed's category code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Temperature => "T1H",
            Self::Precipitation1h => "RN1",
            Self::Humidity => "REH",
            Self::WindDirection => "VEC",
            Self::WindSpeed => "WSD",
        }
    }

    /// Human-readable label with unit, used in the prediction prompt.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature (°C)",
            Self::Precipitation1h => "1-hour precipitation (mm)",
            Self::Humidity => "relative humidity (%)",
            Self::WindDirection => "wind direction (deg)",
            Self::WindSpeed => "wind speed (m/s)",
        }
    }
}

/// A normalized weather observation for one hour-aligned window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    /// The hour-aligned window this observation belongs to.
    pub window: ObservationWindow,
    /// Category values, keyed by the known categories only.
    pub values: BTreeMap<WeatherCategory, f64>,
}

impl WeatherObservation {
    /// The value for one category, if the feed reported it.
    #[must_use]
    pub fn value(&self, category: WeatherCategory) -> Option<f64> {
        self.values.get(&category).copied()
    }
}
