#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address resolution for the fire impact map.
//!
//! Converts a free-text Korean address to a [`fire_map_geometry::GeoPoint`]
//! using the Naver Cloud geocoding API. Single-shot, best-effort: only the
//! first match is consumed, and "no match" is a normal `Ok(None)` outcome
//! that the caller turns into its own not-found error.
//!
//! The same client re-resolves place names returned by the spread
//! predictor's area-label mode, with a regional qualifier prefixed to
//! disambiguate short names like "물금읍".

pub mod naver;

use thiserror::Error;

pub use naver::{GeocoderConfig, geocode};

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
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
