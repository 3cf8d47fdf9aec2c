#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fire spread prediction through an LLM oracle.
//!
//! Builds a deterministic, size-bounded prompt from the incident, the
//! weather observation, and the distance-ranked nearby facilities, sends
//! it to the oracle behind the [`PredictionOracle`] trait, and classifies
//! the reply with [`parse::classify_response`]. The oracle is treated as
//! non-deterministic and occasionally malformed; nothing it returns is
//! trusted before validation, and an unusable reply degrades the query
//! instead of failing it.

pub mod oracle;
pub mod parse;
pub mod prompt;

use thiserror::Error;

pub use oracle::{OpenAiOracle, PredictionOracle};
pub use prompt::PredictionRequest;

/// Errors from oracle invocation.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// HTTP request to the oracle failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific error.
    #[error("Provider error: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },
}
