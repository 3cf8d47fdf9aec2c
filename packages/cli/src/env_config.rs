//! Collaborator configuration from environment variables.
//!
//! The library crates take explicit config structs; this is the one place
//! that reads the process environment to build them.

use fire_map_geocoder::GeocoderConfig;
use fire_map_prediction::OpenAiOracle;
use fire_map_weather::WeatherConfig;

/// Default Naver geocode endpoint.
const NAVER_GEOCODE_URL: &str = "https://naveropenapi.apigw.ntruss.com/map-geocode/v2/geocode";
/// Default oracle model.
const DEFAULT_AI_MODEL: &str = "gpt-4o";

fn require(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("{name} environment variable not set"))
}

/// Builds the geocoder config from `NAVER_CLIENT_ID` / `NAVER_CLIENT_SECRET`
/// (and optional `NAVER_GEOCODE_URL`).
///
/// # Errors
///
/// Returns a message naming the missing variable.
pub fn geocoder() -> Result<GeocoderConfig, String> {
    Ok(GeocoderConfig {
        client_id: require("NAVER_CLIENT_ID")?,
        client_secret: require("NAVER_CLIENT_SECRET")?,
        base_url: std::env::var("NAVER_GEOCODE_URL")
            .unwrap_or_else(|_| NAVER_GEOCODE_URL.to_string()),
    })
}

/// Builds the weather config from `WEATHER_API_KEY` / `WEATHER_BASE_URL`.
///
/// # Errors
///
/// Returns a message naming the missing variable.
pub fn weather() -> Result<WeatherConfig, String> {
    Ok(WeatherConfig {
        api_key: require("WEATHER_API_KEY")?,
        base_url: require("WEATHER_BASE_URL")?,
    })
}

/// Builds the prediction oracle from `OPENAI_API_KEY` (and optional
/// `AI_MODEL`).
///
/// # Errors
///
/// Returns a message naming the missing variable.
pub fn oracle() -> Result<OpenAiOracle, String> {
    Ok(OpenAiOracle::new(
        require("OPENAI_API_KEY")?,
        std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
    ))
}
