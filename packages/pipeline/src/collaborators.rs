//! Collaborator seams for the query pipeline.
//!
//! The pipeline talks to its three external services through traits so
//! tests can run against doubles. The production implementations are thin
//! wrappers over the client crates.

use fire_map_geocoder::{GeocodeError, GeocoderConfig};
use fire_map_geometry::GeoPoint;
use fire_map_weather::{
    GridCell, ObservationWindow, WeatherConfig, WeatherError, WeatherObservation,
};

pub use fire_map_prediction::PredictionOracle;

/// Resolves free-text addresses and place names to coordinates.
#[async_trait::async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolves a query to its first matching point; `Ok(None)` when the
    /// provider has no match.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the request or parsing fails.
    async fn resolve(&self, query: &str) -> Result<Option<GeoPoint>, GeocodeError>;
}

/// Fetches the observation for a forecast grid cell and window.
#[async_trait::async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetches and normalizes one observation.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError`] if the feed is unavailable or unreadable.
    async fn observe(
        &self,
        grid: GridCell,
        window: ObservationWindow,
    ) -> Result<WeatherObservation, WeatherError>;
}

/// Production resolver backed by the Naver geocode API.
pub struct NaverResolver {
    client: reqwest::Client,
    config: GeocoderConfig,
}

impl NaverResolver {
    /// Creates a resolver with its own HTTP client.
    #[must_use]
    pub fn new(config: GeocoderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl AddressResolver for NaverResolver {
    async fn resolve(&self, query: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        fire_map_geocoder::geocode(&self.client, &self.config, query).await
    }
}

/// Production weather source backed by the KMA observation feed.
pub struct KmaWeatherSource {
    client: reqwest::Client,
    config: WeatherConfig,
}

impl KmaWeatherSource {
    /// Creates a weather source with its own HTTP client.
    #[must_use]
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl WeatherSource for KmaWeatherSource {
    async fn observe(
        &self,
        grid: GridCell,
        window: ObservationWindow,
    ) -> Result<WeatherObservation, WeatherError> {
        fire_map_weather::fetch_observation(&self.client, &self.config, grid, window).await
    }
}

/// The three external collaborators a query needs.
pub struct Collaborators<'a> {
    /// Address resolution (also used for area-label re-resolution).
    pub resolver: &'a dyn AddressResolver,
    /// Weather observation feed.
    pub weather: &'a dyn WeatherSource,
    /// Spread prediction oracle.
    pub oracle: &'a dyn PredictionOracle,
}
