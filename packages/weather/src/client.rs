//! KMA ultra-short-term observation client.
//!
//! Fetches the `getUltraSrtNcst`-shaped JSON feed for one grid cell and
//! window, then normalizes the category list. The feed is optional input
//! to a query, so the caller treats every error here as "no weather".

use std::collections::BTreeMap;
use std::time::Duration;

use crate::{GridCell, ObservationWindow, WeatherCategory, WeatherError, WeatherObservation};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Backoff before the single retry.
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Weather feed configuration, built by the caller from its environment.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Service key issued for the observation API.
    pub api_key: String,
    /// Base URL of the observation endpoint.
    pub base_url: String,
}

/// Fetches and normalizes the observation for one grid cell and window.
///
/// Retries once after a short backoff; the observation feed is flaky
/// around the top of the hour.
///
/// # Errors
///
/// Returns [`WeatherError`] if both attempts fail or the response does not
/// contain an item list.
pub async fn fetch_observation(
    client: &reqwest::Client,
    config: &WeatherConfig,
    grid: GridCell,
    window: ObservationWindow,
) -> Result<WeatherObservation, WeatherError> {
    let mut last_err = None;

    for attempt in 0..2 {
        if attempt > 0 {
            tokio::time::sleep(RETRY_BACKOFF).await;
            log::debug!("Retrying weather fetch for {window:?}");
        }

        match fetch_once(client, config, grid, window).await {
            Ok(observation) => return Ok(observation),
            Err(e) => {
                log::warn!("Weather fetch attempt {} failed: {e}", attempt + 1);
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or_else(|| WeatherError::Parse {
        message: "weather fetch failed without an error".to_string(),
    }))
}

async fn fetch_once(
    client: &reqwest::Client,
    config: &WeatherConfig,
    grid: GridCell,
    window: ObservationWindow,
) -> Result<WeatherObservation, WeatherError> {
    let base_date = window.base_date();
    let base_time = window.base_time();
    let nx = grid.nx.to_string();
    let ny = grid.ny.to_string();

    let resp = client
        .get(&config.base_url)
        .timeout(REQUEST_TIMEOUT)
        .query(&[
            ("serviceKey", config.api_key.as_str()),
            ("numOfRows", "10"),
            ("pageNo", "1"),
            ("dataType", "JSON"),
            ("base_date", base_date.as_str()),
            ("base_time", base_time.as_str()),
            ("nx", nx.as_str()),
            ("ny", ny.as_str()),
        ])
        .send()
        .await?;

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body, window)
}

/// Parses the feed's JSON body into a normalized observation.
fn parse_response(
    body: &serde_json::Value,
    window: ObservationWindow,
) -> Result<WeatherObservation, WeatherError> {
    let items = body["response"]["body"]["items"]["item"]
        .as_array()
        .ok_or_else(|| WeatherError::Parse {
            message: "no observation items in weather response".to_string(),
        })?;

    Ok(WeatherObservation {
        window,
        values: normalize(items),
    })
}

/// Normalizes raw `{category, obsrValue}` items into known-category
/// values. Unknown categories are dropped silently; unparsable values are
/// dropped with a warning.
fn normalize(items: &[serde_json::Value]) -> BTreeMap<WeatherCategory, f64> {
    let mut values = BTreeMap::new();

    for item in items {
        let Some(code) = item["category"].as_str() else {
            continue;
        };
        let Some(category) = WeatherCategory::from_code(code) else {
            continue;
        };

        let value = match &item["obsrValue"] {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.parse::<f64>().ok(),
            _ => None,
        };

        match value {
            Some(v) => {
                values.insert(category, v);
            }
            None => log::warn!("Dropping unparsable weather value for {code}"),
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> ObservationWindow {
        ObservationWindow {
            date: NaiveDate::from_ymd_opt(2026, 8, 23).unwrap(),
            hour: 13,
        }
    }

    #[test]
    fn parses_and_normalizes_known_categories() {
        let body = serde_json::json!({
            "response": { "body": { "items": { "item": [
                { "category": "T1H", "obsrValue": "31.2" },
                { "category": "RN1", "obsrValue": "0" },
                { "category": "REH", "obsrValue": "55" },
                { "category": "VEC", "obsrValue": "202" },
                { "category": "WSD", "obsrValue": "3.4" },
            ] } } }
        });

        let obs = parse_response(&body, window()).unwrap();
        assert_eq!(obs.value(WeatherCategory::Temperature), Some(31.2));
        assert_eq!(obs.value(WeatherCategory::WindSpeed), Some(3.4));
        assert_eq!(obs.values.len(), 5);
    }

    #[test]
    fn unknown_categories_are_dropped_silently() {
        let body = serde_json::json!({
            "response": { "body": { "items": { "item": [
                { "category": "T1H", "obsrValue": "20.0" },
                { "category": "UUU", "obsrValue": "1.1" },
                { "category": "PTY", "obsrValue": "0" },
            ] } } }
        });

        let obs = parse_response(&body, window()).unwrap();
        assert_eq!(obs.values.len(), 1);
        assert_eq!(obs.value(WeatherCategory::Temperature), Some(20.0));
    }

    #[test]
    fn unparsable_value_is_dropped_not_fatal() {
        let body = serde_json::json!({
            "response": { "body": { "items": { "item": [
                { "category": "T1H", "obsrValue": "n/a" },
                { "category": "WSD", "obsrValue": 2.5 },
            ] } } }
        });

        let obs = parse_response(&body, window()).unwrap();
        assert_eq!(obs.value(WeatherCategory::Temperature), None);
        assert_eq!(obs.value(WeatherCategory::WindSpeed), Some(2.5));
    }

    #[test]
    fn missing_item_list_is_a_parse_error() {
        let body = serde_json::json!({ "response": { "header": { "resultCode": "03" } } });
        assert!(matches!(
            parse_response(&body, window()),
            Err(WeatherError::Parse { .. })
        ));
    }
}
