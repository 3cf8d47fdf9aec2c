//! Naver Cloud geocode client.
//!
//! `GET /map-geocode/v2/geocode?query=...` with the API gateway key
//! headers. Coordinates come back as strings with `x` = longitude and
//! `y` = latitude; the swap into (lat, lon) happens in [`parse_response`].
//!
//! See <https://api.ncloud-docs.com/docs/ai-naver-mapsgeocoding>

use std::time::Duration;

use fire_map_geometry::GeoPoint;

use crate::GeocodeError;

/// Per-request timeout. Geocoding is the one hard-stop collaborator, but
/// it still should not hang a query indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Naver geocoder configuration, built by the caller from its environment.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    /// API gateway client ID (`X-NCP-APIGW-API-KEY-ID`).
    pub client_id: String,
    /// API gateway client secret (`X-NCP-APIGW-API-KEY`).
    pub client_secret: String,
    /// Base URL of the geocode endpoint.
    pub base_url: String,
}

/// Geocodes a free-text address, returning the first match.
///
/// Single-shot by design: no retry, at most one result consumed.
/// `Ok(None)` means the provider had no match for the query.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn geocode(
    client: &reqwest::Client,
    config: &GeocoderConfig,
    query: &str,
) -> Result<Option<GeoPoint>, GeocodeError> {
    let resp = client
        .get(&config.base_url)
        .timeout(REQUEST_TIMEOUT)
        .header("X-NCP-APIGW-API-KEY-ID", &config.client_id)
        .header("X-NCP-APIGW-API-KEY", &config.client_secret)
        .query(&[("query", query)])
        .send()
        .await?;

    let body: serde_json::Value = resp.json().await?;
    match parse_response(&body) {
        Ok(Some(point)) => {
            log::debug!(
                "Geocoded {query:?} to ({:.5}, {:.5})",
                point.latitude(),
                point.longitude()
            );
            Ok(Some(point))
        }
        Ok(None) => {
            log::warn!("Geocoder returned no match for {query:?}");
            Ok(None)
        }
        Err(e) => {
            log::warn!("Unreadable geocode response for {query:?}: {e}");
            Err(e)
        }
    }
}

/// Parses the Naver geocode JSON response into a point.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeoPoint>, GeocodeError> {
    let total = body["meta"]["totalCount"].as_i64().unwrap_or(0);
    if total == 0 {
        return Ok(None);
    }

    let first = body["addresses"]
        .as_array()
        .and_then(|a| a.first())
        .ok_or_else(|| GeocodeError::Parse {
            message: "totalCount > 0 but no addresses array".to_string(),
        })?;

    let lon = coordinate(first, "x")?;
    let lat = coordinate(first, "y")?;

    GeoPoint::new(lat, lon)
        .map(Some)
        .map_err(|e| GeocodeError::Parse {
            message: format!("geocoder returned invalid coordinate: {e}"),
        })
}

/// Reads one coordinate field, which Naver returns as a string.
fn coordinate(address: &serde_json::Value, field: &str) -> Result<f64, GeocodeError> {
    address[field]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: format!("missing {field} in geocode address"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_match_and_swaps_to_lat_lon() {
        let body = serde_json::json!({
            "meta": { "totalCount": 2 },
            "addresses": [
                { "x": "129.0374", "y": "35.3350", "roadAddress": "경상남도 양산시 중앙로 39" },
                { "x": "129.0400", "y": "35.3400" }
            ]
        });

        let point = parse_response(&body).unwrap().unwrap();
        assert!((point.latitude() - 35.335).abs() < 1e-6);
        assert!((point.longitude() - 129.0374).abs() < 1e-6);
    }

    #[test]
    fn no_match_is_none_not_an_error() {
        let body = serde_json::json!({ "meta": { "totalCount": 0 }, "addresses": [] });
        assert!(parse_response(&body).unwrap().is_none());
    }

    #[test]
    fn missing_coordinate_is_a_parse_error() {
        let body = serde_json::json!({
            "meta": { "totalCount": 1 },
            "addresses": [ { "y": "35.3350" } ]
        });
        assert!(matches!(
            parse_response(&body),
            Err(GeocodeError::Parse { .. })
        ));
    }

    #[test]
    fn out_of_range_coordinate_is_a_parse_error() {
        let body = serde_json::json!({
            "meta": { "totalCount": 1 },
            "addresses": [ { "x": "229.0", "y": "35.0" } ]
        });
        assert!(parse_response(&body).is_err());
    }
}
