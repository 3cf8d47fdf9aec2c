//! Classifying parser for oracle output.
//!
//! The oracle is asked for a JSON object keyed by time horizon, but it is
//! non-deterministic: it sometimes wraps JSON in markdown fences, sometimes
//! answers with a comma-separated list of place names, and sometimes with
//! prose. Classification is explicit: a reply is geometry, area labels, or
//! unparsable — never an exception.

use fire_map_geometry::GeoPoint;
use fire_map_prediction_models::{ParsedPrediction, SpreadZone};

/// Classifies raw oracle output.
///
/// - A JSON object whose every value carries a center and radius becomes
///   [`ParsedPrediction::Geometry`], zones ordered by time-horizon label
///   (`serde_json` objects iterate in key order, which is exactly the
///   `+1h` < `+2h` < `+3h` order we ask for). An empty object is a valid
///   empty geometry prediction.
/// - Non-JSON text that splits on commas into plausible place names
///   becomes [`ParsedPrediction::AreaLabels`].
/// - Anything else is [`ParsedPrediction::Unparsable`], raw text kept for
///   logging.
#[must_use]
pub fn classify_response(raw: &str) -> ParsedPrediction {
    let text = strip_code_fences(raw).trim();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        return match value {
            serde_json::Value::Object(map) => parse_zones(&map)
                .map_or_else(|| ParsedPrediction::Unparsable(raw.to_string()), ParsedPrediction::Geometry),
            _ => ParsedPrediction::Unparsable(raw.to_string()),
        };
    }

    match parse_area_labels(text) {
        Some(labels) => ParsedPrediction::AreaLabels(labels),
        None => ParsedPrediction::Unparsable(raw.to_string()),
    }
}

/// Strips a surrounding markdown code fence, with or without a language
/// tag. Anything else passes through unchanged.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the language tag line, e.g. "json".
    body.find('\n').map_or(body, |eol| &body[eol + 1..])
}

/// Parses a label → `{lat, lon, radius}` object into zones. `None` when
/// any entry does not match the shape.
fn parse_zones(map: &serde_json::Map<String, serde_json::Value>) -> Option<Vec<SpreadZone>> {
    let mut zones = Vec::with_capacity(map.len());

    for (label, entry) in map {
        let radius_m = entry["radius"].as_f64()?;
        let (lat, lon) = zone_center(entry)?;
        let center = GeoPoint::new(lat, lon).ok()?;

        zones.push(SpreadZone {
            label: label.clone(),
            center,
            radius_m,
        });
    }

    Some(zones)
}

/// Extracts a zone center, accepting the shapes the oracle actually
/// produces: `lat`/`lon` fields, or a `coordinates`/`center` pair in
/// (lat, lon) order.
fn zone_center(entry: &serde_json::Value) -> Option<(f64, f64)> {
    if let (Some(lat), Some(lon)) = (entry["lat"].as_f64(), entry["lon"].as_f64()) {
        return Some((lat, lon));
    }

    for key in ["coordinates", "center"] {
        if let Some(pair) = entry[key].as_array()
            && pair.len() == 2
            && let (Some(lat), Some(lon)) = (pair[0].as_f64(), pair[1].as_f64())
        {
            return Some((lat, lon));
        }
    }

    None
}

/// Splits free text into place-name labels. `None` when the text does not
/// look like a name list (empty, or any token resembling structured data
/// or prose).
fn parse_area_labels(text: &str) -> Option<Vec<String>> {
    if text.is_empty() {
        return None;
    }

    let labels: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect();

    if labels.is_empty() {
        return None;
    }

    let plausible = labels.iter().all(|label| {
        label.len() <= 60 && !label.contains(['{', '}', '[', ']', ':', '\n'])
    });

    plausible.then_some(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_geometry_mode() {
        let raw = r#"{
            "+1h": { "lat": 35.301, "lon": 129.001, "radius": 250 },
            "+2h": { "lat": 35.303, "lon": 129.003, "radius": 600 },
            "+3h": { "lat": 35.305, "lon": 129.005, "radius": 1100 }
        }"#;

        let ParsedPrediction::Geometry(zones) = classify_response(raw) else {
            panic!("expected geometry mode");
        };
        assert_eq!(zones.len(), 3);
        assert_eq!(zones[0].label, "+1h");
        assert_eq!(zones[2].label, "+3h");
        assert!((zones[1].radius_m - 600.0).abs() < f64::EPSILON);
        assert!((zones[0].center.latitude() - 35.301).abs() < 1e-9);
    }

    #[test]
    fn strips_markdown_fences() {
        let raw = "```json\n{ \"+1h\": { \"lat\": 35.3, \"lon\": 129.0, \"radius\": 100 } }\n```";
        assert!(matches!(
            classify_response(raw),
            ParsedPrediction::Geometry(zones) if zones.len() == 1
        ));
    }

    #[test]
    fn accepts_coordinate_pair_center() {
        let raw = r#"{ "+1h": { "coordinates": [35.301, 129.001], "radius": 250 } }"#;
        let ParsedPrediction::Geometry(zones) = classify_response(raw) else {
            panic!("expected geometry mode");
        };
        assert!((zones[0].center.longitude() - 129.001).abs() < 1e-9);
    }

    #[test]
    fn empty_object_is_an_empty_geometry_prediction() {
        assert_eq!(
            classify_response("{}"),
            ParsedPrediction::Geometry(Vec::new())
        );
    }

    #[test]
    fn classifies_area_label_mode() {
        let raw = "물금읍, 동면, 중앙동";
        assert_eq!(
            classify_response(raw),
            ParsedPrediction::AreaLabels(vec![
                "물금읍".to_string(),
                "동면".to_string(),
                "중앙동".to_string(),
            ])
        );
    }

    #[test]
    fn single_label_without_commas_still_classifies() {
        assert_eq!(
            classify_response("물금읍"),
            ParsedPrediction::AreaLabels(vec!["물금읍".to_string()])
        );
    }

    #[test]
    fn json_object_missing_radius_is_unparsable() {
        let raw = r#"{ "+1h": { "lat": 35.3, "lon": 129.0 } }"#;
        assert!(matches!(
            classify_response(raw),
            ParsedPrediction::Unparsable(_)
        ));
    }

    #[test]
    fn out_of_range_center_is_unparsable() {
        let raw = r#"{ "+1h": { "lat": 135.3, "lon": 129.0, "radius": 100 } }"#;
        assert!(matches!(
            classify_response(raw),
            ParsedPrediction::Unparsable(_)
        ));
    }

    #[test]
    fn json_array_is_unparsable() {
        assert!(matches!(
            classify_response("[1, 2, 3]"),
            ParsedPrediction::Unparsable(_)
        ));
    }

    #[test]
    fn empty_text_is_unparsable() {
        assert!(matches!(classify_response("  "), ParsedPrediction::Unparsable(_)));
    }

    #[test]
    fn prose_with_braces_is_unparsable() {
        let raw = "I cannot predict this: {insufficient data}";
        assert!(matches!(
            classify_response(raw),
            ParsedPrediction::Unparsable(_)
        ));
    }
}
