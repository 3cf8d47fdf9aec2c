#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map payload assembly.
//!
//! The renderer is an external collaborator: it receives pure data and
//! draws it, and nothing flows back. This crate builds that data — one
//! `GeoJSON` `FeatureCollection` holding the incident marker, a
//! `LineString` per ranked facility, and a circle-styled point per spread
//! zone. Styling hints (colors, radii, popup text) travel as feature
//! properties so any map frontend can draw the same picture.

use fire_map_facilities_models::RankedFacility;
use fire_map_geometry::{GeoLine, GeoPoint};
use fire_map_prediction_models::SpreadZone;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

/// Spread zone fill colors, cycled by time horizon (soonest first).
const ZONE_COLORS: &[&str] = &["red", "orange", "yellow"];

/// Assembles the full map payload for one query.
#[must_use]
pub fn build_map(
    incident: GeoPoint,
    facilities: &[RankedFacility],
    zones: &[SpreadZone],
) -> FeatureCollection {
    let mut features = Vec::with_capacity(1 + facilities.len() + zones.len());

    features.push(incident_feature(incident));
    features.extend(zones.iter().enumerate().map(|(i, z)| zone_feature(z, i)));
    features.extend(facilities.iter().filter_map(facility_feature));

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// The fire location marker.
fn incident_feature(incident: GeoPoint) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("kind".to_string(), "incident".into());
    properties.insert("icon".to_string(), "fire".into());
    properties.insert("color".to_string(), "red".into());
    properties.insert("popup".to_string(), "화재 발생 지점".into());

    feature(Geometry::new(Value::Point(position(incident))), properties)
}

/// One predicted spread region, drawn as a circle around its center.
fn zone_feature(zone: &SpreadZone, index: usize) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("kind".to_string(), "spreadZone".into());
    properties.insert("label".to_string(), zone.label.clone().into());
    properties.insert("radiusM".to_string(), zone.radius_m.into());
    properties.insert(
        "color".to_string(),
        ZONE_COLORS[index % ZONE_COLORS.len()].into(),
    );
    properties.insert(
        "popup".to_string(),
        format!("{} 확산 영역", zone.label).into(),
    );

    feature(
        Geometry::new(Value::Point(position(zone.center))),
        properties,
    )
}

/// One cable segment with its ranking metadata. `None` when the record has
/// no parsed geometry (such records never reach a ranked list, but the
/// contract stays total).
fn facility_feature(ranked: &RankedFacility) -> Option<Feature> {
    let line = ranked.record.geometry.as_ref()?;

    let mut properties = JsonObject::new();
    properties.insert("kind".to_string(), "facility".into());
    properties.insert(
        "cableId".to_string(),
        ranked.record.cable_id.clone().into(),
    );
    properties.insert("distanceM".to_string(), ranked.distance_m.into());
    properties.insert("critical".to_string(), ranked.record.critical.into());
    properties.insert(
        "popup".to_string(),
        format!(
            "시설: {} ({} {})",
            ranked.record.cable_id, ranked.record.district, ranked.record.neighborhood
        )
        .into(),
    );

    Some(feature(
        Geometry::new(Value::LineString(line_positions(line))),
        properties,
    ))
}

fn feature(geometry: Geometry, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// `GeoJSON` positions are (lon, lat) — the swap back out of the internal
/// order happens only here, at the payload boundary.
fn position(point: GeoPoint) -> Vec<f64> {
    vec![point.longitude(), point.latitude()]
}

fn line_positions(line: &GeoLine) -> Vec<Vec<f64>> {
    line.points().iter().copied().map(position).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fire_map_facilities_models::FacilityRecord;
    use fire_map_geometry::parse_linestring;

    fn sample_facility() -> RankedFacility {
        RankedFacility {
            record: FacilityRecord {
                cable_id: "C-YS-001".to_string(),
                geometry_text: String::new(),
                geometry: Some(
                    parse_linestring("LINESTRING (129.000 35.300, 129.002 35.302)").unwrap(),
                ),
                critical: true,
                district: "양산시".to_string(),
                neighborhood: "물금읍".to_string(),
                core_count: Some(96),
            },
            distance_m: 210.0,
        }
    }

    fn sample_zone(label: &str, radius_m: f64) -> SpreadZone {
        SpreadZone {
            label: label.to_string(),
            center: GeoPoint::new(35.301, 129.001).unwrap(),
            radius_m,
        }
    }

    #[test]
    fn payload_contains_all_feature_kinds() {
        let incident = GeoPoint::new(35.3, 129.0).unwrap();
        let zones = vec![sample_zone("+1h", 250.0), sample_zone("+2h", 600.0)];
        let collection = build_map(incident, &[sample_facility()], &zones);

        assert_eq!(collection.features.len(), 4);

        let kinds: Vec<&str> = collection
            .features
            .iter()
            .filter_map(|f| f.properties.as_ref()?.get("kind")?.as_str())
            .collect();
        assert_eq!(kinds, ["incident", "spreadZone", "spreadZone", "facility"]);
    }

    #[test]
    fn incident_position_is_lon_lat() {
        let incident = GeoPoint::new(35.3, 129.0).unwrap();
        let collection = build_map(incident, &[], &[]);

        let Some(Geometry {
            value: Value::Point(pos),
            ..
        }) = &collection.features[0].geometry
        else {
            panic!("expected a point geometry");
        };
        assert!((pos[0] - 129.0).abs() < 1e-9);
        assert!((pos[1] - 35.3).abs() < 1e-9);
    }

    #[test]
    fn zone_colors_cycle_by_horizon() {
        let incident = GeoPoint::new(35.3, 129.0).unwrap();
        let zones = vec![
            sample_zone("+1h", 250.0),
            sample_zone("+2h", 600.0),
            sample_zone("+3h", 1100.0),
        ];
        let collection = build_map(incident, &[], &zones);

        let colors: Vec<&str> = collection.features[1..]
            .iter()
            .filter_map(|f| f.properties.as_ref()?.get("color")?.as_str())
            .collect();
        assert_eq!(colors, ["red", "orange", "yellow"]);
    }

    #[test]
    fn empty_zone_list_is_a_valid_payload() {
        let incident = GeoPoint::new(35.3, 129.0).unwrap();
        let collection = build_map(incident, &[sample_facility()], &[]);
        assert_eq!(collection.features.len(), 2);
    }
}
