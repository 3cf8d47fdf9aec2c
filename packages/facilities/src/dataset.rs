//! Cable inventory CSV loader.
//!
//! The inventory is a per-region export with Korean column headers (the
//! same file the GIS team hands out, e.g.
//! `AI교육_케이블현황_GIS_경남양산_SKT.csv`). Loaded fresh per query,
//! never mutated.
//!
//! Row-level problems are never fatal: a structurally broken row is
//! skipped with a warning, and a row whose geometry text fails to parse is
//! kept with `geometry: None` so it still shows up in listings while being
//! excluded from distance ranking.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use fire_map_facilities_models::FacilityRecord;
use fire_map_geometry::parse_linestring;
use serde::Deserialize;

use crate::DatasetError;

/// One raw CSV row, named after the export's Korean headers.
#[derive(Debug, Deserialize)]
struct RawRow {
    /// Cable management number.
    #[serde(rename = "케이블관리번호")]
    cable_id: String,
    /// Spatial position as LINESTRING text.
    #[serde(rename = "공간위치G")]
    geometry_text: String,
    /// Critical trunk route flag, `Y`/`N`.
    #[serde(rename = "중요선로여부", default)]
    critical: String,
    /// City/district name.
    #[serde(rename = "시군구명", default)]
    district: String,
    /// Town/neighborhood name.
    #[serde(rename = "읍면동명", default)]
    neighborhood: String,
    /// Core (strand) count.
    #[serde(rename = "심선수", default)]
    core_count: Option<u32>,
}

/// Loads the facility dataset from a CSV file.
///
/// # Errors
///
/// Returns [`DatasetError`] if the file cannot be opened or the CSV is
/// structurally unreadable. Individual bad rows are skipped, not fatal.
pub fn load_dataset(path: &Path) -> Result<Vec<FacilityRecord>, DatasetError> {
    let file = File::open(path)?;
    let records = read_records(file)?;
    log::info!("Loaded {} facility records from {}", records.len(), path.display());
    Ok(records)
}

/// Reads facility records from any CSV source.
///
/// # Errors
///
/// Returns [`DatasetError`] if the header row cannot be read.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<FacilityRecord>, DatasetError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut records = Vec::new();
    for (row_index, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        let raw = match row {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Skipping unreadable dataset row {}: {e}", row_index + 1);
                continue;
            }
        };

        let geometry = match parse_linestring(&raw.geometry_text) {
            Ok(line) => Some(line),
            Err(e) => {
                log::warn!(
                    "Cable {} has malformed geometry ({e}); excluding it from distance ranking",
                    raw.cable_id
                );
                None
            }
        };

        records.push(FacilityRecord {
            cable_id: raw.cable_id,
            geometry_text: raw.geometry_text,
            geometry,
            critical: raw.critical.eq_ignore_ascii_case("y"),
            district: raw.district,
            neighborhood: raw.neighborhood,
            core_count: raw.core_count,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
케이블관리번호,공간위치G,중요선로여부,시군구명,읍면동명,심선수
C-YS-001,\"LINESTRING (129.000 35.300, 129.001 35.301)\",Y,양산시,물금읍,96
C-YS-002,LINESTRING (129.010 35.305),N,양산시,동면,24
C-YS-003,LINESTRING (bad),N,양산시,중앙동,
";

    #[test]
    fn reads_rows_with_korean_headers() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        let first = &records[0];
        assert_eq!(first.cable_id, "C-YS-001");
        assert!(first.critical);
        assert_eq!(first.district, "양산시");
        assert_eq!(first.core_count, Some(96));
        assert_eq!(first.geometry.as_ref().unwrap().points().len(), 2);

        assert!(!records[1].critical);
        assert_eq!(records[1].core_count, Some(24));
    }

    #[test]
    fn malformed_geometry_row_is_kept_without_position() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();
        let broken = &records[2];
        assert_eq!(broken.cable_id, "C-YS-003");
        assert!(broken.geometry.is_none());
        assert!(broken.representative_point().is_none());
        assert_eq!(broken.core_count, None);
    }

    #[test]
    fn empty_dataset_is_fine() {
        let records =
            read_records("케이블관리번호,공간위치G,중요선로여부,시군구명,읍면동명,심선수\n".as_bytes())
                .unwrap();
        assert!(records.is_empty());
    }
}
