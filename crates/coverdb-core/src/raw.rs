// crates/coverdb-core/src/raw.rs

//! Raw input rows as they appear in source JSON datasets.
//!
//! Upstream exports are inconsistent about casing and omit fields on
//! incomplete rows, so everything is optional here; `build_coverage_db`
//! applies the ingestion rules (trim, drop rows without an area).

use crate::model::{CoverageArea, CoverageDb};
use crate::traits::CoverBackend;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CoverageAreaRaw {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default, alias = "cityId")]
    pub city_id: Option<u64>,
    #[serde(default, alias = "zoneId")]
    pub zone_id: Option<u64>,
    #[serde(default, alias = "areaId")]
    pub area_id: Option<u64>,
    #[serde(default, alias = "insideDhaka", alias = "inside_dhaka_flag")]
    pub inside_dhaka: Option<bool>,
}

pub type CoverageAreasRaw = Vec<CoverageAreaRaw>;

/// Trim a raw optional string; blank strings count as absent.
fn clean_opt(s: Option<String>) -> Option<String> {
    s.and_then(|v| {
        let t = v.trim();
        if t.is_empty() {
            None
        } else {
            Some(t.to_string())
        }
    })
}

/// Converts raw rows into a [`CoverageDb`] using the specified backend.
///
/// Rows without a usable `area` are skipped (the resolver assumes `area`
/// is populated on every record it sees); missing ids fall back to the
/// 1-based row position.
pub fn build_coverage_db<B: CoverBackend>(raw: CoverageAreasRaw) -> CoverageDb<B> {
    let mut areas = Vec::with_capacity(raw.len());
    for (idx, row) in raw.into_iter().enumerate() {
        let area = match clean_opt(row.area) {
            Some(a) => a,
            None => continue,
        };
        areas.push(CoverageArea::<B> {
            id: row.id.unwrap_or(idx as u64 + 1),
            division: clean_opt(row.division).map(|s| B::str_from(&s)),
            city: clean_opt(row.city).map(|s| B::str_from(&s)),
            zone: clean_opt(row.zone).map(|s| B::str_from(&s)),
            area: B::str_from(&area),
            city_id: row.city_id,
            zone_id: row.zone_id,
            area_id: row.area_id,
            inside_dhaka: row.inside_dhaka.unwrap_or(false),
        });
    }
    CoverageDb { areas }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DefaultBackend;

    #[test]
    fn rows_without_area_are_skipped() {
        let raw = vec![
            CoverageAreaRaw {
                id: Some(7),
                division: Some("Dhaka".into()),
                city: Some("Dhaka".into()),
                zone: Some("Gulshan".into()),
                area: Some("Gulshan 1".into()),
                city_id: Some(1),
                zone_id: None,
                area_id: None,
                inside_dhaka: Some(true),
            },
            CoverageAreaRaw {
                id: None,
                division: None,
                city: Some("Dhaka".into()),
                zone: Some("Banani".into()),
                area: Some("   ".into()),
                city_id: None,
                zone_id: None,
                area_id: None,
                inside_dhaka: None,
            },
        ];
        let db = build_coverage_db::<DefaultBackend>(raw);
        assert_eq!(db.areas.len(), 1);
        assert_eq!(db.areas[0].id, 7);
        assert!(db.areas[0].inside_dhaka);
    }

    #[test]
    fn blank_fields_become_absent() {
        let raw = vec![CoverageAreaRaw {
            id: None,
            division: Some("".into()),
            city: Some("  ".into()),
            zone: None,
            area: Some("Zinda Bazar".into()),
            city_id: None,
            zone_id: None,
            area_id: None,
            inside_dhaka: None,
        }];
        let db = build_coverage_db::<DefaultBackend>(raw);
        let rec = &db.areas[0];
        assert_eq!(rec.id, 1);
        assert!(rec.city.is_none());
        assert!(rec.division.is_none());
        assert_eq!(rec.area(), "Zinda Bazar");
    }
}
