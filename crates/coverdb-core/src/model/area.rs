// crates/coverdb-core/src/model/area.rs
use crate::text::fold_key;
use crate::traits::{CoverBackend, NameMatch};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A coverage-area record in the administrative hierarchy
/// division → city → zone → area.
///
/// `area` is always present; the other names may be absent in incomplete
/// rows. The numeric ids mirror the upstream dataset and are never
/// consulted by matching.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "B: CoverBackend")]
pub struct CoverageArea<B: CoverBackend> {
    pub id: u64,
    pub division: Option<B::Str>,
    pub city: Option<B::Str>,
    pub zone: Option<B::Str>,
    pub area: B::Str,
    pub city_id: Option<u64>,
    pub zone_id: Option<u64>,
    pub area_id: Option<u64>,
    /// Used only as a tie-break preference between equally good matches.
    pub inside_dhaka: bool,
}

/// Top-level database structure.
///
/// Holds the flat list of coverage areas and provides browse/search
/// helpers. Constructed by the loader module from a JSON dataset or a
/// binary cache, optionally filtered by city name.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "B: CoverBackend")]
pub struct CoverageDb<B: CoverBackend> {
    pub areas: Vec<CoverageArea<B>>,
}

/// Convenient alias for the default backend.
pub type DefaultCoverageDb = CoverageDb<crate::traits::DefaultBackend>;

/// Simple aggregate statistics for the database.
///
/// Returned by [`CoverageDb::stats`]; counts reflect the materialized
/// in-memory database after any filtering applied at load time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DbStats {
    pub areas: usize,
    pub cities: usize,
    pub zones: usize,
}

impl<B: CoverBackend> CoverageArea<B> {
    /// Area display name. Always non-empty.
    pub fn area(&self) -> &str {
        self.area.as_ref()
    }

    /// Zone name, or an empty string when the row has none.
    pub fn zone(&self) -> &str {
        self.zone.as_ref().map(|s| s.as_ref()).unwrap_or("")
    }

    /// City name, or an empty string when the row has none.
    pub fn city(&self) -> &str {
        self.city.as_ref().map(|s| s.as_ref()).unwrap_or("")
    }

    /// Division name, or an empty string when the row has none.
    pub fn division(&self) -> &str {
        self.division.as_ref().map(|s| s.as_ref()).unwrap_or("")
    }
}

impl<B: CoverBackend> NameMatch for CoverageArea<B> {
    #[inline]
    fn name_str(&self) -> &str {
        self.area()
    }
}

impl<B: CoverBackend> CoverageDb<B> {
    /// All coverage areas in the database.
    pub fn areas(&self) -> &[CoverageArea<B>] {
        &self.areas
    }

    /// Total number of records; convenience for `self.areas().len()`.
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Aggregate statistics for the database.
    pub fn stats(&self) -> DbStats {
        let mut cities: HashSet<String> = HashSet::new();
        let mut zones: HashSet<String> = HashSet::new();
        for a in &self.areas {
            if !a.city().is_empty() {
                cities.insert(fold_key(a.city()));
            }
            if !a.zone().is_empty() {
                zones.insert(fold_key(a.zone()));
            }
        }
        DbStats {
            areas: self.areas.len(),
            cities: cities.len(),
            zones: zones.len(),
        }
    }

    /// Distinct city names in first-encounter dataset order.
    pub fn city_names(&self) -> Vec<&str> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut out = Vec::new();
        for a in &self.areas {
            let city = a.city();
            if !city.is_empty() && seen.insert(fold_key(city)) {
                out.push(city);
            }
        }
        out
    }

    /// Distinct zone names of a city (folded-name comparison), in
    /// first-encounter dataset order.
    pub fn zones_for_city(&self, city: &str) -> Vec<&str> {
        let key = fold_key(city);
        let mut seen: HashSet<String> = HashSet::new();
        let mut out = Vec::new();
        for a in &self.areas {
            if fold_key(a.city()) != key {
                continue;
            }
            let zone = a.zone();
            if !zone.is_empty() && seen.insert(fold_key(zone)) {
                out.push(zone);
            }
        }
        out
    }

    /// Find all areas whose area, zone or city name *loosely matches* the
    /// given substring.
    ///
    /// This search is:
    /// - **case-insensitive**
    /// - **accent/diacritic-insensitive** (via [`fold_key`])
    /// - based on substring matching (not prefix)
    ///
    /// It is a browse/debug helper, independent of the resolution cascade:
    /// use [`CoverageDb::resolver`] to match full free-form addresses.
    pub fn find_areas_by_substring(&self, substr: &str) -> Vec<&CoverageArea<B>> {
        let q = fold_key(substr);
        if q.is_empty() {
            return Vec::new();
        }

        let mut out = Vec::new();
        for a in &self.areas {
            if fold_key(a.area()).contains(&q)
                || fold_key(a.zone()).contains(&q)
                || fold_key(a.city()).contains(&q)
            {
                out.push(a);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::DefaultBackend;

    fn record(id: u64, city: &str, zone: &str, area: &str) -> CoverageArea<DefaultBackend> {
        CoverageArea {
            id,
            division: Some("Dhaka".to_string()),
            city: if city.is_empty() { None } else { Some(city.to_string()) },
            zone: if zone.is_empty() { None } else { Some(zone.to_string()) },
            area: area.to_string(),
            city_id: None,
            zone_id: None,
            area_id: None,
            inside_dhaka: false,
        }
    }

    fn sample() -> DefaultCoverageDb {
        CoverageDb {
            areas: vec![
                record(1, "Dhaka", "Gulshan", "Gulshan 1"),
                record(2, "Dhaka", "Gulshan", "Gulshan 2"),
                record(3, "Dhaka", "Mirpur", "Mirpur 10"),
                record(4, "Chattogram", "Agrabad", "Agrabad C/A"),
            ],
        }
    }

    #[test]
    fn stats_count_distinct_cities_and_zones() {
        let stats = sample().stats();
        assert_eq!(stats.areas, 4);
        assert_eq!(stats.cities, 2);
        assert_eq!(stats.zones, 3);
    }

    #[test]
    fn substring_search_covers_all_name_levels() {
        let db = sample();
        assert_eq!(db.find_areas_by_substring("gulshan").len(), 2);
        assert_eq!(db.find_areas_by_substring("chattogram").len(), 1);
        assert!(db.find_areas_by_substring("").is_empty());
    }

    #[test]
    fn zones_listing_dedupes_in_dataset_order() {
        let db = sample();
        assert_eq!(db.zones_for_city("dhaka"), vec!["Gulshan", "Mirpur"]);
        assert_eq!(db.city_names(), vec!["Dhaka", "Chattogram"]);
    }

    #[test]
    fn absent_fields_read_as_empty_strings() {
        let r = record(9, "", "", "Lone Area");
        assert_eq!(r.city(), "");
        assert_eq!(r.zone(), "");
        assert_eq!(r.area(), "Lone Area");
    }
}
