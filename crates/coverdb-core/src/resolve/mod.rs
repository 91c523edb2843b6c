// crates/coverdb-core/src/resolve/mod.rs

//! # Address resolution
//!
//! Maps a free-form, possibly mixed-script delivery address onto the single
//! best-matching coverage record, or `None` when no reliable match exists.
//!
//! The pipeline: normalize/segment the address, narrow candidates to one
//! city ([`city`]), then run the fixed-priority matching cascade
//! ([`cascade`]). Resolution is pure and deterministic; identical inputs
//! always produce identical outputs.

mod cascade;
mod city;

use crate::model::{CoverageArea, CoverageDb};
use crate::text::{normalize, split_segments};
use crate::traits::CoverBackend;
use std::collections::HashMap;

/// Which cascade stage produced a match, in descending confidence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// A comma segment matched a zone or area name at similarity ≥ 0.8.
    SegmentFuzzy,
    /// A zone name appeared verbatim (word-gated) in the address.
    ZonePhrase,
    /// A "word number" phrase from the address appeared in a zone name.
    KeywordPhrase,
    /// Same number, fuzzily matched keyword (similarity ≥ 0.7).
    KeywordFuzzy,
    /// Weighted token-overlap fallback.
    TokenOverlap,
    /// Low-confidence backup from the segment scan ([0.7, 0.8)).
    LowConfidence,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::SegmentFuzzy => "segment-fuzzy",
            MatchStrategy::ZonePhrase => "zone-phrase",
            MatchStrategy::KeywordPhrase => "keyword-phrase",
            MatchStrategy::KeywordFuzzy => "keyword-fuzzy",
            MatchStrategy::TokenOverlap => "token-overlap",
            MatchStrategy::LowConfidence => "low-confidence",
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a detailed resolution: the record plus provenance.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'db, B: CoverBackend> {
    pub area: &'db CoverageArea<B>,
    pub strategy: MatchStrategy,
    /// Similarity or overlap score where the strategy produces one.
    pub score: Option<f64>,
}

/// Precomputed normalized names of one record. Built once per resolver,
/// never mutated; empty string when the source field is absent.
pub(crate) struct NormalizedArea {
    pub city_key: String,
    pub zone_key: String,
    pub area_key: String,
}

/// Reusable resolution engine over an immutable [`CoverageDb`].
///
/// Construction normalizes every record once; individual `resolve` calls
/// then only normalize the incoming address. Build it once per dataset and
/// share it across calls (it is `Send + Sync` for the default backend).
///
/// # Examples
///
/// ```rust
/// use coverdb_core::DefaultCoverageDb;
///
/// # fn main() -> coverdb_core::Result<()> {
/// let db = DefaultCoverageDb::from_json_str(
///     r#"[{"id":1,"city":"Dhaka","zone":"Gulshan","area":"Gulshan 1"}]"#,
/// )?;
/// let resolver = db.resolver();
///
/// let hit = resolver.resolve("House 5, Road 11, Gulshan 1, Dhaka");
/// assert_eq!(hit.map(|a| a.id), Some(1));
///
/// assert!(resolver.resolve("somewhere else entirely").is_none());
/// # Ok(()) }
/// ```
pub struct AddressResolver<'db, B: CoverBackend> {
    pub(crate) db: &'db CoverageDb<B>,
    pub(crate) entries: Vec<NormalizedArea>,
    /// Distinct normalized city names, first-encounter dataset order.
    pub(crate) city_keys: Vec<String>,
    /// city key → indices of records in that city.
    pub(crate) city_groups: HashMap<String, Vec<usize>>,
}

impl<B: CoverBackend> CoverageDb<B> {
    /// Builds the precomputed resolution engine for this dataset.
    pub fn resolver(&self) -> AddressResolver<'_, B> {
        AddressResolver::new(self)
    }
}

impl<'db, B: CoverBackend> AddressResolver<'db, B> {
    pub fn new(db: &'db CoverageDb<B>) -> Self {
        let mut entries = Vec::with_capacity(db.areas.len());
        let mut city_keys: Vec<String> = Vec::new();
        let mut city_groups: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, record) in db.areas.iter().enumerate() {
            let entry = NormalizedArea {
                city_key: normalize(record.city()),
                zone_key: normalize(record.zone()),
                area_key: normalize(record.area()),
            };
            if !entry.city_key.is_empty() {
                let group = city_groups.entry(entry.city_key.clone()).or_default();
                if group.is_empty() {
                    city_keys.push(entry.city_key.clone());
                }
                group.push(idx);
            }
            entries.push(entry);
        }

        AddressResolver {
            db,
            entries,
            city_keys,
            city_groups,
        }
    }

    /// Resolves an address to its best-matching record, or `None`.
    ///
    /// Never fails: malformed or empty input simply yields `None`.
    pub fn resolve(&self, raw_address: &str) -> Option<&'db CoverageArea<B>> {
        self.resolve_detailed(raw_address).map(|r| r.area)
    }

    /// Like [`AddressResolver::resolve`], but reports which cascade stage
    /// matched and its score.
    pub fn resolve_detailed(&self, raw_address: &str) -> Option<Resolution<'db, B>> {
        let address = normalize(raw_address);
        let segments = split_segments(raw_address);
        let detection = city::detect(self, &segments, &address);
        cascade::run(self, &address, &segments, &detection)
    }

    pub(crate) fn resolution(
        &self,
        entry_idx: usize,
        strategy: MatchStrategy,
        score: Option<f64>,
    ) -> Resolution<'db, B> {
        Resolution {
            area: &self.db.areas[entry_idx],
            strategy,
            score,
        }
    }
}
