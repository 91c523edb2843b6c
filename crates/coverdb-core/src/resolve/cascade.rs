// crates/coverdb-core/src/resolve/cascade.rs

//! The zone/area matching cascade.
//!
//! Strategies execute in a fixed priority order; the first one to produce
//! a result ends the cascade. Steps 2-5 each collect every match before
//! picking, they never short-circuit mid-strategy.
//!
//! # Ordering
//!
//! 1. Segment fuzzy scan (right-to-left, ≥ [`STRICT_MATCH`])
//! 2. Exact zone phrase containment
//! 3. Keyword+number exact phrase
//! 4. Keyword+number fuzzy (≥ [`LOOSE_MATCH`])
//! 5. Weighted token-overlap (Jaccard) fallback
//! 6. Low-confidence backup remembered by step 1
//!
//! The thresholds are fixed calibration constants inherited from the
//! production heuristic; changing them silently alters match outcomes.
//! Step 6 intentionally returns the step-1 backup without re-ranking it
//! against step-5 scores.

use super::city::CityDetection;
use super::{AddressResolver, MatchStrategy, Resolution};
use crate::similarity::{jaccard, similarity};
use crate::text::{contains_word, keyword_number_pairs, tokenize};
use crate::traits::CoverBackend;
use std::collections::HashSet;

/// A segment match at or above this similarity is definitive.
const STRICT_MATCH: f64 = 0.8;
/// Floor for fuzzy keyword anchors and for the low-confidence backup band.
const LOOSE_MATCH: f64 = 0.7;

/// The collect-then-pick strategies of steps 2-5, in execution order.
const STEPS: [Step; 4] = [
    Step::ZonePhrase,
    Step::KeywordPhrase,
    Step::KeywordFuzzy,
    Step::TokenOverlap,
];

pub(crate) fn run<'db, B: CoverBackend>(
    resolver: &AddressResolver<'db, B>,
    address: &str,
    segments: &[String],
    detection: &CityDetection,
) -> Option<Resolution<'db, B>> {
    let scan = segment_scan(resolver, segments, detection);
    if let Some((idx, score)) = scan.hit {
        return Some(resolver.resolution(idx, MatchStrategy::SegmentFuzzy, Some(score)));
    }

    for step in STEPS {
        if let Some(resolution) = step.apply(resolver, address, &detection.candidates) {
            return Some(resolution);
        }
    }

    scan.backup
        .map(|(idx, score)| resolver.resolution(idx, MatchStrategy::LowConfidence, Some(score)))
}

/// Step 1 outcome: a definitive hit, or a low-confidence backup candidate
/// kept for step 6.
struct SegmentScan {
    hit: Option<(usize, f64)>,
    backup: Option<(usize, f64)>,
}

/// Right-to-left fuzzy scan of the comma segments against zone and area
/// names.
///
/// One running best accumulator spans the whole scan; the threshold check
/// runs after every segment, so the rightmost qualifying segment wins
/// without letting a later (more local) segment override it.
fn segment_scan<B: CoverBackend>(
    resolver: &AddressResolver<'_, B>,
    segments: &[String],
    detection: &CityDetection,
) -> SegmentScan {
    let mut best: Option<(usize, f64)> = None;

    for (seg_idx, segment) in segments.iter().enumerate().rev() {
        if detection.consumed_segment == Some(seg_idx) {
            continue;
        }
        if segment.chars().count() < 3 {
            continue;
        }
        for &idx in &detection.candidates {
            let entry = &resolver.entries[idx];
            let score =
                similarity(segment, &entry.zone_key).max(similarity(segment, &entry.area_key));
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((idx, score));
            }
        }
        if let Some((_, score)) = best {
            if score >= STRICT_MATCH {
                return SegmentScan {
                    hit: best,
                    backup: None,
                };
            }
        }
    }

    let backup = best.filter(|&(_, score)| (LOOSE_MATCH..STRICT_MATCH).contains(&score));
    SegmentScan { hit: None, backup }
}

/// Steps 2-5: independent collect-then-pick strategies over the candidate
/// set, dispatched in fixed order by [`run`].
#[derive(Clone, Copy)]
enum Step {
    ZonePhrase,
    KeywordPhrase,
    KeywordFuzzy,
    TokenOverlap,
}

impl Step {
    fn apply<'db, B: CoverBackend>(
        self,
        resolver: &AddressResolver<'db, B>,
        address: &str,
        candidates: &[usize],
    ) -> Option<Resolution<'db, B>> {
        match self {
            Step::ZonePhrase => zone_phrase(resolver, address, candidates),
            Step::KeywordPhrase => keyword_phrase(resolver, address, candidates),
            Step::KeywordFuzzy => keyword_fuzzy(resolver, address, candidates),
            Step::TokenOverlap => token_overlap(resolver, address, candidates),
        }
    }
}

/// Step 2: a zone name contained verbatim (word-gated) in the address.
fn zone_phrase<'db, B: CoverBackend>(
    resolver: &AddressResolver<'db, B>,
    address: &str,
    candidates: &[usize],
) -> Option<Resolution<'db, B>> {
    let matches: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&idx| contains_word(address, &resolver.entries[idx].zone_key))
        .collect();

    pick_preferred(resolver, &matches)
        .map(|idx| resolver.resolution(idx, MatchStrategy::ZonePhrase, None))
}

/// Step 3: a "word number" phrase from the address contained verbatim in a
/// zone name.
fn keyword_phrase<'db, B: CoverBackend>(
    resolver: &AddressResolver<'db, B>,
    address: &str,
    candidates: &[usize],
) -> Option<Resolution<'db, B>> {
    let mut matches: Vec<usize> = Vec::new();
    for (word, number) in keyword_number_pairs(address) {
        let phrase = format!("{word} {number}");
        for &idx in candidates {
            if contains_word(&resolver.entries[idx].zone_key, &phrase) && !matches.contains(&idx) {
                matches.push(idx);
            }
        }
    }

    pick_preferred(resolver, &matches)
        .map(|idx| resolver.resolution(idx, MatchStrategy::KeywordPhrase, None))
}

/// Step 4: shared number anchors the zone; the zone's leading (digit-free)
/// token is fuzzily compared to the extracted keyword.
fn keyword_fuzzy<'db, B: CoverBackend>(
    resolver: &AddressResolver<'db, B>,
    address: &str,
    candidates: &[usize],
) -> Option<Resolution<'db, B>> {
    let mut best: Option<(usize, f64)> = None;
    for (word, number) in keyword_number_pairs(address) {
        for &idx in candidates {
            let zone = &resolver.entries[idx].zone_key;
            if !contains_word(zone, &number) {
                continue;
            }
            let stripped: String = zone.chars().filter(|c| !c.is_numeric()).collect();
            let anchor = match stripped.split_whitespace().next() {
                Some(a) => a,
                None => continue,
            };
            let score = similarity(&word, anchor);
            if score >= LOOSE_MATCH && best.map_or(true, |(_, b)| score > b) {
                best = Some((idx, score));
            }
        }
    }

    best.map(|(idx, score)| resolver.resolution(idx, MatchStrategy::KeywordFuzzy, Some(score)))
}

/// Step 5: weighted Jaccard over tokenized names, area counting most.
fn token_overlap<'db, B: CoverBackend>(
    resolver: &AddressResolver<'db, B>,
    address: &str,
    candidates: &[usize],
) -> Option<Resolution<'db, B>> {
    let address_tokens: HashSet<&str> = tokenize(address).into_iter().collect();

    let mut best: Option<(usize, f64)> = None;
    for &idx in candidates {
        let entry = &resolver.entries[idx];
        let area_tokens: HashSet<&str> = tokenize(&entry.area_key).into_iter().collect();
        let zone_tokens: HashSet<&str> = tokenize(&entry.zone_key).into_iter().collect();
        let city_tokens: HashSet<&str> = tokenize(&entry.city_key).into_iter().collect();

        let score = 3.0 * jaccard(&address_tokens, &area_tokens)
            + 2.0 * jaccard(&address_tokens, &zone_tokens)
            + jaccard(&address_tokens, &city_tokens);

        if score > best.map_or(0.0, |(_, b)| b) {
            best = Some((idx, score));
        }
    }

    best.map(|(idx, score)| resolver.resolution(idx, MatchStrategy::TokenOverlap, Some(score)))
}

/// Tie-break shared by steps 2 and 3: prefer inside-Dhaka records, then
/// first in candidate order.
fn pick_preferred<B: CoverBackend>(
    resolver: &AddressResolver<'_, B>,
    matches: &[usize],
) -> Option<usize> {
    matches
        .iter()
        .copied()
        .find(|&idx| resolver.db.areas[idx].inside_dhaka)
        .or_else(|| matches.first().copied())
}
