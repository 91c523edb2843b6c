// crates/coverdb-core/src/resolve/city.rs

//! City detection: narrows the candidate set to one administrative city
//! (or leaves it unrestricted) before the zone/area cascade runs.

use super::AddressResolver;
use crate::similarity::similarity;
use crate::text::contains_word;
use crate::traits::CoverBackend;

/// Minimum segment-to-city similarity to accept a city match.
const CITY_MATCH: f64 = 0.8;

/// Outcome of city detection: the candidate record indices (restricted or
/// the whole dataset) and, when a comma segment was recognized as the
/// city, that segment's index so the cascade skips it.
pub(crate) struct CityDetection {
    pub candidates: Vec<usize>,
    pub consumed_segment: Option<usize>,
}

/// Detects the city deterministically, right-to-left over the comma
/// segments.
///
/// Addresses put the coarsest component last, so the scan starts at the
/// rightmost segment; the first segment whose best city similarity reaches
/// 0.8 decides. Failing that, every city name contained verbatim
/// (word-gated) in the whole address contributes its records. With no city
/// signal at all, the full dataset stays in play.
pub(crate) fn detect<B: CoverBackend>(
    resolver: &AddressResolver<'_, B>,
    segments: &[String],
    address: &str,
) -> CityDetection {
    for (seg_idx, segment) in segments.iter().enumerate().rev() {
        let mut best: Option<(&str, f64)> = None;
        for key in &resolver.city_keys {
            let score = similarity(segment, key);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((key.as_str(), score));
            }
        }
        if let Some((key, score)) = best {
            if score >= CITY_MATCH {
                return CityDetection {
                    candidates: resolver.city_groups[key].clone(),
                    consumed_segment: Some(seg_idx),
                };
            }
        }
    }

    // Fallback: whole-address containment collects every matching city,
    // not just one.
    let mut candidates: Vec<usize> = Vec::new();
    for key in &resolver.city_keys {
        if contains_word(address, key) {
            candidates.extend(resolver.city_groups[key].iter().copied());
        }
    }
    if !candidates.is_empty() {
        // Dataset order, regardless of which city key matched first.
        candidates.sort_unstable();
        return CityDetection {
            candidates,
            consumed_segment: None,
        };
    }

    CityDetection {
        candidates: (0..resolver.entries.len()).collect(),
        consumed_segment: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoverageArea, CoverageDb};
    use crate::text::split_segments;
    use crate::traits::DefaultBackend;

    fn db() -> CoverageDb<DefaultBackend> {
        let mk = |id, city: &str, zone: &str, area: &str| CoverageArea::<DefaultBackend> {
            id,
            division: None,
            city: Some(city.to_string()),
            zone: Some(zone.to_string()),
            area: area.to_string(),
            city_id: None,
            zone_id: None,
            area_id: None,
            inside_dhaka: false,
        };
        CoverageDb {
            areas: vec![
                mk(1, "Dhaka", "Gulshan", "Gulshan 1"),
                mk(2, "Dhaka", "Mirpur", "Mirpur 10"),
                mk(3, "Chattogram", "Agrabad", "Agrabad C/A"),
                mk(4, "Sylhet", "Zindabazar", "Zinda Bazar"),
            ],
        }
    }

    fn detect_for(raw: &str) -> (Vec<u64>, Option<usize>) {
        let db = db();
        let resolver = db.resolver();
        let segments = split_segments(raw);
        let address = crate::text::normalize(raw);
        let d = detect(&resolver, &segments, &address);
        let ids = d.candidates.iter().map(|&i| db.areas[i].id).collect();
        (ids, d.consumed_segment)
    }

    #[test]
    fn rightmost_segment_wins_and_is_consumed() {
        let (ids, consumed) = detect_for("Agrabad, Chattogram");
        assert_eq!(ids, vec![3]);
        assert_eq!(consumed, Some(1));
    }

    #[test]
    fn misspelled_city_segment_still_detects() {
        // similarity("dhka", "dhaka") = 1 - 1/5 = 0.8
        let (ids, consumed) = detect_for("Gulshan 1, Dhka");
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(consumed, Some(1));
    }

    #[test]
    fn containment_fallback_collects_all_matching_cities() {
        // No comma segment is city-like, but two city names appear inline.
        let (ids, consumed) = detect_for("between dhaka and sylhet highway point");
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(consumed, None);
    }

    #[test]
    fn containment_is_word_gated() {
        // "dhakaia" must not count as containing "dhaka".
        let (ids, consumed) = detect_for("dhakaia bazar lane");
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(consumed, None);
    }

    #[test]
    fn no_signal_leaves_candidates_unrestricted() {
        let (ids, consumed) = detect_for("some place nowhere");
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(consumed, None);
    }
}
