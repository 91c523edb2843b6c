// crates/coverdb-core/src/similarity.rs

//! # Similarity scoring
//!
//! Edit-distance similarity and token-set (Jaccard) similarity. Lengths are
//! measured in chars, not bytes, so mixed Latin/Bengali strings score
//! consistently.

use std::collections::HashSet;

/// Classic Levenshtein distance (insert / delete / substitute, unit cost).
///
/// Single-row DP: the rolling row is kept over the shorter string, so the
/// memory bound is O(min(|a|,|b|)).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let mut short: Vec<char> = a.chars().collect();
    let mut long: Vec<char> = b.chars().collect();
    if short.len() > long.len() {
        std::mem::swap(&mut short, &mut long);
    }
    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, &lc) in long.iter().enumerate() {
        let mut prev_diag = row[0];
        row[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let cost = if lc == sc { 0 } else { 1 };
            let next = (row[j] + 1).min(row[j + 1] + 1).min(prev_diag + cost);
            prev_diag = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[short.len()]
}

/// Normalized string similarity in `[0, 1]`:
/// `1 - levenshtein(a, b) / max(|a|, |b|)`.
///
/// Two empty strings are identical (1.0); an empty string against a
/// non-empty one shares nothing (0.0). Symmetric.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein(a, b) as f64 / max_len as f64)
}

/// Jaccard similarity of two token sets: `|A∩B| / |A∪B|`.
///
/// Zero when either set is empty.
pub fn jaccard<'a>(a: &HashSet<&'a str>, b: &HashSet<&'a str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}
