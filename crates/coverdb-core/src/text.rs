// crates/coverdb-core/src/text.rs

//! # Text utilities
//!
//! Canonicalization and token extraction for address matching. The
//! normalizer must keep letters of every script (delivery addresses mix
//! Latin and Bengali freely), so it filters on Unicode character classes
//! instead of transliterating.

/// Tokens too generic to carry matching signal in a delivery address.
pub const STOPWORDS: [&str; 7] = ["road", "rd", "house", "flat", "h", "r", "no"];

/// Canonicalize a raw string for comparison.
///
/// Lowercases, replaces every character that is not a letter (any script)
/// or digit with a space, collapses whitespace runs and trims. Empty input
/// yields the empty string.
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`.
///
/// # Examples
///
/// ```rust
/// use coverdb_core::normalize;
///
/// assert_eq!(normalize("House #5, Road-11 (Gulshan)"), "house 5 road 11 gulshan");
/// assert_eq!(normalize("ঢাকা, গুলশান-১"), "ঢাকা গুলশান ১");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.to_lowercase().chars() {
        if ch.is_alphabetic() || ch.is_numeric() {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Extract comparison tokens from normalized text.
///
/// A token survives when it is at least 3 characters long or consists
/// entirely of digits, and is not a [`STOPWORDS`] member. Order is
/// preserved.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized
        .split_whitespace()
        .filter(|t| t.chars().count() >= 3 || t.chars().all(|c| c.is_numeric()))
        .filter(|t| !STOPWORDS.contains(t))
        .collect()
}

/// Split a raw address on commas and normalize each segment.
///
/// Segment order (and therefore index) follows the original left-to-right
/// order; empty segments are kept so indices stay stable.
pub fn split_segments(raw: &str) -> Vec<String> {
    raw.split(',').map(normalize).collect()
}

/// Extract `(word, number)` pairs from normalized text: a run of letters
/// followed by an optional single space and a run of digits.
///
/// `"gulshan 1 sector 14"` → `[("gulshan", "1"), ("sector", "14")]`;
/// fused forms like `"mirpur10"` are also recognized.
pub fn keyword_number_pairs(normalized: &str) -> Vec<(String, String)> {
    let chars: Vec<char> = normalized.chars().collect();
    let mut pairs = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_alphabetic() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_alphabetic() {
            i += 1;
        }
        let mut j = i;
        if j < chars.len() && chars[j] == ' ' {
            j += 1;
        }
        if j < chars.len() && chars[j].is_numeric() {
            let digits_start = j;
            while j < chars.len() && chars[j].is_numeric() {
                j += 1;
            }
            pairs.push((
                chars[start..i].iter().collect(),
                chars[digits_start..j].iter().collect(),
            ));
            i = j;
        }
    }
    pairs
}

/// Word-boundary-gated containment over normalized text.
///
/// Both sides are space-padded so `"pur 2"` does not match inside
/// `"mirpur 2"`.
pub(crate) fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    format!(" {haystack} ").contains(&format!(" {needle} "))
}

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// 1\) Transliterate Unicode → ASCII (e.g. `Chattogrām` -> `Chattogram`)
/// 2\) Normalize to lowercase
///
/// Used by the browse/search helpers on [`crate::CoverageDb`]; the
/// resolver's own normalizer is [`normalize`], which keeps non-Latin
/// scripts intact.
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after Unicode folding.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_collapses() {
        assert_eq!(normalize("House: 5,, Road--11"), "house 5 road 11");
        assert_eq!(normalize("  Gulshan   1  "), "gulshan 1");
    }

    #[test]
    fn normalize_keeps_bengali_script() {
        assert_eq!(normalize("ঢাকা, গুলশান-১"), "ঢাকা গুলশান ১");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["", "a!b@c", "House 5, Road 11, Gulshan 1, Dhaka", "ঢাকা — মিরপুর ১০"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn tokenize_drops_short_words_and_stopwords() {
        let n = normalize("House 5, Road 11, Gulshan 1, Dhaka");
        assert_eq!(tokenize(&n), vec!["5", "11", "gulshan", "1", "dhaka"]);
    }

    #[test]
    fn tokenize_keeps_digit_tokens_of_any_length() {
        assert_eq!(tokenize("no 7 ab xyz"), vec!["7", "xyz"]);
    }

    #[test]
    fn keyword_number_pairs_handle_spaced_and_fused_forms() {
        assert_eq!(
            keyword_number_pairs("gulshan 1 and sector14"),
            vec![
                ("gulshan".to_string(), "1".to_string()),
                ("sector".to_string(), "14".to_string()),
            ]
        );
        assert!(keyword_number_pairs("only words here").is_empty());
    }

    #[test]
    fn contains_word_is_boundary_gated() {
        assert!(contains_word("near mirpur 2 dhaka", "mirpur 2"));
        assert!(!contains_word("near mirpur 21 dhaka", "mirpur 2"));
        assert!(!contains_word("anything", ""));
    }

    #[test]
    fn fold_key_transliterates() {
        assert_eq!(fold_key("Chattogrām"), "chattogram");
        assert!(equals_folded("NARAYANGANJ", "Narayanganj"));
    }

    #[test]
    fn split_segments_preserves_indices() {
        let segs = split_segments("House 5, Road 11, Gulshan 1, Dhaka");
        assert_eq!(segs, vec!["house 5", "road 11", "gulshan 1", "dhaka"]);
        assert_eq!(split_segments("a,,b").len(), 3);
    }
}
