// crates/coverdb-core/src/traits.rs
use crate::text::fold_key;
use serde::{Deserialize, Serialize};

/// Storage backend for strings used by the database.
///
/// This abstraction allows the crate to swap how textual data is stored
/// internally (for example to use more compact string types) without
/// changing the public API of accessors that return `&str` views.
///
/// Implementors must be `Clone + Send + Sync + 'static` and ensure the
/// associated type can be serialized/deserialized so databases can be
/// cached via bincode.
pub trait CoverBackend: Clone + Send + Sync + 'static {
    type Str: Clone
        + Send
        + Sync
        + std::fmt::Debug
        + Serialize
        + for<'de> Deserialize<'de>
        + AsRef<str>;

    /// Convert an `&str` into the backend string representation.
    fn str_from(s: &str) -> Self::Str;

    /// Convert backend string to owned Rust `String`.
    #[inline]
    fn str_to_string(v: &Self::Str) -> String {
        v.as_ref().to_string()
    }
}

/// Default backend: plain `String`.
///
/// Best ergonomics, suitable for most applications.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultBackend;

impl CoverBackend for DefaultBackend {
    type Str = String;

    #[inline]
    fn str_from(s: &str) -> Self::Str {
        s.to_owned()
    }

    #[inline]
    fn str_to_string(v: &Self::Str) -> String {
        v.clone()
    }
}

/// Name-based matching helpers for types that expose a canonical display name.
///
/// This trait centralizes Unicode-aware, accent-insensitive and
/// case-insensitive comparisons based on [`fold_key`]. Implementors provide
/// a `&str` view of their canonical name via [`NameMatch::name_str`], and
/// get convenient helpers:
/// - [`NameMatch::is_named`] — equality on folded form
/// - [`NameMatch::name_contains`] — substring match on folded form
///
/// # Examples
/// ```rust
/// use coverdb_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Narayanganj").is_named("NARAYANGANJ"));
/// assert!(Place("Cox's Bazar").name_contains("bazar"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Accent-insensitive and case-insensitive name comparison.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        fold_key(self.name_str()) == fold_key(q)
    }

    /// Accent-insensitive + case-insensitive substring match.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}
