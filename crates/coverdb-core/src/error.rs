// crates/coverdb-core/src/error.rs

use thiserror::Error;

/// Errors produced by the dataset loader and cache layer.
///
/// The resolver itself never fails: an address that cannot be matched
/// resolves to `None`, not an error.
#[derive(Debug, Error)]
pub enum CoverError {
    /// Dataset file missing or unreadable at the given location.
    #[error("{0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source JSON could not be parsed.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary cache could not be decoded.
    #[error("cache error: {0}")]
    Bincode(#[from] bincode::Error),

    /// File extension does not map to a known payload format.
    #[error("unsupported dataset format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, CoverError>;
