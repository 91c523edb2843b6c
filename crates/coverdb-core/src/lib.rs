// crates/coverdb-core/src/lib.rs

pub mod error;
pub mod loader;
pub mod model;
pub mod resolve;
pub mod similarity;
pub mod text;
pub mod traits;
// Shared Raw Input (used by the JSON ingestion path)
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::error::{CoverError, Result};
pub use crate::model::{CoverageArea, CoverageDb, DbStats, DefaultBackend, DefaultCoverageDb};
pub use crate::resolve::{AddressResolver, MatchStrategy, Resolution};
// Export the Backend + Name matching traits (crucial for users!)
pub use crate::traits::{CoverBackend, NameMatch};
// Export Text Utils
pub use crate::text::{equals_folded, fold_key, normalize, tokenize};
