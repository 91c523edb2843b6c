// crates/coverdb-core/src/model/mod.rs
pub mod area;

pub use crate::traits::DefaultBackend;
pub use area::{CoverageArea, CoverageDb, DbStats, DefaultCoverageDb};

#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = "cache.bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = "cache.bin.gz";
