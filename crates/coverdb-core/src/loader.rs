// crates/coverdb-core/src/loader.rs

//! # Data Loader
//!
//! Handles the physical layer (I/O, decompression) and dispatches to the
//! payload parsers (binary cache vs source JSON) based on the file name.
//!
//! Format dispatch:
//! - `*.json` / `*.json.gz` — source dataset rows (feature `json`)
//! - `*.bin` / `*.bin.gz` — bincode cache written by [`CoverageDb::save_cache`]

use crate::error::{CoverError, Result};
use crate::model::{CoverageDb, DefaultBackend, CACHE_SUFFIX};
use crate::text::fold_key;
use crate::traits::CoverBackend;
use bincode::Options;
use once_cell::sync::OnceCell;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

static COVER_DB_CACHE: OnceCell<CoverageDb<DefaultBackend>> = OnceCell::new();

/// Deserialization cap for the binary cache, guarding against data bombs.
const CACHE_BYTE_LIMIT: u64 = 256 * 1024 * 1024;

impl CoverageDb<DefaultBackend> {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "coverage.json.gz"
    }

    /// Loads the bundled dataset, memoized process-wide.
    ///
    /// The first call reads from disk; later calls clone the cached
    /// database.
    pub fn load() -> Result<Self> {
        COVER_DB_CACHE
            .get_or_try_init(|| {
                let dir = Self::default_data_dir();
                let file = Self::default_dataset_filename();
                Self::load_from_path(dir.join(file), None)
            })
            .cloned()
    }

    /// Loads a dataset file, optionally restricted to the given city names.
    ///
    /// The payload format is inferred from the file name; `.gz` variants
    /// are decompressed transparently (feature `compact`).
    pub fn load_from_path(path: impl AsRef<Path>, filter: Option<&[&str]>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let payload = name.strip_suffix(".gz").unwrap_or(&name);

        if payload.ends_with(".bin") {
            let mut reader = open_stream(path)?;
            let mut data = Vec::new();
            reader.read_to_end(&mut data)?;
            return Self::from_bytes(&data, filter);
        }

        if payload.ends_with(".json") {
            #[cfg(feature = "json")]
            {
                let reader = open_stream(path)?;
                let db = Self::from_json_reader(reader)?;
                return Ok(match filter {
                    Some(cities) if !cities.is_empty() => db.filter_by_city(cities),
                    _ => db,
                });
            }
            #[cfg(not(feature = "json"))]
            return Err(CoverError::UnsupportedFormat(format!(
                "{}: JSON support not compiled in (enable the `json` feature)",
                path.display()
            )));
        }

        Err(CoverError::UnsupportedFormat(path.display().to_string()))
    }

    /// Loads the bundled dataset restricted to the given cities.
    pub fn load_filtered_by_city(cities: &[&str]) -> Result<Self> {
        let dir = Self::default_data_dir();
        let file = Self::default_dataset_filename();
        Self::load_from_path(dir.join(file), Some(cities))
    }
}

impl<B: CoverBackend> CoverageDb<B> {
    /// Reconstructs the database from the serialized cache format,
    /// optionally filtering records by city name.
    pub fn from_bytes(data: &[u8], filter: Option<&[&str]>) -> Result<Self> {
        let db: CoverageDb<B> = bincode::DefaultOptions::new()
            .with_limit(CACHE_BYTE_LIMIT)
            .allow_trailing_bytes()
            .deserialize(data)?;

        Ok(match filter {
            Some(cities) if !cities.is_empty() => db.filter_by_city(cities),
            _ => db,
        })
    }

    /// Serializes the database into the binary cache format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::DefaultOptions::new()
            .with_limit(CACHE_BYTE_LIMIT)
            .allow_trailing_bytes()
            .serialize(self)?)
    }

    /// Writes the binary cache to `path`, gzip-wrapped when the file name
    /// ends in `.gz`.
    pub fn save_cache(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = self.to_bytes()?;
        let gz = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase().ends_with(".gz"))
            .unwrap_or(false);

        let mut file = File::create(path)?;
        if gz {
            #[cfg(feature = "compact")]
            {
                let mut enc =
                    flate2::write::GzEncoder::new(file, flate2::Compression::default());
                enc.write_all(&data)?;
                enc.finish()?;
                return Ok(());
            }
            #[cfg(not(feature = "compact"))]
            return Err(CoverError::UnsupportedFormat(format!(
                "{}: gzip support not compiled in (enable the `compact` feature)",
                path.display()
            )));
        }
        file.write_all(&data)?;
        Ok(())
    }

    /// Parses source JSON rows from a reader.
    ///
    /// Rows without a usable `area` are dropped at this boundary (the
    /// resolver assumes `area` is always present), never reported as
    /// errors.
    #[cfg(feature = "json")]
    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        let raw: crate::raw::CoverageAreasRaw = serde_json::from_reader(reader)?;
        Ok(crate::raw::build_coverage_db(raw))
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: crate::raw::CoverageAreasRaw = serde_json::from_str(s)?;
        Ok(crate::raw::build_coverage_db(raw))
    }

    /// Keeps only records belonging to the given cities (folded-name
    /// comparison).
    pub fn filter_by_city(mut self, cities: &[&str]) -> Self {
        let keys: Vec<String> = cities.iter().map(|c| fold_key(c)).collect();
        self.areas.retain(|a| keys.contains(&fold_key(a.city())));
        self
    }
}

/// Derives the cache file path that sits next to a source dataset.
pub fn cache_path_for(source: &Path) -> PathBuf {
    let filename = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    source.with_file_name(format!("{filename}.{CACHE_SUFFIX}"))
}

/// Opens a file, buffers it, and wraps it in a gzip decoder when the file
/// name ends in `.gz`. Returns a generic reader so callers don't care
/// about the compression.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        CoverError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    let gz = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase().ends_with(".gz"))
        .unwrap_or(false);

    if gz {
        #[cfg(feature = "compact")]
        {
            use flate2::read::GzDecoder;
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        return Err(CoverError::UnsupportedFormat(format!(
            "{}: gzip support not compiled in (enable the `compact` feature)",
            path.display()
        )));
    }

    Ok(Box::new(reader))
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::model::DefaultCoverageDb;

    const SAMPLE_JSON: &str = r#"[
        {"id": 1, "division": "Dhaka", "city": "Dhaka", "zone": "Gulshan",
         "area": "Gulshan 1", "cityId": 1, "zoneId": 11, "areaId": 111,
         "insideDhaka": true},
        {"id": 2, "division": "Dhaka", "city": "Dhaka", "zone": "Mirpur",
         "area": "Mirpur 10", "insideDhaka": true},
        {"id": 3, "division": "Chattogram", "city": "Chattogram",
         "zone": "Agrabad", "area": "Agrabad C/A"},
        {"id": 4, "division": "Dhaka", "city": "Dhaka", "zone": "Badda"}
    ]"#;

    #[test]
    fn json_ingestion_skips_area_less_rows() {
        let db = DefaultCoverageDb::from_json_str(SAMPLE_JSON).unwrap();
        assert_eq!(db.area_count(), 3);
        assert_eq!(db.areas[0].city_id, Some(1));
        assert!(db.areas[0].inside_dhaka);
        assert!(!db.areas[2].inside_dhaka);
    }

    #[test]
    fn bincode_round_trip_preserves_records() {
        let db = DefaultCoverageDb::from_json_str(SAMPLE_JSON).unwrap();
        let bytes = db.to_bytes().unwrap();
        let back = DefaultCoverageDb::from_bytes(&bytes, None).unwrap();
        assert_eq!(back.area_count(), db.area_count());
        assert_eq!(back.areas[1].area(), "Mirpur 10");
    }

    #[test]
    fn city_filter_restricts_loaded_set() {
        let db = DefaultCoverageDb::from_json_str(SAMPLE_JSON).unwrap();
        let bytes = db.to_bytes().unwrap();
        let dhaka = DefaultCoverageDb::from_bytes(&bytes, Some(&["dhaka"])).unwrap();
        assert_eq!(dhaka.area_count(), 2);
        assert!(dhaka.areas.iter().all(|a| a.city() == "Dhaka"));
    }

    #[test]
    fn cache_file_round_trip() {
        let db = DefaultCoverageDb::from_json_str(SAMPLE_JSON).unwrap();
        let path = std::env::temp_dir().join(format!("coverdb-test-{}.bin", std::process::id()));
        db.save_cache(&path).unwrap();
        let back = DefaultCoverageDb::load_from_path(&path, None).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back.area_count(), 3);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = DefaultCoverageDb::load_from_path("coverage.csv", None).unwrap_err();
        assert!(matches!(err, CoverError::UnsupportedFormat(_)));
    }

    #[test]
    fn cache_path_sits_next_to_source() {
        let p = cache_path_for(Path::new("/data/coverage.json.gz"));
        let name = p.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("coverage.json.gz."));
        assert!(name.ends_with(CACHE_SUFFIX));
    }
}
