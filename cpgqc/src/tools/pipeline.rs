use cached::{
    Cached,
    SizedCache,
};
use log::{
    debug,
    info,
    warn,
};
use sha2::{
    Digest,
    Sha256,
};

use super::analyze::summarize;
use super::canonicalize::canonicalize;
use super::validate::{
    validate,
    ValidationConfig,
};
use crate::data_structs::{
    MethylationTable,
    Provenance,
    QcSummary,
    RawTable,
};
use crate::error::{
    IngestError,
    ValidationError,
};
use crate::getter_fn;
use crate::io::read_table;

/// `source_file` recorded when the caller supplies no file name.
pub const DEFAULT_SOURCE_NAME: &str = "uploaded_file";

/// Reads, canonicalizes and validates an upload under the default
/// [`ValidationConfig`].
///
/// On success the table carries provenance: the supplied file name (or
/// [`DEFAULT_SOURCE_NAME`]) and the current UTC time. On failure nothing is
/// returned but the error.
pub fn load_and_normalize(
    raw_bytes: &[u8],
    filename: Option<&str>,
) -> Result<MethylationTable, IngestError> {
    load_and_normalize_with(raw_bytes, filename, &ValidationConfig::default())
}

/// [`load_and_normalize`] with an explicit validation config.
pub fn load_and_normalize_with(
    raw_bytes: &[u8],
    filename: Option<&str>,
    config: &ValidationConfig,
) -> Result<MethylationTable, IngestError> {
    let source = filename.unwrap_or(DEFAULT_SOURCE_NAME);
    if raw_bytes.is_empty() {
        warn!("Upload {} has no content", source);
        return Err(IngestError::EmptyUpload);
    }

    let raw = read_table(raw_bytes, filename).map_err(|e| {
        warn!("Could not read {}: {}", source, e);
        e
    })?;
    let table = validate(&canonicalize(raw), config).map_err(|e| {
        warn!("Validation of {} failed: {}", source, e);
        IngestError::from(e)
    })?;

    info!("Loaded {} rows from {}", table.height(), source);
    Ok(table.with_provenance(Provenance::now(source)))
}

/// Canonicalizes, validates and summarizes a table already in memory.
pub fn run_pipeline(raw: RawTable) -> Result<QcSummary, ValidationError> {
    let validated = validate(&canonicalize(raw), &ValidationConfig::default())?;
    Ok(summarize(&validated))
}

type CacheKey = ([u8; 32], Option<String>);

/// Memoizes [`load_and_normalize_with`] by content digest and file name.
///
/// Whole results are stored, failures included, so a hit returns exactly
/// what the recorded call returned.
pub struct PipelineCache {
    cache:  SizedCache<CacheKey, Result<MethylationTable, IngestError>>,
    config: ValidationConfig,
}

impl PipelineCache {
    getter_fn!(config, ValidationConfig);

    pub const DEFAULT_CAPACITY: usize = 16;

    pub fn new(capacity: usize) -> Self {
        Self {
            cache:  SizedCache::with_size(capacity.max(1)),
            config: ValidationConfig::default(),
        }
    }

    pub fn with_config(
        mut self,
        config: ValidationConfig,
    ) -> Self {
        self.config = config;
        self.cache.cache_clear();
        self
    }

    fn key(
        raw_bytes: &[u8],
        filename: Option<&str>,
    ) -> CacheKey {
        let digest: [u8; 32] = Sha256::digest(raw_bytes).into();
        (digest, filename.map(str::to_string))
    }

    pub fn load(
        &mut self,
        raw_bytes: &[u8],
        filename: Option<&str>,
    ) -> Result<MethylationTable, IngestError> {
        let key = Self::key(raw_bytes, filename);
        if let Some(hit) = self.cache.cache_get(&key) {
            debug!("Cache hit for {}", filename.unwrap_or(DEFAULT_SOURCE_NAME));
            return hit.clone();
        }

        let result = load_and_normalize_with(raw_bytes, filename, &self.config);
        self.cache.cache_set(key, result.clone());
        result
    }

    pub fn len(&self) -> usize {
        self.cache.cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.cache.cache_clear();
    }
}

impl Default for PipelineCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
