//! Index metadata.
//!
//! After each indexing run a small JSON file is written next to the index. It
//! records how the index was analyzed so a later search process can tell
//! whether its own pipeline produces the same terms.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rofts_fts::IndexMetadata;
//!
//! let metadata = IndexMetadata::new(pipeline.fingerprint(), pipeline.is_degraded(), count);
//! metadata.save(&index_path)?;
//!
//! if let Some(stored) = IndexMetadata::load(&index_path)? {
//!     if !stored.matches(&query_pipeline) {
//!         log::warn!("query pipeline differs from index pipeline");
//!     }
//! }
//! ```

use std::path::Path;

use chrono::Utc;
use rofts_analysis::Pipeline;
use rofts_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Metadata filename stored in the index directory.
pub const METADATA_FILE: &str = "rofts-metadata.json";

/// How and when an index was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    /// Fingerprint of the analysis pipeline used for indexing.
    pub pipeline_fingerprint: String,

    /// Whether the fallback pipeline was used.
    pub degraded: bool,

    /// Number of documents in the index after the run.
    pub document_count: u64,

    /// Timestamp of last indexing (RFC 3339).
    pub indexed_at: String,
}

impl IndexMetadata {
    /// Create metadata stamped with the current time.
    pub fn new(pipeline_fingerprint: impl Into<String>, degraded: bool, document_count: u64) -> Self {
        Self {
            pipeline_fingerprint: pipeline_fingerprint.into(),
            degraded,
            document_count,
            indexed_at: Utc::now().to_rfc3339(),
        }
    }

    /// Metadata describing an index built with `pipeline`.
    pub fn for_pipeline(pipeline: &Pipeline, document_count: u64) -> Self {
        Self::new(pipeline.fingerprint(), pipeline.is_degraded(), document_count)
    }

    /// Load metadata from the index directory.
    ///
    /// Returns `Ok(None)` if the metadata file doesn't exist.
    /// Returns `Err` if the file exists but cannot be parsed.
    pub fn load(index_path: &Path) -> Result<Option<Self>> {
        let metadata_path = index_path.join(METADATA_FILE);

        if !metadata_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&metadata_path)
            .map_err(|e| Error::io_with_path(e, &metadata_path))?;

        let metadata: Self = serde_json::from_str(&content)
            .map_err(|e| Error::parse(format!("Invalid metadata JSON: {e}")))?;

        Ok(Some(metadata))
    }

    /// Save metadata to the index directory.
    pub fn save(&self, index_path: &Path) -> Result<()> {
        if !index_path.exists() {
            std::fs::create_dir_all(index_path).map_err(|e| Error::io_with_path(e, index_path))?;
        }

        let metadata_path = index_path.join(METADATA_FILE);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::parse(format!("Failed to serialize metadata: {e}")))?;

        std::fs::write(&metadata_path, content)
            .map_err(|e| Error::io_with_path(e, &metadata_path))?;

        Ok(())
    }

    /// Returns `true` if `pipeline` analyzes text the way the index did.
    pub fn matches(&self, pipeline: &Pipeline) -> bool {
        self.pipeline_fingerprint == pipeline.fingerprint()
    }
}

// ============================================================================
// Tests
// ============================================================================
