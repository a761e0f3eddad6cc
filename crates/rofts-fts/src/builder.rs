//! Indexing run orchestration.
//!
//! [`IndexBuilder`] ties the pieces together for one indexing run:
//!
//! 1. validate the source root
//! 2. rebuild the stopword artifact
//! 3. assemble the analysis pipeline, falling back to the default one when
//!    the stopwords or the configured stages are unusable
//! 4. walk the source and index every document
//! 5. commit once and record [`IndexMetadata`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use rofts_analysis::PipelineConfig;
//! use rofts_fts::IndexBuilder;
//!
//! let stats = IndexBuilder::new(PipelineConfig::default())
//!     .build(Path::new("docs"), Path::new("index"))?;
//! println!("Indexed {} documents", stats.documents_indexed);
//! ```

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use rofts_analysis::{
    DEFAULT_STOPWORDS_FILE, Pipeline, PipelineConfig, Stage, StopwordSetBuilder, base_stopwords,
};
use rofts_core::Result;

use crate::indexer::{DocumentIndexer, IndexStats};
use crate::metadata::IndexMetadata;
use crate::source::{ContentExtractor, DirectorySource};
use crate::store::{IndexStore, WRITER_BUFFER_SIZE};

/// Fill in the default stopword artifact location for an index.
///
/// A config without an explicit `stopwords_path` uses
/// `<index_path>/stopwords.txt`, the same place the indexer writes it.
pub fn resolve_stopwords_path(config: &PipelineConfig, index_path: &Path) -> PipelineConfig {
    match config.stopwords_path {
        Some(_) => config.clone(),
        None => config
            .clone()
            .with_stopwords_path(index_path.join(DEFAULT_STOPWORDS_FILE)),
    }
}

/// Runs a complete indexing pass.
pub struct IndexBuilder {
    pipeline_config: PipelineConfig,
    indexer: DocumentIndexer,
    base_stopwords: BTreeSet<String>,
    extensions: Vec<String>,
    writer_buffer: usize,
}

impl IndexBuilder {
    /// Create a builder with the plain text extractor and the Romanian
    /// stopword list.
    pub fn new(pipeline_config: PipelineConfig) -> Self {
        Self {
            pipeline_config,
            indexer: DocumentIndexer::default(),
            base_stopwords: base_stopwords(&[], &[]),
            extensions: Vec::new(),
            writer_buffer: WRITER_BUFFER_SIZE,
        }
    }

    /// Set the content extractor.
    pub fn with_extractor(mut self, extractor: Box<dyn ContentExtractor>) -> Self {
        self.indexer = DocumentIndexer::new(extractor);
        self
    }

    /// Replace the base stopword list.
    pub fn with_base_stopwords(mut self, words: BTreeSet<String>) -> Self {
        self.base_stopwords = words;
        self
    }

    /// Only index files with these extensions.
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Set the index writer buffer size in bytes.
    pub fn with_writer_buffer(mut self, bytes: usize) -> Self {
        self.writer_buffer = bytes;
        self
    }

    /// Index everything under `source_root` into `index_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the source root is missing or unreadable ([`rofts_core::Error::NotFound`])
    /// - the index cannot be opened, written, or committed
    ///
    /// Unreadable documents are skipped and listed in the returned stats.
    pub fn build(&self, source_root: &Path, index_path: &Path) -> Result<IndexStats> {
        let start = Instant::now();

        let source = DirectorySource::new(source_root).with_extensions(&self.extensions);
        source.validate()?;

        let pipeline = Arc::new(self.prepare_pipeline(index_path));
        let mut store =
            IndexStore::create_or_open(index_path, pipeline.clone(), self.writer_buffer)?;

        log::info!("Building index from {}", source_root.display());
        let mut stats = self.indexer.index_all(source.descriptors(), &mut store)?;
        stats.degraded = pipeline.is_degraded();

        store.commit()?;
        let document_count = store.num_docs();
        store.close()?;

        IndexMetadata::for_pipeline(&pipeline, document_count).save(index_path)?;

        log::info!(
            "Indexed {} documents ({} created, {} updated, {} bytes, {} errors)",
            stats.documents_indexed,
            stats.created,
            stats.updated,
            stats.bytes_processed,
            stats.errors
        );
        log::info!("Total time: {} ms", start.elapsed().as_millis());

        Ok(stats)
    }

    /// Rebuild the stopword artifact and assemble the indexing pipeline.
    fn prepare_pipeline(&self, index_path: &Path) -> Pipeline {
        let config = resolve_stopwords_path(&self.pipeline_config, index_path);

        if config.has_stage(Stage::StopwordFilter) {
            if let Some(destination) = &config.stopwords_path {
                log::info!("Building stopwords file at {}", destination.display());
                if let Err(e) = StopwordSetBuilder::new(destination).build(&self.base_stopwords) {
                    log::warn!("{e}");
                    log::warn!("Cannot build the configured pipeline without a stopwords file");
                    return Pipeline::fallback();
                }
            }
        }

        Pipeline::build_or_fallback(&config)
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl std::fmt::Debug for IndexBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexBuilder")
            .field("pipeline_config", &self.pipeline_config)
            .field("indexer", &self.indexer)
            .field("base_stopwords", &self.base_stopwords.len())
            .field("writer_buffer", &self.writer_buffer)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
