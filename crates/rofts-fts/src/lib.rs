//! Full-text indexing and search for rofts, backed by Tantivy.
//!
//! # Modules
//!
//! - [`schema`]: record fields and tokenizer registration
//! - [`tokenizer`]: adapter running the analysis pipeline inside Tantivy
//! - [`store`]: writable index handle and read-only snapshots
//! - [`source`]: document discovery and content extraction
//! - [`indexer`]: per-document indexing with failure isolation
//! - [`builder`]: complete indexing runs
//! - [`search`]: batch query execution
//! - [`metadata`]: how an index was built
//!
//! # Example
//!
//! ```rust,ignore
//! use rofts_analysis::PipelineConfig;
//! use rofts_fts::{IndexBuilder, open_for_search};
//!
//! let config = PipelineConfig::default();
//! IndexBuilder::new(config.clone()).build(&docs, &index)?;
//!
//! let (engine, snapshot) = open_for_search(&index, &config)?;
//! let results = engine.search_batch(["pisică"], &snapshot)?;
//! ```

pub mod builder;
pub mod indexer;
pub mod metadata;
pub mod schema;
pub mod search;
pub mod source;
pub mod store;
pub mod tokenizer;

pub use builder::{IndexBuilder, resolve_stopwords_path};
pub use indexer::{DocumentIndexer, DocumentOutcome, IndexFailure, IndexStats};
pub use metadata::IndexMetadata;
pub use schema::{RecordSchema, TOKENIZER_NAME};
pub use search::{
    BatchResults, ParsedQuery, QueryEngine, QueryOutcome, QueryResult, TOP_K, open_for_search,
};
pub use source::{ContentExtractor, DirectorySource, DocumentDescriptor, PlainTextExtractor};
pub use store::{IndexSnapshot, IndexStore, RecordStatus, WRITER_BUFFER_SIZE};
pub use tokenizer::PipelineTokenizer;
