//! Tantivy index store.
//!
//! [`IndexStore`] owns the single writer for an index and serializes every
//! mutation through `&mut self`. Records are keyed by the `path` field:
//! [`IndexStore::upsert`] deletes any existing record with the same
//! identifier before adding the new one, so after a commit at most one record
//! per identifier is visible.
//!
//! [`IndexSnapshot`] is a read-only view of the last commit.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rofts_fts::{IndexStore, IndexSnapshot};
//!
//! let mut store = IndexStore::create_or_open(&index_path, pipeline.clone(), 50_000_000)?;
//! store.upsert("/docs/cat.txt", record)?;
//! store.commit_and_close()?;
//!
//! let snapshot = IndexSnapshot::open(&index_path)?;
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rofts_analysis::Pipeline;
use rofts_core::{Error, Result};
use tantivy::collector::Count;
use tantivy::query::TermQuery;
use tantivy::schema::IndexRecordOption;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Searcher, TantivyDocument, Term};

use crate::schema::RecordSchema;

/// Default index writer buffer size (50MB).
pub const WRITER_BUFFER_SIZE: usize = 50_000_000;

/// Whether an upsert replaced a committed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// No committed record had this identifier.
    Created,
    /// A committed record with this identifier was replaced.
    Updated,
}

impl RecordStatus {
    /// Verb used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Created => "created",
            RecordStatus::Updated => "updated",
        }
    }
}

/// Writable index handle.
pub struct IndexStore {
    index: Index,
    writer: IndexWriter,
    reader: IndexReader,
    schema: RecordSchema,
    location: Option<PathBuf>,
}

impl IndexStore {
    /// Create or open a Tantivy index at the given path.
    ///
    /// If the directory has no index yet, a new one is created; otherwise the
    /// existing index is opened and appended to.
    pub fn create_or_open(
        index_path: &Path,
        pipeline: Arc<Pipeline>,
        writer_buffer: usize,
    ) -> Result<Self> {
        if !index_path.exists() {
            std::fs::create_dir_all(index_path).map_err(|e| Error::io_with_path(e, index_path))?;
        }

        let index = if index_path.join("meta.json").exists() {
            Index::open_in_dir(index_path)
                .map_err(|e| Error::store(format!("Failed to open index: {e}")))?
        } else {
            log::info!("Creating index at {}", index_path.display());
            Index::create_in_dir(index_path, RecordSchema::build().schema().clone())
                .map_err(|e| Error::store(format!("Failed to create index: {e}")))?
        };

        Self::from_index(index, pipeline, writer_buffer, Some(index_path.to_path_buf()))
    }

    /// Create an in-memory index (for testing).
    pub fn in_memory(pipeline: Arc<Pipeline>) -> Result<Self> {
        let index = Index::create_in_ram(RecordSchema::build().schema().clone());
        Self::from_index(index, pipeline, WRITER_BUFFER_SIZE, None)
    }

    fn from_index(
        index: Index,
        pipeline: Arc<Pipeline>,
        writer_buffer: usize,
        location: Option<PathBuf>,
    ) -> Result<Self> {
        let schema = RecordSchema::from_schema(&index.schema())?;
        RecordSchema::register_tokenizers(&index, pipeline);

        let writer = index
            .writer(writer_buffer)
            .map_err(|e| Error::store(format!("Failed to create index writer: {e}")))?;
        let reader = open_reader(&index)?;

        Ok(Self {
            index,
            writer,
            reader,
            schema,
            location,
        })
    }

    /// Record schema of this index.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Returns `true` if the last commit holds a record for `id`.
    pub fn contains(&self, id: &str) -> Result<bool> {
        let term = Term::from_field_text(self.schema.path, id);
        let query = TermQuery::new(term, IndexRecordOption::Basic);
        let count = self
            .reader
            .searcher()
            .search(&query, &Count)
            .map_err(|e| Error::store(format!("Failed to look up {id}: {e}")))?;
        Ok(count > 0)
    }

    /// Replace the record for `id` with `record`.
    ///
    /// The change is staged; it becomes visible after [`IndexStore::commit`].
    pub fn upsert(&mut self, id: &str, record: TantivyDocument) -> Result<RecordStatus> {
        let status = if self.contains(id)? {
            RecordStatus::Updated
        } else {
            RecordStatus::Created
        };

        self.writer
            .delete_term(Term::from_field_text(self.schema.path, id));
        self.writer
            .add_document(record)
            .map_err(|e| Error::store(format!("Failed to add document {id}: {e}")))?;

        Ok(status)
    }

    /// Commit staged changes and refresh the committed view.
    pub fn commit(&mut self) -> Result<()> {
        self.writer
            .commit()
            .map_err(|e| Error::store(format!("Failed to commit index: {e}")))?;
        self.reader
            .reload()
            .map_err(|e| Error::store(format!("Failed to reload index reader: {e}")))?;
        Ok(())
    }

    /// Commit and release the writer (and its directory lock).
    pub fn commit_and_close(mut self) -> Result<()> {
        self.commit()?;
        self.close()
    }

    /// Release the writer, discarding uncommitted changes.
    pub fn close(self) -> Result<()> {
        self.writer
            .wait_merging_threads()
            .map_err(|e| Error::store(format!("Failed to close index writer: {e}")))
    }

    /// Read-only view of the last commit.
    pub fn snapshot(&self) -> Result<IndexSnapshot> {
        IndexSnapshot::from_index(self.index.clone())
    }

    /// Number of documents visible in the last commit.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }
}

impl std::fmt::Debug for IndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexStore")
            .field("index", &"<tantivy::Index>")
            .field("location", &self.location)
            .finish()
    }
}

/// Read-only view of a committed index.
pub struct IndexSnapshot {
    index: Index,
    searcher: Searcher,
    schema: RecordSchema,
}

impl IndexSnapshot {
    /// Open the last commit of the index at `index_path`.
    ///
    /// Fails with [`Error::NotFound`] when there is no index there.
    pub fn open(index_path: &Path) -> Result<Self> {
        if !Self::exists(index_path) {
            return Err(Error::not_found(index_path, "index"));
        }
        let index = Index::open_in_dir(index_path)
            .map_err(|e| Error::store(format!("Failed to open index: {e}")))?;
        Self::from_index(index)
    }

    /// Check if an index exists at the given path.
    pub fn exists(index_path: &Path) -> bool {
        index_path.join("meta.json").exists()
    }

    fn from_index(index: Index) -> Result<Self> {
        let schema = RecordSchema::from_schema(&index.schema())?;
        let searcher = open_reader(&index)?.searcher();
        Ok(Self {
            index,
            searcher,
            schema,
        })
    }

    /// The underlying Tantivy index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Searcher pinned to this snapshot.
    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    /// Record schema of this index.
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Number of documents in the snapshot.
    pub fn num_docs(&self) -> u64 {
        self.searcher.num_docs()
    }
}

impl std::fmt::Debug for IndexSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexSnapshot")
            .field("num_docs", &self.num_docs())
            .finish()
    }
}

fn open_reader(index: &Index) -> Result<IndexReader> {
    let reader: tantivy::Result<IndexReader> = index
        .reader_builder()
        .reload_policy(ReloadPolicy::Manual)
        .try_into();
    reader.map_err(|e| Error::store(format!("Failed to open index reader: {e}")))
}

// ============================================================================
// Tests
// ============================================================================
