//! Document indexing.
//!
//! [`DocumentIndexer`] turns [`DocumentDescriptor`]s into index records and
//! upserts them into an [`IndexStore`]. Content is streamed from the
//! extractor and added to the record in bounded chunks, split after
//! whitespace so words stay whole.
//!
//! A document whose content cannot be read is skipped and reported; the run
//! carries on. Store failures end the run.

use std::io::BufRead;

use rofts_core::{Error, Result};
use tantivy::TantivyDocument;

use crate::schema::RecordSchema;
use crate::source::{ContentExtractor, DocumentDescriptor, PlainTextExtractor};
use crate::store::{IndexStore, RecordStatus};

/// Target size of a content chunk (64KB).
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Smallest chunk that always holds a whole UTF-8 character.
pub const MIN_CHUNK_SIZE: usize = 4;

/// A document that could not be indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFailure {
    /// Identifier of the skipped document.
    pub id: String,
    /// Why it was skipped.
    pub message: String,
}

/// Statistics about an indexing operation.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Number of documents successfully indexed.
    pub documents_indexed: usize,
    /// Documents that had no committed record before this run.
    pub created: usize,
    /// Documents whose committed record was replaced.
    pub updated: usize,
    /// Number of descriptors processed.
    pub files_processed: usize,
    /// Number of documents skipped because of errors.
    pub errors: usize,
    /// Total bytes of content processed.
    pub bytes_processed: usize,
    /// Skipped documents and their errors.
    pub failures: Vec<IndexFailure>,
    /// Whether the run used the fallback analysis pipeline.
    pub degraded: bool,
}

impl IndexStats {
    fn record(&mut self, id: &str, outcome: DocumentOutcome) {
        self.files_processed += 1;
        match outcome {
            DocumentOutcome::Indexed { status, bytes } => {
                self.documents_indexed += 1;
                self.bytes_processed += bytes;
                match status {
                    RecordStatus::Created => self.created += 1,
                    RecordStatus::Updated => self.updated += 1,
                }
            }
            DocumentOutcome::Failed(e) => {
                self.errors += 1;
                self.failures.push(IndexFailure {
                    id: id.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Result of indexing one document.
#[derive(Debug)]
pub enum DocumentOutcome {
    /// The record was staged.
    Indexed {
        /// Whether an existing record is being replaced.
        status: RecordStatus,
        /// Content bytes read.
        bytes: usize,
    },
    /// The document was skipped.
    Failed(Error),
}

/// Builds index records from document descriptors.
pub struct DocumentIndexer {
    extractor: Box<dyn ContentExtractor>,
    chunk_size: usize,
}

impl DocumentIndexer {
    /// Create an indexer reading content through `extractor`.
    pub fn new(extractor: Box<dyn ContentExtractor>) -> Self {
        Self {
            extractor,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// Set the content chunk size in bytes (at least [`MIN_CHUNK_SIZE`]).
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(MIN_CHUNK_SIZE);
        self
    }

    /// Index every descriptor, in order.
    ///
    /// Per-document failures are logged and collected in
    /// [`IndexStats::failures`]. Changes are staged only; the caller commits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the store fails; the run stops there.
    pub fn index_all<I>(&self, descriptors: I, store: &mut IndexStore) -> Result<IndexStats>
    where
        I: IntoIterator<Item = DocumentDescriptor>,
    {
        let mut stats = IndexStats::default();
        for descriptor in descriptors {
            let outcome = self.index_document(&descriptor, store)?;
            stats.record(&descriptor.id, outcome);
        }
        Ok(stats)
    }

    /// Index a single document.
    ///
    /// Read failures come back as [`DocumentOutcome::Failed`]; only store
    /// failures are returned as `Err`.
    pub fn index_document(
        &self,
        descriptor: &DocumentDescriptor,
        store: &mut IndexStore,
    ) -> Result<DocumentOutcome> {
        let (record, bytes) = match self.read_record(descriptor, store.schema()) {
            Ok(read) => read,
            Err(e) => {
                log::warn!("Skipping {}: {e}", descriptor.id);
                return Ok(DocumentOutcome::Failed(e));
            }
        };

        let status = store.upsert(&descriptor.id, record)?;
        log::info!("Index record {} for {}", status.as_str(), descriptor.id);

        Ok(DocumentOutcome::Indexed { status, bytes })
    }

    /// Build the record for `descriptor`, streaming its content.
    ///
    /// At most `chunk_size` bytes are buffered. Each full buffer is cut after
    /// its last ASCII whitespace byte (or, for a run with no whitespace, at
    /// the last complete character) and the remainder carries over. The
    /// content stream is dropped when this returns, on every path.
    fn read_record(
        &self,
        descriptor: &DocumentDescriptor,
        schema: &RecordSchema,
    ) -> Result<(TantivyDocument, usize)> {
        let mut reader = self.extractor.open(descriptor)?;
        let read_error = |message: String| Error::content_read(&descriptor.id, message);

        let mut record = TantivyDocument::new();
        record.add_text(schema.path, &descriptor.id);
        record.add_i64(schema.modified, descriptor.modified);

        let mut buffer: Vec<u8> = Vec::with_capacity(self.chunk_size);
        let mut bytes = 0;
        loop {
            if buffer.len() >= self.chunk_size {
                let cut = chunk_boundary(&buffer).map_err(read_error)?;
                let chunk = std::str::from_utf8(&buffer[..cut])
                    .map_err(|e| read_error(e.to_string()))?;
                record.add_text(schema.content, chunk);
                buffer.drain(..cut);
                continue;
            }

            let available = reader.fill_buf().map_err(|e| read_error(e.to_string()))?;
            if available.is_empty() {
                break;
            }
            let take = available.len().min(self.chunk_size - buffer.len());
            buffer.extend_from_slice(&available[..take]);
            reader.consume(take);
            bytes += take;
        }

        if !buffer.is_empty() {
            let chunk = std::str::from_utf8(&buffer).map_err(|e| read_error(e.to_string()))?;
            record.add_text(schema.content, chunk);
        }

        Ok((record, bytes))
    }
}

/// Length of the prefix of a full buffer to emit as one chunk.
///
/// Always at least 1 when `buffer` holds [`MIN_CHUNK_SIZE`] bytes or more.
fn chunk_boundary(buffer: &[u8]) -> std::result::Result<usize, String> {
    if let Some(pos) = buffer.iter().rposition(u8::is_ascii_whitespace) {
        return Ok(pos + 1);
    }
    match std::str::from_utf8(buffer) {
        Ok(_) => Ok(buffer.len()),
        // Incomplete character at the end: stop before it.
        Err(e) if e.error_len().is_none() => Ok(e.valid_up_to()),
        Err(e) => Err(e.to_string()),
    }
}

impl Default for DocumentIndexer {
    fn default() -> Self {
        Self::new(Box::new(PlainTextExtractor))
    }
}

impl std::fmt::Debug for DocumentIndexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentIndexer")
            .field("extractor", &self.extractor.name())
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
