//! Document discovery and content extraction.
//!
//! [`DirectorySource`] walks a source root and yields one
//! [`DocumentDescriptor`] per regular file. Content is not read during the
//! walk; a [`ContentExtractor`] opens it later as a stream.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use rofts_core::{Error, Result, document_id};
use walkdir::WalkDir;

/// A document found during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDescriptor {
    /// Stable document identifier.
    pub id: String,
    /// Location of the content.
    pub path: PathBuf,
    /// Last modification, ms since the Unix epoch.
    pub modified: i64,
}

impl DocumentDescriptor {
    /// Create a descriptor with explicit values.
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, modified: i64) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            modified,
        }
    }

    /// Describe the file at `path`, using its canonical identifier and mtime.
    pub fn from_path(path: &Path) -> Self {
        Self {
            id: document_id(path),
            path: path.to_path_buf(),
            modified: modified_millis(path),
        }
    }
}

/// File mtime in ms since the Unix epoch, or 0 when unavailable.
fn modified_millis(path: &Path) -> i64 {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| i64::try_from(d.as_millis()).ok())
        .unwrap_or(0)
}

/// Opens document content as a text stream.
///
/// Implement this to index formats other than plain UTF-8 text.
pub trait ContentExtractor: Send + Sync {
    /// Open the content behind `descriptor`.
    ///
    /// Failures are reported as [`Error::ContentRead`] so the caller can
    /// skip the document.
    fn open(&self, descriptor: &DocumentDescriptor) -> Result<Box<dyn BufRead>>;

    /// Short name for logging.
    fn name(&self) -> &str;
}

/// Reads files as UTF-8 text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl ContentExtractor for PlainTextExtractor {
    fn open(&self, descriptor: &DocumentDescriptor) -> Result<Box<dyn BufRead>> {
        let file = File::open(&descriptor.path)
            .map_err(|e| Error::content_read(&descriptor.id, e.to_string()))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn name(&self) -> &str {
        "plain-text"
    }
}

/// Walks a file or directory tree for documents.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    extensions: Vec<String>,
}

impl DirectorySource {
    /// Create a source rooted at `root`.
    ///
    /// A root that is a single file yields just that file.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: Vec::new(),
        }
    }

    /// Only yield files with one of these extensions (case-insensitive).
    ///
    /// An empty list accepts every file.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// The source root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check that the root exists and can be read.
    pub fn validate(&self) -> Result<()> {
        let meta = fs::metadata(&self.root)
            .map_err(|_| Error::not_found(&self.root, "source"))?;

        let readable = if meta.is_dir() {
            fs::read_dir(&self.root).is_ok()
        } else {
            File::open(&self.root).is_ok()
        };

        if readable {
            Ok(())
        } else {
            Err(Error::not_found(&self.root, "readable source"))
        }
    }

    /// Lazily walk the root in file-name order.
    ///
    /// Each call starts a fresh walk. Entries that cannot be visited are
    /// logged and skipped.
    pub fn descriptors(&self) -> impl Iterator<Item = DocumentDescriptor> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Walk error: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| self.accepts(entry.path()))
            .map(|entry| DocumentDescriptor::from_path(entry.path()))
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}

// ============================================================================
// Tests
// ============================================================================
