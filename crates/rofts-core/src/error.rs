//! Error types for rofts.
//!
//! The taxonomy separates per-item failures (one document, one query), which
//! callers isolate and report, from store-level failures that end a run.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for rofts operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying an index.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The stopword artifact cannot be built, persisted, or loaded.
    #[error("Resource unavailable: {resource}: {message}")]
    ResourceUnavailable {
        /// Resource location (usually a file path).
        resource: String,
        /// What went wrong.
        message: String,
    },

    /// A configured analysis pipeline cannot be assembled.
    #[error("Pipeline construction failed: {0}")]
    PipelineConstruction(String),

    /// A single document's content cannot be read or extracted.
    #[error("Cannot read content of {id}: {message}")]
    ContentRead {
        /// Identifier of the document.
        id: String,
        /// What went wrong.
        message: String,
    },

    /// A single query string cannot be parsed.
    #[error("Cannot parse query '{query}': {message}")]
    QuerySyntax {
        /// The raw query text.
        query: String,
        /// Parser message.
        message: String,
    },

    /// The index store cannot be opened, written, committed, or searched.
    #[error("Index store failure: {0}")]
    Store(String),

    /// A required path does not exist or is not readable.
    #[error("{kind} not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: String,
        /// What kind of thing was expected there.
        kind: String,
    },

    /// I/O error with the path involved.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse error for persisted data (metadata, config files).
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Creates a `ResourceUnavailable` error.
    pub fn resource_unavailable(resource: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Error::ResourceUnavailable {
            resource: resource.as_ref().display().to_string(),
            message: message.into(),
        }
    }

    /// Creates a `PipelineConstruction` error.
    pub fn pipeline(message: impl Into<String>) -> Self {
        Error::PipelineConstruction(message.into())
    }

    /// Creates a `ContentRead` error.
    pub fn content_read(id: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ContentRead {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Creates a `QuerySyntax` error.
    pub fn query_syntax(query: impl Into<String>, message: impl Into<String>) -> Self {
        Error::QuerySyntax {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Creates a `Store` error.
    pub fn store(message: impl Into<String>) -> Self {
        Error::Store(message.into())
    }

    /// Creates a `NotFound` error.
    pub fn not_found(path: impl AsRef<Path>, kind: impl Into<String>) -> Self {
        Error::NotFound {
            path: path.as_ref().display().to_string(),
            kind: kind.into(),
        }
    }

    /// Wraps an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a `Config` error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Creates a `Parse` error.
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Returns whether this error must abort the current run.
    ///
    /// Per-item failures and degraded-resource failures are recoverable;
    /// the caller reports them and carries on.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::ResourceUnavailable { .. } => false,
            Error::PipelineConstruction(_) => false,
            Error::ContentRead { .. } => false,
            Error::QuerySyntax { .. } => false,
            Error::Store(_) => true,
            Error::NotFound { .. } => true,
            Error::Io { .. } => true,
            Error::Config(_) => true,
            Error::Parse(_) => true,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_unavailable_display() {
        let err = Error::resource_unavailable("/tmp/stopwords.txt", "permission denied");
        assert_eq!(
            err.to_string(),
            "Resource unavailable: /tmp/stopwords.txt: permission denied"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_pipeline_error_not_fatal() {
        let err = Error::pipeline("stem passes must be at least 1");
        assert!(err.to_string().contains("stem passes"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_per_item_errors_not_fatal() {
        assert!(!Error::content_read("/docs/a.txt", "invalid UTF-8").is_fatal());
        assert!(!Error::query_syntax("content:(", "unexpected end").is_fatal());
    }

    #[test]
    fn test_store_error_is_fatal() {
        let err = Error::store("Failed to commit index: disk full");
        assert_eq!(
            err.to_string(),
            "Index store failure: Failed to commit index: disk full"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("/nonexistent", "source directory");
        assert_eq!(err.to_string(), "source directory not found: /nonexistent");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_io_with_path_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_with_path(io, "/data/x");
        assert!(err.to_string().contains("/data/x"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
