//! Batch query execution.
//!
//! [`QueryEngine`] parses raw query strings with Tantivy's query parser,
//! scoped to the `content` field and backed by the same analysis pipeline
//! that built the index, then returns up to [`TOP_K`] identifiers per query.
//!
//! Each query gets its own [`QueryOutcome`]. A query that fails to parse is
//! reported as [`QueryOutcome::ParseFailure`] and the rest of the batch still
//! runs; only a failing searcher aborts the batch.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rofts_fts::open_for_search;
//!
//! let (engine, snapshot) = open_for_search(&index_path, &pipeline_config)?;
//! let results = engine.search_batch(["pisică", "mașinuță"], &snapshot)?;
//!
//! for result in results.iter() {
//!     println!("{}: {:?}", result.raw, result.outcome);
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use rofts_analysis::{Pipeline, PipelineConfig};
use rofts_core::{Error, Result};
use tantivy::collector::TopDocs;
use tantivy::query::{Query, QueryParser};
use tantivy::schema::Value;
use tantivy::TantivyDocument;

use crate::builder::resolve_stopwords_path;
use crate::metadata::IndexMetadata;
use crate::schema::{CONTENT_FIELD, RecordSchema};
use crate::store::IndexSnapshot;

/// Maximum number of identifiers returned per query.
pub const TOP_K: usize = 10;

/// Words the query parser treats as operators rather than terms.
const OPERATORS: [&str; 3] = ["AND", "OR", "NOT"];

/// A query after parsing.
#[derive(Debug)]
pub struct ParsedQuery {
    raw: String,
    field: String,
    terms: Vec<String>,
    query: Box<dyn Query>,
}

impl ParsedQuery {
    /// The query as the user typed it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Default field the query targets.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Pipeline-normalized terms of the query.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The executable Tantivy query.
    pub fn query(&self) -> &dyn Query {
        self.query.as_ref()
    }
}

impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .terms
            .iter()
            .map(|term| format!("{}:{term}", self.field))
            .collect();
        f.write_str(&rendered.join(" "))
    }
}

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Matching identifiers, best first.
    Matches(Vec<String>),
    /// The query parsed but matched nothing.
    NoResults,
    /// The query could not be parsed.
    ParseFailure(String),
}

impl QueryOutcome {
    /// Matching identifiers (empty unless [`QueryOutcome::Matches`]).
    pub fn ids(&self) -> &[String] {
        match self {
            QueryOutcome::Matches(ids) => ids,
            _ => &[],
        }
    }

    /// Returns `true` for [`QueryOutcome::ParseFailure`].
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, QueryOutcome::ParseFailure(_))
    }
}

/// A raw query paired with its parsed form and outcome.
#[derive(Debug)]
pub struct QueryResult {
    /// The query as submitted.
    pub raw: String,
    /// Parsed form, absent when parsing failed.
    pub parsed: Option<ParsedQuery>,
    /// What the query produced.
    pub outcome: QueryOutcome,
}

/// Results of a batch, in submission order.
#[derive(Debug, Default)]
pub struct BatchResults {
    results: Vec<QueryResult>,
}

impl BatchResults {
    /// Outcome of the first query submitted as `raw`.
    pub fn get(&self, raw: &str) -> Option<&QueryOutcome> {
        self.results
            .iter()
            .find(|result| result.raw == raw)
            .map(|result| &result.outcome)
    }

    /// Iterate over results in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &QueryResult> {
        self.results.iter()
    }

    /// Number of queries in the batch.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl IntoIterator for BatchResults {
    type Item = QueryResult;
    type IntoIter = std::vec::IntoIter<QueryResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Parses and runs queries against an index snapshot.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    pipeline: Arc<Pipeline>,
}

impl QueryEngine {
    /// Create an engine analyzing queries with `pipeline`.
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }

    /// The query-time pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Run every query in `queries` against `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the searcher fails. Parse errors do not
    /// fail the batch.
    pub fn search_batch<I, S>(&self, queries: I, snapshot: &IndexSnapshot) -> Result<BatchResults>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RecordSchema::register_tokenizers(snapshot.index(), self.pipeline.clone());
        let parser = QueryParser::for_index(snapshot.index(), vec![snapshot.schema().content]);

        let mut batch = BatchResults::default();
        for raw in queries {
            let raw = raw.as_ref();
            let result = match self.parse(&parser, raw) {
                Ok(parsed) => {
                    let ids = self.execute(&parsed, snapshot)?;
                    log::debug!("{} matched {} documents", parsed, ids.len());
                    let outcome = if ids.is_empty() {
                        QueryOutcome::NoResults
                    } else {
                        QueryOutcome::Matches(ids)
                    };
                    QueryResult {
                        raw: raw.to_string(),
                        parsed: Some(parsed),
                        outcome,
                    }
                }
                Err(e) => {
                    log::warn!("{e}");
                    QueryResult {
                        raw: raw.to_string(),
                        parsed: None,
                        outcome: QueryOutcome::ParseFailure(e.to_string()),
                    }
                }
            };
            batch.results.push(result);
        }

        Ok(batch)
    }

    fn parse(&self, parser: &QueryParser, raw: &str) -> Result<ParsedQuery> {
        let query = parser
            .parse_query(raw)
            .map_err(|e| Error::query_syntax(raw, e.to_string()))?;

        let text: Vec<&str> = raw
            .split_whitespace()
            .filter(|word| !OPERATORS.contains(word))
            .collect();
        let terms = self.pipeline.analyze(&text.join(" ")).collect();

        Ok(ParsedQuery {
            raw: raw.to_string(),
            field: CONTENT_FIELD.to_string(),
            terms,
            query,
        })
    }

    fn execute(&self, parsed: &ParsedQuery, snapshot: &IndexSnapshot) -> Result<Vec<String>> {
        let searcher = snapshot.searcher();
        let path_field = snapshot.schema().path;

        let top_docs = searcher
            .search(parsed.query(), &TopDocs::with_limit(TOP_K))
            .map_err(|e| Error::store(format!("Search failed for '{}': {e}", parsed.raw)))?;

        let mut ids = Vec::with_capacity(top_docs.len());
        for (_score, address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(address)
                .map_err(|e| Error::store(format!("Failed to load document: {e}")))?;
            if let Some(id) = doc.get_first(path_field).and_then(|v| v.as_str()) {
                ids.push(id.to_string());
            }
        }
        Ok(ids)
    }
}

/// Open the index at `index_path` for querying.
///
/// The query pipeline is built from `config` (falling back to the default
/// pipeline if needed). An index built with the fallback pipeline is always
/// queried with the fallback pipeline, even if the configured one could be
/// assembled now. Otherwise a warning is logged when the query pipeline does
/// not match the one recorded at indexing time, since stored and query terms
/// would then disagree.
pub fn open_for_search(
    index_path: &Path,
    config: &PipelineConfig,
) -> Result<(QueryEngine, IndexSnapshot)> {
    let snapshot = IndexSnapshot::open(index_path)?;

    let metadata = match IndexMetadata::load(index_path) {
        Ok(Some(metadata)) => Some(metadata),
        Ok(None) => {
            log::debug!("No metadata found in {}", index_path.display());
            None
        }
        Err(e) => {
            log::warn!("Ignoring unreadable index metadata: {e}");
            None
        }
    };

    let pipeline = match &metadata {
        Some(metadata) if metadata.degraded => {
            log::warn!("Index was built with the default pipeline; querying with it too");
            Pipeline::fallback()
        }
        _ => Pipeline::build_or_fallback(&resolve_stopwords_path(config, index_path)),
    };

    if let Some(metadata) = &metadata {
        if !metadata.matches(&pipeline) {
            log::warn!(
                "Query pipeline {} differs from index pipeline {}; results may be incomplete",
                pipeline.fingerprint(),
                metadata.pipeline_fingerprint
            );
        }
    }

    log::info!(
        "Opened index at {} ({} documents)",
        index_path.display(),
        snapshot.num_docs()
    );

    Ok((QueryEngine::new(Arc::new(pipeline)), snapshot))
}

// ============================================================================
// Tests
// ============================================================================
