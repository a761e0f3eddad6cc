//! Tantivy schema for indexed records.
//!
//! # Schema Fields
//!
//! - `path`: document identifier (STRING | STORED), exact match, not tokenized
//! - `modified`: last modification, ms since the Unix epoch
//!   (i64, INDEXED | STORED | FAST)
//! - `content`: document text, tokenized by the analysis pipeline and indexed
//!   with positions; not stored
//!
//! # Tokenizer
//!
//! `content` uses the `rofts_pipeline` tokenizer, which must be registered on
//! every index handle before documents are added or queries are parsed. See
//! [`RecordSchema::register_tokenizers`].

use std::sync::Arc;

use rofts_analysis::Pipeline;
use rofts_core::{Error, Result};
use tantivy::Index;
use tantivy::schema::{
    FAST, Field, INDEXED, IndexRecordOption, STORED, STRING, Schema, SchemaBuilder,
    TextFieldIndexing, TextOptions,
};
use tantivy::tokenizer::TextAnalyzer;

use crate::tokenizer::PipelineTokenizer;

/// Name under which the pipeline tokenizer is registered.
pub const TOKENIZER_NAME: &str = "rofts_pipeline";

/// Field names.
pub const PATH_FIELD: &str = "path";
pub const MODIFIED_FIELD: &str = "modified";
pub const CONTENT_FIELD: &str = "content";

/// Record schema holding field handles and the Tantivy schema.
#[derive(Clone)]
pub struct RecordSchema {
    schema: Schema,
    /// Document identifier.
    pub path: Field,
    /// Modification timestamp.
    pub modified: Field,
    /// Analyzed content.
    pub content: Field,
}

impl RecordSchema {
    /// Build the record schema.
    pub fn build() -> Self {
        let mut builder = SchemaBuilder::new();

        let content_options = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(TOKENIZER_NAME)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        );

        let path = builder.add_text_field(PATH_FIELD, STRING | STORED);
        let modified = builder.add_i64_field(MODIFIED_FIELD, INDEXED | STORED | FAST);
        let content = builder.add_text_field(CONTENT_FIELD, content_options);

        Self {
            schema: builder.build(),
            path,
            modified,
            content,
        }
    }

    /// Resolve field handles from the schema of an existing index.
    ///
    /// Fails with [`Error::Store`] if the index was not created by
    /// [`RecordSchema::build`].
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        let field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|e| Error::store(format!("Index schema has no '{name}' field: {e}")))
        };

        Ok(Self {
            path: field(PATH_FIELD)?,
            modified: field(MODIFIED_FIELD)?,
            content: field(CONTENT_FIELD)?,
            schema: schema.clone(),
        })
    }

    /// Get the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Register the pipeline tokenizer with a Tantivy index.
    ///
    /// Index-time and query-time analysis both resolve `content` terms
    /// through this registration.
    pub fn register_tokenizers(index: &Index, pipeline: Arc<Pipeline>) {
        let analyzer = TextAnalyzer::builder(PipelineTokenizer::new(pipeline)).build();
        index.tokenizers().register(TOKENIZER_NAME, analyzer);
    }
}

impl std::fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordSchema")
            .field("fields", &[PATH_FIELD, MODIFIED_FIELD, CONTENT_FIELD])
            .field("tokenizer", &TOKENIZER_NAME)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_field_names() {
        let schema = RecordSchema::build();
        let tantivy_schema = schema.schema();

        assert!(tantivy_schema.get_field("path").is_ok());
        assert!(tantivy_schema.get_field("modified").is_ok());
        assert!(tantivy_schema.get_field("content").is_ok());
        assert_eq!(tantivy_schema.fields().count(), 3);
    }

    #[test]
    fn test_field_types() {
        let schema = RecordSchema::build();
        let tantivy_schema = schema.schema();

        let path_entry = tantivy_schema.get_field_entry(schema.path);
        assert!(path_entry.is_indexed());
        assert!(path_entry.is_stored());

        let modified_entry = tantivy_schema.get_field_entry(schema.modified);
        assert!(modified_entry.is_indexed());
        assert!(modified_entry.is_stored());
        assert!(modified_entry.is_fast());

        let content_entry = tantivy_schema.get_field_entry(schema.content);
        assert!(content_entry.is_indexed());
        assert!(!content_entry.is_stored());
    }

    #[test]
    fn test_from_schema_roundtrip() {
        let built = RecordSchema::build();
        let resolved = RecordSchema::from_schema(built.schema()).unwrap();

        assert_eq!(resolved.path, built.path);
        assert_eq!(resolved.modified, built.modified);
        assert_eq!(resolved.content, built.content);
    }

    #[test]
    fn test_from_schema_foreign_index() {
        let mut builder = SchemaBuilder::new();
        builder.add_text_field("title", STRING);
        let foreign = builder.build();

        assert!(matches!(
            RecordSchema::from_schema(&foreign),
            Err(Error::Store(_))
        ));
    }

    #[test]
    fn test_tokenizer_registration() {
        let schema = RecordSchema::build();
        let index = Index::create_in_ram(schema.schema().clone());

        RecordSchema::register_tokenizers(&index, Arc::new(Pipeline::fallback()));
        assert!(index.tokenizers().get(TOKENIZER_NAME).is_some());
    }

    #[test]
    fn test_schema_debug() {
        let debug = format!("{:?}", RecordSchema::build());
        assert!(debug.contains("RecordSchema"));
        assert!(debug.contains(TOKENIZER_NAME));
    }
}
