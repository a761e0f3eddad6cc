//! Common test utilities for rofts integration tests.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rofts_analysis::PipelineConfig;
use rofts_core::document_id;
use rofts_fts::{BatchResults, IndexBuilder, IndexStats, open_for_search};
use tempfile::TempDir;

/// Stopwords used by most tests, so results do not depend on the bundled
/// list.
pub const TEST_STOPWORDS: &[&str] = &["și", "pe", "cu", "un", "o", "în"];

/// A temporary document tree plus an index directory.
pub struct TestCorpus {
    source: TempDir,
    index: TempDir,
    config: PipelineConfig,
}

impl TestCorpus {
    /// Creates an empty corpus analyzed with the default pipeline.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Creates an empty corpus analyzed with `config`.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            source: tempfile::tempdir().expect("source dir"),
            index: tempfile::tempdir().expect("index dir"),
            config,
        }
    }

    /// Writes (or overwrites) a document.
    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.source.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// The identifier the index stores for document `name`.
    pub fn id(&self, name: &str) -> String {
        document_id(&self.source.path().join(name))
    }

    pub fn source_path(&self) -> &Path {
        self.source.path()
    }

    pub fn index_path(&self) -> &Path {
        self.index.path()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs a full indexing pass with [`TEST_STOPWORDS`].
    pub fn build(&self) -> IndexStats {
        IndexBuilder::new(self.config.clone())
            .with_base_stopwords(test_stopwords())
            .build(self.source.path(), self.index.path())
            .expect("indexing run should succeed")
    }

    /// Opens the index and runs `queries` as one batch.
    pub fn search(&self, queries: &[&str]) -> BatchResults {
        let (engine, snapshot) =
            open_for_search(self.index.path(), &self.config).expect("index should open");
        engine
            .search_batch(queries.iter().copied(), &snapshot)
            .expect("batch should run")
    }

    /// Identifiers matched by a single query.
    pub fn ids(&self, query: &str) -> Vec<String> {
        self.search(&[query])
            .get(query)
            .map(|outcome| outcome.ids().to_vec())
            .unwrap_or_default()
    }
}

impl Default for TestCorpus {
    fn default() -> Self {
        Self::new()
    }
}

pub fn test_stopwords() -> BTreeSet<String> {
    TEST_STOPWORDS.iter().map(|s| s.to_string()).collect()
}

/// The two-document corpus used across tests.
pub fn cat_and_dog() -> TestCorpus {
    let corpus = TestCorpus::new();
    corpus.write("cat", "pisica neagra");
    corpus.write("dog", "cainele maro");
    corpus.build();
    corpus
}
