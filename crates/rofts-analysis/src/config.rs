//! Pipeline configuration.
//!
//! A [`PipelineConfig`] is built once per process (usually from the
//! `[analysis]` section of the config file) and handed to both the indexer and
//! the query engine, so stored terms and query terms go through the same
//! stages.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default number of stemming passes.
///
/// Two passes are often enough; three catches a few more residues. This is
/// a tunable, not a settled constant.
pub const DEFAULT_STEM_PASSES: usize = 3;

/// Default stopword artifact file name, relative to the index directory.
pub const DEFAULT_STOPWORDS_FILE: &str = "stopwords.txt";

/// A stage of the analysis pipeline.
///
/// The declaration order is the only order in which stages may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Split text into word tokens on Unicode word boundaries.
    Tokenize,
    /// Case-fold tokens.
    Lowercase,
    /// Strip diacritical marks.
    DiacriticFold,
    /// Drop stopwords.
    StopwordFilter,
    /// Apply the Romanian stemmer (repeated `stem_passes` times).
    Stem,
}

impl Stage {
    /// All stages, in their mandatory order.
    pub const ALL: [Stage; 5] = [
        Stage::Tokenize,
        Stage::Lowercase,
        Stage::DiacriticFold,
        Stage::StopwordFilter,
        Stage::Stem,
    ];

    /// Stable name used in config files and fingerprints.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Tokenize => "tokenize",
            Stage::Lowercase => "lowercase",
            Stage::DiacriticFold => "diacritic_fold",
            Stage::StopwordFilter => "stopword_filter",
            Stage::Stem => "stem",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Analysis pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Stages to run, in order.
    #[serde(default = "default_stages")]
    pub stages: Vec<Stage>,

    /// Number of times the stemmer is applied.
    #[serde(default = "default_stem_passes")]
    pub stem_passes: usize,

    /// Location of the persisted stopword set.
    ///
    /// Required when `stages` contains [`Stage::StopwordFilter`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopwords_path: Option<PathBuf>,
}

fn default_stages() -> Vec<Stage> {
    Stage::ALL.to_vec()
}

fn default_stem_passes() -> usize {
    DEFAULT_STEM_PASSES
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stages: default_stages(),
            stem_passes: default_stem_passes(),
            stopwords_path: None,
        }
    }
}

impl PipelineConfig {
    /// Full Romanian pipeline reading stopwords from `stopwords_path`.
    pub fn romanian(stopwords_path: impl Into<PathBuf>) -> Self {
        Self {
            stopwords_path: Some(stopwords_path.into()),
            ..Default::default()
        }
    }

    /// Set the number of stemming passes.
    pub fn with_stem_passes(mut self, passes: usize) -> Self {
        self.stem_passes = passes;
        self
    }

    /// Set the stopword artifact location.
    pub fn with_stopwords_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopwords_path = Some(path.into());
        self
    }

    /// Replace the stage list.
    pub fn with_stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = stages;
        self
    }

    /// Returns `true` if `stage` is enabled.
    pub fn has_stage(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }
}

// ============================================================================
// Tests
// ============================================================================
