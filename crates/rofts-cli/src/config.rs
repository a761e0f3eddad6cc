//! Configuration file handling.
//!
//! The config file is TOML with two sections:
//!
//! ```toml
//! [index]
//! path = "index"
//! writer_buffer = 50000000
//! extensions = ["txt"]
//!
//! [analysis]
//! stages = ["tokenize", "lowercase", "diacritic_fold", "stopword_filter", "stem"]
//! stem_passes = 3
//! extra_stopwords = []
//! allow_stopwords = []
//! ```
//!
//! Lookup order: `--config` (or `$ROFTS_CONFIG`), then
//! `<config dir>/rofts/config.toml` if it exists, then built-in defaults.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rofts_analysis::{DEFAULT_STEM_PASSES, PipelineConfig, Stage, base_stopwords};
use rofts_core::{Error, Result};
use rofts_fts::WRITER_BUFFER_SIZE;
use serde::{Deserialize, Serialize};

/// Project name used for the config directory.
pub const PROJECT_NAME: &str = "rofts";

/// Config file name inside the project config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoftsConfig {
    /// Index location and writer settings.
    pub index: IndexSection,
    /// Analysis pipeline settings.
    pub analysis: AnalysisSection,
}

/// `[index]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSection {
    /// Index directory.
    pub path: PathBuf,
    /// Index writer buffer size in bytes.
    pub writer_buffer: usize,
    /// File extensions to index; empty means every file.
    pub extensions: Vec<String>,
}

impl Default for IndexSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("index"),
            writer_buffer: WRITER_BUFFER_SIZE,
            extensions: Vec::new(),
        }
    }
}

/// `[analysis]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Pipeline stages, in order.
    pub stages: Vec<Stage>,
    /// Number of stemming passes.
    pub stem_passes: usize,
    /// Stopword artifact location; defaults to `<index>/stopwords.txt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords_path: Option<PathBuf>,
    /// Words added to the bundled Romanian stopword list.
    pub extra_stopwords: Vec<String>,
    /// Words removed from the bundled Romanian stopword list.
    pub allow_stopwords: Vec<String>,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            stages: Stage::ALL.to_vec(),
            stem_passes: DEFAULT_STEM_PASSES,
            stopwords_path: None,
            extra_stopwords: Vec::new(),
            allow_stopwords: Vec::new(),
        }
    }
}

impl AnalysisSection {
    /// The pipeline configuration described by this section.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let config = PipelineConfig::default()
            .with_stages(self.stages.clone())
            .with_stem_passes(self.stem_passes);
        match &self.stopwords_path {
            Some(path) => config.with_stopwords_path(path),
            None => config,
        }
    }

    /// Base stopword list adjusted by `extra_stopwords` and
    /// `allow_stopwords`.
    pub fn base_stopwords(&self) -> BTreeSet<String> {
        base_stopwords(&self.extra_stopwords, &self.allow_stopwords)
    }
}

impl RoftsConfig {
    /// Default config file location (`<config dir>/rofts/config.toml`).
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join(CONFIG_FILE))
    }

    /// Resolve which config file to use.
    pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_config_path(),
        }
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default location is optional; if
    /// there is no file there, defaults are returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::not_found(path, "config file"));
                }
                Self::load_from(path)
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
