//! The analysis pipeline shared by indexing and querying.
//!
//! Stages always run in this order:
//!
//! ```text
//! Tokenize → Lowercase → DiacriticFold → StopwordFilter → Stem × N
//! ```
//!
//! Folding runs before stemming: the Snowball Romanian rules match accented
//! suffixes, and folding an already stemmed token leaves it longer than the
//! stem of its folded spelling (`funcţionează` → `function` but
//! `functioneaza` → `functioneaz`). Both spellings must land on the same term,
//! so every token is folded first and the stemmer only ever sees folded
//! input.
//!
//! The stemmer is applied repeatedly because a single pass over folded text
//! can leave a reducible residue (`mamei` → `mame` → `mam`). Repetition stops
//! early once a pass no longer changes the token. The cost is occasional
//! overstemming, which is accepted: recall matters more than precision here.
//!
//! # Example
//!
//! ```rust
//! use rofts_analysis::Pipeline;
//!
//! let pipeline = Pipeline::fallback();
//! let terms: Vec<String> = pipeline.analyze("Pisica NEAGRA").collect();
//! assert_eq!(terms.len(), 2);
//! ```

use rofts_core::{Error, Result};
use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::{UnicodeSegmentation, UnicodeWordIndices};

use crate::config::{PipelineConfig, Stage};
use crate::fold::fold_diacritics;
use crate::stopwords::StopwordSet;

/// Tokens longer than this many bytes are dropped at tokenization.
pub const MAX_TOKEN_BYTES: usize = 255;

/// A configured, immutable analysis pipeline.
pub struct Pipeline {
    stages: Vec<Stage>,
    stopwords: Option<StopwordSet>,
    stem_passes: usize,
    stemmer: Stemmer,
    degraded: bool,
}

impl Pipeline {
    /// Assemble the pipeline described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PipelineConstruction`] if:
    /// - the stage list does not start with `tokenize`
    /// - stages are repeated or out of order
    /// - `stem` is enabled with zero passes
    /// - `stopword_filter` is enabled and the stopword artifact is missing
    pub fn build(config: &PipelineConfig) -> Result<Self> {
        validate_stages(&config.stages)?;

        let stem_passes = if config.has_stage(Stage::Stem) {
            if config.stem_passes == 0 {
                return Err(Error::pipeline("stem passes must be at least 1"));
            }
            config.stem_passes
        } else {
            0
        };

        let stopwords = if config.has_stage(Stage::StopwordFilter) {
            let path = config.stopwords_path.as_ref().ok_or_else(|| {
                Error::pipeline("stopword_filter stage requires a stopwords_path")
            })?;
            let set = StopwordSet::load(path)
                .map_err(|e| Error::pipeline(format!("cannot load stopwords: {e}")))?;
            Some(set)
        } else {
            None
        };

        Ok(Self {
            stages: config.stages.clone(),
            stopwords,
            stem_passes,
            stemmer: Stemmer::create(Algorithm::Romanian),
            degraded: false,
        })
    }

    /// Assemble the configured pipeline, or the built-in default if that
    /// fails.
    ///
    /// The failure is logged as a degraded-mode warning; the returned
    /// pipeline still tokenizes and stems.
    pub fn build_or_fallback(config: &PipelineConfig) -> Self {
        match Self::build(config) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                log::warn!("{e}");
                Self::fallback()
            }
        }
    }

    /// The built-in default pipeline: tokenize, lowercase, one stem pass.
    ///
    /// Diacritics and stopwords are not handled, so `pisică` and `pisica`
    /// may index as different terms.
    pub fn fallback() -> Self {
        log::warn!(
            "Using the default analysis pipeline; diacritics and stopwords will not be treated"
        );
        Self {
            stages: vec![Stage::Tokenize, Stage::Lowercase, Stage::Stem],
            stopwords: None,
            stem_passes: 1,
            stemmer: Stemmer::create(Algorithm::Romanian),
            degraded: true,
        }
    }

    /// Analyze `text` into index/query terms.
    ///
    /// The returned iterator is lazy and independent of any previous call.
    pub fn analyze<'a>(&'a self, text: &'a str) -> Terms<'a> {
        Terms {
            tokens: self.tokens(text),
        }
    }

    /// Analyze `text`, keeping byte offsets and word positions.
    ///
    /// Positions count every word the tokenizer found, including the ones
    /// later dropped as stopwords, so phrase distances are preserved.
    pub fn tokens<'a>(&'a self, text: &'a str) -> Tokens<'a> {
        Tokens {
            pipeline: self,
            words: text.unicode_word_indices(),
            position: 0,
        }
    }

    /// Run stages after tokenization on a single word.
    ///
    /// Returns `None` when the word is dropped.
    pub fn normalize(&self, word: &str) -> Option<String> {
        if word.is_empty() || word.len() > MAX_TOKEN_BYTES {
            return None;
        }

        let mut term = if self.has_stage(Stage::Lowercase) {
            word.to_lowercase()
        } else {
            word.to_string()
        };

        if self.has_stage(Stage::DiacriticFold) {
            term = fold_diacritics(&term);
        }

        if let Some(stopwords) = &self.stopwords {
            if stopwords.contains(&term) {
                return None;
            }
        }

        term = self.stem(term);

        if term.is_empty() { None } else { Some(term) }
    }

    /// Apply up to `stem_passes` stemming passes, stopping at a fixed point.
    fn stem(&self, mut term: String) -> String {
        for _ in 0..self.stem_passes {
            let next = self.stemmer.stem(&term).into_owned();
            if next == term {
                break;
            }
            term = next;
        }
        term
    }

    /// Returns `true` if `stage` runs in this pipeline.
    pub fn has_stage(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    /// Stages in execution order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Number of stemming passes (0 when stemming is disabled).
    pub fn stem_passes(&self) -> usize {
        self.stem_passes
    }

    /// Stopwords used by the filter stage, if enabled.
    pub fn stopwords(&self) -> Option<&StopwordSet> {
        self.stopwords.as_ref()
    }

    /// Returns `true` if this is the fallback pipeline.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Hash of everything that determines the produced terms.
    ///
    /// Two pipelines with equal fingerprints analyze any text identically.
    /// The value is a truncated blake3 digest and does not change between
    /// builds or toolchains.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for stage in &self.stages {
            hasher.update(stage.name().as_bytes());
            hasher.update(b"\0");
        }
        hasher.update(&(self.stem_passes as u64).to_le_bytes());
        if let Some(stopwords) = &self.stopwords {
            for word in stopwords.iter() {
                hasher.update(word.as_bytes());
                hasher.update(b"\n");
            }
        }
        let digest = hasher.finalize().to_hex();
        digest.as_str()[..16].to_string()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages)
            .field("stem_passes", &self.stem_passes)
            .field("stopwords", &self.stopwords.as_ref().map(StopwordSet::len))
            .field("degraded", &self.degraded)
            .finish()
    }
}

fn validate_stages(stages: &[Stage]) -> Result<()> {
    match stages.first() {
        Some(Stage::Tokenize) => {}
        Some(other) => {
            return Err(Error::pipeline(format!(
                "first stage must be tokenize, found {other}"
            )));
        }
        None => return Err(Error::pipeline("no stages configured")),
    }

    for pair in stages.windows(2) {
        if pair[0] >= pair[1] {
            return Err(Error::pipeline(format!(
                "stage {} cannot follow {}",
                pair[1], pair[0]
            )));
        }
    }

    Ok(())
}

/// A term produced by the pipeline, with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedToken {
    /// Normalized term.
    pub term: String,
    /// Byte offset of the source word start.
    pub offset_from: usize,
    /// Byte offset of the source word end.
    pub offset_to: usize,
    /// Word position in the source text.
    pub position: usize,
}

/// Lazy iterator over analyzed tokens. See [`Pipeline::tokens`].
pub struct Tokens<'a> {
    pipeline: &'a Pipeline,
    words: UnicodeWordIndices<'a>,
    position: usize,
}

impl Iterator for Tokens<'_> {
    type Item = AnalyzedToken;

    fn next(&mut self) -> Option<Self::Item> {
        for (offset, word) in self.words.by_ref() {
            let position = self.position;
            self.position += 1;

            if let Some(term) = self.pipeline.normalize(word) {
                return Some(AnalyzedToken {
                    term,
                    offset_from: offset,
                    offset_to: offset + word.len(),
                    position,
                });
            }
        }
        None
    }
}

/// Lazy iterator over analyzed terms. See [`Pipeline::analyze`].
pub struct Terms<'a> {
    tokens: Tokens<'a>,
}

impl Iterator for Terms<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next().map(|token| token.term)
    }
}

// ============================================================================
// Tests
// ============================================================================
