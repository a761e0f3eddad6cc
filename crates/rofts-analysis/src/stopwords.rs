//! Stopword set construction and persistence.
//!
//! The base list is the Romanian list shipped by the `stop-words` crate. Many
//! of its entries carry diacritics (`și`, `până`, `către`), while a large part
//! of real-world Romanian text is typed without them. The builder therefore
//! stores every stopword in both its accented and its folded form, and the
//! pipeline checks tokens after folding.
//!
//! The set is persisted to a plain text artifact (one word per line, sorted)
//! so that a later search process analyzes queries with exactly the set the
//! indexer used.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use rofts_analysis::stopwords::StopwordSetBuilder;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let base: BTreeSet<String> = ["și", "pe"].iter().map(|s| s.to_string()).collect();
//!
//! let set = StopwordSetBuilder::new(dir.path().join("stopwords.txt"))
//!     .build(&base)
//!     .unwrap();
//!
//! assert!(set.contains("și"));
//! assert!(set.contains("si"));
//! assert_eq!(set.len(), 3);
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rofts_core::{Error, Result};
use stop_words::{get, LANGUAGE};

use crate::fold::fold_diacritics;

/// Immutable set of stopwords in accented and folded forms.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: BTreeSet<String>,
}

impl StopwordSet {
    /// Build a set from base words, adding the folded form of every word
    /// that carries diacritics.
    pub fn expand<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            let folded = fold_diacritics(&word);
            if folded != word {
                set.insert(folded);
            }
            set.insert(word);
        }
        Self { words: set }
    }

    /// Load a persisted stopword artifact.
    ///
    /// Blank lines and lines starting with `#` are ignored. The folded-form
    /// invariant is re-established on load, so hand-edited files stay valid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::resource_unavailable(path, e.to_string()))?;

        let set = Self::expand(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
        log::debug!("Loaded {} stopwords from {}", set.len(), path.display());
        Ok(set)
    }

    /// Check if a (lowercased) word is a stopword.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of word forms in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl std::fmt::Debug for StopwordSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopwordSet")
            .field("word_count", &self.words.len())
            .finish()
    }
}

/// The Romanian base stopword list, adjusted by configuration.
///
/// `extra` words are added; `allowlist` words are removed (compared after
/// lowercasing), for domain terms that look like stopwords.
pub fn base_stopwords(extra: &[String], allowlist: &[String]) -> BTreeSet<String> {
    let allow: BTreeSet<String> = allowlist.iter().map(|w| w.to_lowercase()).collect();

    get(LANGUAGE::Romanian)
        .iter()
        .map(|s| s.to_lowercase())
        .chain(extra.iter().map(|s| s.to_lowercase()))
        .filter(|w| !w.trim().is_empty() && !allow.contains(w))
        .collect()
}

/// Builds a [`StopwordSet`] and persists it for later processes.
#[derive(Debug, Clone)]
pub struct StopwordSetBuilder {
    destination: PathBuf,
}

impl StopwordSetBuilder {
    /// Create a builder that writes the artifact to `destination`.
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Where the artifact is written.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Expand `base` into a stopword set and persist it.
    ///
    /// The output depends only on the contents of `base`. Fails with
    /// [`Error::ResourceUnavailable`] if the artifact cannot be written.
    pub fn build(&self, base: &BTreeSet<String>) -> Result<StopwordSet> {
        let set = StopwordSet::expand(base);
        self.persist(&set)?;
        log::info!(
            "Built {} stopword forms from {} base words at {}",
            set.len(),
            base.len(),
            self.destination.display()
        );
        Ok(set)
    }

    fn persist(&self, set: &StopwordSet) -> Result<()> {
        let unavailable =
            |e: std::io::Error| Error::resource_unavailable(&self.destination, e.to_string());

        if let Some(parent) = self.destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(unavailable)?;
            }
        }

        let mut file = fs::File::create(&self.destination).map_err(unavailable)?;
        for word in set.iter() {
            writeln!(file, "{word}").map_err(unavailable)?;
        }
        file.flush().map_err(unavailable)?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
