//! Romanian text analysis for rofts.
//!
//! This crate turns raw text into the terms stored in (and looked up from)
//! the full-text index:
//!
//! - [`fold`]: diacritic folding (`ș` → `s`, `ă` → `a`)
//! - [`stopwords`]: stopword set construction and persistence
//! - [`config`]: stage selection and stemming passes
//! - [`pipeline`]: the assembled, reusable pipeline
//!
//! Index-time and query-time analysis must go through the same
//! [`Pipeline`]; a term only matches if both sides produced it identically.

pub mod config;
pub mod fold;
pub mod pipeline;
pub mod stopwords;

pub use config::{DEFAULT_STEM_PASSES, DEFAULT_STOPWORDS_FILE, PipelineConfig, Stage};
pub use fold::fold_diacritics;
pub use pipeline::{AnalyzedToken, Pipeline, Terms, Tokens};
pub use stopwords::{StopwordSet, StopwordSetBuilder, base_stopwords};
