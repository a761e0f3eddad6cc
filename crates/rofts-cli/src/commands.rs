//! Command handlers.
//!
//! Handlers are synchronous; `main` runs them on the blocking thread pool.
//! Each returns what it printed (or would print) so the formatting can be
//! tested without capturing stdout.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use rofts_analysis::Pipeline;
use rofts_core::{Error, Result};
use rofts_fts::{
    BatchResults, IndexBuilder, IndexStats, QueryOutcome, open_for_search, resolve_stopwords_path,
};

use crate::cli::ConfigAction;
use crate::config::{PROJECT_NAME, RoftsConfig};

// ============================================================================
// index / search / analyze
// ============================================================================

/// Index `source` and return a summary.
pub fn cmd_index(config: &RoftsConfig, source: &Path, index: Option<&Path>) -> Result<String> {
    let index_path = index_dir(config, index);

    let stats = IndexBuilder::new(config.analysis.pipeline_config())
        .with_base_stopwords(config.analysis.base_stopwords())
        .with_extensions(config.index.extensions.clone())
        .with_writer_buffer(config.index.writer_buffer)
        .build(source, &index_path)?;

    Ok(render_stats(&stats, &index_path))
}

/// Run `queries` as one batch and return the rendered results.
pub fn cmd_search(
    config: &RoftsConfig,
    queries: &[String],
    index: Option<&Path>,
) -> Result<String> {
    let index_path = index_dir(config, index);
    let (engine, snapshot) = open_for_search(&index_path, &config.analysis.pipeline_config())?;
    let results = engine.search_batch(queries, &snapshot)?;
    Ok(render_results(&results))
}

/// Analyze `text` and return one term per line.
pub fn cmd_analyze(config: &RoftsConfig, text: &str, index: Option<&Path>) -> String {
    let index_path = index_dir(config, index);
    let pipeline_config = resolve_stopwords_path(&config.analysis.pipeline_config(), &index_path);
    let pipeline = Pipeline::build_or_fallback(&pipeline_config);

    let mut out = String::new();
    for term in pipeline.analyze(text) {
        let _ = writeln!(out, "{term}");
    }
    out
}

fn index_dir(config: &RoftsConfig, index: Option<&Path>) -> PathBuf {
    index
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.index.path.clone())
}

/// Summary printed after an indexing run.
pub fn render_stats(stats: &IndexStats, index_path: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Indexed {} documents into {} ({} created, {} updated)",
        stats.documents_indexed,
        index_path.display(),
        stats.created,
        stats.updated
    );
    if stats.degraded {
        let _ = writeln!(
            out,
            "WARNING: default pipeline used; diacritics and stopwords were not treated"
        );
    }
    for failure in &stats.failures {
        let _ = writeln!(out, "WARNING: skipped {}: {}", failure.id, failure.message);
    }
    out
}

/// Per-query output: the query, its parsed form, then the matches.
pub fn render_results(results: &BatchResults) -> String {
    let mut out = String::new();
    for result in results.iter() {
        let _ = writeln!(out, "Original query: {}", result.raw);
        if let Some(parsed) = &result.parsed {
            let _ = writeln!(out, "Searching for: {parsed}");
        }
        match &result.outcome {
            QueryOutcome::Matches(ids) => {
                for id in ids {
                    let _ = writeln!(out, "{id}");
                }
            }
            QueryOutcome::NoResults => {
                let _ = writeln!(out, "no results found");
            }
            QueryOutcome::ParseFailure(message) => {
                let _ = writeln!(out, "parse failure: {message}");
            }
        }
        out.push('\n');
    }
    out
}

// ============================================================================
// config
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&Path>, action: ConfigAction) -> Result<String> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => RoftsConfig::load(config_path)?.to_toml_string(),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Init { force } => cmd_config_init(config_path, force),
    }
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&Path>) -> Result<String> {
    let path = RoftsConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;

    let mut out = format!("{}\n", path.display());
    if !path.exists() {
        let _ = writeln!(
            out,
            "(file does not exist; run `{PROJECT_NAME} config init` to create it)"
        );
    }
    Ok(out)
}

/// Get a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&Path>, key: &str) -> Result<String> {
    let config = RoftsConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    match get_nested_value(&value, key) {
        Some(val) => Ok(format!("{}\n", format_toml_value(val))),
        None => Err(Error::config(format!(
            "Key '{key}' not found in configuration"
        ))),
    }
}

/// Create a default configuration file.
pub fn cmd_config_init(config_path: Option<&Path>, force: bool) -> Result<String> {
    let path = RoftsConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = RoftsConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    Ok(format!("Config file created at {}\n", path.display()))
}

/// Navigate a dotted key path in a TOML value tree.
fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = value;
    for part in key.split('.') {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
