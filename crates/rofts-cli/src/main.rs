#![forbid(unsafe_code)]

//! rofts CLI
//!
//! Index a directory of Romanian text and query it.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use rofts_cli::cli::{Cli, Command};
use rofts_cli::commands;
use rofts_cli::config::RoftsConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config;

    let output = match cli.command {
        Command::Config { action } => {
            commands::handle_config_command(config_path.as_deref(), action)?
        }
        Command::Index { source, index } => {
            let config = load_config(config_path.as_deref())?;
            tracing::info!(source = %source.display(), "Indexing");
            tokio::task::spawn_blocking(move || {
                commands::cmd_index(&config, &source, index.as_deref())
            })
            .await??
        }
        Command::Search { queries, index } => {
            let config = load_config(config_path.as_deref())?;
            tokio::task::spawn_blocking(move || {
                commands::cmd_search(&config, &queries, index.as_deref())
            })
            .await??
        }
        Command::Analyze { text, index } => {
            let config = load_config(config_path.as_deref())?;
            commands::cmd_analyze(&config, &text.join(" "), index.as_deref())
        }
    };

    print!("{output}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<RoftsConfig> {
    RoftsConfig::load(path).context("loading configuration")
}
