//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// rofts - diacritic- and inflection-insensitive search for Romanian text
#[derive(Parser, Debug)]
#[command(name = "rofts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ROFTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Index every file under a directory (or a single file)
    Index {
        /// File or directory to index
        source: PathBuf,

        /// Index directory (overrides the config file)
        #[arg(short, long)]
        index: Option<PathBuf>,
    },

    /// Run one or more queries against an index
    Search {
        /// Queries, each run separately
        #[arg(required = true)]
        queries: Vec<String>,

        /// Index directory (overrides the config file)
        #[arg(short, long)]
        index: Option<PathBuf>,
    },

    /// Show the terms the analysis pipeline produces for some text
    Analyze {
        /// Text to analyze
        #[arg(required = true)]
        text: Vec<String>,

        /// Index whose stopword file should be used
        #[arg(short, long)]
        index: Option<PathBuf>,
    },

    /// Configuration file operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print the effective configuration
    Show,
    /// Print one value by dotted key (e.g. `analysis.stem_passes`)
    Get {
        /// Dotted key
        key: String,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_index() {
        let cli = Cli::try_parse_from(["rofts", "index", "docs", "--index", "/tmp/idx"]).unwrap();
        match cli.command {
            Command::Index { source, index } => {
                assert_eq!(source, PathBuf::from("docs"));
                assert_eq!(index, Some(PathBuf::from("/tmp/idx")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_search_many_queries() {
        let cli = Cli::try_parse_from(["rofts", "-v", "search", "pisică", "mașinuță"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Search { queries, index } => {
                assert_eq!(queries, vec!["pisică", "mașinuță"]);
                assert!(index.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["rofts", "search"]).is_err());
    }

    #[test]
    fn test_parse_config_init_force() {
        let cli = Cli::try_parse_from(["rofts", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Init { force: true }
            }
        ));
    }
}
