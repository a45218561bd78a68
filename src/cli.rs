//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `tagcheck`.
#[derive(Debug, Parser)]
#[command(
    name = "tagcheck",
    version,
    about = "Check enumerated game-entity names in tagged template literals"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report (and optionally fix) misspelled entity constants.
    Check {
        /// Files or directories to check.
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
        /// Rewrite files with every automatic fix applied.
        #[arg(long)]
        fix: bool,
        /// Config file (defaults to `tagcheck.yaml` when present).
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Directory holding the `<kind>.json` vocabularies.
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
        /// Report format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Refresh the vocabulary files from the entity-data service.
    UpdateData {
        /// Directory to write the vocabularies into.
        #[arg(long, value_name = "DIR", default_value = "data")]
        data_dir: PathBuf,
        /// Skip the refresh when local data is at least this revision.
        #[arg(long, value_name = "N")]
        revision: Option<u64>,
        /// GraphQL endpoint of the entity-data service.
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
    },
}

/// How `check` prints its findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One `path:line:col  message  [messageId]` line per problem.
    Text,
    /// One JSON object per file with problems.
    Json,
}
