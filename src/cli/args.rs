//! Command-line arguments and subcommands.
//!
//! Uses `clap` with its "derive" feature.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "yaml-xref",
    version,
    about = "Index YAML document trees into a byte-exact cross-reference graph."
)]
pub struct XrefArgs {
    /// YAML file with indexer settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace. RUST_LOG overrides it.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a directory tree for YAML files and print its source unit.
    Scan {
        /// Directory to scan.
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Graph the source unit read from stdin (or --input).
    Graph {
        /// Read the unit description from this file instead of stdin.
        #[arg(long)]
        input: Option<PathBuf>,
        /// Directory the unit's file paths are relative to.
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Also emit a definition for every non-empty token.
        #[arg(long)]
        emit_definitions: bool,
        /// Pretty-print the graph.
        #[arg(long)]
        pretty: bool,
    },
    /// Print every token of a YAML file with its resolved byte span.
    Tokens {
        /// The YAML file to inspect.
        #[arg(required = true)]
        file: PathBuf,
    },
}
