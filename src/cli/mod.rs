//! The yaml-xref command-line interface.
//!
//! This module parses arguments, sets up logging and configuration, and
//! hands each subcommand to the library.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;

use crate::cli::args::{Command, XrefArgs};
use crate::config::GraphConfig;
use crate::discovery;
use crate::errors::{XrefError, XrefResult};
use crate::pipeline::{flatten, Grapher, LineIndex};
use crate::source::FsSource;
use crate::syntax::{DocumentParser, YamlParser};
use crate::unit::decode_units;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() -> miette::Result<()> {
    let args = XrefArgs::parse();
    init_logging(&args.log_level);

    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Scan { dir } => handle_scan(&dir, &config)?,
        Command::Graph {
            input,
            root,
            emit_definitions,
            pretty,
        } => {
            let mut config = config;
            config.emit_definitions |= emit_definitions;
            handle_graph(input.as_deref(), root, &config, pretty)?
        }
        Command::Tokens { file } => handle_tokens(&file)?,
    }
    Ok(())
}

/// `--log-level` sets the default; `RUST_LOG` takes precedence when present.
fn init_logging(level: &str) {
    let level = level.parse().unwrap_or(LevelFilter::Warn);
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .try_init();
}

fn load_config(path: Option<&Path>) -> XrefResult<GraphConfig> {
    match path {
        Some(path) => {
            log::debug!("loading config from {}", path.display());
            GraphConfig::from_yaml_file(path)
        }
        None => Ok(GraphConfig::default()),
    }
}

fn handle_scan(dir: &Path, config: &GraphConfig) -> XrefResult<()> {
    let units = discovery::scan(dir, config)?;
    output::write_json(&units, true)
}

fn handle_graph(
    input: Option<&Path>,
    root: PathBuf,
    config: &GraphConfig,
    pretty: bool,
) -> XrefResult<()> {
    let bytes = read_input(input)?;
    let units = decode_units(&bytes)?;

    let grapher = Grapher::new(FsSource::new(root), YamlParser, config);
    let report = grapher.graph_units(units)?;

    for failure in &report.failures {
        log::warn!("{}", failure);
    }
    output::print_failures(&report.failures, report.documents);
    output::write_json(&report.output, pretty)
}

fn handle_tokens(file: &Path) -> XrefResult<()> {
    let name = file.display().to_string();
    let text = fs::read_to_string(file).map_err(|source| XrefError::Io {
        path: name.clone(),
        source,
    })?;
    let tree = YamlParser.parse(&name, &text)?;

    let index = LineIndex::new(&text);
    let tokens: Vec<_> = flatten(&tree)
        .into_iter()
        .map(|token| {
            let span = index.resolve(token.line, token.column, token.value);
            (token, span)
        })
        .collect();
    output::print_tokens(&tokens);
    Ok(())
}

fn read_input(input: Option<&Path>) -> XrefResult<Vec<u8>> {
    match input {
        Some(path) => fs::read(path).map_err(|source| XrefError::Io {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .map_err(|source| XrefError::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(bytes)
        }
    }
}
