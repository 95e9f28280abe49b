//! All user-facing output for the CLI.
//!
//! Machine-readable JSON goes to stdout. Everything meant for a person goes
//! to stderr so it never mixes into the graph.

use std::io::{self, IsTerminal, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::errors::{DocumentFailure, XrefError, XrefResult};
use crate::pipeline::{Span, Token};

/// Writes `value` as JSON to stdout, newline terminated.
pub fn write_json<T: Serialize>(value: &T, pretty: bool) -> XrefResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let encoded = if pretty {
        serde_json::to_writer_pretty(&mut out, value)
    } else {
        serde_json::to_writer(&mut out, value)
    };
    encoded.map_err(|source| XrefError::Encode { source })?;
    writeln!(out)
        .and_then(|_| out.flush())
        .map_err(|source| XrefError::Io {
            path: "<stdout>".to_string(),
            source,
        })
}

/// Colors only when writing to a terminal.
fn color_choice(terminal: bool) -> ColorChoice {
    if terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Summarizes the documents dropped from a graph.
pub fn print_failures(failures: &[DocumentFailure], documents: usize) {
    if failures.is_empty() {
        return;
    }
    let mut stderr = StandardStream::stderr(color_choice(io::stderr().is_terminal()));
    for failure in failures {
        let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        let _ = write!(stderr, "skipped");
        let _ = stderr.reset();
        let _ = writeln!(stderr, " {}", failure);
    }
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
    let _ = writeln!(
        stderr,
        "{} of {} documents left out of the graph",
        failures.len(),
        documents
    );
    let _ = stderr.reset();
}

/// Prints one token per line: position, span, value.
pub fn print_tokens(tokens: &[(Token<'_>, Option<Span>)]) {
    let mut stdout = StandardStream::stdout(color_choice(io::stdout().is_terminal()));
    for (token, span) in tokens {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)));
        let _ = write!(stdout, "{}:{}", token.line, token.column);
        let _ = stdout.reset();
        match span {
            Some(span) => {
                let _ = write!(stdout, "\t{}..{}", span.start, span.end);
            }
            None => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = write!(stdout, "\tunresolved");
                let _ = stdout.reset();
            }
        }
        let _ = writeln!(stdout, "\t{:?}", token.value);
    }
}
