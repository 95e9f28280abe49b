//! Error types for the indexer.
//!
//! Two tiers exist. `XrefError` is returned to the caller and covers
//! everything that must stop an invocation before output is produced:
//! malformed unit envelopes, unit-count violations, unreadable config,
//! directory walk failures. `DocumentFailure` describes a single document
//! that was dropped from the graph; those are collected and reported,
//! never propagated as an `Err`.

use std::{fmt, io, sync::Arc};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type XrefResult<T> = Result<T, XrefError>;

#[derive(Error, Diagnostic, Debug)]
pub enum XrefError {
    #[error("input contains no source unit data")]
    #[diagnostic(
        code(yaml_xref::units::empty),
        help("pipe the output of `yaml-xref scan` into `yaml-xref graph`")
    )]
    NoUnits,

    #[error("unexpected multiple units: expected exactly one, found {count}")]
    #[diagnostic(
        code(yaml_xref::units::multiple),
        help("graph one unit per invocation")
    )]
    MultipleUnits { count: usize },

    #[error("malformed source unit description")]
    #[diagnostic(code(yaml_xref::units::malformed))]
    MalformedUnits {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}")]
    #[diagnostic(code(yaml_xref::io))]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk directory tree")]
    #[diagnostic(code(yaml_xref::scan::walk))]
    Walk {
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid configuration in {path}")]
    #[diagnostic(code(yaml_xref::config))]
    Config {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to encode output")]
    #[diagnostic(code(yaml_xref::output))]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// A YAML document the parser could not turn into a node tree.
#[derive(Error, Diagnostic, Debug, Clone)]
#[error("parse error: {message}")]
#[diagnostic(code(yaml_xref::parse))]
pub struct ParseError {
    pub message: String,
    /// 0-based line the parser stopped on.
    pub line: usize,
    #[source_code]
    pub src: Arc<NamedSource<String>>,
    #[label("here")]
    pub span: SourceSpan,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        line: usize,
        src: Arc<NamedSource<String>>,
        span: SourceSpan,
    ) -> Self {
        Self {
            message: message.into(),
            line,
            src,
            span,
        }
    }
}

/// Why a single document was left out of the graph.
#[derive(Debug)]
pub enum DocumentError {
    Read(io::Error),
    Encoding(std::str::Utf8Error),
    Parse(ParseError),
    Fault(String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Read(e) => write!(f, "failed to read a source unit file: {}", e),
            DocumentError::Encoding(e) => write!(f, "document is not valid UTF-8: {}", e),
            DocumentError::Parse(e) => write!(f, "{} (line {})", e, e.line + 1),
            DocumentError::Fault(msg) => write!(f, "internal fault: {}", msg),
        }
    }
}

/// A document that was dropped, with the reason.
#[derive(Debug)]
pub struct DocumentFailure {
    pub path: String,
    pub reason: DocumentError,
}

impl fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}
