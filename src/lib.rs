//! yaml-xref: indexes YAML document trees into a cross-reference graph.
//!
//! A source unit lists the documents of one directory tree. Each document is
//! parsed into a position-annotated tree, flattened, and every token is
//! located to an exact byte range of the document text. The result is a
//! graph of reference (and optionally definition) records.

pub use crate::config::GraphConfig;
pub use crate::errors::{DocumentError, DocumentFailure, ParseError, XrefError, XrefResult};
pub use crate::pipeline::{GraphOutput, GraphReport, Grapher};
pub use crate::source::{DocumentSource, FsSource, MemorySource};
pub use crate::syntax::{DocumentParser, Node, YamlParser};
pub use crate::unit::SourceUnit;

pub mod cli;
pub mod config;
pub mod discovery;
pub mod errors;
pub mod pipeline;
pub mod source;
pub mod syntax;
pub mod unit;
