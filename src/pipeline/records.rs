//! Reference and definition records.
//!
//! Field names follow the external indexer's graph format, so every record
//! serializes in PascalCase (`DefUnitType`, `DefPath`, `Start`, ...).

use std::path::MAIN_SEPARATOR;

use serde::{Deserialize, Serialize};

use crate::config::GraphConfig;
use crate::pipeline::flatten::Token;
use crate::pipeline::offsets::{span_bounds, Span};
use crate::unit::SourceUnit;

/// An edge from a span in one document to a document path next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ref {
    pub def_unit_type: String,
    pub def_unit: String,
    pub def_path: String,
    pub unit: String,
    pub file: String,
    /// Byte offset, or -1 when the token could not be located.
    pub start: i64,
    pub end: i64,
    pub def: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DefKey {
    pub repo: String,
    pub unit_type: String,
    pub unit: String,
    pub path: String,
}

/// A key declared in a unit that opted into definition emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Def {
    #[serde(flatten)]
    pub key: DefKey,
    pub kind: String,
    pub file: String,
    pub def_start: i64,
    pub def_end: i64,
    pub tree_path: String,
}

/// Builds records for the tokens of one document.
#[derive(Debug, Clone)]
pub struct RecordBuilder<'a> {
    unit: &'a SourceUnit,
    config: &'a GraphConfig,
    file: String,
    def_unit: String,
    dir: String,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(unit: &'a SourceUnit, config: &'a GraphConfig, path: &str) -> Self {
        let file = to_slash(path);
        let def_unit = strip_extension(&file).to_string();
        let dir = parent_dir(&file).to_string();
        Self {
            unit,
            config,
            file,
            def_unit,
            dir,
        }
    }

    /// The slash-normalized document path.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Path the token's value designates, relative to the document's
    /// directory.
    pub fn target_path(&self, value: &str) -> String {
        format!("{}/{}", self.dir, value)
    }

    pub fn reference(&self, token: &Token<'_>, span: Option<Span>) -> Ref {
        let (start, end) = span_bounds(span);
        Ref {
            def_unit_type: self.config.unit_type.clone(),
            def_unit: self.def_unit.clone(),
            def_path: self.target_path(token.value),
            unit: self.unit.name.clone(),
            file: self.file.clone(),
            start,
            end,
            def: true,
        }
    }

    /// `None` unless definitions are enabled and the token has a value.
    pub fn definition(&self, token: &Token<'_>, span: Option<Span>) -> Option<Def> {
        if !self.config.emit_definitions || token.value.is_empty() {
            return None;
        }
        let (def_start, def_end) = span_bounds(span);
        Some(Def {
            key: DefKey {
                repo: self.unit.repo.clone(),
                unit_type: self.unit.unit_type.clone(),
                unit: self.unit.name.clone(),
                path: token.value.to_string(),
            },
            kind: "key".to_string(),
            file: self.file.clone(),
            def_start,
            def_end,
            tree_path: self.config.tree_path(&self.unit.name),
        })
    }
}

fn to_slash(path: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(MAIN_SEPARATOR, "/")
    }
}

/// Everything before the last separator, `.` when there is none.
fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(at) => &path[..at],
        None => ".",
    }
}

/// Drops the extension of the final path element, dot included.
fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |at| at + 1);
    match path[name_start..].rfind('.') {
        Some(dot) => &path[..name_start + dot],
        None => path,
    }
}
