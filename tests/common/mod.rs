//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use yaml_xref::{GraphConfig, GraphReport, Grapher, MemorySource, SourceUnit, YamlParser};

/// A unit named `docs` listing `files` in order.
pub fn unit(files: &[&str]) -> SourceUnit {
    SourceUnit {
        name: "docs".to_string(),
        unit_type: "yaml".to_string(),
        repo: "owner/docs".to_string(),
        files: files.iter().map(|f| f.to_string()).collect(),
        dir: ".".to_string(),
    }
}

/// Graphs in-memory documents as one unit, in the order given.
pub fn graph_documents(documents: &[(&str, &str)], config: &GraphConfig) -> GraphReport {
    let mut source = MemorySource::new();
    for (path, text) in documents {
        source.insert(*path, *text);
    }
    let paths: Vec<&str> = documents.iter().map(|(path, _)| *path).collect();
    Grapher::new(&source, YamlParser, config).graph_unit(&unit(&paths))
}

/// Writes `files` under `root`, creating parent directories.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, text) in files {
        let target = root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(target, text).unwrap();
    }
}

/// The text a reference span covers, or `None` for an unresolved span.
pub fn covered<'t>(text: &'t str, start: i64, end: i64) -> Option<&'t str> {
    if start < 0 || end < 0 {
        return None;
    }
    text.get(start as usize..end as usize)
}
