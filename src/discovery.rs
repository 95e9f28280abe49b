//! Source unit discovery.
//!
//! A scan walks one directory tree and describes it as a single unit: every
//! regular file with a configured extension, in lexical walk order.

use std::path::{Component, Path};

use walkdir::WalkDir;

use crate::config::GraphConfig;
use crate::errors::{XrefError, XrefResult};
use crate::unit::SourceUnit;

/// Scans `root` and returns the one unit it forms.
pub fn scan<P: AsRef<Path>>(root: P, config: &GraphConfig) -> XrefResult<Vec<SourceUnit>> {
    let root = root.as_ref();
    let absolute = root.canonicalize().map_err(|source| XrefError::Io {
        path: root.display().to_string(),
        source,
    })?;

    let name = base_name(&absolute);
    let parent = absolute.parent().map(base_name).unwrap_or_default();
    let unit = SourceUnit {
        repo: format!("{}/{}", parent, name),
        name,
        unit_type: config.unit_type.clone(),
        files: discover_files(&absolute, config)?,
        dir: ".".to_string(),
    };
    log::info!("scanned unit {} ({} files)", unit.name, unit.files.len());
    Ok(vec![unit])
}

/// Lists matching files under `root` as slash-separated relative paths.
///
/// Entries are visited in file-name order so the result is deterministic.
pub fn discover_files(root: &Path, config: &GraphConfig) -> XrefResult<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| XrefError::Walk { source })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !config.matches_extension(path) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        files.push(to_slash(relative));
    }
    Ok(files)
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
