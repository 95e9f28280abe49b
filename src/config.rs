//! Indexer configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{XrefError, XrefResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Also emit a definition record for every non-empty token.
    pub emit_definitions: bool,
    /// Tree-path namespace definitions are grouped under.
    pub definition_namespace: String,
    /// Unit type tag written on scanned units and on every reference.
    pub unit_type: String,
    /// File extensions (without the dot) picked up by `scan`.
    pub extensions: Vec<String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            emit_definitions: false,
            definition_namespace: "yaml-manual".to_string(),
            unit_type: "yaml".to_string(),
            extensions: vec!["yml".to_string()],
        }
    }
}

impl GraphConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn from_yaml_file(path: &Path) -> XrefResult<Self> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| XrefError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_yaml_str(&text).map_err(|source| XrefError::Config {
            path: display,
            source,
        })
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|want| want == ext))
    }

    /// Tree path definitions of `unit` are grouped under.
    pub fn tree_path(&self, unit: &str) -> String {
        format!("./{}/{}", self.definition_namespace, unit)
    }
}
