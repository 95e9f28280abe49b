//! Parsed document trees.
//!
//! The parser reports only textual positions: a 0-based line and a 0-based
//! column counted in code points. Byte offsets are recovered later by
//! `pipeline::offsets`.

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

pub mod parser;

pub use parser::YamlParser;

/// One element of a parsed document.
///
/// Every tree starts with an empty root at (0, 0). Mapping keys carry their
/// value as children; a nested sequence is an empty node whose children are
/// the items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Node {
    pub value: String,
    pub line: usize,
    pub column: usize,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(value: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            value: value.into(),
            line,
            column,
            children: Vec::new(),
        }
    }

    /// The empty placeholder every document begins with.
    pub fn root() -> Self {
        Self::new("", 0, 0)
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// Turns document text into a node tree.
pub trait DocumentParser {
    fn parse(&self, name: &str, source: &str) -> Result<Node, ParseError>;
}
