//! Tree flattening and the sentinel filter.

use crate::syntax::Node;

/// A node reduced to its value and position, in document order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub value: &'a str,
    pub line: usize,
    pub column: usize,
}

impl<'a> From<&'a Node> for Token<'a> {
    fn from(node: &'a Node) -> Self {
        Self {
            value: &node.value,
            line: node.line,
            column: node.column,
        }
    }
}

/// Pre-order walk: each node before its children, children in order.
pub fn flatten(root: &Node) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        tokens.push(Token::from(node));
        stack.extend(node.children.iter().rev());
    }
    tokens
}

/// Drops the leading placeholder every document starts with. Only index 0
/// is removed; later empty tokens are kept.
pub fn skip_sentinel<'t, T>(tokens: &'t [T]) -> &'t [T] {
    tokens.get(1..).unwrap_or_default()
}
