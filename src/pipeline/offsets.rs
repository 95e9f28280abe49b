//! Line/column to byte offset resolution.
//!
//! Parsers report a 0-based line and a 0-based column counted in code
//! points. `LineIndex` records where every line begins once per document,
//! so each lookup is a table index plus a walk over a single line.

use serde::{Deserialize, Serialize};

/// Byte range within a document, `start..end`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Signed offset written for a span that could not be resolved.
pub const UNRESOLVED: i64 = -1;

/// Flattens an optional span into the `(start, end)` pair written to
/// records. Unresolved spans become `(-1, -1)`.
pub fn span_bounds(span: Option<Span>) -> (i64, i64) {
    match span {
        Some(span) => (span.start as i64, span.end as i64),
        None => (UNRESOLVED, UNRESOLVED),
    }
}

/// Byte offsets of line starts for one document.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    /// `line_starts[n]` is the byte offset of line `n`.
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset of the code point at `(line, column)`.
    ///
    /// A column one past the last character of a line addresses the line
    /// break, which only exists when another line follows.
    pub fn offset(&self, line: usize, column: usize) -> Option<usize> {
        let start = *self.line_starts.get(line)?;
        let newline = self.line_starts.get(line + 1).map(|next| next - 1);
        let line_text = &self.text[start..newline.unwrap_or(self.text.len())];

        let mut chars = line_text.char_indices();
        match chars.nth(column) {
            Some((at, _)) => Some(start + at),
            None => {
                let length = line_text.chars().count();
                newline.filter(|_| column == length)
            }
        }
    }

    /// Span of a token that starts at `(line, column)` and whose text is
    /// `value`. The end is measured in UTF-8 bytes and never runs past the
    /// end of the document.
    pub fn resolve(&self, line: usize, column: usize, value: &str) -> Option<Span> {
        let start = self.offset(line, column)?;
        let end = start.saturating_add(value.len()).min(self.text.len());
        Some(Span::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One full decode of the stream per lookup, counting lines and
    /// columns as it goes.
    fn scan_offset(text: &str, line: usize, column: usize) -> Option<usize> {
        let (mut current_line, mut current_column) = (0, 0);
        for (at, c) in text.char_indices() {
            if (current_line, current_column) == (line, column) {
                return Some(at);
            }
            if c == '\n' {
                current_line += 1;
                current_column = 0;
            } else {
                current_column += 1;
            }
        }
        None
    }

    #[test]
    fn origin_resolves_to_value_length() {
        let index = LineIndex::new("one: two");
        assert_eq!(index.resolve(0, 0, "one"), Some(Span::new(0, 3)));
    }

    #[test]
    fn resolves_on_later_lines() {
        let index = LineIndex::new("a: b\nkey: value\n");
        assert_eq!(index.resolve(1, 5, "value"), Some(Span::new(10, 15)));
    }

    #[test]
    fn multibyte_columns_advance_by_code_point() {
        let text = "é: ü\n";
        let index = LineIndex::new(text);
        let span = index.resolve(0, 3, "ü").unwrap();
        assert_eq!(span, Span::new(4, 6));
        assert_eq!(&text[span.start..span.end], "ü");
    }

    #[test]
    fn column_past_line_end_fails() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(0, 3), None);
        assert_eq!(index.offset(1, 2), None);
        assert_eq!(index.offset(5, 0), None);
    }

    #[test]
    fn column_at_line_end_addresses_the_break() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(0, 2), Some(2));
    }

    #[test]
    fn empty_document_has_no_positions() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.offset(0, 0), None);
    }

    #[test]
    fn end_is_clamped_to_document() {
        let index = LineIndex::new("k: ab");
        assert_eq!(index.resolve(0, 3, "abcdef"), Some(Span::new(3, 5)));
    }

    #[test]
    fn carriage_return_counts_as_a_column() {
        let index = LineIndex::new("a\r\nb");
        assert_eq!(index.offset(0, 1), Some(1));
        assert_eq!(index.offset(0, 2), Some(2));
        assert_eq!(index.offset(1, 0), Some(3));
    }

    #[test]
    fn agrees_with_linear_scan() {
        let text = "first: line\n  ünïcödé: 値\n\n- [a, b]\nlast";
        let index = LineIndex::new(text);
        for line in 0..7 {
            for column in 0..16 {
                assert_eq!(
                    index.offset(line, column),
                    scan_offset(text, line, column),
                    "mismatch at ({}, {})",
                    line,
                    column
                );
            }
        }
    }

    #[test]
    fn unresolved_bounds_are_negative() {
        assert_eq!(span_bounds(None), (-1, -1));
        assert_eq!(span_bounds(Some(Span::new(5, 8))), (5, 8));
    }
}
