//! YAML parser producing position-annotated node trees.
//!
//! Each physical line is lexed with the pest grammar into a short list of
//! pieces (sequence dashes, mapping keys, values). `TreeBuilder` then folds
//! those pieces into a tree using a stack of open frames keyed by
//! indentation column. Block scalar bodies bypass the lexer entirely.
//!
//! A flow collection or quoted scalar left open at the end of a line is
//! lexed together with the lines that follow it, joined by `\n`, until it
//! closes. Every piece still reports the line it starts on.

use std::sync::Arc;

use miette::NamedSource;
use pest::{iterators::Pair, Parser};
use pest_derive::Parser;

use crate::errors::ParseError;
use crate::syntax::{DocumentParser, Node};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct LineGrammar;

const BOM: char = '\u{feff}';

/// The default `DocumentParser`.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlParser;

impl DocumentParser for YamlParser {
    fn parse(&self, name: &str, source: &str) -> Result<Node, ParseError> {
        let bom = if source.starts_with(BOM) {
            BOM.len_utf8()
        } else {
            0
        };
        let body = &source[bom..];
        // the final line break ends the last line; it does not start a new one
        let body = body.strip_suffix('\n').unwrap_or(body);

        let mut builder = TreeBuilder::new(usize::from(bom > 0));
        let mut pending: Option<OpenLine> = None;
        let mut line_start = bom;

        for (line_no, raw) in body.split('\n').enumerate() {
            let text = raw.strip_suffix('\r').unwrap_or(raw);
            let offset = line_start;
            line_start += raw.len() + 1;

            if let Some(mut open) = pending.take() {
                open.text.push('\n');
                open.text.push_str(text);
                match lex_line(&open.text, open.line) {
                    Ok(pieces) => builder
                        .push(pieces)
                        .map_err(|message| open.structure_error(name, source, message))?,
                    Err(failure) if is_unclosed(&open.text) => {
                        open.failure = failure;
                        pending = Some(open);
                    }
                    Err((message, pos)) => {
                        let line = open.line + open.text[..pos].matches('\n').count();
                        return Err(make_error(name, source, message, line, open.offset + pos, 1));
                    }
                }
                continue;
            }

            if builder.feed_block_line(line_no, text) {
                continue;
            }

            match lex_line(text, line_no) {
                Ok(pieces) => builder.push(pieces).map_err(|message| {
                    structure_error(name, source, message, line_no, offset, text)
                })?,
                Err(failure) if is_unclosed(text) => {
                    pending = Some(OpenLine {
                        text: text.to_string(),
                        line: line_no,
                        offset,
                        failure,
                    });
                }
                Err((message, pos)) => {
                    return Err(make_error(name, source, message, line_no, offset + pos, 1))
                }
            }
        }

        if let Some(open) = pending {
            let (message, pos) = open.failure;
            let first = open.text.split('\n').next().unwrap_or_default();
            let pos = pos.min(first.len());
            return Err(make_error(name, source, message, open.line, open.offset + pos, 1));
        }

        Ok(builder.finish())
    }
}

/// Lines gathered while a flow collection or quoted scalar is still open.
struct OpenLine {
    text: String,
    line: usize,
    offset: usize,
    /// The latest lexing failure, reported if the document ends first.
    failure: (String, usize),
}

impl OpenLine {
    fn structure_error(&self, name: &str, source: &str, message: String) -> ParseError {
        let first = self.text.split('\n').next().unwrap_or_default();
        structure_error(name, source, message, self.line, self.offset, first)
    }
}

/// An error about the shape of a line, spanning its content.
fn structure_error(
    name: &str,
    source: &str,
    message: String,
    line: usize,
    offset: usize,
    text: &str,
) -> ParseError {
    let indent = text.len() - text.trim_start_matches(' ').len();
    let width = text.len().saturating_sub(indent).max(1);
    make_error(name, source, message, line, offset + indent, width)
}

fn make_error(
    name: &str,
    source: &str,
    message: String,
    line: usize,
    at: usize,
    width: usize,
) -> ParseError {
    let at = at.min(source.len());
    let width = width.min(source.len() - at);
    ParseError::new(
        message,
        line,
        Arc::new(NamedSource::new(name, source.to_string())),
        (at, width).into(),
    )
}

/// Whether `text` ends inside a flow collection or a quoted scalar.
///
/// Only consulted after a line failed to lex, so quotes inside plain
/// scalars (`it's`) never get here on their own.
fn is_unclosed(text: &str) -> bool {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut prev = ' ';
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some('"') => match c {
                '\\' => {
                    chars.next();
                }
                '"' => quote = None,
                _ => {}
            },
            Some(_) => {
                if c == '\'' {
                    if chars.peek() == Some(&'\'') {
                        chars.next();
                    } else {
                        quote = None;
                    }
                }
            }
            None => match c {
                '"' | '\'' if starts_node(prev) => quote = Some(c),
                '#' if prev.is_whitespace() => {
                    while chars.next_if(|&next| next != '\n').is_some() {}
                }
                '[' | '{' if depth > 0 || starts_node(prev) => depth += 1,
                ']' | '}' if depth > 0 => depth -= 1,
                _ => {}
            },
        }
        prev = c;
    }
    quote.is_some() || depth > 0
}

fn starts_node(prev: char) -> bool {
    prev.is_whitespace() || matches!(prev, '[' | '{' | ',' | ':' | '-' | '?')
}

// ============================================================================
// LEXING
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Marker,
    Dash {
        line: usize,
        column: usize,
    },
    Key {
        text: String,
        line: usize,
        column: usize,
    },
    Scalar {
        text: String,
        line: usize,
        column: usize,
        plain: bool,
    },
    Block {
        header: BlockHeader,
        line: usize,
        column: usize,
    },
    Flow(Flow),
}

#[derive(Debug, Clone, PartialEq)]
enum Flow {
    Scalar(FlowScalar),
    Seq {
        line: usize,
        column: usize,
        items: Vec<Flow>,
    },
    Map {
        line: usize,
        column: usize,
        entries: Vec<(FlowScalar, Option<Flow>)>,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct FlowScalar {
    text: String,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlockStyle {
    Literal,
    Folded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Chomp {
    Clip,
    Strip,
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BlockHeader {
    style: BlockStyle,
    chomp: Chomp,
}

impl BlockHeader {
    fn parse(text: &str) -> Self {
        let style = if text.starts_with('>') {
            BlockStyle::Folded
        } else {
            BlockStyle::Literal
        };
        let chomp = if text.contains('-') {
            Chomp::Strip
        } else if text.contains('+') {
            Chomp::Keep
        } else {
            Chomp::Clip
        };
        Self { style, chomp }
    }
}

/// Text being lexed, which may span several physical lines starting at
/// `first_line`.
#[derive(Clone, Copy)]
struct LineText<'t> {
    text: &'t str,
    first_line: usize,
}

impl LineText<'_> {
    /// Line and code-point column of a byte position.
    fn position(&self, byte: usize) -> (usize, usize) {
        let before = &self.text[..byte];
        match before.rfind('\n') {
            Some(newline) => (
                self.first_line + before.matches('\n').count(),
                before[newline + 1..].chars().count(),
            ),
            None => (self.first_line, before.chars().count()),
        }
    }

    fn position_of(&self, pair: &Pair<Rule>) -> (usize, usize) {
        self.position(pair.as_span().start())
    }
}

/// Lexes one logical line. On failure returns the message and the byte
/// position within `text`.
fn lex_line(text: &str, first_line: usize) -> Result<Vec<Piece>, (String, usize)> {
    let mut pairs = LineGrammar::parse(Rule::line, text).map_err(|e| {
        let pos = match e.location {
            pest::error::InputLocation::Pos(p) => p,
            pest::error::InputLocation::Span((p, _)) => p,
        };
        (format!("unexpected input: {}", e.variant.message()), pos)
    })?;

    let at = LineText { text, first_line };
    let mut pieces = Vec::new();
    let Some(line) = pairs.next() else {
        return Ok(pieces);
    };
    for pair in line.into_inner() {
        lex_piece(pair, at, &mut pieces);
    }
    Ok(pieces)
}

fn lex_piece(pair: Pair<Rule>, at: LineText<'_>, out: &mut Vec<Piece>) {
    match pair.as_rule() {
        Rule::marker => out.push(Piece::Marker),
        Rule::marker_line | Rule::seq_entry => {
            for inner in pair.into_inner() {
                lex_piece(inner, at, out);
            }
        }
        Rule::dash => {
            let (line, column) = at.position_of(&pair);
            out.push(Piece::Dash { line, column });
        }
        Rule::map_entry => {
            let mut inner = pair.into_inner();
            if let Some(key) = inner.next() {
                let scalar = flow_scalar(key, at);
                out.push(Piece::Key {
                    text: scalar.text,
                    line: scalar.line,
                    column: scalar.column,
                });
            }
            for rest in inner {
                lex_piece(rest, at, out);
            }
        }
        Rule::plain => {
            let (line, column) = at.position_of(&pair);
            out.push(Piece::Scalar {
                text: pair.as_str().to_string(),
                line,
                column,
                plain: true,
            });
        }
        Rule::double_quoted | Rule::single_quoted => {
            let scalar = flow_scalar(pair, at);
            out.push(Piece::Scalar {
                text: scalar.text,
                line: scalar.line,
                column: scalar.column,
                plain: false,
            });
        }
        Rule::block_header => {
            let (line, column) = at.position_of(&pair);
            out.push(Piece::Block {
                header: BlockHeader::parse(pair.as_str()),
                line,
                column,
            });
        }
        Rule::flow_seq | Rule::flow_map => out.push(Piece::Flow(lex_flow(pair, at))),
        // indent, directive, EOI
        _ => {}
    }
}

fn lex_flow(pair: Pair<Rule>, at: LineText<'_>) -> Flow {
    let (line, column) = at.position_of(&pair);
    match pair.as_rule() {
        Rule::flow_seq => Flow::Seq {
            line,
            column,
            items: pair.into_inner().map(|p| lex_flow(p, at)).collect(),
        },
        Rule::flow_map => Flow::Map {
            line,
            column,
            entries: pair
                .into_inner()
                .map(|entry| {
                    let (line, column) = at.position_of(&entry);
                    let mut inner = entry.into_inner();
                    let key = inner
                        .next()
                        .map(|k| flow_scalar(k, at))
                        .unwrap_or(FlowScalar {
                            text: String::new(),
                            line,
                            column,
                        });
                    let value = inner.next().map(|v| lex_flow(v, at));
                    (key, value)
                })
                .collect(),
        },
        _ => Flow::Scalar(flow_scalar(pair, at)),
    }
}

/// Scalars report the position of their first content character, so quoted
/// scalars point past the opening quote.
fn flow_scalar(pair: Pair<Rule>, at: LineText<'_>) -> FlowScalar {
    match pair.as_rule() {
        Rule::double_quoted | Rule::single_quoted => {
            let rule = pair.as_rule();
            let (line, column) = at.position(pair.as_span().start() + 1);
            let body = pair
                .into_inner()
                .next()
                .map(|p| p.as_str())
                .unwrap_or_default();
            let text = if rule == Rule::double_quoted {
                unescape_double(&fold_flow_lines(body, true))
            } else {
                fold_flow_lines(body, false).replace("''", "'")
            };
            FlowScalar { text, line, column }
        }
        _ => {
            let (line, column) = at.position_of(&pair);
            FlowScalar {
                text: fold_flow_lines(pair.as_str(), false),
                line,
                column,
            }
        }
    }
}

/// Folds a scalar written across several lines: each line break becomes a
/// space, runs of empty lines become that many `\n`, and indentation around
/// breaks is dropped. With `escapes`, a trailing `\` joins lines directly.
fn fold_flow_lines(body: &str, escapes: bool) -> String {
    if !body.contains('\n') {
        return body.to_string();
    }

    let is_blank = |c: char| c == ' ' || c == '\t';
    let lines: Vec<&str> = body.split('\n').collect();
    let last = lines.len() - 1;
    let mut out = String::with_capacity(body.len());
    let mut breaks = 0;
    let mut joined = false;

    for (i, raw) in lines.iter().enumerate() {
        let mut part = *raw;
        if i > 0 {
            part = part.trim_start_matches(is_blank);
        }
        let mut continues = false;
        if i < last {
            if escapes && ends_with_escape(part) {
                part = &part[..part.len() - 1];
                continues = true;
            } else {
                part = part.trim_end_matches(is_blank);
            }
        }
        if i > 0 && i < last && part.is_empty() && !continues {
            breaks += 1;
            continue;
        }
        if i > 0 && !joined {
            if breaks == 0 {
                out.push(' ');
            } else {
                out.extend(std::iter::repeat('\n').take(breaks));
            }
        }
        breaks = 0;
        out.push_str(part);
        joined = continues;
    }
    out
}

/// An odd run of trailing backslashes escapes the line break.
fn ends_with_escape(text: &str) -> bool {
    text.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn unescape_double(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            out.push('\\');
            break;
        };
        let hex_len = match esc {
            'x' => 2,
            'u' => 4,
            'U' => 8,
            _ => 0,
        };
        if hex_len > 0 {
            let digits: String = chars.by_ref().take(hex_len).collect();
            match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                Some(decoded) => out.push(decoded),
                None => {
                    out.push('\\');
                    out.push(esc);
                    out.push_str(&digits);
                }
            }
            continue;
        }
        match esc {
            'n' => out.push('\n'),
            't' | '\t' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'e' => out.push('\u{1b}'),
            ' ' => out.push(' '),
            '"' => out.push('"'),
            '/' => out.push('/'),
            '\\' => out.push('\\'),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

// ============================================================================
// TREE BUILDING
// ============================================================================

#[derive(Debug)]
struct Slot {
    value: String,
    line: usize,
    column: usize,
    children: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FrameKind {
    Root,
    Seq,
    Map,
    Key,
}

/// An open container. `open` means it is still waiting for content: a key
/// without a value, a dash without an item, a root without a document.
#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: FrameKind,
    indent: Option<usize>,
    node: usize,
    open: bool,
    /// Last plain scalar added here; deeper bare lines continue it.
    scalar: Option<usize>,
}

impl Frame {
    fn new(kind: FrameKind, indent: usize, node: usize, open: bool) -> Self {
        Self {
            kind,
            indent: Some(indent),
            node,
            open,
            scalar: None,
        }
    }

    fn is_deeper(&self, column: usize) -> bool {
        self.indent.map_or(true, |indent| column > indent)
    }
}

#[derive(Debug)]
struct PendingBlock {
    header: BlockHeader,
    parent: usize,
    owner_indent: Option<usize>,
    line: usize,
    column: usize,
    content_indent: Option<usize>,
    first: Option<(usize, usize)>,
    lines: Vec<String>,
    trailing_blank: usize,
}

enum Target {
    Attach { frame: usize, node: usize },
    Continue(usize),
}

struct TreeBuilder {
    slots: Vec<Slot>,
    frames: Vec<Frame>,
    block: Option<PendingBlock>,
    /// Code points stripped from the start of line 0 (a byte order mark).
    /// Indentation ignores them; node columns include them.
    first_line_shift: usize,
}

impl TreeBuilder {
    fn new(first_line_shift: usize) -> Self {
        Self {
            slots: vec![Slot {
                value: String::new(),
                line: 0,
                column: 0,
                children: Vec::new(),
            }],
            frames: vec![Self::root_frame()],
            block: None,
            first_line_shift,
        }
    }

    fn root_frame() -> Frame {
        Frame {
            kind: FrameKind::Root,
            indent: None,
            node: 0,
            open: true,
            scalar: None,
        }
    }

    fn add(&mut self, parent: usize, value: String, line: usize, column: usize) -> usize {
        let column = if line == 0 {
            column + self.first_line_shift
        } else {
            column
        };
        let idx = self.slots.len();
        self.slots.push(Slot {
            value,
            line,
            column,
            children: Vec::new(),
        });
        self.slots[parent].children.push(idx);
        idx
    }

    fn top(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn push(&mut self, pieces: Vec<Piece>) -> Result<(), String> {
        for piece in pieces {
            match piece {
                Piece::Marker => {
                    self.frames.truncate(1);
                    self.frames[0] = Self::root_frame();
                }
                Piece::Dash { line, column } => self.push_dash(line, column)?,
                Piece::Key { text, line, column } => self.push_key(line, text, column)?,
                Piece::Scalar {
                    text,
                    line,
                    column,
                    plain,
                } => match self.value_target(column)? {
                    Target::Attach { frame, node } => {
                        let idx = self.add(node, text, line, column);
                        self.frames[frame].scalar = plain.then_some(idx);
                    }
                    Target::Continue(idx) => {
                        let slot = &mut self.slots[idx];
                        slot.value.push(' ');
                        slot.value.push_str(&text);
                    }
                },
                Piece::Block {
                    header,
                    line,
                    column,
                } => match self.value_target(column)? {
                    Target::Attach { frame, node } => {
                        self.block = Some(PendingBlock {
                            header,
                            parent: node,
                            owner_indent: self.frames[frame].indent,
                            line,
                            column,
                            content_indent: None,
                            first: None,
                            lines: Vec::new(),
                            trailing_blank: 0,
                        });
                    }
                    Target::Continue(_) => {
                        return Err("block scalar cannot continue a plain scalar".into())
                    }
                },
                Piece::Flow(flow) => {
                    let column = flow.column();
                    match self.value_target(column)? {
                        Target::Attach { frame, node } => {
                            let merge = self.frames[frame].kind == FrameKind::Root;
                            self.attach_flow(node, flow, merge);
                        }
                        Target::Continue(_) => {
                            return Err("flow collection cannot continue a plain scalar".into())
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn push_dash(&mut self, line: usize, column: usize) -> Result<(), String> {
        loop {
            let frame = *self.top();
            match frame.kind {
                FrameKind::Key if frame.open && (frame.is_deeper(column) || frame.indent == Some(column)) => {
                    self.open_seq(line, column);
                    return Ok(());
                }
                FrameKind::Seq if frame.indent == Some(column) => {
                    let top = self.top();
                    top.open = true;
                    top.scalar = None;
                    return Ok(());
                }
                FrameKind::Seq if frame.is_deeper(column) && frame.open => {
                    self.open_seq(line, column);
                    return Ok(());
                }
                FrameKind::Root if frame.open => {
                    self.top().open = false;
                    self.frames.push(Frame::new(FrameKind::Seq, column, 0, true));
                    return Ok(());
                }
                FrameKind::Root => return Err("unexpected sequence entry".into()),
                _ if frame.is_deeper(column) => {
                    return Err("sequence entry is indented under a complete value".into())
                }
                _ => {
                    self.frames.pop();
                }
            }
        }
    }

    /// Opens a nested sequence: an empty placeholder under the top frame.
    fn open_seq(&mut self, line: usize, column: usize) {
        let parent = {
            let top = self.top();
            top.open = false;
            top.scalar = None;
            top.node
        };
        let placeholder = self.add(parent, String::new(), line, column);
        self.frames
            .push(Frame::new(FrameKind::Seq, column, placeholder, true));
    }

    fn push_key(&mut self, line: usize, text: String, column: usize) -> Result<(), String> {
        loop {
            let frame = *self.top();
            match frame.kind {
                FrameKind::Map if frame.indent == Some(column) => break,
                FrameKind::Key | FrameKind::Seq | FrameKind::Root
                    if frame.open && frame.is_deeper(column) =>
                {
                    let top = self.top();
                    top.open = false;
                    top.scalar = None;
                    self.frames
                        .push(Frame::new(FrameKind::Map, column, frame.node, false));
                    break;
                }
                FrameKind::Root => return Err("unexpected mapping key".into()),
                _ if frame.is_deeper(column) => {
                    return Err("mapping key is indented under a complete value".into())
                }
                _ => {
                    self.frames.pop();
                }
            }
        }

        let map_node = self.top().node;
        let key = self.add(map_node, text, line, column);
        self.frames.push(Frame::new(FrameKind::Key, column, key, true));
        Ok(())
    }

    /// Finds where a scalar, flow collection or block scalar at `column`
    /// belongs, popping frames it has dedented out of.
    fn value_target(&mut self, column: usize) -> Result<Target, String> {
        loop {
            let last = self.frames.len() - 1;
            let frame = self.frames[last];
            if frame.is_deeper(column) {
                if frame.open {
                    self.frames[last].open = false;
                    return Ok(Target::Attach {
                        frame: last,
                        node: frame.node,
                    });
                }
                if let Some(idx) = frame.scalar {
                    return Ok(Target::Continue(idx));
                }
                if frame.kind == FrameKind::Root {
                    return Err("unexpected content after the document value".into());
                }
                return Err("value is indented under a complete value".into());
            }
            if frame.kind == FrameKind::Root {
                return Err("unexpected value".into());
            }
            self.frames.pop();
        }
    }

    fn attach_flow(&mut self, parent: usize, flow: Flow, merge: bool) {
        match flow {
            Flow::Scalar(scalar) => {
                self.add(parent, scalar.text, scalar.line, scalar.column);
            }
            Flow::Seq {
                line,
                column,
                items,
            } => {
                let target = if merge {
                    parent
                } else {
                    self.add(parent, String::new(), line, column)
                };
                for item in items {
                    self.attach_flow(target, item, false);
                }
            }
            Flow::Map { entries, .. } => {
                for (key, value) in entries {
                    let key_node = self.add(parent, key.text, key.line, key.column);
                    if let Some(value) = value {
                        self.attach_flow(key_node, value, false);
                    }
                }
            }
        }
    }

    /// Feeds a raw line to a pending block scalar. Returns false when the
    /// line is not part of it, after closing the block.
    fn feed_block_line(&mut self, line: usize, text: &str) -> bool {
        let Some(block) = self.block.as_mut() else {
            return false;
        };

        if text.trim().is_empty() {
            block.trailing_blank += 1;
            return true;
        }

        let indent = text.len() - text.trim_start_matches(' ').len();
        let belongs = match block.owner_indent {
            Some(owner) => indent > owner,
            None => !(text.starts_with("---") || text.starts_with("...")),
        };
        let content_indent = *block.content_indent.get_or_insert(indent);
        if !belongs || indent < content_indent {
            self.finish_block();
            return false;
        }

        if block.first.is_none() {
            block.first = Some((line, content_indent));
        }
        for _ in 0..block.trailing_blank {
            block.lines.push(String::new());
        }
        block.trailing_blank = 0;
        block.lines.push(text[content_indent..].to_string());
        true
    }

    fn finish_block(&mut self) {
        let Some(block) = self.block.take() else {
            return;
        };

        let mut value = match block.header.style {
            BlockStyle::Literal => block.lines.join("\n"),
            BlockStyle::Folded => fold_lines(&block.lines),
        };
        if !block.lines.is_empty() {
            match block.header.chomp {
                Chomp::Strip => {}
                Chomp::Clip => value.push('\n'),
                Chomp::Keep => {
                    for _ in 0..=block.trailing_blank {
                        value.push('\n');
                    }
                }
            }
        }

        let (line, column) = block.first.unwrap_or((block.line, block.column));
        self.add(block.parent, value, line, column);
    }

    fn finish(mut self) -> Node {
        self.finish_block();
        self.build(0)
    }

    fn build(&self, idx: usize) -> Node {
        let slot = &self.slots[idx];
        Node {
            value: slot.value.clone(),
            line: slot.line,
            column: slot.column,
            children: slot.children.iter().map(|&c| self.build(c)).collect(),
        }
    }
}

impl Flow {
    fn column(&self) -> usize {
        match self {
            Flow::Scalar(scalar) => scalar.column,
            Flow::Seq { column, .. } | Flow::Map { column, .. } => *column,
        }
    }
}

/// Folded block scalars join adjacent lines with a space; empty lines
/// become line breaks.
fn fold_lines(lines: &[String]) -> String {
    let mut out = String::new();
    let mut previous_blank = true;
    for line in lines {
        if line.is_empty() {
            out.push('\n');
            previous_blank = true;
            continue;
        }
        if !previous_blank {
            out.push(' ');
        }
        out.push_str(line);
        previous_blank = false;
    }
    out
}
