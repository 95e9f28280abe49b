//! Graph assembly for one source unit.
//!
//! Documents are processed strictly in unit order. Each one either
//! contributes all of its records or none: a read failure, a parse failure
//! or a fault while building records drops the document and is reported
//! back as a `DocumentFailure`.

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::config::GraphConfig;
use crate::errors::{DocumentError, DocumentFailure, ParseError, XrefResult};
use crate::pipeline::flatten::{flatten, skip_sentinel};
use crate::pipeline::offsets::LineIndex;
use crate::pipeline::records::{Def, RecordBuilder, Ref};
use crate::source::DocumentSource;
use crate::syntax::{DocumentParser, Node};
use crate::unit::{single_unit, SourceUnit};

/// The serialized graph: definitions and references in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct GraphOutput {
    pub defs: Vec<Def>,
    pub refs: Vec<Ref>,
}

impl GraphOutput {
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty() && self.refs.is_empty()
    }

    pub fn append(&mut self, document: DocumentGraph) {
        self.defs.extend(document.defs);
        self.refs.extend(document.refs);
    }
}

/// Records produced by a single document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentGraph {
    pub defs: Vec<Def>,
    pub refs: Vec<Ref>,
    /// Tokens whose position could not be found in the text.
    pub unresolved: usize,
}

/// Outcome of graphing a unit: the graph plus every document left out.
#[derive(Debug, Default)]
pub struct GraphReport {
    pub output: GraphOutput,
    pub failures: Vec<DocumentFailure>,
    pub documents: usize,
}

impl GraphReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds the records of one parsed document.
///
/// The first token is the root placeholder and produces nothing. Every other
/// token yields exactly one reference, with a `-1` span when its position is
/// not in `text`.
pub fn graph_document(text: &str, tree: &Node, builder: &RecordBuilder<'_>) -> DocumentGraph {
    let index = LineIndex::new(text);
    let tokens = flatten(tree);
    let mut graph = DocumentGraph::default();

    for token in skip_sentinel(&tokens) {
        let span = index.resolve(token.line, token.column, token.value);
        if span.is_none() {
            graph.unresolved += 1;
            log::debug!(
                "{}: no position for {:?} at {}:{}",
                builder.file(),
                token.value,
                token.line,
                token.column
            );
        }
        if let Some(def) = builder.definition(token, span) {
            graph.defs.push(def);
        }
        graph.refs.push(builder.reference(token, span));
    }
    graph
}

/// Reads, parses and graphs the documents of a unit.
#[derive(Debug, Clone)]
pub struct Grapher<'c, S, P> {
    source: S,
    parser: P,
    config: &'c GraphConfig,
}

impl<'c, S, P> Grapher<'c, S, P>
where
    S: DocumentSource,
    P: DocumentParser,
{
    pub fn new(source: S, parser: P, config: &'c GraphConfig) -> Self {
        Self {
            source,
            parser,
            config,
        }
    }

    /// Graphs the one unit in `units`. Zero or several units fail before
    /// any document is read.
    pub fn graph_units(&self, units: Vec<SourceUnit>) -> XrefResult<GraphReport> {
        let unit = single_unit(units)?;
        Ok(self.graph_unit(&unit))
    }

    pub fn graph_unit(&self, unit: &SourceUnit) -> GraphReport {
        let mut report = GraphReport::default();
        log::info!(
            "graphing unit {} ({} documents)",
            unit.name,
            unit.files.len()
        );

        for path in &unit.files {
            report.documents += 1;
            match self.graph_file(unit, path) {
                Ok(document) => report.output.append(document),
                Err(failure) => report.failures.push(failure),
            }
        }
        report
    }

    /// Graphs a single document, converting any fault into a failure.
    pub fn graph_file(&self, unit: &SourceUnit, path: &str) -> Result<DocumentGraph, DocumentFailure> {
        let fail = |reason| DocumentFailure {
            path: path.to_string(),
            reason,
        };

        let bytes = self.source.read(path).map_err(|e| fail(DocumentError::Read(e)))?;
        let text = std::str::from_utf8(&bytes).map_err(|e| fail(DocumentError::Encoding(e)))?;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> Result<_, ParseError> {
            let tree = self.parser.parse(path, text)?;
            let builder = RecordBuilder::new(unit, self.config, path);
            Ok(graph_document(text, &tree, &builder))
        }));

        match outcome {
            Ok(Ok(document)) => {
                log::debug!("{}: {} references", path, document.refs.len());
                Ok(document)
            }
            Ok(Err(parse)) => Err(fail(DocumentError::Parse(parse))),
            Err(payload) => Err(fail(DocumentError::Fault(panic_message(payload.as_ref())))),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::syntax::YamlParser;

    fn unit(files: &[&str]) -> SourceUnit {
        SourceUnit {
            name: "docs".into(),
            unit_type: "yaml".into(),
            repo: "owner/docs".into(),
            files: files.iter().map(|f| f.to_string()).collect(),
            dir: ".".into(),
        }
    }

    /// Ignores the text and hands back a fixed tree.
    struct FixedTree(Node);

    impl DocumentParser for FixedTree {
        fn parse(&self, _name: &str, _source: &str) -> Result<Node, ParseError> {
            Ok(self.0.clone())
        }
    }

    struct Panicking;

    impl DocumentParser for Panicking {
        fn parse(&self, _name: &str, _source: &str) -> Result<Node, ParseError> {
            panic!("malformed tree")
        }
    }

    #[test]
    fn root_placeholder_is_never_emitted() {
        let config = GraphConfig::default();
        let unit = unit(&[]);
        let builder = RecordBuilder::new(&unit, &config, "a.yml");
        let tree = Node::root().with_children(vec![Node::new("", 0, 0)]);
        let graph = graph_document("x", &tree, &builder);
        assert_eq!(graph.refs.len(), 1);
        assert_eq!((graph.refs[0].start, graph.refs[0].end), (0, 0));
    }

    #[test]
    fn hand_built_tree_resolves_spans() {
        let tree = Node::root().with_children(vec![
            Node::new("one", 0, 0).with_children(vec![Node::new("two", 0, 5)])
        ]);
        let config = GraphConfig::default();
        let source = MemorySource::new().with_file("a.yml", "one: two");
        let grapher = Grapher::new(&source, FixedTree(tree), &config);
        let report = grapher.graph_unit(&unit(&["a.yml"]));

        let spans: Vec<_> = report.output.refs.iter().map(|r| (r.start, r.end)).collect();
        assert_eq!(spans, vec![(0, 3), (5, 8)]);
        assert_eq!(report.output.refs[1].def_path, "./two");
        assert!(report.output.refs.iter().all(|r| r.def_path != "./"));
    }

    #[test]
    fn missing_position_keeps_the_record() {
        let tree = Node::root().with_children(vec![Node::new("ghost", 4, 9)]);
        let config = GraphConfig::default();
        let source = MemorySource::new().with_file("a.yml", "k: v\n");
        let grapher = Grapher::new(&source, FixedTree(tree), &config);
        let document = grapher.graph_file(&unit(&[]), "a.yml").unwrap();
        assert_eq!(document.unresolved, 1);
        assert_eq!((document.refs[0].start, document.refs[0].end), (-1, -1));
    }

    #[test]
    fn panics_become_failures() {
        let config = GraphConfig::default();
        let source = MemorySource::new().with_file("a.yml", "k: v\n");
        let grapher = Grapher::new(&source, Panicking, &config);
        let report = grapher.graph_unit(&unit(&["a.yml"]));
        assert!(report.output.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            &report.failures[0].reason,
            DocumentError::Fault(msg) if msg.contains("malformed tree")
        ));
    }

    #[test]
    fn invalid_utf8_is_an_encoding_failure() {
        let config = GraphConfig::default();
        let source = MemorySource::new().with_file("a.yml", vec![0xff, 0xfe]);
        let grapher = Grapher::new(&source, YamlParser, &config);
        let failure = grapher.graph_file(&unit(&[]), "a.yml").unwrap_err();
        assert!(matches!(failure.reason, DocumentError::Encoding(_)));
    }

    #[test]
    fn definitions_follow_the_config_flag() {
        let config = GraphConfig {
            emit_definitions: true,
            ..GraphConfig::default()
        };
        let source = MemorySource::new().with_file("a.yml", "one: two\nlist:\n  - x\n");
        let grapher = Grapher::new(&source, YamlParser, &config);
        let report = grapher.graph_unit(&unit(&["a.yml"]));
        let paths: Vec<_> = report.output.defs.iter().map(|d| d.key.path.as_str()).collect();
        // the nested sequence placeholder has no value and gets no definition
        assert_eq!(paths, vec!["one", "two", "list", "x"]);
        assert_eq!(report.output.refs.len(), 5);
    }
}
