//! Token flattening, offset resolution and graph emission.
//!
//! Data flows leaf-first: a parsed `Node` tree is flattened into tokens,
//! the root placeholder is dropped, every remaining token is located in the
//! document's bytes, and each located token becomes one reference record.

pub mod assemble;
pub mod flatten;
pub mod offsets;
pub mod records;

pub use assemble::{graph_document, DocumentGraph, GraphOutput, GraphReport, Grapher};
pub use flatten::{flatten, skip_sentinel, Token};
pub use offsets::{span_bounds, LineIndex, Span, UNRESOLVED};
pub use records::{Def, DefKey, RecordBuilder, Ref};
