//! `dbginfo65`: a queryable debug-information model for 6502-family
//! toolchains (assemblers/linkers emitting a line-oriented, directive-based
//! debug-info text format).
//!
//! Load a file with [`Database::load`] or [`Database::load_bytes`], then
//! answer queries against it with [`Database::query`]. A `Database` is
//! built once from one input and is immutable and `Sync` for its whole
//! lifetime; there is no in-place reparsing or incremental recomputation
//! (spec.md §5 Non-goals).

pub mod diag;
pub mod entity;
pub mod ids;
pub mod query;
pub mod raw;
pub mod resolver;
pub mod scanner;
pub mod scope_tree;
pub mod span_index;
pub mod store;

mod database;
mod parser;

#[cfg(any(feature = "dot", feature = "xml"))]
pub mod export;

pub use database::{Database, LoadError, LoadOptions};
pub use diag::{Diagnostic, DiagnosticSink, Severity};
pub use query::{
    FileData, LibraryData, LineData, ModuleData, Query, ScopeData, SegmentData, SpanData,
    SymbolData,
};
pub use scope_tree::{build_scope_tree, ScopeTreeNode};
