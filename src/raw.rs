//! Raw records: the direct output of the parser, before id resolution
//! (spec.md §4.2/§4.3, design notes: "prefer an explicit two-stage type").
//!
//! Cross-entity fields are still plain integers here (or `Option<u32>` when
//! the attribute is optional), exactly as read off the directive. Nothing
//! in this module inspects whether an id actually refers to something; that
//! is `crate::resolver`'s job.

use crate::entity::{LineType, ScopeType, SymbolType};

#[derive(Debug, Clone)]
pub struct RawFile {
    pub id: u32,
    pub name: String,
    pub size: u64,
    pub mtime: u64,
    /// The modules that reference this file (required `mod` attribute).
    /// spec.md §3 models this as a set ("the modules in which this file is
    /// used"), so the attribute accepts the same `id+id+...` list syntax as
    /// `scope.span`/`line.span`, not just a single id.
    pub module: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct RawLibrary {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct RawModule {
    pub id: u32,
    pub name: String,
    pub file: u32,
    pub library: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct RawScope {
    pub id: u32,
    pub name: String,
    pub ty: ScopeType,
    pub size: u64,
    pub module: u32,
    pub parent: Option<u32>,
    pub label: Option<u32>,
    pub spans: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct RawSegment {
    pub id: u32,
    pub name: String,
    pub start: u64,
    pub size: u64,
    pub addrsize: String,
    pub kind: String,
    pub output_name: Option<String>,
    pub output_offset: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct RawSpan {
    pub id: u32,
    pub segment: u32,
    /// Segment-relative start, per spec.md §4.4 (absolute start is computed
    /// during resolution).
    pub start: u64,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct RawLine {
    pub id: u32,
    pub file: u32,
    pub line: u32,
    pub ty: LineType,
    pub count: u32,
    pub spans: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct RawSymbol {
    pub id: u32,
    pub name: String,
    pub ty: SymbolType,
    pub value: i64,
    pub size: u64,
    pub addrsize: String,
    pub segment: Option<u32>,
    /// Exactly one of `scope`/`parent` is `Some` (spec.md §4.2).
    pub scope: Option<u32>,
    pub parent: Option<u32>,
}

/// The version directive's payload (spec.md §4.2).
#[derive(Debug, Copy, Clone, Default)]
pub struct FileVersion {
    pub major: u32,
    pub minor: u32,
}

/// Expected entity counts from the `info` directive, used only to
/// pre-reserve storage (spec.md §4.2).
#[derive(Debug, Default, Clone)]
pub struct InfoCounts {
    pub file: Option<usize>,
    pub line: Option<usize>,
    pub module: Option<usize>,
    pub scope: Option<usize>,
    pub segment: Option<usize>,
    pub span: Option<usize>,
    pub symbol: Option<usize>,
    pub library: Option<usize>,
}

/// Everything the parser produces from one input file: the raw,
/// still-id-keyed entity records. Consumed exactly once, by
/// `crate::resolver::resolve`.
#[derive(Debug, Default)]
pub struct RawDatabase {
    pub version: FileVersion,
    pub info: InfoCounts,
    pub files: crate::ids::EntityStore<RawFile>,
    pub libraries: crate::ids::EntityStore<RawLibrary>,
    pub modules: crate::ids::EntityStore<RawModule>,
    pub scopes: crate::ids::EntityStore<RawScope>,
    pub segments: crate::ids::EntityStore<RawSegment>,
    pub spans: crate::ids::EntityStore<RawSpan>,
    pub lines: crate::ids::EntityStore<RawLine>,
    pub symbols: crate::ids::EntityStore<RawSymbol>,
}
