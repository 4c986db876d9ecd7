//! The resolved object model (spec.md §3).
//!
//! These are the "stage two" types from the design notes: every
//! cross-entity reference is a validated `Option<Id>` (or a plain `Id` when
//! the field is non-optional), never a raw integer. They are built in place
//! by `crate::resolver` from the raw records `crate::raw` collects during
//! parsing; nothing outside the resolver constructs or mutates them.

use crate::ids::{FileId, LibraryId, ModuleId, ScopeId, SegmentId, SpanId, SymbolId};

/// `scope.type` (spec.md §4.2): `global` / `file` / `scope` / `struct` /
/// `enum` map respectively onto these five kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScopeType {
    Global,
    Module,
    Scope,
    Struct,
    Enum,
}

/// `sym.type`: `equ` (compile-time constant) or `lab` (target address).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SymbolType {
    Equate,
    Label,
}

/// `line.type`: what kind of source produced this line record.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineType {
    Assembly,
    C,
    Macro,
}

#[derive(Debug, Clone)]
pub struct File {
    pub id: FileId,
    pub name: String,
    pub size: u64,
    pub mtime: u64,
    /// Modules in which this file is used, sorted by module name
    /// (spec.md §4.3: "Per-file-within-module files by name" / the file's
    /// own "modules in which this file is used" relation).
    pub modules_by_name: Vec<ModuleId>,
    /// Line records located in this file, sorted by line number.
    pub lines_by_line: Vec<crate::ids::LineId>,
}

#[derive(Debug, Clone)]
pub struct Library {
    pub id: LibraryId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub file: FileId,
    pub library: Option<LibraryId>,
    /// Filled in during resolution once the unique parent-less scope for
    /// this module is found (spec.md §4.3 point 2; invariant 2).
    pub main_scope: Option<ScopeId>,
    /// Files referenced by this module (here: just the owning file, kept as
    /// a set for future multi-file modules), by name.
    pub files_by_name: Vec<FileId>,
    /// Scopes defined in this module, sorted by name.
    pub scopes_by_name: Vec<ScopeId>,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    pub name: String,
    pub ty: ScopeType,
    pub size: u64,
    pub module: ModuleId,
    /// Absent exactly when this is the module's main scope.
    pub parent: Option<ScopeId>,
    pub label: Option<SymbolId>,
    pub spans: Vec<SpanId>,
}

#[derive(Debug, Clone)]
pub struct Segment {
    pub id: SegmentId,
    pub name: String,
    pub start: u64,
    pub size: u64,
    /// Recorded but semantically unused in the core (spec.md §4.2).
    pub addrsize: String,
    pub kind: String,
    /// Both set or both `None` (invariant 4).
    pub output_name: Option<String>,
    pub output_offset: Option<u64>,
}

impl Segment {
    pub fn end(&self) -> u64 {
        self.start + self.size.saturating_sub(1)
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub id: SpanId,
    pub segment: SegmentId,
    /// Absolute start address, after `span.start + segment.start`
    /// (spec.md §4.4).
    pub start: u64,
    /// Absolute inclusive end address.
    pub end: u64,
    pub scopes: Vec<ScopeId>,
    pub lines: Vec<crate::ids::LineId>,
}

impl Span {
    pub fn contains(&self, addr: u64) -> bool {
        self.start <= addr && addr <= self.end
    }
}

/// Comparison order for spans (spec.md §4.4): ascending start, then
/// ascending end, so that at a shared start, shorter spans sort first.
pub fn span_order(a: &Span, b: &Span) -> std::cmp::Ordering {
    a.start.cmp(&b.start).then(a.end.cmp(&b.end))
}

#[derive(Debug, Clone)]
pub struct Line {
    pub id: crate::ids::LineId,
    pub file: FileId,
    /// 1-based.
    pub line: u32,
    pub ty: LineType,
    pub count: u32,
    pub spans: Vec<SpanId>,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub ty: SymbolType,
    pub value: i64,
    pub size: u64,
    pub segment: Option<SegmentId>,
    /// Always non-null after resolution (invariant 3); `scope` is filled
    /// in directly or inherited from `parent`'s chain.
    pub scope: Option<ScopeId>,
    pub parent: Option<SymbolId>,
}
