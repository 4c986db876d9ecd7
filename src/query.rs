//! The public, read-only query surface (spec.md §4.5 / §6).
//!
//! Every query returns freshly built, flat data -- no embedded references
//! to other result structs, only the plain ids of related entities, so that
//! results are cheap to hand across an API boundary and free to drop in any
//! order. All of it is safe to call concurrently from multiple threads
//! against the same `Database`, since nothing here mutates the store
//! (spec.md §5).

use crate::entity::{LineType, ScopeType, SymbolType};
use crate::ids::{FileId, LibraryId, LineId, ModuleId, ScopeId, SegmentId, SpanId, SymbolId};
use crate::store::Store;

#[derive(Debug, Clone, PartialEq)]
pub struct FileData {
    pub id: u32,
    pub name: String,
    pub size: u64,
    pub mtime: u64,
    pub modules: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryData {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleData {
    pub id: u32,
    pub name: String,
    pub file: u32,
    pub library: Option<u32>,
    pub main_scope: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScopeData {
    pub id: u32,
    pub name: String,
    pub ty: ScopeType,
    pub size: u64,
    pub module: u32,
    pub parent: Option<u32>,
    pub label: Option<u32>,
    pub spans: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentData {
    pub id: u32,
    pub name: String,
    pub start: u64,
    pub size: u64,
    pub output_name: Option<String>,
    pub output_offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpanData {
    pub id: u32,
    pub segment: u32,
    pub start: u64,
    pub end: u64,
    pub scopes: Vec<u32>,
    pub lines: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineData {
    pub id: u32,
    pub file: u32,
    pub line: u32,
    pub ty: LineType,
    pub count: u32,
    pub spans: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolData {
    pub id: u32,
    pub name: String,
    pub ty: SymbolType,
    pub value: i64,
    pub size: u64,
    pub segment: Option<u32>,
    pub scope: Option<u32>,
    pub parent: Option<u32>,
}

/// Borrows a resolved `Store` and answers the read-only queries of
/// spec.md §4.5. Constructed by `Database`; never outlives it.
pub struct Query<'db> {
    store: &'db Store,
}

impl<'db> Query<'db> {
    pub(crate) fn new(store: &'db Store) -> Self {
        Query { store }
    }

    pub fn list_files(&self) -> Vec<FileData> {
        self.store.files.iter().map(|(_, f)| to_file(f)).collect()
    }

    pub fn list_libraries(&self) -> Vec<LibraryData> {
        self.store
            .libraries
            .iter()
            .map(|(_, l)| LibraryData {
                id: l.id.get(),
                name: l.name.clone(),
            })
            .collect()
    }

    pub fn list_modules(&self) -> Vec<ModuleData> {
        self.store.modules.iter().map(|(_, m)| to_module(m)).collect()
    }

    pub fn list_segments(&self) -> Vec<SegmentData> {
        self.store.segments.iter().map(|(_, s)| to_segment(s)).collect()
    }

    pub fn list_spans(&self) -> Vec<SpanData> {
        self.store.spans.iter().map(|(_, s)| to_span(s)).collect()
    }

    pub fn list_lines(&self) -> Vec<LineData> {
        self.store.lines.iter().map(|(_, l)| to_line(l)).collect()
    }

    pub fn list_symbols(&self) -> Vec<SymbolData> {
        self.store.symbols.iter().map(|(_, s)| to_symbol(s)).collect()
    }

    pub fn file_by_id(&self, id: u32) -> Option<FileData> {
        self.store.files.get(id).map(to_file)
    }

    pub fn library_by_id(&self, id: u32) -> Option<LibraryData> {
        self.store.libraries.get(id).map(|l| LibraryData {
            id: l.id.get(),
            name: l.name.clone(),
        })
    }

    pub fn module_by_id(&self, id: u32) -> Option<ModuleData> {
        self.store.modules.get(id).map(to_module)
    }

    pub fn scope_by_id(&self, id: u32) -> Option<ScopeData> {
        self.store.scopes.get(id).map(to_scope)
    }

    pub fn segment_by_id(&self, id: u32) -> Option<SegmentData> {
        self.store.segments.get(id).map(to_segment)
    }

    pub fn span_by_id(&self, id: u32) -> Option<SpanData> {
        self.store.spans.get(id).map(to_span)
    }

    pub fn line_by_id(&self, id: u32) -> Option<LineData> {
        self.store.lines.get(id).map(to_line)
    }

    pub fn symbol_by_id(&self, id: u32) -> Option<SymbolData> {
        self.store.symbols.get(id).map(to_symbol)
    }

    /// By-name lookup for symbols, widened to the whole equal-name run
    /// (spec.md §4.5).
    pub fn symbols_by_name(&self, name: &str) -> Vec<SymbolData> {
        self.store
            .symbols_named(name)
            .iter()
            .filter_map(|id| self.store.symbols.get(id.get()))
            .map(to_symbol)
            .collect()
    }

    /// Label symbols whose value is within `[start, end]` inclusive.
    pub fn symbols_in_range(&self, start: i64, end: i64) -> Vec<SymbolData> {
        self.store
            .symbols_in_range(start, end)
            .iter()
            .filter_map(|id| self.store.symbols.get(id.get()))
            .map(to_symbol)
            .collect()
    }

    /// Line by `(file, line number)`.
    pub fn line_by_file_and_line(&self, file: u32, line: u32) -> Option<LineData> {
        let id = self.store.line_by_file_and_line(FileId(file), line)?;
        self.store.lines.get(id.get()).map(to_line)
    }

    /// Spans covering `addr` (spec.md §4.4).
    pub fn spans_by_address(&self, addr: u64) -> Vec<SpanData> {
        self.store
            .spans_at_address(addr)
            .iter()
            .filter_map(|id| self.store.spans.get(id.get()))
            .map(to_span)
            .collect()
    }

    /// Scopes defined by `module`, sorted by name.
    pub fn scopes_by_module(&self, module: u32) -> Vec<ScopeData> {
        match self.store.modules.get(module) {
            Some(m) => m
                .scopes_by_name
                .iter()
                .filter_map(|id| self.store.scopes.get(id.get()))
                .map(to_scope)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Files referenced by `module`, sorted by name.
    pub fn files_by_module(&self, module: u32) -> Vec<FileData> {
        match self.store.modules.get(module) {
            Some(m) => m
                .files_by_name
                .iter()
                .filter_map(|id| self.store.files.get(id.get()))
                .map(to_file)
                .collect(),
            None => Vec::new(),
        }
    }
}

fn to_file(f: &crate::entity::File) -> FileData {
    FileData {
        id: f.id.get(),
        name: f.name.clone(),
        size: f.size,
        mtime: f.mtime,
        modules: f.modules_by_name.iter().map(|m| m.get()).collect(),
    }
}

fn to_module(m: &crate::entity::Module) -> ModuleData {
    ModuleData {
        id: m.id.get(),
        name: m.name.clone(),
        file: m.file.get(),
        library: m.library.map(LibraryId::get),
        main_scope: m.main_scope.map(ScopeId::get),
    }
}

fn to_scope(s: &crate::entity::Scope) -> ScopeData {
    ScopeData {
        id: s.id.get(),
        name: s.name.clone(),
        ty: s.ty,
        size: s.size,
        module: s.module.get(),
        parent: s.parent.map(ScopeId::get),
        label: s.label.map(SymbolId::get),
        spans: s.spans.iter().map(SpanId::get).collect(),
    }
}

fn to_segment(s: &crate::entity::Segment) -> SegmentData {
    SegmentData {
        id: s.id.get(),
        name: s.name.clone(),
        start: s.start,
        size: s.size,
        output_name: s.output_name.clone(),
        output_offset: s.output_offset,
    }
}

fn to_span(s: &crate::entity::Span) -> SpanData {
    SpanData {
        id: s.id.get(),
        segment: s.segment.get(),
        start: s.start,
        end: s.end,
        scopes: s.scopes.iter().map(ScopeId::get).collect(),
        lines: s.lines.iter().map(LineId::get).collect(),
    }
}

fn to_line(l: &crate::entity::Line) -> LineData {
    LineData {
        id: l.id.get(),
        file: l.file.get(),
        line: l.line,
        ty: l.ty,
        count: l.count,
        spans: l.spans.iter().map(SpanId::get).collect(),
    }
}

fn to_symbol(s: &crate::entity::Symbol) -> SymbolData {
    SymbolData {
        id: s.id.get(),
        name: s.name.clone(),
        ty: s.ty,
        value: s.value,
        size: s.size,
        segment: s.segment.map(SegmentId::get),
        scope: s.scope.map(ScopeId::get),
        parent: s.parent.map(SymbolId::get),
    }
}
