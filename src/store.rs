//! The resolved, immutable entity store (spec.md §4.3 / §3 "Ownership").
//!
//! Owns every entity plus the sorted secondary indices and the
//! address-indexed span lookup built by the resolver. Everything here is
//! read-only once constructed; `crate::query` builds the flattened public
//! API on top of it.

use itertools::Itertools;

use crate::entity::{File, Library, Line, Module, Scope, Segment, Span, Symbol};
use crate::ids::{
    EntityStore, FileId, LibraryId, LineId, ModuleId, ScopeId, SegmentId, SpanId, SymbolId,
};
use crate::span_index::SpanIndex;

#[derive(Debug, Default)]
pub struct Store {
    pub files: EntityStore<File>,
    pub libraries: EntityStore<Library>,
    pub modules: EntityStore<Module>,
    pub scopes: EntityStore<Scope>,
    pub segments: EntityStore<Segment>,
    pub spans: EntityStore<Span>,
    pub lines: EntityStore<Line>,
    pub symbols: EntityStore<Symbol>,

    pub files_by_name: Vec<FileId>,
    pub modules_by_name: Vec<ModuleId>,
    pub segments_by_name: Vec<SegmentId>,
    pub symbols_by_name: Vec<SymbolId>,
    pub symbols_by_value: Vec<SymbolId>,

    pub span_index: SpanIndex,
}

/// Collects `(id, sort key)` pairs for every occupied slot in `store`,
/// sorts by key, and returns just the ids in that order. The tie-breaking
/// is whatever `key` itself encodes (spec.md §4.3 lists the tie-break rule
/// per index).
fn sorted_ids<T, K: Ord, Id: From<u32>>(
    store: &EntityStore<T>,
    key: impl Fn(&T) -> K,
) -> Vec<Id> {
    let mut pairs: Vec<(K, u32)> = store.iter().map(|(id, v)| (key(v), id)).collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs.into_iter().map(|(_, id)| Id::from(id)).collect()
}

impl Store {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        mut files: EntityStore<File>,
        libraries: EntityStore<Library>,
        mut modules: EntityStore<Module>,
        scopes: EntityStore<Scope>,
        segments: EntityStore<Segment>,
        spans: EntityStore<Span>,
        lines: EntityStore<Line>,
        symbols: EntityStore<Symbol>,
    ) -> Store {
        // file.modules_by_name, sorted by the referencing module's name.
        for (_, f) in files.iter_mut() {
            f.modules_by_name.sort_by(|a, b| {
                let na = modules.get(a.get()).map(|m| m.name.as_str()).unwrap_or("");
                let nb = modules.get(b.get()).map(|m| m.name.as_str()).unwrap_or("");
                na.cmp(nb)
            });
        }

        // module.scopes_by_name / module.files_by_name, sorted by name.
        for (_, m) in modules.iter_mut() {
            m.scopes_by_name.sort_by_key(|s| {
                scopes.get(s.get()).map(|sc| sc.name.clone()).unwrap_or_default()
            });
            m.files_by_name.sort_by_key(|f| {
                files.get(f.get()).map(|fe| fe.name.clone()).unwrap_or_default()
            });
        }

        let files_by_name: Vec<FileId> =
            sorted_ids(&files, |f| (f.name.clone(), f.mtime, f.size));
        let modules_by_name: Vec<ModuleId> = sorted_ids(&modules, |m| m.name.clone());
        let segments_by_name: Vec<SegmentId> = sorted_ids(&segments, |s| s.name.clone());
        let symbols_by_name: Vec<SymbolId> =
            sorted_ids(&symbols, |s| (s.name.clone(), s.id.get()));
        let symbols_by_value: Vec<SymbolId> =
            sorted_ids(&symbols, |s| (s.value, s.name.clone()));

        let span_index = SpanIndex::build(&spans);

        Store {
            files,
            libraries,
            modules,
            scopes,
            segments,
            spans,
            lines,
            symbols,
            files_by_name,
            modules_by_name,
            segments_by_name,
            symbols_by_name,
            symbols_by_value,
            span_index,
        }
    }

    /// Binary search for the first and last index of `name` within
    /// `symbols_by_name`, widening to cover the whole equal-name run
    /// (spec.md §4.5 "By name for symbols").
    pub fn symbols_named(&self, name: &str) -> &[SymbolId] {
        let key_of = |id: SymbolId| self.symbols.get(id.get()).map(|s| s.name.as_str()).unwrap_or("");
        let start = self.symbols_by_name.partition_point(|id| key_of(*id) < name);
        let end = start
            + self.symbols_by_name[start..]
                .iter()
                .take_while(|id| key_of(**id) == name)
                .count();
        &self.symbols_by_name[start..end]
    }

    /// Label symbols whose value falls in `[start, end]` inclusive
    /// (spec.md §4.5 "By value range for symbols restricted to label kind").
    pub fn symbols_in_range(&self, start: i64, end: i64) -> Vec<SymbolId> {
        let lo = self.symbols_by_value.partition_point(|id| {
            self.symbols.get(id.get()).map(|s| s.value).unwrap_or(i64::MIN) < start
        });
        self.symbols_by_value[lo..]
            .iter()
            .take_while(|id| {
                self.symbols.get(id.get()).map(|s| s.value).unwrap_or(i64::MAX) <= end
            })
            .copied()
            .filter(|id| {
                self.symbols
                    .get(id.get())
                    .map(|s| s.ty == crate::entity::SymbolType::Label)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Binary search for a line by `(file, line number)`
    /// (spec.md §4.5 "By file-and-line for lines").
    pub fn line_by_file_and_line(&self, file: FileId, line_no: u32) -> Option<LineId> {
        let f = self.files.get(file.get())?;
        let lines = &self.lines;
        let idx = f
            .lines_by_line
            .partition_point(|lid| lines.get(lid.get()).map(|l| l.line).unwrap_or(0) < line_no);
        f.lines_by_line
            .get(idx)
            .copied()
            .filter(|lid| lines.get(lid.get()).map(|l| l.line) == Some(line_no))
    }

    pub fn spans_at_address(&self, addr: u64) -> &[SpanId] {
        self.span_index.lookup(addr)
    }

    /// Groups `symbols_by_name` into contiguous equal-name runs. Exercises
    /// testable property 5 (spec.md §8: "equal-key runs are contiguous")
    /// and gives the query surface's by-name lookup a ready-made widening
    /// without re-deriving the grouping by hand.
    pub fn symbol_name_groups(&self) -> Vec<(String, Vec<SymbolId>)> {
        self.symbols_by_name
            .iter()
            .group_by(|id| {
                self.symbols
                    .get(id.get())
                    .map(|s| s.name.clone())
                    .unwrap_or_default()
            })
            .into_iter()
            .map(|(name, group)| (name, group.copied().collect()))
            .collect()
    }
}
