//! The id-resolution and cross-linking pass (spec.md §4.3).
//!
//! Consumes the raw, still-integer-keyed records the parser produced and
//! builds the final object graph: every cross-field becomes a validated
//! `Option<Id>`, back-reference collections are populated, and the sorted
//! secondary indices plus the address-indexed span lookup are built.
//!
//! This is the only place that ever mutates an entity after its initial
//! construction; once `resolve` returns a `crate::store::Store`, everything
//! in it is immutable for the lifetime of the `Database`.

use fnv::FnvHashMap;

use crate::diag::{Diagnostic, DiagnosticCollector, Severity};
use crate::entity::{File, Library, Line, Module, Scope, Segment, Span, Symbol};
use crate::ids::{EntityStore, FileId, LineId, ModuleId, ScopeId, SegmentId, SpanId, SymbolId};
use crate::raw::RawDatabase;
use crate::store::Store;

fn err(diags: &mut DiagnosticCollector<'_>, file: &str, message: impl Into<String>) {
    diags.emit(Diagnostic::new(Severity::Error, file, 0, 0, message, ""));
}

/// Resolves a freshly parsed `RawDatabase` into a queryable `Store`.
pub fn resolve(raw: RawDatabase, file_name: &str, diags: &mut DiagnosticCollector<'_>) -> Store {
    log::debug!(
        "resolving: {} files, {} libraries, {} modules, {} scopes, {} segments, {} spans, {} lines, {} symbols",
        raw.files.len(),
        raw.libraries.len(),
        raw.modules.len(),
        raw.scopes.len(),
        raw.segments.len(),
        raw.spans.len(),
        raw.lines.len(),
        raw.symbols.len(),
    );

    let mut libraries = EntityStore::new();
    for (id, lib) in raw.libraries.iter() {
        libraries.insert(
            id,
            Library {
                id: LibraryId(id),
                name: lib.name.clone(),
            },
        );
    }

    let mut segments = EntityStore::new();
    for (id, seg) in raw.segments.iter() {
        segments.insert(
            id,
            Segment {
                id: SegmentId(id),
                name: seg.name.clone(),
                start: seg.start,
                size: seg.size,
                addrsize: seg.addrsize.clone(),
                kind: seg.kind.clone(),
                output_name: seg.output_name.clone(),
                output_offset: seg.output_offset,
            },
        );
    }

    let mut files = EntityStore::new();
    for (id, f) in raw.files.iter() {
        files.insert(
            id,
            File {
                id: FileId(id),
                name: f.name.clone(),
                size: f.size,
                mtime: f.mtime,
                modules_by_name: Vec::new(),
                lines_by_line: Vec::new(),
            },
        );
    }

    let mut modules = EntityStore::new();
    for (id, m) in raw.modules.iter() {
        let file = match files.get(m.file) {
            Some(_) => FileId(m.file),
            None => {
                err(
                    diags,
                    file_name,
                    format!("module {} references nonexistent file {}", id, m.file),
                );
                FileId(m.file)
            }
        };
        let library = match m.library {
            None => None,
            Some(lid) if libraries.get(lid).is_some() => Some(LibraryId(lid)),
            Some(lid) => {
                err(
                    diags,
                    file_name,
                    format!("module {} references nonexistent library {}", id, lid),
                );
                None
            }
        };
        modules.insert(
            id,
            Module {
                id: ModuleId(id),
                name: m.name.clone(),
                file,
                library,
                main_scope: None,
                files_by_name: Vec::new(),
                scopes_by_name: Vec::new(),
            },
        );
    }

    // Back-reference: file.mod -> module.files_by_name / file.modules_by_name.
    // `mod` is a set (spec.md §3), so every id in the list is resolved and
    // cross-linked independently.
    for (fid, f) in raw.files.iter() {
        for &mid in &f.module {
            if modules.get(mid).is_some() {
                if let Some(m) = modules.get_mut(mid) {
                    m.files_by_name.push(FileId(fid));
                }
                if let Some(file_entity) = files.get_mut(fid) {
                    file_entity.modules_by_name.push(ModuleId(mid));
                }
            } else {
                err(
                    diags,
                    file_name,
                    format!("file {} references nonexistent module {}", fid, mid),
                );
            }
        }
    }

    let mut scopes = EntityStore::new();
    for (id, s) in raw.scopes.iter() {
        let module = match modules.get(s.module) {
            Some(_) => ModuleId(s.module),
            None => {
                err(
                    diags,
                    file_name,
                    format!("scope {} references nonexistent module {}", id, s.module),
                );
                ModuleId(s.module)
            }
        };
        let parent = match s.parent {
            None => None,
            Some(pid) if raw.scopes.get(pid).is_some() => Some(ScopeId(pid)),
            Some(pid) => {
                err(
                    diags,
                    file_name,
                    format!("scope {} references nonexistent parent scope {}", id, pid),
                );
                None
            }
        };
        scopes.insert(
            id,
            Scope {
                id: ScopeId(id),
                name: s.name.clone(),
                ty: s.ty,
                size: s.size,
                module,
                parent,
                label: None, // filled below once symbols exist
                spans: Vec::new(),
            },
        );
    }

    // Module main scope: the unique parent-less scope declared for it.
    for (mid, m) in raw.modules.iter() {
        let mut found: Option<ScopeId> = None;
        let mut count = 0;
        for (sid, s) in raw.scopes.iter() {
            if s.module == mid && s.parent.is_none() {
                count += 1;
                found = Some(ScopeId(sid));
            }
        }
        if count == 1 {
            if let Some(module) = modules.get_mut(mid) {
                module.main_scope = found;
            }
        } else {
            err(
                diags,
                file_name,
                format!(
                    "module {} ({}) has {} parent-less scopes, expected exactly 1",
                    mid, m.name, count
                ),
            );
        }
    }

    // module.scopes_by_name.
    for (sid, s) in raw.scopes.iter() {
        if let Some(m) = modules.get_mut(s.module) {
            m.scopes_by_name.push(ScopeId(sid));
        }
    }

    let mut lines = EntityStore::new();
    for (id, l) in raw.lines.iter() {
        let file = match files.get(l.file) {
            Some(_) => FileId(l.file),
            None => {
                err(
                    diags,
                    file_name,
                    format!("line {} references nonexistent file {}", id, l.file),
                );
                FileId(l.file)
            }
        };
        lines.insert(
            id,
            Line {
                id: LineId(id),
                file,
                line: l.line,
                ty: l.ty,
                count: l.count,
                spans: Vec::new(),
            },
        );
    }

    // file.lines_by_line, sorted by line number (spec.md §4.3).
    for (fid, f) in files.iter_mut() {
        let mut line_ids: Vec<LineId> = raw
            .lines
            .iter()
            .filter(|(_, l)| l.file == fid)
            .map(|(lid, _)| LineId(lid))
            .collect();
        line_ids.sort_by_key(|lid| lines.get(lid.get()).map(|l| l.line).unwrap_or(0));
        f.lines_by_line = line_ids;
    }

    let mut spans = EntityStore::new();
    for (id, sp) in raw.spans.iter() {
        match segments.get(sp.segment) {
            Some(seg) => {
                let start = sp.start + seg.start;
                let end = start + sp.size.saturating_sub(1);
                if start > end {
                    err(
                        diags,
                        file_name,
                        format!("span {} has zero or negative size", id),
                    );
                }
                if start < seg.start || end > seg.end() {
                    err(
                        diags,
                        file_name,
                        format!(
                            "span {} range [{:#x},{:#x}] is not contained in segment {}'s range [{:#x},{:#x}]",
                            id, start, end, sp.segment, seg.start, seg.end()
                        ),
                    );
                }
                spans.insert(
                    id,
                    Span {
                        id: SpanId(id),
                        segment: SegmentId(sp.segment),
                        start,
                        end,
                        scopes: Vec::new(),
                        lines: Vec::new(),
                    },
                );
            }
            None => {
                err(
                    diags,
                    file_name,
                    format!("span {} references nonexistent segment {}", id, sp.segment),
                );
            }
        }
    }

    // Back-references: scope.spans -> span.scopes, line.spans -> span.lines.
    for (sid, s) in raw.scopes.iter() {
        for span_raw_id in &s.spans {
            if spans.get(*span_raw_id).is_some() {
                if let Some(span) = spans.get_mut(*span_raw_id) {
                    span.scopes.push(ScopeId(sid));
                }
                if let Some(scope) = scopes.get_mut(sid) {
                    scope.spans.push(SpanId(*span_raw_id));
                }
            } else {
                err(
                    diags,
                    file_name,
                    format!("scope {} references nonexistent span {}", sid, span_raw_id),
                );
            }
        }
    }
    for (lid, l) in raw.lines.iter() {
        for span_raw_id in &l.spans {
            if spans.get(*span_raw_id).is_some() {
                if let Some(span) = spans.get_mut(*span_raw_id) {
                    span.lines.push(LineId(lid));
                }
                if let Some(line) = lines.get_mut(lid) {
                    line.spans.push(SpanId(*span_raw_id));
                }
            } else {
                err(
                    diags,
                    file_name,
                    format!("line {} references nonexistent span {}", lid, span_raw_id),
                );
            }
        }
    }

    let mut symbols = EntityStore::new();
    for (id, sym) in raw.symbols.iter() {
        let segment = match sym.segment {
            None => None,
            Some(segid) if segments.get(segid).is_some() => Some(SegmentId(segid)),
            Some(segid) => {
                err(
                    diags,
                    file_name,
                    format!("symbol {} references nonexistent segment {}", id, segid),
                );
                None
            }
        };
        let scope = match sym.scope {
            None => None,
            Some(scid) if scopes.get(scid).is_some() => Some(ScopeId(scid)),
            Some(scid) => {
                err(
                    diags,
                    file_name,
                    format!("symbol {} references nonexistent scope {}", id, scid),
                );
                None
            }
        };
        let parent = match sym.parent {
            None => None,
            Some(pid) if raw.symbols.get(pid).is_some() => Some(SymbolId(pid)),
            Some(pid) => {
                err(
                    diags,
                    file_name,
                    format!("symbol {} references nonexistent parent symbol {}", id, pid),
                );
                None
            }
        };
        symbols.insert(
            id,
            Symbol {
                id: SymbolId(id),
                name: sym.name.clone(),
                ty: sym.ty,
                value: sym.value,
                size: sym.size,
                segment,
                scope,
                parent,
            },
        );
    }

    // Symbol scope inheritance (spec.md §4.3 point 3): walk the parent
    // chain until a direct scope is found or the chain runs out.
    let ids: Vec<u32> = symbols.iter().map(|(id, _)| id).collect();
    for id in ids {
        if symbols.get(id).map(|s| s.scope.is_some()).unwrap_or(false) {
            continue;
        }
        let mut visited = std::collections::HashSet::new();
        let mut cursor = symbols.get(id).and_then(|s| s.parent);
        let mut found = None;
        while let Some(SymbolId(pid)) = cursor {
            if !visited.insert(pid) {
                break; // cyclic parent chain, bail out
            }
            match symbols.get(pid) {
                Some(p) if p.scope.is_some() => {
                    found = p.scope;
                    break;
                }
                Some(p) => cursor = p.parent,
                None => break,
            }
        }
        if let Some(scope) = found {
            if let Some(sym) = symbols.get_mut(id) {
                sym.scope = Some(scope);
            }
        }
    }
    for (id, sym) in symbols.iter() {
        if sym.scope.is_none() {
            err(
                diags,
                file_name,
                format!("symbol {} ({}) has no effective scope", id, sym.name),
            );
        }
    }

    // scope.label: resolve now that symbols exist.
    for (sid, s) in raw.scopes.iter() {
        if let Some(label_id) = s.label {
            if symbols.get(label_id).is_some() {
                if let Some(scope) = scopes.get_mut(sid) {
                    scope.label = Some(SymbolId(label_id));
                }
            } else {
                err(
                    diags,
                    file_name,
                    format!("scope {} references nonexistent label symbol {}", sid, label_id),
                );
            }
        }
    }

    log::debug!("resolution complete, building indices");
    Store::build(files, libraries, modules, scopes, segments, spans, lines, symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::CollectingSink;
    use crate::parser::Parser;

    fn load(src: &str) -> (Store, usize) {
        let mut sink = CollectingSink::default();
        let mut diags = DiagnosticCollector::new(&mut sink);
        let raw = Parser::new("t.dbg", src.as_bytes(), crate::database::LoadOptions::default()).parse(&mut diags);
        let store = resolve(raw, "t.dbg", &mut diags);
        (store, diags.error_count())
    }

    #[test]
    fn minimal_file_has_no_errors() {
        let src = "version major=2,minor=0\ninfo file=0,line=0,mod=0,scope=0,seg=0,span=0,sym=0,lib=0\n";
        let (store, errors) = load(src);
        assert_eq!(errors, 0);
        assert_eq!(store.files.len(), 0);
    }

    #[test]
    fn symbol_inherits_parent_scope() {
        let src = "version major=2,minor=0\n\
                   module id=0,name=\"m\",file=0\n\
                   scope id=0,name=\"main\",mod=0\n\
                   sym id=0,name=\"p\",type=lab,val=1,addrsize=abs,scope=0\n\
                   sym id=1,name=\"c\",type=lab,val=2,addrsize=abs,parent=0\n\
                   file id=0,name=\"a.s\",size=1,mtime=1,mod=0\n";
        let (store, errors) = load(src);
        assert_eq!(errors, 0);
        let child = store.symbols.get(1).unwrap();
        assert_eq!(child.scope.unwrap().get(), 0);
    }
}
