//! A navigable tree of one module's scopes (SPEC_FULL.md §E).
//!
//! This is not part of the resolver's invariants -- nothing downstream
//! relies on it -- it is a read-only view built on demand, directly
//! grounded on the teacher's outline pass (`outline::OutlineNode` /
//! `build_outline`), generalized from "headings ordered by level" to
//! "scopes linked by `parent`".

use crate::ids::{ModuleId, ScopeId};
use crate::store::Store;

/// One node of a module's scope tree. The root is always the module's
/// main (parent-less) scope (spec.md §3 invariant 2).
#[derive(Debug, Clone)]
pub struct ScopeTreeNode {
    pub scope: ScopeId,
    pub children: Vec<ScopeTreeNode>,
}

impl ScopeTreeNode {
    /// Depth-first count of this node and all of its descendants.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ScopeTreeNode::count).sum::<usize>()
    }
}

/// Builds the scope tree for `module`, or `None` if the module doesn't
/// exist or (having failed resolution) has no main scope.
pub fn build_scope_tree(store: &Store, module: ModuleId) -> Option<ScopeTreeNode> {
    let module_entity = store.modules.get(module.get())?;
    let root_id = module_entity.main_scope?;

    // Group this module's scopes by parent, so each node's children are a
    // single lookup rather than a rescan of every scope in the store.
    let mut children_of: std::collections::HashMap<u32, Vec<ScopeId>> = std::collections::HashMap::new();
    for &sid in &module_entity.scopes_by_name {
        if let Some(scope) = store.scopes.get(sid.get()) {
            if let Some(parent) = scope.parent {
                children_of.entry(parent.get()).or_default().push(sid);
            }
        }
    }
    for siblings in children_of.values_mut() {
        siblings.sort_by_key(|id| {
            store
                .scopes
                .get(id.get())
                .map(|s| s.name.clone())
                .unwrap_or_default()
        });
    }

    Some(build_node(root_id, &children_of))
}

fn build_node(id: ScopeId, children_of: &std::collections::HashMap<u32, Vec<ScopeId>>) -> ScopeTreeNode {
    let children = children_of
        .get(&id.get())
        .map(|kids| kids.iter().map(|&kid| build_node(kid, children_of)).collect())
        .unwrap_or_default();
    ScopeTreeNode { scope: id, children }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::CollectingSink;
    use crate::diag::DiagnosticCollector;
    use crate::parser::Parser;
    use crate::resolver::resolve;

    fn store(src: &str) -> Store {
        let mut sink = CollectingSink::default();
        let mut diags = DiagnosticCollector::new(&mut sink);
        let raw = Parser::new("t.dbg", src.as_bytes(), crate::database::LoadOptions::default()).parse(&mut diags);
        resolve(raw, "t.dbg", &mut diags)
    }

    #[test]
    fn nested_scopes_form_a_tree() {
        let src = "version major=2,minor=0\n\
                   module id=0,name=\"m\",file=0\n\
                   scope id=0,name=\"main\",mod=0\n\
                   scope id=1,name=\"inner\",mod=0,parent=0\n\
                   scope id=2,name=\"inner2\",mod=0,parent=0\n\
                   file id=0,name=\"a.s\",size=1,mtime=1,mod=0\n";
        let s = store(src);
        let tree = build_scope_tree(&s, ModuleId(0)).expect("module 0 should resolve");
        assert_eq!(tree.scope.get(), 0);
        assert_eq!(tree.children.len(), 2);
        assert_eq!(tree.count(), 3);
    }

    #[test]
    fn missing_module_returns_none() {
        let s = store("version major=2,minor=0\n");
        assert!(build_scope_tree(&s, ModuleId(5)).is_none());
    }
}
