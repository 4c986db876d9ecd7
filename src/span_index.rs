//! The address-indexed span lookup structure (spec.md §4.4).
//!
//! Spans are stored with absolute addresses by the time this runs (the
//! resolver already added each span's owning segment's base). This module
//! builds a sorted table mapping every byte address covered by at least one
//! span to the (possibly multi-element) set of spans covering it, and
//! answers `by_address` queries with a binary search.

use std::collections::BTreeMap;

use crate::entity::{span_order, Span};
use crate::ids::{EntityStore, SpanId};

/// A sorted `{addr, covering spans}` table. Addresses with no span never
/// appear; `lookup` returns an empty slice for them.
#[derive(Debug, Default)]
pub struct SpanIndex {
    entries: Vec<(u64, Vec<SpanId>)>,
}

impl SpanIndex {
    /// Builds the index from the fully id-resolved span store.
    ///
    /// Spans are swept in `(start, end)` order so that, per spec.md §4.4,
    /// the covering-span list at any shared address preserves start-order
    /// (and, at a shared start, shorter-span-first) deterministically.
    pub fn build(spans: &EntityStore<Span>) -> SpanIndex {
        let mut sorted: Vec<&Span> = spans.iter().map(|(_, s)| s).collect();
        sorted.sort_by(|a, b| span_order(a, b));

        let mut by_addr: BTreeMap<u64, Vec<SpanId>> = BTreeMap::new();
        for span in sorted {
            for addr in span.start..=span.end {
                by_addr.entry(addr).or_default().push(span.id);
            }
        }
        SpanIndex {
            entries: by_addr.into_iter().collect(),
        }
    }

    /// Returns the spans covering `addr`, in deterministic start-sweep
    /// order, or an empty slice if nothing covers it.
    pub fn lookup(&self, addr: u64) -> &[SpanId] {
        match self.entries.binary_search_by_key(&addr, |(a, _)| *a) {
            Ok(idx) => &self.entries[idx].1,
            Err(_) => &[],
        }
    }

    /// Number of distinct covered addresses, for diagnostics/tests.
    pub fn covered_address_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Span;
    use crate::ids::{SegmentId, SpanId};

    fn span(id: u32, start: u64, end: u64) -> Span {
        Span {
            id: SpanId(id),
            segment: SegmentId(0),
            start,
            end,
            scopes: Vec::new(),
            lines: Vec::new(),
        }
    }

    #[test]
    fn disjoint_spans() {
        let mut store = EntityStore::new();
        store.insert(0, span(0, 0x1000, 0x100f));
        let idx = SpanIndex::build(&store);
        assert_eq!(idx.lookup(0x1000), &[SpanId(0)]);
        assert_eq!(idx.lookup(0x100f), &[SpanId(0)]);
        assert!(idx.lookup(0x0fff).is_empty());
        assert!(idx.lookup(0x1010).is_empty());
    }

    #[test]
    fn overlapping_spans_preserve_start_order() {
        let mut store = EntityStore::new();
        store.insert(0, span(0, 0x2000, 0x200f));
        store.insert(1, span(1, 0x2008, 0x2017));
        let idx = SpanIndex::build(&store);
        assert_eq!(idx.lookup(0x2008), &[SpanId(0), SpanId(1)]);
        assert_eq!(idx.lookup(0x2010), &[SpanId(1)]);
    }
}
