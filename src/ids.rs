//! Id newtypes shared by the raw and resolved entity representations.
//!
//! Every entity kind gets its own 32-bit id type so that, say, a `ScopeId`
//! can never be passed where a `SpanId` is expected.  The all-ones value is
//! reserved as the "invalid id" sentinel described in the input format (an
//! optional field that was simply not present on the directive).

use std::fmt;

/// The all-ones sentinel used by the input format to mean "no such id".
pub const INVALID: u32 = u32::MAX;

macro_rules! id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Wraps a raw integer read from the input file. `INVALID` maps
            /// to `None`; any other value is assumed to be a real id and is
            /// validated later by the resolver.
            pub fn from_raw(raw: u32) -> Option<$name> {
                if raw == INVALID {
                    None
                } else {
                    Some($name(raw))
                }
            }

            /// The plain integer, for building external/flattened query
            /// results (spec.md §6: "flattens object references back to
            /// ids").
            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                $name(raw)
            }
        }
    };
}

id_type!(FileId, "Id of a `File` (source file) entity.");
id_type!(LibraryId, "Id of a `Library` entity.");
id_type!(ModuleId, "Id of a `Module` (translation unit) entity.");
id_type!(ScopeId, "Id of a `Scope` (lexical scope) entity.");
id_type!(SegmentId, "Id of a `Segment` (output section) entity.");
id_type!(SpanId, "Id of a `Span` (contiguous emitted byte range) entity.");
id_type!(LineId, "Id of a `Line` (source-line record) entity.");
id_type!(SymbolId, "Id of a `Symbol` entity.");

/// A dense, id-indexed store for one entity kind.
///
/// Ids from the input file are used directly as the index; the vector grows
/// on demand to fit the largest id seen. Gaps left by ids that are
/// referenced in `info` counts but never actually declared (spec.md §3:
/// "dense ... with possible omissions that remain as null placeholders")
/// are represented as `None`.
#[derive(Debug, Default)]
pub struct EntityStore<T> {
    slots: Vec<Option<T>>,
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        EntityStore { slots: Vec::new() }
    }

    /// Pre-reserves capacity for `count` entities, per the `info`
    /// directive's hinted counts (spec.md §4.2). Purely an optimization;
    /// never required for correctness.
    pub fn reserve(&mut self, count: usize) {
        if count > self.slots.len() {
            self.slots.resize_with(count, || None);
        }
    }

    /// Inserts (or overwrites) the entity at `id`.
    ///
    /// Returns the previous occupant, if any, so callers can detect and
    /// warn about duplicate ids (spec.md §9 Open Questions: "we recommend
    /// treating a duplicate id as overwriting the earlier record ...
    /// and emitting a warning").
    pub fn insert(&mut self, id: u32, value: T) -> Option<T> {
        let idx = id as usize;
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        self.slots[idx].replace(value)
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.slots.get_mut(id as usize).and_then(Option::as_mut)
    }

    /// Iterates over all occupied slots together with their id, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (i as u32, v)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|v| (i as u32, v)))
    }

    /// Number of occupied (non-gap) slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One past the largest id ever inserted, i.e. the slot array length.
    pub fn capacity_span(&self) -> usize {
        self.slots.len()
    }
}
