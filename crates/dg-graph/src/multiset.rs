use std::collections::HashMap;

use dg_core::{GraphId, VertexId};
use serde::{Deserialize, Serialize};

use crate::hypergraph::HypergraphStore;

/// Multiset of canonical graph handles forming the combined educts or
/// products of one derivation.
///
/// Constituents must already be registry handles, so multiset equality is
/// plain structural equality over the sorted handle sequence; no isomorphism
/// work happens at this layer. Multiplicity matters, order does not.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphMultiset {
    graphs: Vec<GraphId>,
}

impl GraphMultiset {
    /// Builds a multiset from handles in any order.
    pub fn new(mut graphs: Vec<GraphId>) -> Self {
        graphs.sort_unstable();
        Self { graphs }
    }

    /// Builds a single-element multiset.
    pub fn singleton(graph: GraphId) -> Self {
        Self {
            graphs: vec![graph],
        }
    }

    /// Returns the constituents in sorted order, duplicates preserved.
    pub fn graphs(&self) -> &[GraphId] {
        &self.graphs
    }

    /// Returns the number of constituents, counting multiplicity.
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Returns whether the multiset has no constituents.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

impl FromIterator<GraphId> for GraphMultiset {
    fn from_iter<I: IntoIterator<Item = GraphId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Stable key assigned to an interned multiset.
///
/// A single-element multiset is identified with its molecule-vertex; a
/// larger multiset has no underlying vertex and receives a synthetic key. It
/// exists only as the endpoint set of whichever derivations reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MultisetKey {
    /// Key of a singleton multiset: the wrapped molecule-vertex.
    Molecule(VertexId),
    /// Synthetic key of a multi-element multiset.
    Composite(u64),
}

/// Interning table for graph multisets.
#[derive(Debug, Clone, Default)]
pub struct MultisetTable {
    keys: HashMap<GraphMultiset, MultisetKey>,
    next_composite: u64,
}

impl MultisetTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stable key for a multiset, interning it on first use.
    ///
    /// Repeated calls with multiset-equal arguments return the same key. For
    /// a singleton the molecule-vertex is created lazily if missing, so the
    /// key and the vertex coincide from the first intern on.
    pub fn intern(&mut self, multiset: &GraphMultiset, store: &mut HypergraphStore) -> MultisetKey {
        if let Some(key) = self.keys.get(multiset) {
            return *key;
        }
        let key = if multiset.len() == 1 {
            MultisetKey::Molecule(store.add_molecule(multiset.graphs()[0]))
        } else {
            let key = MultisetKey::Composite(self.next_composite);
            self.next_composite += 1;
            key
        };
        self.keys.insert(multiset.clone(), key);
        key
    }

    /// Returns the key of an already interned multiset, if any.
    pub fn key(&self, multiset: &GraphMultiset) -> Option<MultisetKey> {
        self.keys.get(multiset).copied()
    }

    /// Returns the number of interned multisets.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
