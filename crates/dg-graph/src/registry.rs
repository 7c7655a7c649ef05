use std::collections::HashMap;

use dg_core::{DgError, ErrorInfo, GraphId, MoleculeGraph, StructuralInvariant};

/// Interning registry holding one representative per isomorphism class.
///
/// Candidates are bucketed by their cheap [`StructuralInvariant`] and
/// confirmed with the isomorphism oracle only within a bucket, giving
/// average-case constant-time dedup. Final membership does not depend on
/// insertion order; the surviving representative of a class is whichever
/// candidate arrived first.
#[derive(Debug)]
pub struct GraphRegistry<G: MoleculeGraph> {
    graphs: Vec<G>,
    buckets: HashMap<StructuralInvariant, Vec<GraphId>>,
}

impl<G: MoleculeGraph> Default for GraphRegistry<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: MoleculeGraph> GraphRegistry<G> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            graphs: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    /// Returns the number of interned isomorphism classes.
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Interns a candidate graph.
    ///
    /// If an isomorphic entry exists the candidate is dropped and the
    /// existing handle returned with `false`; otherwise the candidate moves
    /// into the registry and its fresh handle is returned with `true`. No
    /// reference to a discarded candidate ever escapes.
    pub fn insert(&mut self, candidate: G) -> (GraphId, bool) {
        let invariant = candidate.invariant();
        if let Some(existing) = self.probe_bucket(&invariant, &candidate) {
            return (existing, false);
        }
        let id = GraphId::from_raw(self.graphs.len() as u64);
        self.graphs.push(candidate);
        self.buckets.entry(invariant).or_default().push(id);
        (id, true)
    }

    /// Looks up the handle an insertion of `candidate` would return, without
    /// mutating the registry. `None` means the candidate is new.
    pub fn probe(&self, candidate: &G) -> Option<GraphId> {
        self.probe_bucket(&candidate.invariant(), candidate)
    }

    /// Returns the interned graph behind a handle.
    pub fn get(&self, id: GraphId) -> Result<&G, DgError> {
        self.graphs.get(id.as_raw() as usize).ok_or_else(|| {
            DgError::Registry(
                ErrorInfo::new("unknown-graph", "graph handle does not exist")
                    .with_context("graph", id.as_raw().to_string()),
            )
        })
    }

    /// Returns all handles in insertion order.
    pub fn graph_ids(&self) -> impl Iterator<Item = GraphId> + '_ {
        (0..self.graphs.len()).map(|idx| GraphId::from_raw(idx as u64))
    }

    /// Returns `(handle, graph)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (GraphId, &G)> {
        self.graphs
            .iter()
            .enumerate()
            .map(|(idx, graph)| (GraphId::from_raw(idx as u64), graph))
    }

    fn probe_bucket(&self, invariant: &StructuralInvariant, candidate: &G) -> Option<GraphId> {
        let bucket = self.buckets.get(invariant)?;
        for id in bucket {
            let stored = &self.graphs[id.as_raw() as usize];
            if stored.isomorphic_to(candidate) {
                // A broken oracle (asymmetric or invariant-inconsistent) is
                // a fatal fault; catch it in test builds.
                debug_assert!(candidate.isomorphic_to(stored));
                debug_assert_eq!(*invariant, stored.invariant());
                return Some(*id);
            }
        }
        None
    }
}
