//! Structural comparison of two derivation graphs.

use std::collections::{HashMap, HashSet};

use dg_core::{GraphId, MoleculeGraph, VertexId};
use serde::{Deserialize, Serialize};

use crate::dg::DerivationGraph;

/// Symmetric difference of two derivation graphs.
///
/// Handles refer to the instance they came from: `*_only_in_first` uses the
/// first graph's ids, `*_only_in_second` the second's. An empty report means
/// the graphs agree on molecule set and derivation set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DgDiff {
    /// Molecules with no isomorphic counterpart in the second graph.
    pub molecules_only_in_first: Vec<GraphId>,
    /// Molecules with no isomorphic counterpart in the first graph.
    pub molecules_only_in_second: Vec<GraphId>,
    /// Derivations without an endpoint-equal counterpart in the second graph.
    pub derivations_only_in_first: Vec<VertexId>,
    /// Derivations without an endpoint-equal counterpart in the first graph.
    pub derivations_only_in_second: Vec<VertexId>,
}

impl DgDiff {
    /// Returns whether the two graphs are structurally equal.
    pub fn is_empty(&self) -> bool {
        self.molecules_only_in_first.is_empty()
            && self.molecules_only_in_second.is_empty()
            && self.derivations_only_in_first.is_empty()
            && self.derivations_only_in_second.is_empty()
    }
}

/// Computes the symmetric difference of two derivation graphs.
///
/// Molecules are matched across instances by invariant prefilter plus the
/// isomorphism oracle (handles are instance-local). A derivation matches
/// when every endpoint molecule matches and the counterpart instance holds a
/// derivation over exactly the translated endpoint multisets. A reported
/// result, never an error.
pub fn diff<G: MoleculeGraph>(first: &DerivationGraph<G>, second: &DerivationGraph<G>) -> DgDiff {
    let mut translation: HashMap<GraphId, GraphId> = HashMap::new();
    let mut molecules_only_in_first = Vec::new();
    for (id, graph) in first.registry().iter() {
        match second.registry().probe(graph) {
            Some(counterpart) => {
                translation.insert(id, counterpart);
            }
            None => molecules_only_in_first.push(id),
        }
    }
    let matched: HashSet<GraphId> = translation.values().copied().collect();
    let molecules_only_in_second: Vec<GraphId> = second
        .registry()
        .graph_ids()
        .filter(|id| !matched.contains(id))
        .collect();

    let mut derivations_only_in_first = Vec::new();
    let mut matched_second: HashSet<VertexId> = HashSet::new();
    for edge in first.store().hyper_edges() {
        let counterpart = translate(first, second, &translation, edge.sources)
            .zip(translate(first, second, &translation, edge.targets))
            .and_then(|(sources, targets)| second.store().find_hyper_edge(&sources, &targets));
        match counterpart {
            Some(vertex) => {
                matched_second.insert(vertex);
            }
            None => derivations_only_in_first.push(edge.id),
        }
    }
    let derivations_only_in_second: Vec<VertexId> = second
        .store()
        .hyper_edges()
        .filter(|edge| !matched_second.contains(&edge.id))
        .map(|edge| edge.id)
        .collect();

    DgDiff {
        molecules_only_in_first,
        molecules_only_in_second,
        derivations_only_in_first,
        derivations_only_in_second,
    }
}

fn translate<G: MoleculeGraph>(
    first: &DerivationGraph<G>,
    second: &DerivationGraph<G>,
    translation: &HashMap<GraphId, GraphId>,
    vertices: &[VertexId],
) -> Option<Vec<VertexId>> {
    vertices
        .iter()
        .map(|vertex| {
            let graph = first.store().molecule_graph(*vertex).ok()?;
            let counterpart = translation.get(&graph)?;
            second.store().molecule_vertex(*counterpart)
        })
        .collect()
}
