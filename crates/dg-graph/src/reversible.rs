//! Post-construction detection of mutually inverse derivation pairs.

use dg_core::{DgError, VertexId};

use crate::hypergraph::HypergraphStore;

/// Marks every derivation that has an exact inverse.
///
/// For a derivation with educts `S` and products `T`, the candidate inverse
/// is looked up through the same anchored incidence scan used during
/// construction, anchored at one vertex of `T`, so the pass is linear in
/// hypergraph size rather than quadratic in the number of derivations. A
/// derivation whose educts equal its products is its own inverse.
/// Derivations without an exact inverse stay unmarked. Returns the number of
/// newly marked pairs.
pub fn find_reversible_pairs(store: &mut HypergraphStore) -> Result<usize, DgError> {
    let edges: Vec<VertexId> = store.hyper_edges().map(|edge| edge.id).collect();
    let mut pairs = 0;
    for id in edges {
        if store.reverse_of(id)?.is_some() {
            continue;
        }
        let sources = store.sources(id)?.to_vec();
        let targets = store.targets(id)?.to_vec();
        if let Some(inverse) = store.find_hyper_edge(&targets, &sources) {
            store.mark_reverse(id, inverse)?;
            pairs += 1;
        }
    }
    Ok(pairs)
}
