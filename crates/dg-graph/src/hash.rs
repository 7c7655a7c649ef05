use dg_core::{DgError, MoleculeGraph};
use sha2::{Digest, Sha256};

use crate::dg::DerivationGraph;

/// Computes a structural snapshot hash for a calculated derivation graph.
///
/// Encodes the registry's invariants in insertion order and every hyperedge
/// as sorted endpoint handle lists plus sorted rule ids. Two graphs built by
/// the same construction sequence hash identically, making this a cheap
/// regression anchor; it is not an isomorphism-complete canonical form.
pub fn canonical_hash<G: MoleculeGraph>(dg: &DerivationGraph<G>) -> Result<String, DgError> {
    let mut hasher = Sha256::new();

    hasher.update((dg.registry().len() as u64).to_le_bytes());
    for (_, graph) in dg.registry().iter() {
        let invariant = graph.invariant();
        hasher.update((invariant.vertex_count as u64).to_le_bytes());
        hasher.update((invariant.edge_count as u64).to_le_bytes());
        hasher.update(invariant.shape_hash.to_le_bytes());
    }

    let mut edges: Vec<(Vec<u64>, Vec<u64>, Vec<u64>)> = Vec::new();
    for edge in dg.hyper_edges() {
        let sources = endpoint_graphs(dg, edge.sources)?;
        let targets = endpoint_graphs(dg, edge.targets)?;
        let mut rules: Vec<u64> = edge.rules.iter().map(|rule| rule.as_raw()).collect();
        rules.sort_unstable();
        edges.push((sources, targets, rules));
    }
    edges.sort();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (sources, targets, rules) in edges {
        update_slice(&sources, &mut hasher);
        update_slice(&targets, &mut hasher);
        update_slice(&rules, &mut hasher);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

fn endpoint_graphs<G: MoleculeGraph>(
    dg: &DerivationGraph<G>,
    vertices: &[dg_core::VertexId],
) -> Result<Vec<u64>, DgError> {
    let mut graphs = Vec::with_capacity(vertices.len());
    for vertex in vertices {
        graphs.push(dg.store().molecule_graph(*vertex)?.as_raw());
    }
    graphs.sort_unstable();
    Ok(graphs)
}

fn update_slice(values: &[u64], hasher: &mut Sha256) {
    hasher.update((values.len() as u64).to_le_bytes());
    for value in values {
        hasher.update(value.to_le_bytes());
    }
}
