//! Find-or-create indexing of derivations over endpoint multiset pairs.
//!
//! Both operations resolve multiset constituents to molecule-vertices and
//! match candidates by scanning the derivations already incident to one
//! participating endpoint, never the whole store. The constituent graphs
//! must already be registered; passing handles from a foreign registry is a
//! caller contract violation and is not defended against.

use dg_core::{DgError, ErrorInfo, RuleId, VertexId};

use crate::hypergraph::HypergraphStore;
use crate::multiset::GraphMultiset;

/// Locates an existing derivation with exactly these endpoint multisets.
///
/// Returns `None` if any constituent has no molecule-vertex yet or if no
/// incident derivation matches. Read-only.
pub fn is_derivation(
    store: &HypergraphStore,
    sources: &GraphMultiset,
    targets: &GraphMultiset,
) -> Option<VertexId> {
    let source_vertices = resolve(store, sources)?;
    let target_vertices = resolve(store, targets)?;
    store.find_hyper_edge(&source_vertices, &target_vertices)
}

/// Finds or creates the derivation for `(sources, targets)`.
///
/// On rediscovery the rule (if any) is appended to the existing vertex's
/// rule list and `(handle, true)` is returned; otherwise a new
/// derivation-vertex is wired up, with a rule list containing `rule` if
/// non-`None`, and `(handle, false)` is returned. Missing molecule-vertices
/// for already-registered constituents are created on demand; graphs
/// themselves are never registered here.
pub fn suggest_derivation(
    store: &mut HypergraphStore,
    sources: &GraphMultiset,
    targets: &GraphMultiset,
    rule: Option<RuleId>,
) -> Result<(VertexId, bool), DgError> {
    if sources.is_empty() && targets.is_empty() {
        return Err(DgError::Derivation(ErrorInfo::new(
            "empty-derivation",
            "a derivation requires at least one educt or product",
        )));
    }
    let source_vertices: Vec<VertexId> = sources
        .graphs()
        .iter()
        .map(|graph| store.add_molecule(*graph))
        .collect();
    let target_vertices: Vec<VertexId> = targets
        .graphs()
        .iter()
        .map(|graph| store.add_molecule(*graph))
        .collect();
    if let Some(existing) = store.find_hyper_edge(&source_vertices, &target_vertices) {
        if let Some(rule) = rule {
            store.append_rule(existing, rule)?;
        }
        return Ok((existing, true));
    }
    let created = store.add_derivation(&source_vertices, &target_vertices, rule)?;
    Ok((created, false))
}

fn resolve(store: &HypergraphStore, multiset: &GraphMultiset) -> Option<Vec<VertexId>> {
    multiset
        .graphs()
        .iter()
        .map(|graph| store.molecule_vertex(*graph))
        .collect()
}
