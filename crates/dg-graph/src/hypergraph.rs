use std::collections::HashMap;

use dg_core::{DgError, ErrorInfo, GraphId, RuleId, VertexId};
use serde::{Deserialize, Serialize};

/// Discriminates the two fixed vertex shapes of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexKind {
    /// Wrapper around one canonical molecule graph.
    Molecule,
    /// A derivation hyperedge encoded as a vertex.
    Derivation,
}

#[derive(Debug, Clone)]
struct MoleculeRecord {
    graph: GraphId,
    /// Derivations with this molecule among their educts, one entry per
    /// multiplicity occurrence.
    consumed_by: Vec<VertexId>,
    /// Derivations with this molecule among their products.
    produced_by: Vec<VertexId>,
}

#[derive(Debug, Clone)]
struct DerivationRecord {
    /// Educt molecule-vertices, sorted, one entry per multiplicity.
    sources: Vec<VertexId>,
    /// Product molecule-vertices, sorted, one entry per multiplicity.
    targets: Vec<VertexId>,
    /// Rules justifying this derivation, in discovery order, id-distinct.
    rules: Vec<RuleId>,
    /// Exact inverse derivation, set by the reversible-pair pass.
    reverse: Option<VertexId>,
}

#[derive(Debug, Clone)]
enum VertexRecord {
    Molecule(MoleculeRecord),
    Derivation(DerivationRecord),
}

/// Borrowed view of one derivation hyperedge.
#[derive(Debug, Clone, Copy)]
pub struct HyperEdgeView<'a> {
    /// Vertex identifier of the derivation.
    pub id: VertexId,
    /// Educt molecule-vertices (sorted, multiplicity preserved).
    pub sources: &'a [VertexId],
    /// Product molecule-vertices (sorted, multiplicity preserved).
    pub targets: &'a [VertexId],
    /// Justifying rules in discovery order.
    pub rules: &'a [RuleId],
    /// Exact inverse derivation, if one was found.
    pub reverse: Option<VertexId>,
}

/// Vertex/edge store encoding the derivation hypergraph.
///
/// Molecule-vertices and derivation-vertices live in one arena; hyperedges
/// are derivation-vertices whose incidence lists reference molecule-vertices.
/// Vertices are never removed: the derivation graph only grows during its
/// single construction pass.
#[derive(Debug, Clone, Default)]
pub struct HypergraphStore {
    vertices: Vec<VertexRecord>,
    molecule_index: HashMap<GraphId, VertexId>,
}

impl HypergraphStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of molecule-vertices.
    pub fn molecule_count(&self) -> usize {
        self.molecule_index.len()
    }

    /// Returns the number of derivation-vertices.
    pub fn derivation_count(&self) -> usize {
        self.vertices
            .iter()
            .filter(|record| matches!(record, VertexRecord::Derivation(_)))
            .count()
    }

    /// Returns the kind tag of the given vertex.
    pub fn kind(&self, vertex: VertexId) -> Result<VertexKind, DgError> {
        match self.record(vertex)? {
            VertexRecord::Molecule(_) => Ok(VertexKind::Molecule),
            VertexRecord::Derivation(_) => Ok(VertexKind::Derivation),
        }
    }

    /// Adds the molecule-vertex for the given graph, or returns the existing
    /// one. Idempotent per graph handle.
    pub fn add_molecule(&mut self, graph: GraphId) -> VertexId {
        if let Some(vertex) = self.molecule_index.get(&graph) {
            return *vertex;
        }
        let id = VertexId::from_raw(self.vertices.len() as u64);
        self.vertices.push(VertexRecord::Molecule(MoleculeRecord {
            graph,
            consumed_by: Vec::new(),
            produced_by: Vec::new(),
        }));
        self.molecule_index.insert(graph, id);
        id
    }

    /// Returns the molecule-vertex wrapping the given graph, if any.
    pub fn molecule_vertex(&self, graph: GraphId) -> Option<VertexId> {
        self.molecule_index.get(&graph).copied()
    }

    /// Returns the graph wrapped by a molecule-vertex.
    pub fn molecule_graph(&self, vertex: VertexId) -> Result<GraphId, DgError> {
        Ok(self.molecule(vertex)?.graph)
    }

    /// Returns the derivations consuming the given molecule-vertex, one
    /// entry per multiplicity occurrence.
    pub fn consumers(&self, vertex: VertexId) -> Result<&[VertexId], DgError> {
        Ok(&self.molecule(vertex)?.consumed_by)
    }

    /// Returns the derivations producing the given molecule-vertex.
    pub fn producers(&self, vertex: VertexId) -> Result<&[VertexId], DgError> {
        Ok(&self.molecule(vertex)?.produced_by)
    }

    /// Returns the educt molecule-vertices of a derivation.
    pub fn sources(&self, vertex: VertexId) -> Result<&[VertexId], DgError> {
        Ok(&self.derivation(vertex)?.sources)
    }

    /// Returns the product molecule-vertices of a derivation.
    pub fn targets(&self, vertex: VertexId) -> Result<&[VertexId], DgError> {
        Ok(&self.derivation(vertex)?.targets)
    }

    /// Returns the rule list of a derivation in discovery order.
    pub fn rules(&self, vertex: VertexId) -> Result<&[RuleId], DgError> {
        Ok(&self.derivation(vertex)?.rules)
    }

    /// Returns the exact inverse of a derivation, if one has been marked.
    pub fn reverse_of(&self, vertex: VertexId) -> Result<Option<VertexId>, DgError> {
        Ok(self.derivation(vertex)?.reverse)
    }

    /// Creates a derivation-vertex and wires one incidence entry per educt
    /// and product occurrence.
    ///
    /// All endpoints must be molecule-vertices. At least one side must be
    /// non-empty, and no derivation with the same endpoint multisets may
    /// already exist; uniqueness is normally guaranteed by going through
    /// [`suggest_derivation`](crate::suggest_derivation).
    pub fn add_derivation(
        &mut self,
        sources: &[VertexId],
        targets: &[VertexId],
        rule: Option<RuleId>,
    ) -> Result<VertexId, DgError> {
        if sources.is_empty() && targets.is_empty() {
            return Err(store_error(
                "empty-derivation",
                "a derivation requires at least one educt or product",
            ));
        }
        for vertex in sources.iter().chain(targets.iter()) {
            self.molecule(*vertex)?;
        }
        let mut sources = sources.to_vec();
        sources.sort_unstable();
        let mut targets = targets.to_vec();
        targets.sort_unstable();
        if self.find_hyper_edge(&sources, &targets).is_some() {
            return Err(store_error(
                "duplicate-derivation",
                "a derivation with these endpoint multisets already exists",
            )
            .with_context("educts", sources.len().to_string())
            .with_context("products", targets.len().to_string()));
        }
        let id = VertexId::from_raw(self.vertices.len() as u64);
        for vertex in &sources {
            self.molecule_mut(*vertex)?.consumed_by.push(id);
        }
        for vertex in &targets {
            self.molecule_mut(*vertex)?.produced_by.push(id);
        }
        self.vertices.push(VertexRecord::Derivation(DerivationRecord {
            sources,
            targets,
            rules: rule.into_iter().collect(),
            reverse: None,
        }));
        Ok(id)
    }

    /// Appends a rule to a derivation's rule list unless already present.
    pub fn append_rule(&mut self, vertex: VertexId, rule: RuleId) -> Result<(), DgError> {
        let record = self.derivation_mut(vertex)?;
        if !record.rules.contains(&rule) {
            record.rules.push(rule);
        }
        Ok(())
    }

    /// Marks two derivations as a mutually inverse pair.
    ///
    /// Symmetric and idempotent; a derivation whose educts equal its products
    /// may be marked as its own inverse. Remarking with a different partner
    /// is rejected, since reversibility is derived exactly once.
    pub fn mark_reverse(&mut self, first: VertexId, second: VertexId) -> Result<(), DgError> {
        for (vertex, partner) in [(first, second), (second, first)] {
            let record = self.derivation_mut(vertex)?;
            match record.reverse {
                None => record.reverse = Some(partner),
                Some(existing) if existing == partner => {}
                Some(existing) => {
                    return Err(store_error(
                        "reverse-conflict",
                        "derivation already marked with a different inverse",
                    )
                    .with_context("derivation", vertex.as_raw().to_string())
                    .with_context("marked", existing.as_raw().to_string())
                    .with_context("attempted", partner.as_raw().to_string()));
                }
            }
        }
        Ok(())
    }

    /// Exact, order-insensitive hyperedge lookup.
    ///
    /// Scans only the derivations incident to one participating endpoint
    /// rather than the whole store. A miss is a normal outcome.
    pub fn find_hyper_edge(&self, sources: &[VertexId], targets: &[VertexId]) -> Option<VertexId> {
        let mut sources = sources.to_vec();
        sources.sort_unstable();
        let mut targets = targets.to_vec();
        targets.sort_unstable();
        let candidates = if let Some(anchor) = sources.first() {
            &self.molecule_opt(*anchor)?.consumed_by
        } else {
            &self.molecule_opt(*targets.first()?)?.produced_by
        };
        for candidate in candidates {
            if let Ok(record) = self.derivation(*candidate) {
                if record.sources == sources && record.targets == targets {
                    return Some(*candidate);
                }
            }
        }
        None
    }

    /// Returns a restartable iterator over all derivation hyperedges.
    ///
    /// Iteration is read-only and recomputed from the backing arena on each
    /// call; it never consumes or mutates storage.
    pub fn hyper_edges(&self) -> HyperEdges<'_> {
        HyperEdges {
            store: self,
            next: 0,
        }
    }

    fn record(&self, vertex: VertexId) -> Result<&VertexRecord, DgError> {
        self.vertices.get(vertex.as_raw() as usize).ok_or_else(|| {
            store_error("unknown-vertex", "vertex does not exist")
                .with_context("vertex", vertex.as_raw().to_string())
        })
    }

    fn molecule(&self, vertex: VertexId) -> Result<&MoleculeRecord, DgError> {
        match self.record(vertex)? {
            VertexRecord::Molecule(record) => Ok(record),
            VertexRecord::Derivation(_) => Err(store_error(
                "not-a-molecule",
                "vertex is a derivation, not a molecule",
            )
            .with_context("vertex", vertex.as_raw().to_string())),
        }
    }

    fn molecule_opt(&self, vertex: VertexId) -> Option<&MoleculeRecord> {
        match self.vertices.get(vertex.as_raw() as usize)? {
            VertexRecord::Molecule(record) => Some(record),
            VertexRecord::Derivation(_) => None,
        }
    }

    fn molecule_mut(&mut self, vertex: VertexId) -> Result<&mut MoleculeRecord, DgError> {
        match self.record_mut(vertex)? {
            VertexRecord::Molecule(record) => Ok(record),
            VertexRecord::Derivation(_) => Err(store_error(
                "not-a-molecule",
                "vertex is a derivation, not a molecule",
            )
            .with_context("vertex", vertex.as_raw().to_string())),
        }
    }

    fn derivation(&self, vertex: VertexId) -> Result<&DerivationRecord, DgError> {
        match self.record(vertex)? {
            VertexRecord::Derivation(record) => Ok(record),
            VertexRecord::Molecule(_) => Err(store_error(
                "not-a-derivation",
                "vertex is a molecule, not a derivation",
            )
            .with_context("vertex", vertex.as_raw().to_string())),
        }
    }

    fn derivation_mut(&mut self, vertex: VertexId) -> Result<&mut DerivationRecord, DgError> {
        match self.record_mut(vertex)? {
            VertexRecord::Derivation(record) => Ok(record),
            VertexRecord::Molecule(_) => Err(store_error(
                "not-a-derivation",
                "vertex is a molecule, not a derivation",
            )
            .with_context("vertex", vertex.as_raw().to_string())),
        }
    }

    fn record_mut(&mut self, vertex: VertexId) -> Result<&mut VertexRecord, DgError> {
        self.vertices
            .get_mut(vertex.as_raw() as usize)
            .ok_or_else(|| {
                store_error("unknown-vertex", "vertex does not exist")
                    .with_context("vertex", vertex.as_raw().to_string())
            })
    }
}

/// Restartable iterator over derivation hyperedges, in creation order.
#[derive(Debug, Clone)]
pub struct HyperEdges<'a> {
    store: &'a HypergraphStore,
    next: usize,
}

impl<'a> Iterator for HyperEdges<'a> {
    type Item = HyperEdgeView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.store.vertices.len() {
            let idx = self.next;
            self.next += 1;
            if let VertexRecord::Derivation(record) = &self.store.vertices[idx] {
                return Some(HyperEdgeView {
                    id: VertexId::from_raw(idx as u64),
                    sources: &record.sources,
                    targets: &record.targets,
                    rules: &record.rules,
                    reverse: record.reverse,
                });
            }
        }
        None
    }
}

fn store_error(code: impl Into<String>, message: impl Into<String>) -> DgError {
    DgError::Hypergraph(ErrorInfo::new(code, message))
}

trait ContextExt {
    fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> DgError;
}

impl ContextExt for DgError {
    fn with_context(self, key: impl Into<String>, value: impl Into<String>) -> DgError {
        match self {
            DgError::Hypergraph(info) => DgError::Hypergraph(info.with_context(key, value)),
            other => other,
        }
    }
}
