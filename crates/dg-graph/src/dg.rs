use std::sync::atomic::{AtomicU64, Ordering};

use dg_core::{DgError, GraphId, MoleculeGraph, RuleId, VertexId};

use crate::derivation;
use crate::hypergraph::{HyperEdges, HypergraphStore};
use crate::multiset::{GraphMultiset, MultisetKey, MultisetTable};
use crate::products::{ProductRecord, ProductTracker};
use crate::registry::GraphRegistry;
use crate::reversible;

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(0);

/// Injected construction behavior, invoked exactly once.
///
/// During [`run`](ExpansionStrategy::run) the strategy is the sole caller of
/// the mutation surface and may read the in-progress hypergraph to avoid
/// redundant work. Strategies that expand towards a fixpoint must bound
/// themselves; rule sets are not guaranteed to terminate. For one-off
/// construction closures see [`DerivationGraph::calculate_with`].
pub trait ExpansionStrategy<G: MoleculeGraph> {
    /// Drives construction through the view's mutation surface.
    fn run(&mut self, view: &mut CalculationView<'_, G>) -> Result<(), DgError>;
}

/// Incrementally built graph of derivations over interned molecule graphs.
///
/// Construction is single-shot: [`calculate`](DerivationGraph::calculate)
/// hands an [`ExpansionStrategy`] the only mutation surface, then runs the
/// reversible-pair pass and closes the structure. Everything else is
/// read-only queries. Handles returned from queries are only meaningful
/// against the instance that produced them.
#[derive(Debug)]
pub struct DerivationGraph<G: MoleculeGraph> {
    id: u64,
    registry: GraphRegistry<G>,
    multisets: MultisetTable,
    store: HypergraphStore,
    products: ProductTracker,
    has_calculated: bool,
}

impl<G: MoleculeGraph> Default for DerivationGraph<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: MoleculeGraph> DerivationGraph<G> {
    /// Creates an empty, not-yet-calculated derivation graph.
    pub fn new() -> Self {
        Self {
            id: NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed),
            registry: GraphRegistry::new(),
            multisets: MultisetTable::new(),
            store: HypergraphStore::new(),
            products: ProductTracker::new(),
            has_calculated: false,
        }
    }

    /// Returns the process-wide instance identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns whether `calculate` has run.
    pub fn has_calculated(&self) -> bool {
        self.has_calculated
    }

    /// Runs the one-and-only construction pass.
    ///
    /// The strategy mutates through the provided [`CalculationView`]; when it
    /// returns, reversible derivation pairs are marked and the structure
    /// becomes read-only. A failing strategy still consumes the lifecycle:
    /// the single-pass contract admits no second attempt.
    ///
    /// # Panics
    ///
    /// Panics when invoked a second time; that is a programming-contract
    /// violation, not a recoverable error.
    pub fn calculate<S: ExpansionStrategy<G>>(&mut self, strategy: &mut S) -> Result<(), DgError> {
        self.calculate_with(|view| strategy.run(view))
    }

    /// Closure form of [`calculate`](DerivationGraph::calculate); same
    /// single-shot contract.
    pub fn calculate_with<F>(&mut self, run: F) -> Result<(), DgError>
    where
        F: FnOnce(&mut CalculationView<'_, G>) -> Result<(), DgError>,
    {
        assert!(
            !self.has_calculated,
            "calculate() invoked twice on derivation graph {}",
            self.id
        );
        self.has_calculated = true;
        let mut view = CalculationView { dg: self };
        run(&mut view)?;
        reversible::find_reversible_pairs(&mut self.store)?;
        Ok(())
    }

    /// Returns the molecule registry.
    pub fn registry(&self) -> &GraphRegistry<G> {
        &self.registry
    }

    /// Returns the hypergraph store.
    pub fn store(&self) -> &HypergraphStore {
        &self.store
    }

    /// Returns the interned multiset table.
    pub fn multisets(&self) -> &MultisetTable {
        &self.multisets
    }

    /// Returns `(handle, graph)` pairs for every registered molecule.
    pub fn graphs(&self) -> impl Iterator<Item = (GraphId, &G)> {
        self.registry.iter()
    }

    /// Returns the product records in discovery order.
    pub fn products(&self) -> &[ProductRecord] {
        self.products.records()
    }

    /// Restartable iterator over all derivation hyperedges.
    pub fn hyper_edges(&self) -> HyperEdges<'_> {
        self.store.hyper_edges()
    }

    /// Exact hyperedge lookup by endpoint vertex sets; a miss is `None`.
    pub fn find_hyper_edge(&self, sources: &[VertexId], targets: &[VertexId]) -> Option<VertexId> {
        self.store.find_hyper_edge(sources, targets)
    }

    /// Locates an existing derivation by endpoint multisets. Read-only.
    pub fn is_derivation(
        &self,
        sources: &GraphMultiset,
        targets: &GraphMultiset,
    ) -> Option<VertexId> {
        derivation::is_derivation(&self.store, sources, targets)
    }
}

/// Mutation surface handed to the strategy during `calculate`.
///
/// Wraps the derivation graph for the duration of the construction pass;
/// this is the only way to mutate the structure.
#[derive(Debug)]
pub struct CalculationView<'a, G: MoleculeGraph> {
    dg: &'a mut DerivationGraph<G>,
}

impl<'a, G: MoleculeGraph> CalculationView<'a, G> {
    /// Interns a molecule graph; returns its canonical handle and whether it
    /// was new.
    pub fn add_graph(&mut self, candidate: G) -> (GraphId, bool) {
        self.dg.registry.insert(candidate)
    }

    /// Previews interning without mutating: `Some(handle)` of the existing
    /// isomorphic entry, or `None` when the candidate would be new.
    pub fn check_if_new(&self, candidate: &G) -> Option<GraphId> {
        self.dg.registry.probe(candidate)
    }

    /// Interns a molecule graph and ensures its molecule-vertex exists.
    pub fn add_graph_as_vertex(&mut self, candidate: G) -> (GraphId, bool) {
        let (id, is_new) = self.dg.registry.insert(candidate);
        self.dg.store.add_molecule(id);
        (id, is_new)
    }

    /// Interns a molecule graph and, when newly registered, grants it
    /// product status. Returns the handle and whether product status was
    /// granted.
    pub fn add_product(&mut self, candidate: G) -> (GraphId, bool) {
        let (id, is_new) = self.dg.registry.insert(candidate);
        if is_new {
            self.dg.products.push(id);
        }
        (id, is_new)
    }

    /// Locates an existing derivation by endpoint multisets. Read-only.
    pub fn is_derivation(
        &self,
        sources: &GraphMultiset,
        targets: &GraphMultiset,
    ) -> Option<VertexId> {
        derivation::is_derivation(&self.dg.store, sources, targets)
    }

    /// Finds or creates the derivation for `(sources, targets)`, merging the
    /// rule into an existing hyperedge on rediscovery.
    ///
    /// Every constituent must already be registered through this view; the
    /// call creates missing molecule-vertices but never registers graphs.
    pub fn suggest_derivation(
        &mut self,
        sources: &GraphMultiset,
        targets: &GraphMultiset,
        rule: Option<RuleId>,
    ) -> Result<(VertexId, bool), DgError> {
        self.dg.multisets.intern(sources, &mut self.dg.store);
        self.dg.multisets.intern(targets, &mut self.dg.store);
        derivation::suggest_derivation(&mut self.dg.store, sources, targets, rule)
    }

    /// Returns the stable key of an already interned multiset.
    pub fn multiset_key(&self, multiset: &GraphMultiset) -> Option<MultisetKey> {
        self.dg.multisets.key(multiset)
    }

    /// Read access to the in-progress hypergraph.
    pub fn store(&self) -> &HypergraphStore {
        &self.dg.store
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &GraphRegistry<G> {
        &self.dg.registry
    }

    /// Read access to the products recorded so far.
    pub fn products(&self) -> &[ProductRecord] {
        self.dg.products.records()
    }
}
