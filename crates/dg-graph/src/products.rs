use dg_core::GraphId;
use serde::{Deserialize, Serialize};

/// One graph that first appeared as a product of this calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Canonical handle of the produced graph.
    pub graph: GraphId,
    /// Position in discovery order, starting at 0.
    pub seq: u64,
}

/// Records newly produced, newly registered graphs in discovery order.
///
/// The owning graph appends here exactly when `add_product` registers a
/// graph for the first time, so sequence numbers follow registry-insertion
/// order regardless of interleaved non-product registry activity.
#[derive(Debug, Clone, Default)]
pub struct ProductTracker {
    records: Vec<ProductRecord>,
}

impl ProductTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a graph and returns its sequence number.
    pub fn push(&mut self, graph: GraphId) -> u64 {
        let seq = self.records.len() as u64;
        self.records.push(ProductRecord { graph, seq });
        seq
    }

    /// Returns all records in discovery order.
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// Returns the product handles in discovery order.
    pub fn graphs(&self) -> impl Iterator<Item = GraphId> + '_ {
        self.records.iter().map(|record| record.graph)
    }

    /// Returns the number of products.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether no product has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
