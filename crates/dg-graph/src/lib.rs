#![deny(missing_docs)]

//! Derivation-graph engine.
//!
//! Builds a hypergraph of reaction steps over isomorphism-deduplicated
//! molecule graphs. Molecules are interned once per isomorphism class,
//! derivations (n-ary educt multiset to m-ary product multiset) are encoded
//! as dedicated vertices with incidence edges, rediscoveries merge into the
//! existing hyperedge's rule list, and a post-construction pass marks
//! mutually inverse derivation pairs. Construction is single-shot: an
//! injected [`ExpansionStrategy`] drives all mutation inside one
//! [`DerivationGraph::calculate`] call, after which the structure is
//! read-only.

mod derivation;
mod dg;
mod diff;
mod explicit;
mod hash;
mod hypergraph;
mod molecule;
mod multiset;
mod products;
mod registry;
mod reversible;

pub use derivation::{is_derivation, suggest_derivation};
pub use dg::{CalculationView, DerivationGraph, ExpansionStrategy};
pub use diff::{diff, DgDiff};
pub use explicit::{ExplicitDerivation, ExplicitDerivationStrategy};
pub use hash::canonical_hash;
pub use hypergraph::{HyperEdgeView, HyperEdges, HypergraphStore, VertexKind};
pub use molecule::SimpleMolecule;
pub use multiset::{GraphMultiset, MultisetKey, MultisetTable};
pub use products::{ProductRecord, ProductTracker};
pub use registry::GraphRegistry;
pub use reversible::find_reversible_pairs;
