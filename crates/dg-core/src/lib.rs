#![deny(missing_docs)]

//! Core identifiers and contracts for the derivation-graph engine.
//!
//! A derivation graph records distinct molecule graphs and the reaction steps
//! (derivations) connecting multisets of them. This crate defines the handle
//! types shared across the engine, the comparison contract the molecule
//! backend must satisfy, and the structured error type. The engine itself
//! lives in `dg-graph`.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;

pub mod errors;

pub use errors::{DgError, ErrorInfo};

/// Canonical handle for an interned molecule graph.
///
/// Assigned by the registry on first insertion of an isomorphism class and
/// stable for the lifetime of the owning derivation graph. Handles from
/// different instances are unrelated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphId(u64);

impl GraphId {
    /// Creates a handle from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the handle.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier for a vertex of the hypergraph store.
///
/// A vertex is either a molecule wrapper or a derivation (hyperedge); the
/// store dispatches on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(u64);

impl VertexId {
    /// Creates an identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Opaque handle for an externally owned transformation rule.
///
/// The engine never inspects rules; it only records which rules justify a
/// derivation and deduplicates rule lists by id equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleId(u64);

impl RuleId {
    /// Creates a handle from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the handle.
    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Cheap structural summary used to pre-sort candidates before the
/// isomorphism oracle runs.
///
/// Two isomorphic graphs must produce equal invariants; unequal invariants
/// prove non-isomorphism. The registry buckets by this value and only
/// consults [`MoleculeGraph::isomorphic_to`] within a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StructuralInvariant {
    /// Number of vertices in the molecule graph.
    pub vertex_count: usize,
    /// Number of edges in the molecule graph.
    pub edge_count: usize,
    /// SipHash-1-3 digest of an order-independent shape encoding.
    pub shape_hash: u64,
}

impl StructuralInvariant {
    /// Builds an invariant from counts and a pre-sorted shape feature
    /// sequence.
    ///
    /// The features must already be in a canonical (sorted) order; the hash
    /// uses SipHash-1-3 with fixed zero keys so that values are stable across
    /// platforms and runs.
    pub fn from_shape<F: Hash>(
        vertex_count: usize,
        edge_count: usize,
        features: impl IntoIterator<Item = F>,
    ) -> Self {
        let mut hasher = SipHasher13::new();
        for feature in features {
            feature.hash(&mut hasher);
        }
        Self {
            vertex_count,
            edge_count,
            shape_hash: hasher.finish(),
        }
    }
}

/// Comparison contract a molecule backend must satisfy.
///
/// The engine treats molecule graphs as opaque values deduplicated by
/// isomorphism. Implementations supply a cheap invariant and an exact
/// isomorphism test; the invariant must be consistent with the test (equal
/// invariants for isomorphic graphs). An inconsistent implementation is a
/// fatal internal-consistency fault, not a recoverable condition.
pub trait MoleculeGraph {
    /// Returns the cheap structural invariant for bucketing.
    fn invariant(&self) -> StructuralInvariant;

    /// Exact isomorphism test against another molecule graph.
    fn isomorphic_to(&self, other: &Self) -> bool;
}
