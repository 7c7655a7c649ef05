use dg_core::{MoleculeGraph, StructuralInvariant};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Reference molecule implementation: a labelled undirected multigraph.
///
/// Atoms carry string labels, bonds are unordered index pairs; parallel
/// bonds and self-loops are allowed. Provides the comparison contract with a
/// sorted `(label, degree)` invariant and a label/degree-filtered
/// permutation search, intended for the small graphs that molecule species
/// are. Embedders with a real chemistry backend supply their own
/// [`MoleculeGraph`] type instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleMolecule {
    labels: Vec<String>,
    bonds: Vec<(usize, usize)>,
}

impl SimpleMolecule {
    /// Creates an empty molecule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a single-atom molecule.
    pub fn single(label: impl Into<String>) -> Self {
        let mut molecule = Self::new();
        molecule.add_atom(label);
        molecule
    }

    /// Creates a linear chain bonded in label order.
    pub fn chain(labels: &[&str]) -> Self {
        let mut molecule = Self::new();
        for label in labels {
            molecule.add_atom(*label);
        }
        for idx in 1..labels.len() {
            molecule.add_bond(idx - 1, idx);
        }
        molecule
    }

    /// Adds an atom and returns its index.
    pub fn add_atom(&mut self, label: impl Into<String>) -> usize {
        self.labels.push(label.into());
        self.labels.len() - 1
    }

    /// Adds a bond between two existing atoms.
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn add_bond(&mut self, a: usize, b: usize) {
        assert!(
            a < self.labels.len() && b < self.labels.len(),
            "bond endpoint out of range"
        );
        self.bonds.push((a.min(b), a.max(b)));
    }

    /// Returns the number of atoms.
    pub fn atom_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the number of bonds.
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0usize; self.labels.len()];
        for (a, b) in &self.bonds {
            degrees[*a] += 1;
            degrees[*b] += 1;
        }
        degrees
    }
}

impl MoleculeGraph for SimpleMolecule {
    fn invariant(&self) -> StructuralInvariant {
        let degrees = self.degrees();
        let mut features: Vec<(&str, usize)> = self
            .labels
            .iter()
            .map(String::as_str)
            .zip(degrees)
            .collect();
        features.sort_unstable();
        StructuralInvariant::from_shape(self.labels.len(), self.bonds.len(), features)
    }

    fn isomorphic_to(&self, other: &Self) -> bool {
        if self.labels.len() != other.labels.len() || self.bonds.len() != other.bonds.len() {
            return false;
        }
        if self.invariant() != other.invariant() {
            return false;
        }
        let n = self.labels.len();
        if n == 0 {
            return true;
        }
        let own_degrees = self.degrees();
        let other_degrees = other.degrees();
        let mut other_bonds = other.bonds.clone();
        other_bonds.sort_unstable();
        // Exhaustive search with label/degree pruning; molecule graphs stay
        // small enough for this to be exact rather than truncated.
        for perm in (0..n).permutations(n) {
            let compatible = (0..n).all(|idx| {
                self.labels[idx] == other.labels[perm[idx]]
                    && own_degrees[idx] == other_degrees[perm[idx]]
            });
            if !compatible {
                continue;
            }
            let mut mapped: Vec<(usize, usize)> = self
                .bonds
                .iter()
                .map(|&(a, b)| {
                    let (x, y) = (perm[a], perm[b]);
                    (x.min(y), x.max(y))
                })
                .collect();
            mapped.sort_unstable();
            if mapped == other_bonds {
                return true;
            }
        }
        false
    }
}
