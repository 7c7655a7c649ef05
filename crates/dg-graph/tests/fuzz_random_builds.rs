use std::collections::{BTreeSet, HashSet};

use dg_core::{MoleculeGraph, RuleId};
use dg_graph::{
    DerivationGraph, ExplicitDerivation, ExplicitDerivationStrategy, SimpleMolecule,
};
use proptest::prelude::*;

const SPECIES: [&str; 5] = ["M0", "M1", "M2", "M3", "M4"];

fn species(idx: u8) -> SimpleMolecule {
    SimpleMolecule::single(SPECIES[idx as usize % SPECIES.len()])
}

fn check_invariants(dg: &DerivationGraph<SimpleMolecule>) {
    // At most one derivation per endpoint multiset pair.
    let mut pairs: BTreeSet<(Vec<u64>, Vec<u64>)> = BTreeSet::new();
    for edge in dg.hyper_edges() {
        let key = (
            edge.sources.iter().map(|v| v.as_raw()).collect(),
            edge.targets.iter().map(|v| v.as_raw()).collect(),
        );
        assert!(pairs.insert(key), "duplicate endpoint multiset pair");
    }

    for edge in dg.hyper_edges() {
        // Exact lookup round-trips every created hyperedge.
        assert_eq!(dg.find_hyper_edge(edge.sources, edge.targets), Some(edge.id));

        // Rule lists stay id-distinct.
        let rules: HashSet<_> = edge.rules.iter().collect();
        assert_eq!(rules.len(), edge.rules.len());

        // Reversibility marks are symmetric and endpoint-exact.
        if let Some(partner) = edge.reverse {
            assert_eq!(dg.store().reverse_of(partner).unwrap(), Some(edge.id));
            assert_eq!(dg.store().sources(partner).unwrap(), edge.targets);
            assert_eq!(dg.store().targets(partner).unwrap(), edge.sources);
        } else {
            // Unmarked means no exact inverse exists.
            assert_eq!(dg.find_hyper_edge(edge.targets, edge.sources), None);
        }
    }

    // The registry stays isomorphism-distinct.
    for (left_id, left) in dg.registry().iter() {
        for (right_id, right) in dg.registry().iter() {
            if left_id != right_id {
                assert!(!left.isomorphic_to(right));
            }
        }
    }
}

proptest! {
    #[test]
    fn random_builds_respect_invariants(
        entries in prop::collection::vec(
            (
                prop::collection::vec(0u8..5, 1..4),
                prop::collection::vec(0u8..5, 0..4),
                prop::option::of(0u64..3),
            ),
            1..12,
        )
    ) {
        let derivations: Vec<ExplicitDerivation<SimpleMolecule>> = entries
            .into_iter()
            .map(|(educts, products, rule)| ExplicitDerivation {
                educts: educts.into_iter().map(species).collect(),
                products: products.into_iter().map(species).collect(),
                rule: rule.map(RuleId::from_raw),
            })
            .collect();

        let mut dg = DerivationGraph::new();
        let mut strategy = ExplicitDerivationStrategy::new(derivations);
        dg.calculate(&mut strategy).unwrap();

        prop_assert!(dg.registry().len() <= SPECIES.len());
        check_invariants(&dg);
    }
}
