use dg_core::RuleId;
use dg_graph::{
    canonical_hash, diff, DerivationGraph, ExplicitDerivation, ExplicitDerivationStrategy,
    SimpleMolecule,
};

fn built(entries: Vec<ExplicitDerivation<SimpleMolecule>>) -> DerivationGraph<SimpleMolecule> {
    let mut dg = DerivationGraph::new();
    let mut strategy = ExplicitDerivationStrategy::new(entries);
    dg.calculate(&mut strategy).unwrap();
    dg
}

fn a_to_bc() -> ExplicitDerivation<SimpleMolecule> {
    ExplicitDerivation {
        educts: vec![SimpleMolecule::single("A")],
        products: vec![SimpleMolecule::single("B"), SimpleMolecule::single("C")],
        rule: Some(RuleId::from_raw(1)),
    }
}

#[test]
fn identical_builds_diff_empty() {
    let first = built(vec![a_to_bc()]);
    let second = built(vec![a_to_bc()]);
    let report = diff(&first, &second);
    assert!(report.is_empty());
}

#[test]
fn extra_molecule_is_reported_on_one_side() {
    let first = built(vec![a_to_bc()]);
    let mut entries = vec![a_to_bc()];
    entries.push(ExplicitDerivation {
        educts: vec![SimpleMolecule::single("B")],
        products: vec![SimpleMolecule::single("D")],
        rule: None,
    });
    let second = built(entries);

    let report = diff(&first, &second);
    assert!(report.molecules_only_in_first.is_empty());
    assert_eq!(report.molecules_only_in_second.len(), 1);
    assert!(report.derivations_only_in_first.is_empty());
    assert_eq!(report.derivations_only_in_second.len(), 1);
}

#[test]
fn diff_is_symmetric_in_content() {
    let first = built(vec![a_to_bc()]);
    let second = built(vec![ExplicitDerivation {
        educts: vec![SimpleMolecule::single("X")],
        products: vec![SimpleMolecule::single("Y")],
        rule: None,
    }]);

    let forward = diff(&first, &second);
    let backward = diff(&second, &first);
    assert_eq!(
        forward.molecules_only_in_first.len(),
        backward.molecules_only_in_second.len()
    );
    assert_eq!(
        forward.derivations_only_in_first.len(),
        backward.derivations_only_in_second.len()
    );
}

#[test]
fn diff_report_serializes() {
    let first = built(vec![a_to_bc()]);
    let second = built(Vec::new());
    let report = diff(&first, &second);
    let json = serde_json::to_string(&report).unwrap();
    let restored: dg_graph::DgDiff = serde_json::from_str(&json).unwrap();
    assert_eq!(report, restored);
}

#[test]
fn rebuilding_the_same_sequence_hashes_identically() {
    let first = built(vec![a_to_bc()]);
    let second = built(vec![a_to_bc()]);
    assert_eq!(
        canonical_hash(&first).unwrap(),
        canonical_hash(&second).unwrap()
    );
}

#[test]
fn divergent_builds_hash_differently() {
    let first = built(vec![a_to_bc()]);
    let mut other = a_to_bc();
    other.rule = Some(RuleId::from_raw(9));
    let second = built(vec![other]);
    assert_ne!(
        canonical_hash(&first).unwrap(),
        canonical_hash(&second).unwrap()
    );
}
