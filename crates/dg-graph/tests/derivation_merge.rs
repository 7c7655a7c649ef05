use dg_core::{DgError, RuleId};
use dg_graph::{CalculationView, DerivationGraph, GraphMultiset, SimpleMolecule};

#[test]
fn rediscovery_merges_rules_instead_of_duplicating() {
    let mut dg = DerivationGraph::new();
    let r1 = RuleId::from_raw(1);
    let r2 = RuleId::from_raw(2);
    let mut strategy = |view: &mut CalculationView<SimpleMolecule>| -> Result<(), DgError> {
        let (a, _) = view.add_graph_as_vertex(SimpleMolecule::single("A"));
        let (b, _) = view.add_graph_as_vertex(SimpleMolecule::single("B"));
        let educts = GraphMultiset::singleton(a);
        let products = GraphMultiset::singleton(b);

        let (first, existed) = view.suggest_derivation(&educts, &products, Some(r1))?;
        assert!(!existed);
        let (second, existed) = view.suggest_derivation(&educts, &products, Some(r2))?;
        assert!(existed);
        assert_eq!(first, second);
        // Re-suggesting a known rule must not duplicate it.
        let (third, existed) = view.suggest_derivation(&educts, &products, Some(r1))?;
        assert!(existed);
        assert_eq!(first, third);
        Ok(())
    };
    dg.calculate_with(&mut strategy).unwrap();

    let edges: Vec<_> = dg.hyper_edges().collect();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].rules, &[r1, r2]);
}

#[test]
fn null_rule_creates_empty_rule_list() {
    let mut dg = DerivationGraph::new();
    let mut strategy = |view: &mut CalculationView<SimpleMolecule>| -> Result<(), DgError> {
        let (a, _) = view.add_graph_as_vertex(SimpleMolecule::single("A"));
        let (b, _) = view.add_graph_as_vertex(SimpleMolecule::single("B"));
        view.suggest_derivation(
            &GraphMultiset::singleton(a),
            &GraphMultiset::singleton(b),
            None,
        )?;
        Ok(())
    };
    dg.calculate_with(&mut strategy).unwrap();

    let edges: Vec<_> = dg.hyper_edges().collect();
    assert_eq!(edges.len(), 1);
    assert!(edges[0].rules.is_empty());
}

#[test]
fn multiplicity_distinguishes_endpoint_multisets() {
    let mut dg = DerivationGraph::new();
    let mut strategy = |view: &mut CalculationView<SimpleMolecule>| -> Result<(), DgError> {
        let (a, _) = view.add_graph_as_vertex(SimpleMolecule::single("A"));
        let (b, _) = view.add_graph_as_vertex(SimpleMolecule::single("B"));
        let (single, _) = view.suggest_derivation(
            &GraphMultiset::singleton(a),
            &GraphMultiset::singleton(b),
            None,
        )?;
        // 2 A -> B is a different net transformation than A -> B.
        let (double, existed) = view.suggest_derivation(
            &GraphMultiset::new(vec![a, a]),
            &GraphMultiset::singleton(b),
            None,
        )?;
        assert!(!existed);
        assert_ne!(single, double);
        Ok(())
    };
    dg.calculate_with(&mut strategy).unwrap();
    assert_eq!(dg.store().derivation_count(), 2);
}

#[test]
fn hyperedge_round_trip_and_miss() {
    let mut dg = DerivationGraph::new();
    let mut strategy = |view: &mut CalculationView<SimpleMolecule>| -> Result<(), DgError> {
        let (a, _) = view.add_graph_as_vertex(SimpleMolecule::single("A"));
        let (b, _) = view.add_graph_as_vertex(SimpleMolecule::single("B"));
        let (c, _) = view.add_graph_as_vertex(SimpleMolecule::single("C"));
        view.suggest_derivation(
            &GraphMultiset::singleton(a),
            &GraphMultiset::new(vec![b, c]),
            None,
        )?;
        Ok(())
    };
    dg.calculate_with(&mut strategy).unwrap();

    for edge in dg.hyper_edges() {
        // Order-insensitive exact lookup returns the edge itself.
        let mut sources = edge.sources.to_vec();
        sources.reverse();
        let mut targets = edge.targets.to_vec();
        targets.reverse();
        assert_eq!(dg.find_hyper_edge(&sources, &targets), Some(edge.id));
    }

    // A pair never suggested is a normal not-found outcome.
    let edge = dg.hyper_edges().next().unwrap();
    assert_eq!(dg.find_hyper_edge(edge.targets, edge.sources), None);
}

#[test]
fn is_derivation_previews_without_creating() {
    let mut dg = DerivationGraph::new();
    let mut strategy = |view: &mut CalculationView<SimpleMolecule>| -> Result<(), DgError> {
        let (a, _) = view.add_graph_as_vertex(SimpleMolecule::single("A"));
        let (b, _) = view.add_graph_as_vertex(SimpleMolecule::single("B"));
        let educts = GraphMultiset::singleton(a);
        let products = GraphMultiset::singleton(b);
        assert_eq!(view.is_derivation(&educts, &products), None);
        let (vertex, _) = view.suggest_derivation(&educts, &products, None)?;
        assert_eq!(view.is_derivation(&educts, &products), Some(vertex));
        Ok(())
    };
    dg.calculate_with(&mut strategy).unwrap();
    assert_eq!(dg.store().derivation_count(), 1);
}

#[test]
fn empty_endpoint_pair_is_rejected() {
    let mut dg = DerivationGraph::new();
    let mut strategy = |view: &mut CalculationView<SimpleMolecule>| -> Result<(), DgError> {
        let empty = GraphMultiset::new(Vec::new());
        let err = view
            .suggest_derivation(&empty, &empty, None)
            .unwrap_err();
        assert_eq!(err.info().code, "empty-derivation");
        Ok(())
    };
    dg.calculate_with(&mut strategy).unwrap();
}
