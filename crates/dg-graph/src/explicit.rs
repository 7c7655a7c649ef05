use dg_core::{DgError, MoleculeGraph, RuleId};

use crate::dg::{CalculationView, ExpansionStrategy};
use crate::multiset::GraphMultiset;

/// One externally supplied reaction step, in molecule form.
#[derive(Debug, Clone)]
pub struct ExplicitDerivation<G> {
    /// Educt molecules, multiplicity by repetition.
    pub educts: Vec<G>,
    /// Product molecules, multiplicity by repetition.
    pub products: Vec<G>,
    /// Optional rule justifying the step.
    pub rule: Option<RuleId>,
}

/// Strategy feeding a fixed derivation list through the mutation surface.
///
/// Educts are registered as molecule-vertices, products additionally gain
/// product status when newly registered, then the derivation is suggested.
/// Finite by construction, so no termination bound is needed.
#[derive(Debug, Clone, Default)]
pub struct ExplicitDerivationStrategy<G> {
    entries: Vec<ExplicitDerivation<G>>,
}

impl<G> ExplicitDerivationStrategy<G> {
    /// Creates a strategy over the given derivation list.
    pub fn new(entries: Vec<ExplicitDerivation<G>>) -> Self {
        Self { entries }
    }
}

impl<G: MoleculeGraph> ExpansionStrategy<G> for ExplicitDerivationStrategy<G> {
    fn run(&mut self, view: &mut CalculationView<'_, G>) -> Result<(), DgError> {
        for entry in std::mem::take(&mut self.entries) {
            let educts: GraphMultiset = entry
                .educts
                .into_iter()
                .map(|molecule| view.add_graph_as_vertex(molecule).0)
                .collect();
            let products: GraphMultiset = entry
                .products
                .into_iter()
                .map(|molecule| view.add_product(molecule).0)
                .collect();
            view.suggest_derivation(&educts, &products, entry.rule)?;
        }
        Ok(())
    }
}
