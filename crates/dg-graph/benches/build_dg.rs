use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dg_core::RuleId;
use dg_graph::{DerivationGraph, ExplicitDerivation, ExplicitDerivationStrategy, SimpleMolecule};

fn chain_entries(len: usize) -> Vec<ExplicitDerivation<SimpleMolecule>> {
    (0..len)
        .map(|idx| ExplicitDerivation {
            educts: vec![SimpleMolecule::single(format!("M{idx}"))],
            products: vec![SimpleMolecule::single(format!("M{}", idx + 1))],
            rule: Some(RuleId::from_raw((idx % 7) as u64)),
        })
        .collect()
}

fn build_dg_bench(c: &mut Criterion) {
    c.bench_function("build_dg_chain_500", |b| {
        b.iter(|| {
            let mut dg = DerivationGraph::new();
            let mut strategy = ExplicitDerivationStrategy::new(chain_entries(500));
            dg.calculate(&mut strategy).unwrap();
            black_box(dg);
        });
    });
}

criterion_group!(benches, build_dg_bench);
criterion_main!(benches);
