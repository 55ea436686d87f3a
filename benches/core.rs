use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use permcore::chain::StabilizerChain;
use permcore::closure::closure_from_generators;
use permcore::factories;
use permcore::store::PermStore;

const RANGE_OF_VALUES: [usize; 5] = [8, 10, 16, 20, 32];

fn stabchain_cyclic(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain__cyclic");
    for i in RANGE_OF_VALUES.iter() {
        group.bench_with_input(BenchmarkId::new("compute", i), i, |b, &i| {
            b.iter_batched(
                || {
                    let mut store = PermStore::new();
                    let gens = factories::cyclic(i, &mut store);
                    (gens, store)
                },
                |(gens, mut store)| StabilizerChain::compute(&gens, &mut store),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn stabchain_symmetric(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain__symmetric");
    for i in RANGE_OF_VALUES.iter() {
        group.bench_with_input(BenchmarkId::new("compute", i), i, |b, &i| {
            b.iter_batched(
                || {
                    let mut store = PermStore::new();
                    let gens = factories::symmetric(i, &mut store);
                    (gens, store)
                },
                |(gens, mut store)| StabilizerChain::compute(&gens, &mut store),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn closure_symmetric(c: &mut Criterion) {
    let mut group = c.benchmark_group("closure__symmetric");
    for i in [4usize, 5, 6, 7].iter() {
        group.bench_with_input(
            BenchmarkId::new("closure_from_generators", i),
            i,
            |b, &i| {
                b.iter_batched(
                    || {
                        let mut store = PermStore::new();
                        let gens = factories::symmetric(i, &mut store);
                        (gens, store)
                    },
                    |(gens, mut store)| closure_from_generators(&gens, &mut store),
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    stabchain_cyclic,
    stabchain_symmetric,
    closure_symmetric
);
criterion_main!(benches);
