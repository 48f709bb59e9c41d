use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pairs_core::{DealStrategy, PairGenerator, RandomPairGenerator, Symbol};

fn bench_deal(c: &mut Criterion) {
    let mut group = c.benchmark_group("deal");
    for &(rows, cols) in &[(4u8, 4u8), (8, 8), (16, 16)] {
        let pairs = (rows as usize * cols as usize) / 2;
        let palette: Vec<Symbol> = (0..pairs as u8).map(Symbol).collect();
        for strategy in [DealStrategy::Rejection, DealStrategy::Shuffle] {
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), format!("{rows}x{cols}")),
                &(rows, cols),
                |b, &size| {
                    b.iter(|| {
                        RandomPairGenerator::new(0xC0FFEE, strategy)
                            .generate(size, &palette)
                            .unwrap()
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_deal);
criterion_main!(benches);
