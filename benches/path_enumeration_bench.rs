use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use procmap::analysis::{AnalysisLimits, AnalysisOptions, Analyzer};
use procmap::testkit::{layered_diamonds, linear_chain};
use std::hint::black_box;

fn bench_layered_diamonds(c: &mut Criterion) {
    let mut group = c.benchmark_group("layered_diamonds");

    for layers in [4, 8, 12] {
        let process = layered_diamonds(layers);
        let options = AnalysisOptions::default().with_limits(AnalysisLimits::unbounded());

        group.bench_with_input(BenchmarkId::new("sequential", layers), &process, |b, p| {
            b.iter(|| Analyzer::with_options(black_box(p), options.clone()).analyze())
        });
        group.bench_with_input(BenchmarkId::new("parallel", layers), &process, |b, p| {
            b.iter(|| {
                Analyzer::with_options(black_box(p), options.clone().parallel(true)).analyze()
            })
        });
    }

    group.finish();
}

fn bench_long_chain(c: &mut Criterion) {
    let process = linear_chain(5_000);

    c.bench_function("linear_chain_5000", |b| {
        b.iter(|| Analyzer::new(black_box(&process)).analyze())
    });
}

criterion_group!(benches, bench_layered_diamonds, bench_long_chain);
criterion_main!(benches);
