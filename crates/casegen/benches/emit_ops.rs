//! Emission Benchmarks
//!
//! Benchmarks for step classification, per-format emission, and scaffolding.
//!
//! Run with: `cargo bench --bench emit_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use casegen::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn suite(n: usize) -> Vec<TestCase> {
    (0..n)
        .map(|i| {
            TestCase::new(format!("Checkout flow {i}"))
                .with_step(Step::new(1, "Navigate to /cart"))
                .with_step(Step::new(2, "Enter \"4242 4242\" into the Card number field"))
                .with_step(Step::new(3, "Click the \"Pay now\" button"))
                .with_step(Step::new(4, "POST /api/orders with body {\"sku\": 7}"))
                .with_step(Step::new(5, "Verify the \"Thank you\" text is visible"))
        })
        .collect()
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let steps = vec![
        ("navigate", "Navigate to https://example.com/login"),
        ("fill", "Type \"alice@example.com\" into the Email field"),
        ("click", "Click the \"Submit\" button"),
        ("wait", "Wait 3 seconds"),
        ("verify", "Verify the page title is \"Dashboard\""),
        ("unknown", "Something vague happens"),
    ];

    for (name, text) in steps {
        let step = Step::new(1, text);
        group.bench_with_input(BenchmarkId::from_parameter(name), &step, |bench, step| {
            bench.iter(|| black_box(classify(black_box(step))));
        });
    }

    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    let cases = suite(20);
    let clock = FixedClock::at_ms(1_700_000_000_000);
    let options = EmitOptions::default();
    let ctx = EmitContext::new(&cases, "Bench", &clock, &options);

    for target in targets() {
        group.bench_with_input(
            BenchmarkId::from_parameter(target.to_string()),
            &target,
            |bench, target| {
                bench.iter(|| black_box(emit(*target, &ctx).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_emit_batch(c: &mut Criterion) {
    let cases = suite(20);
    let clock = FixedClock::at_ms(1_700_000_000_000);
    let options = EmitOptions::default();
    let ctx = EmitContext::new(&cases, "Bench", &clock, &options);
    let all = targets();

    c.bench_function("emit_batch_all_targets", |bench| {
        bench.iter(|| black_box(emit_batch(&all, &ctx)));
    });
}

fn bench_scaffold(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaffold");
    let clock = FixedClock::at_ms(1_700_000_000_000);
    let options = EmitOptions::default();
    let meta = SuiteMeta::new("Bench");

    for size in [1usize, 10, 50] {
        let cases = suite(size);
        let ctx = EmitContext::new(&cases, "Bench", &clock, &options);
        group.bench_with_input(BenchmarkId::new("playwright", size), &size, |bench, _| {
            bench.iter(|| {
                let archive = scaffold_project(
                    EmissionTarget::new(Platform::Web, Format::Playwright),
                    &ctx,
                    &meta,
                )
                .unwrap();
                black_box(archive.to_zip().unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classify,
    bench_emit,
    bench_emit_batch,
    bench_scaffold
);
criterion_main!(benches);
