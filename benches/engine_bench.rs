//! Benchmark suite for drill-engine
//!
//! Run with: cargo bench

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use drill_engine::catalog::LevelCatalog;
use drill_engine::config::EngineConfig;
use drill_engine::generator::generate;
use drill_engine::hint::minimal_plan;
use drill_engine::types::{DrillType, StarWindow};

fn bench_generate_mixed_multiplication(c: &mut Criterion) {
    let catalog = LevelCatalog::new();
    let config = EngineConfig::default();
    let preset = catalog.preset(DrillType::Multiplication, 16);
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("generate mixed multiplication", |b| {
        b.iter(|| generate(preset, &config, &mut rng))
    });
}

fn bench_minimal_plan(c: &mut Criterion) {
    let window = StarWindow::from("10010".to_string());
    c.bench_function("minimal_plan 10010", |b| b.iter(|| minimal_plan(&window)));
}

criterion_group!(
    benches,
    bench_generate_mixed_multiplication,
    bench_minimal_plan
);
criterion_main!(benches);
