//! Benchmarks for the snowflake automaton.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use hex_snowflake::{
    compute::{Automaton, Grid, promote_receptive},
    schema::{GrowthConfig, Pattern, Seed},
};

fn bench_config(size: usize) -> GrowthConfig {
    GrowthConfig {
        size,
        diffusion: 1.0,
        background: 0.4,
        accretion: 0.0001,
        noise_scale: 0.01,
        noise_amplitude: 0.05,
        iterations: 0,
    }
}

fn bench_automaton_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("automaton_step");

    for size in [64, 128, 256, 512, 800] {
        let config = bench_config(size);
        let seed = Seed {
            pattern: Pattern::Perlin { seed: 1 },
        };

        let mut automaton = Automaton::new(&config).unwrap();
        let mut grid = Grid::from_seed(&seed, &config).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    automaton.step(black_box(&mut grid));
                });
            },
        );
    }

    group.finish();
}

fn bench_mask_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_update");

    for size in [256, 800] {
        let config = bench_config(size);
        let seed = Seed {
            pattern: Pattern::Flat,
        };
        let mut grid = Grid::from_seed(&seed, &config).unwrap();
        Automaton::new(&config).unwrap().run(&mut grid, 500);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| promote_receptive(black_box(&mut grid)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_automaton_step, bench_mask_update);
criterion_main!(benches);
