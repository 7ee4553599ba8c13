//! Performance benchmarks for spatial-games

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use spatial_games::evolution::{evolve, update_strategies};
use spatial_games::payoff::update_scores;
use spatial_games::render::PngRenderer;
use spatial_games::{last_two_generations, Field, Payoff, Strategy};

fn random_field(size: usize, seed: u64) -> Field {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let strategies = (0..size)
        .map(|_| {
            (0..size)
                .map(|_| {
                    if rng.gen::<f64>() < 0.1 {
                        Strategy::Defect
                    } else {
                        Strategy::Cooperate
                    }
                })
                .collect()
        })
        .collect();
    Field::from_rows(strategies).unwrap()
}

fn benchmark_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    let b = Payoff::new(1.85).unwrap();

    for size in [50, 100, 250].iter() {
        let field = random_field(*size, 42);

        group.bench_with_input(BenchmarkId::new("update_scores", size), size, |bench, _| {
            bench.iter(|| update_scores(black_box(&field), b));
        });

        let scored = update_scores(&field, b);
        group.bench_with_input(BenchmarkId::new("update_strategies", size), size, |bench, _| {
            bench.iter(|| update_strategies(black_box(&scored)));
        });
    }

    group.finish();
}

fn benchmark_evolve(c: &mut Criterion) {
    let field = random_field(100, 7);
    let b = Payoff::new(1.85).unwrap();

    c.bench_function("evolve_100x100_20_steps", |bench| {
        bench.iter(|| evolve(black_box(field.clone()), 20, b));
    });
}

fn benchmark_render(c: &mut Criterion) {
    let pair = last_two_generations(random_field(200, 9), 10, Payoff::new(1.85).unwrap());
    let renderer = PngRenderer::default();

    c.bench_function("render_200x200", |bench| {
        bench.iter(|| {
            renderer
                .to_image(black_box(&pair.penultimate), black_box(&pair.last))
                .unwrap()
        });
    });
}

criterion_group!(benches, benchmark_generation, benchmark_evolve, benchmark_render);

criterion_main!(benches);
