//! Benchmarks for the elementary automaton evolver.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use elementary_ca::{
    compute::{Evolver, RuleTable},
    schema::{Boundary, Pattern, Seed},
};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    // Spans the switch to the parallel path.
    for width in [256, 4096, 1 << 14, 1 << 18] {
        let seed = Seed {
            pattern: Pattern::Noise {
                density: 0.5,
                seed: 42,
            },
        };
        let row = seed.generate(width).unwrap();
        let evolver = Evolver::new(RuleTable::new(110), Boundary::Periodic);
        let mut next = vec![0; width];

        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| {
                evolver.step_into(black_box(&row), &mut next);
            });
        });
    }

    group.finish();
}

fn bench_evolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve");

    for rule in [30u8, 90, 110] {
        let row = Seed::default().generate(1024).unwrap();
        let evolver = Evolver::new(RuleTable::new(rule), Boundary::Strict);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("rule_{}", rule)),
            &rule,
            |b, _| {
                b.iter(|| evolver.evolve(black_box(&row), 512).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_step, bench_evolve);
criterion_main!(benches);
