use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use dualscore_core::config::ScoreConfig;
use dualscore_core::engine::{evaluate, score_batch};
use dualscore_core::model::{Applicant, ScoreModel};
use dualscore_core::ranking::rank;

fn make_batch(n: usize) -> Vec<Applicant> {
    (0..n)
        .map(|i| Applicant {
            name: format!("applicant-{i:05}"),
            age: 17 + (i % 4) as u32,
            geography: "Urban".into(),
            ethnicity: "Unspecified".into(),
            income: 15_000.0 + (i * 7919 % 150_000) as f64,
            legacy: i % 11 == 0,
            local: i % 3 == 0,
            gpa: 2.0 + (i % 21) as f64 * 0.1,
            test: 900.0 + (i * 37 % 700) as f64,
            extra: (i % 10) as f64 / 10.0,
            essay: (i % 7) as f64 / 7.0,
            rec: (i % 5) as f64 / 5.0,
            first_gen: i % 4 == 0,
            disability: i % 13 == 0,
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let config = ScoreConfig::default();

    for n in [100, 1_000, 10_000] {
        let batch = make_batch(n);
        let scored = score_batch(&batch, &config);
        group.bench_with_input(BenchmarkId::new("aware", n), &scored, |b, scored| {
            b.iter(|| rank(black_box(scored), ScoreModel::Aware))
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let config = ScoreConfig::default();

    for n in [100, 1_000] {
        let batch = make_batch(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &batch, |b, batch| {
            b.iter(|| evaluate(black_box(batch), black_box(&config)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rank, bench_evaluate);
criterion_main!(benches);
