//! Benchmark for the full analysis pipeline
//! Run: cargo bench -p logbert-anomaly --bench pipeline

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use logbert_anomaly::scorer::AnomalyScorer;
use logbert_anomaly::{AnalysisPipeline, DetectionConfig, SAMPLE_LOGS, SeededRandom};
use logbert_core::LevelFilter;
use std::hint::black_box;

const DB_FAILURE: &str = "2024-01-15 10:30:45 ERROR Database connection failed - timeout after 30s";

fn build_blob(copies: usize) -> String {
    vec![SAMPLE_LOGS; copies].join("\n")
}

fn bench_scorer(c: &mut Criterion) {
    let scorer = AnomalyScorer::new();
    let folded = AnomalyScorer::new().case_insensitive(true);

    c.bench_function("base_score_case_sensitive", |b| {
        b.iter(|| scorer.base_score(black_box(DB_FAILURE)))
    });
    c.bench_function("base_score_case_insensitive", |b| {
        b.iter(|| folded.base_score(black_box(DB_FAILURE)))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_analysis");
    let mut pipeline = AnalysisPipeline::with_random(Box::new(SeededRandom::new(7)));

    for copies in [1, 10, 100] {
        let blob = build_blob(copies);
        group.throughput(Throughput::Elements((copies * 9) as u64));

        group.bench_with_input(BenchmarkId::new("all", copies), &blob, |b, blob| {
            let config = DetectionConfig::default();
            b.iter(|| pipeline.run_analysis(black_box(blob), &config, true))
        });

        group.bench_with_input(BenchmarkId::new("error_only", copies), &blob, |b, blob| {
            let config = DetectionConfig { level_filter: LevelFilter::Error, ..Default::default() };
            b.iter(|| pipeline.run_analysis(black_box(blob), &config, true))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scorer, bench_pipeline);
criterion_main!(benches);
