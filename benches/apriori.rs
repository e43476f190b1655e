/// Itemset Mining Benchmarks
///
/// Measures encoding and full three-order mining over synthetic tables,
/// sequential versus multi-threaded counting.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rasgo::{AprioriSummarizer, AttributeEncoder, DataFrame, SummarizerConfig};
use std::time::Duration;

const NUM_ATTRIBUTES: usize = 6;

/// Deterministic table: attribute `c` cycles through `c + 3` values, and
/// rows whose first two attributes are both zero are mostly outliers.
fn synthetic_frame(rows: usize) -> DataFrame {
    let mut frame = DataFrame::new();
    let mut first = Vec::new();
    let mut second = Vec::new();

    for c in 0..NUM_ATTRIBUTES {
        let cardinality = c + 3;
        let values: Vec<usize> = (0..rows).map(|r| (r * (c + 7) / (c + 1)) % cardinality).collect();
        if c == 0 {
            first = values.clone();
        } else if c == 1 {
            second = values.clone();
        }
        frame
            .add_string_column(
                format!("attr{}", c),
                values.iter().map(|v| format!("v{}", v)).collect(),
            )
            .unwrap();
    }

    let scores = (0..rows)
        .map(|r| {
            let hot = first[r] == 0 && second[r] == 0;
            if (hot && r % 5 != 0) || r % 97 == 0 {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    frame.add_double_column("score", scores).unwrap();
    frame
}

fn attributes() -> Vec<String> {
    (0..NUM_ATTRIBUTES).map(|c| format!("attr{}", c)).collect()
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    group.measurement_time(Duration::from_secs(5));

    for rows in [1_000, 10_000, 100_000] {
        let frame = synthetic_frame(rows);
        let names = attributes();
        let columns = frame.string_columns(&names).unwrap();

        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| {
                let mut encoder = AttributeEncoder::new(names.clone());
                black_box(encoder.encode(&columns).unwrap());
            });
        });
    }

    group.finish();
}

fn bench_mining_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("mining_threads");
    group.measurement_time(Duration::from_secs(10));

    let rows = 100_000;
    let frame = synthetic_frame(rows);
    group.throughput(Throughput::Elements(rows as u64));

    for threads in [1, 2, 4, 8] {
        let config = SummarizerConfig::new(attributes(), "score")
            .with_min_outlier_support(0.05)
            .with_min_risk_ratio(2.0)
            .with_threads(threads);

        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, _| {
            b.iter(|| {
                let mut summarizer = AprioriSummarizer::new(config.clone());
                black_box(summarizer.explain(black_box(&frame)).unwrap());
            });
        });
    }

    group.finish();
}

fn bench_support_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("support_threshold");

    let frame = synthetic_frame(20_000);
    for support in [0.01, 0.05, 0.2] {
        let config = SummarizerConfig::new(attributes(), "score")
            .with_min_outlier_support(support)
            .with_min_risk_ratio(2.0);

        group.bench_with_input(BenchmarkId::from_parameter(support), &support, |b, _| {
            b.iter(|| {
                let mut summarizer = AprioriSummarizer::new(config.clone());
                black_box(summarizer.explain(&frame).unwrap());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encoding,
    bench_mining_threads,
    bench_support_threshold
);

criterion_main!(benches);
