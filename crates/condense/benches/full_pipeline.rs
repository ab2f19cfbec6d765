use condense_history::{AnalysisStep, HistoryLedger};
use condense_model::{Column, ColumnType, Dataset, Value};
use condense_schema::SchemaCompressor;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_dataset(rows: usize) -> Dataset {
    let cities = ["north", "south", "east", "west"];
    let amount = (0..rows)
        .map(|i| Some(Value::Float(5.0 + (i as f64 * 1.3) % 250.0)))
        .collect();
    let quantity = (0..rows)
        .map(|i| Some(Value::Int((i % 40) as i64)))
        .collect();
    let region = (0..rows)
        .map(|i| Some(Value::Text(cities[i % 4].to_string())))
        .collect();

    Dataset::new(vec![
        Column::new("amount", ColumnType::Float64, amount),
        Column::new("quantity", ColumnType::Int64, quantity),
        Column::new("region", ColumnType::Text, region),
    ])
    .expect("valid bench dataset")
}

fn bench_schema_compress_1k_rows(c: &mut Criterion) {
    let dataset = bench_dataset(1000);
    let compressor = SchemaCompressor::new();

    c.bench_function("schema_compress_1k_rows", |b| {
        b.iter(|| compressor.compress(black_box(&dataset), "bench"));
    });
}

fn bench_history_render_30_steps(c: &mut Criterion) {
    let mut ledger = HistoryLedger::new();
    for i in 0..30 {
        let mut step = AnalysisStep::new(
            format!("tool_{}", i % 5),
            format!("analysis pass {}", i),
            "mean=42.0, std=7.3, rows scanned without incident".to_string(),
        );
        step.tokens_used = 40;
        ledger.add_step(step);
    }
    ledger.add_finding("quantity has 12 outliers (1.2%)");

    c.bench_function("history_render_30_steps", |b| {
        b.iter(|| black_box(&ledger).render_compressed_history());
    });
}

criterion_group!(
    benches,
    bench_schema_compress_1k_rows,
    bench_history_render_30_steps
);
criterion_main!(benches);
