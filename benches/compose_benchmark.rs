//! Benchmarks for document composition.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docsmith::{compose_batch, compose_with_options, ComposeOptions, ComposeRequest};
use serde_json::{json, Value};

fn proposal_data(phases: usize) -> Value {
    let phases: Vec<Value> = (0..phases)
        .map(|i| json!({ "name": format!("Phase {}", i + 1), "duration": "2 weeks" }))
        .collect();
    let pricing: Vec<Value> = (0..phases.len())
        .map(|i| json!({ "item": format!("Phase {}", i + 1), "cost": 5000 + i * 250 }))
        .collect();
    json!({
        "projectName": "Atlas",
        "clientCompany": "Acme",
        "phases": phases,
        "pricing": pricing
    })
}

fn invoice_data(items: usize) -> Value {
    let items: Vec<Value> = (0..items)
        .map(|i| json!({ "description": format!("Task {}", i), "hours": 1 + i % 8, "rate": 120 }))
        .collect();
    json!({ "items": items, "taxRate": 8.5 })
}

fn bench_proposal(c: &mut Criterion) {
    let mut group = c.benchmark_group("proposal");
    for phases in [0, 10, 50] {
        let data = proposal_data(phases);
        group.bench_with_input(BenchmarkId::new("parallel", phases), &data, |b, data| {
            let options = ComposeOptions::default();
            b.iter(|| compose_with_options("proposal", black_box(data), &options))
        });
        group.bench_with_input(BenchmarkId::new("sequential", phases), &data, |b, data| {
            let options = ComposeOptions::default().sequential();
            b.iter(|| compose_with_options("proposal", black_box(data), &options))
        });
    }
    group.finish();
}

fn bench_invoice(c: &mut Criterion) {
    let data = invoice_data(500);
    let options = ComposeOptions::default();
    c.bench_function("invoice_500_items", |b| {
        b.iter(|| compose_with_options("invoice", black_box(&data), &options))
    });
}

fn bench_batch(c: &mut Criterion) {
    let requests: Vec<ComposeRequest> = (0..32)
        .map(|i| match i % 3 {
            0 => ComposeRequest::new("proposal", proposal_data(5)),
            1 => ComposeRequest::new("invoice", invoice_data(20)),
            _ => ComposeRequest::new("blog", json!({ "title": format!("Post {}", i) })),
        })
        .collect();
    let options = ComposeOptions::default();
    c.bench_function("batch_32", |b| {
        b.iter(|| compose_batch(black_box(&requests), &options))
    });
}

criterion_group!(benches, bench_proposal, bench_invoice, bench_batch);
criterion_main!(benches);
