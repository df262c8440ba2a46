//! Build and query benchmarks over a synthetic registry dump
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use npm_locate::index::build_index;
use npm_locate::query::{Filters, query_index};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PACKAGES: usize = 50_000;

/// Write a bulk document with `PACKAGES` entries and build its index
fn create_benchmark_fixtures() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let source = temp_dir.path().join("index.json");
    let index = temp_dir.path().join("index.db");

    let mut document = serde_json::Map::new();
    for i in 0..PACKAGES {
        let parity = if i % 2 == 0 { "even" } else { "odd" };
        document.insert(
            format!("package-{i}"),
            serde_json::json!({
                "name": format!("package-{i}"),
                "description": format!("Package number {i} | generated for benchmarks"),
                "keywords": ["bench", format!("group-{}", i % 100), parity],
            }),
        );
    }
    let document = serde_json::Value::Object(document);
    fs::write(&source, document.to_string()).expect("Failed to write document");

    build_index(&source, &index).expect("Failed to build index");

    (temp_dir, source, index)
}

fn bench_build(c: &mut Criterion) {
    let (_temp_dir, source, index) = create_benchmark_fixtures();

    c.bench_function("build_index", |b| {
        b.iter(|| build_index(black_box(&source), black_box(&index)).unwrap())
    });
}

fn bench_query(c: &mut Criterion) {
    let (_temp_dir, _source, index) = create_benchmark_fixtures();

    let cases = vec![
        ("name", Filters::new().name(Some("package-4999"))),
        ("exact", Filters::new().exact(Some("package-25000"))),
        ("description", Filters::new().description(Some("number 123"))),
        ("keywords", Filters::new().keywords(Some("bench,group-7,odd"))),
    ];

    let mut group = c.benchmark_group("query");
    for (label, filters) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(label), filters, |b, filters| {
            b.iter(|| {
                let run = query_index(&index, filters).unwrap();
                black_box(run.finish().unwrap().total)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
