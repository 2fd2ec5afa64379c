//! Benchmarks for list slicing and exports

use console_protocol::export::{ExportFormat, ExportRequest, export};
use console_protocol::list::{FilterValue, ListView};
use console_types::RecordId;
use console_types::entities::User;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn users(count: usize) -> Vec<User> {
    let roles = ["student", "parent", "patient", "vendor"];
    (0..count)
        .map(|i| User {
            id: Some(RecordId::from(i as u64)),
            name: format!("User {i}"),
            email: format!("user{i}@example.com"),
            role: roles.get(i % roles.len()).map(ToString::to_string),
            status: Some(if i % 3 == 0 { "inactive" } else { "active" }.to_string()),
            ..User::default()
        })
        .collect()
}

/// Benchmark recomputing the visible page as the collection grows
fn bench_visible_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_slice");

    for size in [100usize, 1_000, 10_000] {
        let mut view = ListView::new(10);
        view.replace_collection(users(size));
        view.apply_search("user1");
        view.apply_filter("role", FilterValue::Is("student".to_string()));

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("search_and_filter", size), &view, |b, view| {
            b.iter(|| black_box(view.visible_slice()));
        });
    }

    group.finish();
}

/// Benchmark CSV export at each menu limit
fn bench_csv_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_export");
    let rows = users(1_000);

    for limit in [10usize, 50, 100, 1000] {
        let request = ExportRequest::new(ExportFormat::Csv, limit);
        group.throughput(Throughput::Elements(limit as u64));
        group.bench_with_input(BenchmarkId::new("limit", limit), &request, |b, request| {
            b.iter(|| black_box(export(&rows, request)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_visible_slice, bench_csv_export);
criterion_main!(benches);
