//! Performance benchmarks for the doctor registry.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use doctor_registry::{NewDoctor, Store, StoreConfig};
use tempfile::TempDir;

fn create_store(dir: &TempDir, doctors: usize) -> Store {
    let mut store = Store::open(StoreConfig::at(dir.path().join("doctors.json"))).unwrap();
    for i in 0..doctors {
        store
            .add(NewDoctor::new(
                format!("Doctor {}", i),
                ["Cardiology", "Neurology", "Oncology", "Pediatrics"][i % 4],
                format!("doctor{}@clinic.test", i),
                format!("555-{:04}", i),
            ))
            .unwrap();
    }
    store
}

/// Add cost grows with roster size since every add rewrites the file
fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    group.sample_size(20);

    for size in [10, 100, 500] {
        group.bench_with_input(BenchmarkId::new("roster_size", size), &size, |b, &size| {
            let dir = TempDir::new().unwrap();
            let mut store = create_store(&dir, size);
            let mut n = 0;

            b.iter(|| {
                n += 1;
                black_box(
                    store
                        .add(NewDoctor::new(
                            format!("Bench {}", n),
                            "General",
                            "bench@clinic.test",
                            "000",
                        ))
                        .unwrap(),
                );
            });
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    for size in [100, 500] {
        let dir = TempDir::new().unwrap();
        let store = create_store(&dir, size);

        group.bench_with_input(BenchmarkId::new("list_by_name", size), &size, |b, _| {
            b.iter(|| black_box(store.list("name")));
        });

        group.bench_with_input(BenchmarkId::new("search", size), &size, |b, _| {
            b.iter(|| black_box(store.search("onco")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_add, bench_queries);
criterion_main!(benches);
