//! Benchmarks for rateshelf catalog operations

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rateshelf::{Catalog, Rating};
use rust_decimal::Decimal;
use tempfile::TempDir;

fn seeded_catalog() -> (TempDir, Catalog) {
    let temp_dir = TempDir::new().unwrap();
    let catalog = Catalog::open_path(temp_dir.path()).unwrap();

    for id in 0..100u64 {
        catalog
            .create_drink(
                id,
                format!("Drink {}", id),
                Decimal::new(199 + id as i64, 2),
                Rating::from_stars((id % 6) as i32),
            )
            .unwrap();
    }

    (temp_dir, catalog)
}

fn catalog_benchmarks(c: &mut Criterion) {
    let (_temp, catalog) = seeded_catalog();

    c.bench_function("find_product", |b| {
        b.iter(|| catalog.find_product(black_box(42)).unwrap())
    });

    c.bench_function("get_discounts", |b| {
        b.iter(|| black_box(catalog.get_discounts()))
    });

    c.bench_function("review_product", |b| {
        b.iter(|| {
            catalog
                .review_product(black_box(42), Rating::FourStar, "bench review")
                .unwrap()
        })
    });
}

criterion_group!(benches, catalog_benchmarks);
criterion_main!(benches);
