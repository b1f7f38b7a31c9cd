use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use archiv_catalog::{Catalog, Era, Material, NewProduct, Size, Style, archive_catalog};
use archiv_core::ProductId;
use archiv_storefront::{FilterCriteria, PriceRange, SizeSelection, filter_products};

const ERAS: [&str; 3] = ["1960s", "1970s", "1980s"];
const MATERIALS: [&str; 4] = ["Шерсть", "Шёлк", "Деним", "Лён"];

/// Synthetic catalog of `n` products cycling through eras, materials and sizes.
fn synthetic_catalog(n: u32) -> Catalog {
    let mut builder = Catalog::builder();
    for i in 0..n {
        let size = Size::ALL[(i as usize) % Size::ALL.len()];
        builder = builder
            .product(NewProduct {
                id: ProductId::new(i + 1),
                name: format!("Вещь {i}"),
                price: u64::from(i * 997 % 30_000),
                era: Era::new(ERAS[(i as usize) % ERAS.len()]).unwrap(),
                style: Style::new("Классика").unwrap(),
                material: Material::new(MATERIALS[(i as usize) % MATERIALS.len()]).unwrap(),
                sizes: vec![size, Size::M],
                image: "/placeholder.svg".to_string(),
            })
            .unwrap();
    }
    builder.build().unwrap()
}

fn narrow_criteria() -> FilterCriteria {
    FilterCriteria {
        price_range: PriceRange::new(5_000, 25_000).unwrap(),
        eras: [Era::new("1960s").unwrap(), Era::new("1980s").unwrap()]
            .into_iter()
            .collect(),
        materials: [Material::new("Шёлк").unwrap()].into_iter().collect(),
        size: SizeSelection::Only(Size::XL),
        ..FilterCriteria::default()
    }
}

fn bench_archive_catalog(c: &mut Criterion) {
    let catalog = archive_catalog().unwrap();
    let open = FilterCriteria::default();
    let narrow = narrow_criteria();

    let mut group = c.benchmark_group("archive_catalog");
    group.bench_function("unconstrained", |b| {
        b.iter(|| filter_products(black_box(&catalog), black_box(&open)).len())
    });
    group.bench_function("narrow", |b| {
        b.iter(|| filter_products(black_box(&catalog), black_box(&narrow)).len())
    });
    group.finish();
}

fn bench_catalog_size(c: &mut Criterion) {
    let narrow = narrow_criteria();
    let mut group = c.benchmark_group("synthetic_catalog");
    for n in [100u32, 1_000, 10_000] {
        let catalog = synthetic_catalog(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &catalog, |b, catalog| {
            b.iter(|| filter_products(black_box(catalog), black_box(&narrow)).len())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_archive_catalog, bench_catalog_size);
criterion_main!(benches);
