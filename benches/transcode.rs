use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use recmarshal::{marshal, record, string_enum, unmarshal, Document};
use uuid::Uuid;

string_enum! {
    #[derive(Clone, Copy)]
    enum Status {
        Active => "ACTIVE",
        Retired => "RETIRED",
    }
}

record! {
    #[derive(Clone)]
    struct Product {
        id: Uuid,
        sku: String,
        name: String,
        price: f64,
        quantity: u32,
        status: Status,
        note: Option<String> => { omitempty: true },
    }
}

record! {
    #[derive(Clone)]
    struct Metadata {
        created: NaiveDate,
        updated: NaiveDateTime => { json: "updatedAt" },
        version: u32,
    }
}

record! {
    #[derive(Clone)]
    struct Catalog {
        id: u32,
        metadata: Metadata,
        products: Vec<Product>,
        tags: Vec<String>,
    }
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            id: Uuid::from_u128(u128::from(i)),
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
            status: if i % 2 == 0 {
                Status::Active
            } else {
                Status::Retired
            },
            note: None,
        })
        .collect()
}

fn catalog(size: u32) -> Catalog {
    Catalog {
        id: 42,
        metadata: Metadata {
            created: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            updated: NaiveDate::from_ymd_opt(2023, 12, 31)
                .unwrap()
                .and_hms_opt(23, 59, 59)
                .unwrap(),
            version: 3,
        },
        products: products(size),
        tags: vec!["important".to_string(), "verified".to_string()],
    }
}

fn benchmark_marshal_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("marshal_products");

    for size in [10, 50, 100, 500].iter() {
        let products = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| marshal(black_box(&products)))
        });
    }
    group.finish();
}

fn benchmark_unmarshal_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("unmarshal_products");

    for size in [10, 50, 100, 500].iter() {
        let document = marshal(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &document, |b, document| {
            b.iter(|| unmarshal::<Vec<Product>>(black_box(document)))
        });
    }
    group.finish();
}

fn benchmark_nested(c: &mut Criterion) {
    let data = catalog(20);
    let document = marshal(&data).unwrap();

    c.bench_function("marshal_nested", |b| b.iter(|| marshal(black_box(&data))));
    c.bench_function("unmarshal_nested", |b| {
        b.iter(|| unmarshal::<Catalog>(black_box(&document)))
    });
}

fn benchmark_json_text(c: &mut Criterion) {
    let data = catalog(20);
    let text = serde_json::to_string(&marshal(&data).unwrap()).unwrap();

    c.bench_function("json_text_to_record", |b| {
        b.iter(|| {
            let document: Document = serde_json::from_str(black_box(&text)).unwrap();
            let _catalog: Catalog = unmarshal(&document).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_marshal_sequence,
    benchmark_unmarshal_sequence,
    benchmark_nested,
    benchmark_json_text
);
criterion_main!(benches);
