use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use herald::{matches, Pattern, Topic};

const CASES: [(&str, &str); 4] = [
    ("exact", "order.item.removed"),
    ("trailing", "order.*"),
    ("inner", "order.*.removed"),
    ("lone", "*"),
];

/// Свободная функция разбивает шаблон на каждом вызове.
fn bench_free_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("matches_free");
    for (name, pattern) in CASES {
        group.bench_with_input(BenchmarkId::from_parameter(name), pattern, |b, p| {
            b.iter(|| matches(black_box(p), black_box("order.item.removed")))
        });
    }
    group.finish();
}

fn bench_parsed_matches(c: &mut Criterion) {
    let topic = Topic::parse("order.item.removed").unwrap();
    let mut group = c.benchmark_group("matches_parsed");
    for (name, raw) in CASES {
        let pattern = Pattern::parse(raw).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &pattern, |b, p| {
            b.iter(|| p.matches(black_box(&topic)))
        });
    }
    group.finish();
}

fn bench_topic_parse(c: &mut Criterion) {
    c.bench_function("topic_parse", |b| {
        b.iter(|| Topic::parse(black_box("tenant.region.order.item.removed")).unwrap())
    });
}

criterion_group!(
    benches,
    bench_free_matches,
    bench_parsed_matches,
    bench_topic_parse
);
criterion_main!(benches);
