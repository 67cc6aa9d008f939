use std::hint::black_box;

use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use herald::{Channel, Payload, Registry};

fn bench_subscribe_unsubscribe(c: &mut Criterion) {
    let channel = Channel::new();
    c.bench_function("subscribe_unsubscribe", |b| {
        b.iter(|| {
            let handle = channel.subscribe("order.*", |_, _| Ok(())).unwrap();
            black_box(channel.unsubscribe(handle));
        })
    });
}

/// Публикация при N подписчиках, из которых совпадает половина.
fn bench_publish_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish_fanout");
    for subscribers in [1usize, 10, 100] {
        let channel = Channel::new();
        for i in 0..subscribers {
            let pattern = if i % 2 == 0 { "order.*" } else { "invoice.*" };
            channel.subscribe(pattern, |_, _| Ok(())).unwrap();
        }

        group.throughput(Throughput::Elements(subscribers as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &channel,
            |b, ch| {
                b.iter(|| {
                    ch.publish(
                        "order.created",
                        black_box(Payload::Bytes(Bytes::from_static(b"x"))),
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

fn bench_publish_json(c: &mut Criterion) {
    let channel = Channel::new();
    channel
        .subscribe("order.*", |data, _| {
            black_box(data.get("id"));
            Ok(())
        })
        .unwrap();
    c.bench_function("publish_json", |b| {
        b.iter(|| {
            channel
                .publish("order.created", json!({"id": 42, "total": 9.5}))
                .unwrap()
        })
    });
}

fn bench_named_lookup(c: &mut Criterion) {
    let registry = Registry::new();
    for i in 0..64 {
        registry.named(&format!("channel-{i}"));
    }
    c.bench_function("registry_named_hit", |b| {
        b.iter(|| registry.named(black_box("channel-42")))
    });
}

criterion_group!(
    benches,
    bench_subscribe_unsubscribe,
    bench_publish_fanout,
    bench_publish_json,
    bench_named_lookup
);
criterion_main!(benches);
