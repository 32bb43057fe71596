use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use stations::AggregateOptions;

fn synthetic(rows: usize) -> Vec<u8> {
    const NAMES: [&str; 6] = ["Abha", "Bergen", "Kraków", "Napoli", "São Paulo", "Zürich"];
    let mut out = Vec::with_capacity(rows * 14);
    for i in 0..rows {
        let tenths = (i * 53 % 1999) as i64 - 999;
        let sign = if tenths < 0 { "-" } else { "" };
        let t = tenths.abs();
        out.extend_from_slice(
            format!("{};{sign}{}.{}\n", NAMES[i % NAMES.len()], t / 10, t % 10).as_bytes(),
        );
    }
    out
}

fn criterion_benchmark(c: &mut Criterion) {
    let data = synthetic(1_000_000);

    let mut group = c.benchmark_group("variants");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_with_input(BenchmarkId::new("naive", "1M"), &data, |b, data| {
        b.iter(|| black_box(naive::aggregate_bytes(data).unwrap()))
    });
    group.bench_with_input(BenchmarkId::new("table", "1M"), &data, |b, data| {
        b.iter(|| black_box(stations::aggregate_bytes(data, AggregateOptions::default()).unwrap()))
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = criterion_benchmark,
);

criterion_main!(benches);
