//! Benchmarks for RTTTL decoding.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rtttl_player::decode;

const NOKIA: &str = "Nokia:d=4,o=5,b=180:8e6,8d6,4f#,4g#,8c#6,8b,4d,4e,8b,8a,4c#,4e,2a";

pub fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/decode");

    group.bench_function("nokia", |b| {
        b.iter(|| decode(black_box(NOKIA)))
    });

    // A long tune: the Nokia melody repeated
    for repeats in [8usize, 64] {
        let notes = NOKIA.splitn(3, ':').nth(2).unwrap_or_default();
        let body = vec![notes; repeats].join(",");
        let source = format!("Long:d=4,o=5,b=180:{body}");
        group.bench_with_input(BenchmarkId::new("repeated", repeats), &source, |b, source| {
            b.iter(|| decode(black_box(source)))
        });
    }

    group.finish();
}
