//! Benchmarks for the hold/decay tone envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rtttl_player::dsp::{EnvelopeShape, ToneEnvelope};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

fn render(env: &mut ToneEnvelope, buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample = env.next_sample();
    }
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let shape = EnvelopeShape::default();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // From note start: hold at peak, then into the decay
        group.bench_with_input(BenchmarkId::new("onset", size), &size, |b, _| {
            b.iter_batched_ref(
                || ToneEnvelope::new(shape, 10.0, SAMPLE_RATE),
                |env| render(env, black_box(&mut buffer)),
                criterion::BatchSize::SmallInput,
            )
        });

        // Decay phase (exponential ramp)
        let mut env = ToneEnvelope::new(shape, 3600.0, SAMPLE_RATE);
        for _ in 0..(shape.hold * SAMPLE_RATE) as usize + 1 {
            env.next_sample();
        }
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| {
                render(&mut env, black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
