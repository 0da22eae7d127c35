//! Benchmarks for the tone renderer.
//!
//! Models the audio-thread cost of a ringtone: every tone is queued up front
//! with its absolute start time, so most voices sit waiting for their frame.

use std::{collections::VecDeque, hint::black_box};

use criterion::{BenchmarkId, Criterion};
use rtttl_player::{
    decode,
    dsp::{EnvelopeShape, OscillatorWaveform},
    engine::{ScheduledTone, ToneHandle, ToneMessage, ToneRenderer},
};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;
const TUNE: &str = "Tune:d=8,o=6,b=140:c,e,g,c7,p,g,e,c,4d,f,a,d7,p,a,f,d,2c";

fn loaded_renderer(repeats: usize) -> ToneRenderer<VecDeque<ToneMessage>> {
    let mut queue = VecDeque::new();
    let mut offset = 0.0;
    let mut handle = 0;

    for _ in 0..repeats {
        let Some(tune) = decode(TUNE) else { break };
        for tone in tune.tones() {
            if !tone.is_rest() {
                queue.push_back(ToneMessage::Start {
                    handle: ToneHandle(handle),
                    tone: ScheduledTone {
                        frequency_hz: tone.frequency_hz as f32,
                        start: offset,
                        duration: tone.duration_secs,
                        waveform: OscillatorWaveform::Square,
                        envelope: EnvelopeShape::default(),
                    },
                });
                handle += 1;
            }
            offset += tone.duration_secs;
        }
    }

    ToneRenderer::new(SAMPLE_RATE, 4096, queue)
}

pub fn bench_renderer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/renderer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // One ringtone pending: the common case
        let mut single = loaded_renderer(1);
        single.render_block(&mut buffer);
        group.bench_with_input(BenchmarkId::new("one_tune", size), &size, |b, _| {
            b.iter(|| {
                single.render_block(black_box(&mut buffer));
            })
        });

        // A long tune with hundreds of voices waiting for their start frame
        let mut long = loaded_renderer(32);
        long.render_block(&mut buffer);
        group.bench_with_input(BenchmarkId::new("long_tune", size), &size, |b, _| {
            b.iter(|| {
                long.render_block(black_box(&mut buffer));
            })
        });

        // Idle renderer: the cost of silence
        let mut idle = ToneRenderer::new(SAMPLE_RATE, 64, VecDeque::<ToneMessage>::new());
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                idle.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
