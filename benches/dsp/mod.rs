//! Benchmarks for the per-tone DSP primitives.

mod envelope;
mod oscillator;

pub use envelope::bench_envelope;
pub use oscillator::bench_oscillator;
