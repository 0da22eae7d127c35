//! Low-level DSP primitives used by the tone renderer.
//!
//! These components are allocation-free and realtime-safe, so the renderer
//! can hold one of each per pending tone and run them inside the audio
//! callback.

/// Hold/exponential-decay envelope laid out against a known tone length.
pub mod envelope;
/// Phase-accumulator oscillator waveforms.
pub mod oscillator;

pub use envelope::{EnvelopeShape, ToneEnvelope, ToneEnvelopeStage};
pub use oscillator::{Oscillator, OscillatorWaveform};
