//! Real-world scenario benchmarks.
//!
//! A whole ringtone scheduled at once, the way the playback manager
//! hands it to the audio thread.

mod decode;
mod renderer;

pub use decode::bench_decode;
pub use renderer::bench_renderer;
