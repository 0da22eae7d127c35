//! Audio output: the [`AudioContext`] seam and its implementations.
//!
//! The playback layer never touches a device directly. It asks an
//! `AudioContext` for the current time and hands it tones to start at
//! absolute times on that clock; the context turns them into samples.
//!
//! - [`OfflineContext`] renders on demand into buffers, with a clock that only
//!   moves when you render. Deterministic; used in tests and for bouncing.
//! - [`CpalContext`] (feature `rtrb`) forwards tones over a lock-free queue to
//!   a cpal output stream.

pub mod message;
pub mod offline;
#[cfg(feature = "rtrb")]
pub mod output;
pub mod renderer;

use crate::{
    dsp::{EnvelopeShape, OscillatorWaveform},
    error::AudioError,
};

#[cfg(feature = "rtrb")]
pub use message::CommandSender;
pub use message::{MessageReceiver, ToneMessage};
pub use offline::OfflineContext;
#[cfg(feature = "rtrb")]
pub use output::CpalContext;
pub use renderer::ToneRenderer;

/// Identifies one started tone so it can be stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToneHandle(pub u64);

/// A tone to be rendered at an absolute time on the context's clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTone {
    pub frequency_hz: f32,
    /// Start time in seconds on the context clock.
    pub start: f64,
    /// Length in seconds.
    pub duration: f64,
    pub waveform: OscillatorWaveform,
    pub envelope: EnvelopeShape,
}

impl ScheduledTone {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A process-wide audio output that tones can be scheduled against.
pub trait AudioContext {
    /// Seconds on the context's clock. Monotonic.
    fn current_time(&self) -> f64;

    /// Whether output is paused (by the platform or by the caller).
    fn is_suspended(&self) -> bool;

    /// Continue output after a suspension. Must not recreate the context.
    fn resume(&mut self) -> Result<(), AudioError>;

    /// Queue a tone. Returns `None` if the context could not accept it.
    fn start_tone(&mut self, tone: ScheduledTone) -> Option<ToneHandle>;

    /// Silence every started tone now, sounding or still pending. Tones
    /// started afterwards are unaffected. Must not fail for lack of room.
    fn stop_all(&mut self);
}
