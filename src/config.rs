//! Player configuration.
//!
//! Everything has a sensible default; callers usually start from
//! `PlayerConfig::default()` and override a field or two with the builder
//! methods. With the `serde` feature the config can also be read from JSON,
//! where missing fields keep their defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::{EnvelopeShape, OscillatorWaveform};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Seconds between `play()` and the first tone, so the first tone is not clipped.
    pub startup_latency: f64,
    /// Extra seconds after the last tone before the session tears itself down.
    pub teardown_margin: f64,
    pub waveform: OscillatorWaveform,
    pub envelope: EnvelopeShape,
    /// Capacity of the command queue to the audio thread.
    pub queue_capacity: usize,
    /// Pending-tone slots pre-allocated in the renderer.
    pub max_voices: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            startup_latency: 0.05,
            teardown_margin: 0.1,
            waveform: OscillatorWaveform::Square,
            envelope: EnvelopeShape::default(),
            queue_capacity: 1024,
            max_voices: 1024,
        }
    }
}

impl PlayerConfig {
    pub fn startup_latency(mut self, seconds: f64) -> Self {
        self.startup_latency = seconds.max(0.0);
        self
    }

    pub fn teardown_margin(mut self, seconds: f64) -> Self {
        self.teardown_margin = seconds.max(0.0);
        self
    }

    pub fn waveform(mut self, waveform: OscillatorWaveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn envelope(mut self, envelope: EnvelopeShape) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn max_voices(mut self, voices: usize) -> Self {
        self.max_voices = voices.max(1);
        self
    }
}

#[cfg(feature = "serde")]
impl PlayerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, crate::error::LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, crate::error::LoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
