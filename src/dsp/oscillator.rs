#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Tone Oscillator
===============

A phase accumulator: `phase` walks from 0.0 to 1.0 once per cycle, advancing
by `frequency / sample_rate` each sample, and the waveform maps phase to an
output value in [-1.0, 1.0].

    Square     +1 for the first half of the cycle, -1 for the second.
               Odd harmonics only; the classic buzzer/ringtone timbre.
    Sine       sin(2π·phase). No harmonics.
    Saw        2·phase - 1. All harmonics.
    Triangle   1 - 4·|phase - 0.5|. Odd harmonics, falling off as 1/n².

No band-limiting: ringtone pitches are low enough relative to typical
sample rates that aliasing is acceptable for this use.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OscillatorWaveform {
    Sine,
    Saw,
    #[default]
    Square,
    Triangle,
}

pub struct Oscillator {
    waveform: OscillatorWaveform,
    frequency: f32,
    phase: f32,
}

impl Oscillator {
    pub fn new(waveform: OscillatorWaveform, frequency: f32) -> Self {
        Self {
            waveform,
            frequency,
            phase: 0.0,
        }
    }

    pub fn square(frequency: f32) -> Self {
        Self::new(OscillatorWaveform::Square, frequency)
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Produce one sample and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let value = match self.waveform {
            OscillatorWaveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            OscillatorWaveform::Sine => (self.phase * std::f32::consts::TAU).sin(),
            OscillatorWaveform::Saw => 2.0 * self.phase - 1.0,
            OscillatorWaveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
        };

        self.phase += self.frequency / sample_rate;
        self.phase -= self.phase.floor();

        value
    }

    /// Fill a block with raw waveform output.
    pub fn render(&mut self, out: &mut [f32], sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(sample_rate);
        }
    }
}
