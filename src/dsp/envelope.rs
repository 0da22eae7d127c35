#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::MIN_TIME;

/*
Tone Envelope
=============

Every scheduled tone is shaped by a short percussive envelope so that tone
boundaries do not click. Unlike an ADSR there is no gate: the tone's length
is known up front, so the whole shape is laid out against it.

Vocabulary
----------

  peak            Gain at the start of the tone.

  floor           The gain the decay approaches. Exponential curves never
                  reach zero, so the decay targets a small positive value
                  and the tone is cut from there at its nominal end.

  hold            Seconds spent at `peak` before decaying.

  decay_fraction  Where the decay lands on `floor`, as a fraction of the
                  tone's duration (0.95 = 95% of the way through).


The Shape
---------

  Gain
  peak ┐───╮
       │   │╲
       │   │ ╲
       │   │  ╲_
       │   │    ╲__
  floor│   │       ╲_____________
     0 └───┴──────────────────────┴──→ Time
        hold        decay        end
                     (decay_fraction · duration)

The decay is exponential: gain is multiplied by a constant ratio each sample,
with the ratio chosen so that `decay_samples` multiplications carry `peak`
down to `floor`:

    ratio = (floor / peak) ^ (1 / decay_samples)

After the decay the gain sits at `floor` until the tone's end, then the
envelope goes idle and outputs zero.


The State Machine
-----------------

    ┌──────┐ hold elapsed ┌───────┐ decay elapsed ┌───────┐ end ┌──────┐
    │ Hold │ ───────────→ │ Decay │ ────────────→ │ Floor │ ──→ │ Idle │
    └──────┘              └───────┘               └───────┘     └──────┘

`cut()` jumps straight to Idle from any stage; it is how a cancelled tone
goes silent immediately.
*/

/// Parameters shared by every tone in a tune.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    pub peak: f32,
    pub floor: f32,
    pub hold: f32,
    pub decay_fraction: f32,
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self {
            peak: 0.15,
            floor: 0.001,
            hold: 0.005,
            decay_fraction: 0.95,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEnvelopeStage {
    Hold,
    Decay,
    Floor,
    Idle,
}

pub struct ToneEnvelope {
    // Laid out once from the shape and the tone's length
    peak: f32,
    floor: f32,
    ratio: f32,
    hold_samples: u64,
    decay_end_samples: u64,
    total_samples: u64,

    // Runtime state
    stage: ToneEnvelopeStage,
    level: f32,
    elapsed: u64,
}

impl ToneEnvelope {
    pub fn new(shape: EnvelopeShape, duration_secs: f32, sample_rate: f32) -> Self {
        let peak = shape.peak.clamp(0.0, 1.0);
        // Keep the floor strictly positive and below peak so the ratio stays in (0, 1].
        let floor = shape.floor.clamp(f32::MIN_POSITIVE, peak.max(f32::MIN_POSITIVE));
        let duration = duration_secs.max(MIN_TIME);

        let total_samples = (duration * sample_rate).round().max(1.0) as u64;
        let decay_end_samples = ((duration * shape.decay_fraction.clamp(0.0, 1.0)) * sample_rate)
            .round()
            .clamp(1.0, total_samples as f32) as u64;
        let hold_samples = (shape.hold.max(0.0) * sample_rate)
            .round()
            .min(decay_end_samples as f32) as u64;

        let decay_samples = decay_end_samples.saturating_sub(hold_samples).max(1);
        let ratio = if peak > 0.0 {
            (floor / peak).powf(1.0 / decay_samples as f32)
        } else {
            1.0
        };

        Self {
            peak,
            floor: floor.min(peak),
            ratio,
            hold_samples,
            decay_end_samples,
            total_samples,
            stage: if hold_samples > 0 {
                ToneEnvelopeStage::Hold
            } else {
                ToneEnvelopeStage::Decay
            },
            level: peak,
            elapsed: 0,
        }
    }

    /// Current gain, then advance by one sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let out = match self.stage {
            ToneEnvelopeStage::Idle => 0.0,
            _ => self.level,
        };

        self.elapsed += 1;
        match self.stage {
            ToneEnvelopeStage::Hold => {
                if self.elapsed >= self.hold_samples {
                    self.stage = ToneEnvelopeStage::Decay;
                }
            }
            ToneEnvelopeStage::Decay => {
                self.level *= self.ratio;
                if self.elapsed >= self.decay_end_samples {
                    self.level = self.floor;
                    self.stage = ToneEnvelopeStage::Floor;
                }
            }
            ToneEnvelopeStage::Floor | ToneEnvelopeStage::Idle => {}
        }

        if self.elapsed >= self.total_samples {
            self.level = 0.0;
            self.stage = ToneEnvelopeStage::Idle;
        }

        out
    }

    /// Silence immediately.
    pub fn cut(&mut self) {
        self.level = 0.0;
        self.stage = ToneEnvelopeStage::Idle;
    }

    pub fn is_active(&self) -> bool {
        self.stage != ToneEnvelopeStage::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> ToneEnvelopeStage {
        self.stage
    }

    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Length of the tone in samples.
    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn run(env: &mut ToneEnvelope, samples: usize) -> Vec<f32> {
        (0..samples).map(|_| env.next_sample()).collect()
    }

    #[test]
    fn starts_at_peak_and_holds() {
        let shape = EnvelopeShape { hold: 0.01, ..EnvelopeShape::default() };
        let mut env = ToneEnvelope::new(shape, 0.5, SAMPLE_RATE);
        let out = run(&mut env, 10);
        assert!(out.iter().all(|&g| (g - 0.15).abs() < 1e-6));
        assert_eq!(env.stage(), ToneEnvelopeStage::Decay);
    }

    #[test]
    fn decay_reaches_floor_before_end() {
        let shape = EnvelopeShape::default();
        let mut env = ToneEnvelope::new(shape, 0.2, SAMPLE_RATE);
        // 95% of 200 samples
        run(&mut env, 190);
        assert_eq!(env.stage(), ToneEnvelopeStage::Floor);
        assert!((env.level() - shape.floor).abs() < 1e-6);
        assert!(env.is_active());
    }

    #[test]
    fn decay_is_monotonic_and_positive() {
        let mut env = ToneEnvelope::new(EnvelopeShape::default(), 0.3, SAMPLE_RATE);
        let out = run(&mut env, 299);
        assert!(out.windows(2).all(|w| w[1] <= w[0] + 1e-9));
        assert!(out.iter().all(|&g| g > 0.0));
    }

    #[test]
    fn goes_idle_at_end() {
        let mut env = ToneEnvelope::new(EnvelopeShape::default(), 0.1, SAMPLE_RATE);
        assert_eq!(env.total_samples(), 100);
        run(&mut env, 100);
        assert!(!env.is_active());
        assert_eq!(env.next_sample(), 0.0);
    }

    #[test]
    fn cut_silences_immediately() {
        let mut env = ToneEnvelope::new(EnvelopeShape::default(), 1.0, SAMPLE_RATE);
        run(&mut env, 5);
        env.cut();
        assert!(!env.is_active());
        assert_eq!(env.next_sample(), 0.0);
    }

    #[test]
    fn hold_longer_than_tone_is_clamped() {
        let shape = EnvelopeShape { hold: 5.0, ..EnvelopeShape::default() };
        let mut env = ToneEnvelope::new(shape, 0.05, SAMPLE_RATE);
        run(&mut env, 50);
        assert!(!env.is_active());
    }

    #[test]
    fn degenerate_duration_still_terminates() {
        let mut env = ToneEnvelope::new(EnvelopeShape::default(), -1.0, SAMPLE_RATE);
        assert_eq!(env.total_samples(), 1);
        env.next_sample();
        assert!(!env.is_active());
    }
}
