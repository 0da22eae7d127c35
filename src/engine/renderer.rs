//! Sample-accurate renderer for scheduled tones.
//!
//! Runs inside the audio callback: commands arrive through a
//! [`MessageReceiver`], each pending tone gets a voice (oscillator and
//! envelope) in a pre-allocated slot, and voices are mixed into the output
//! block starting at their exact start frame. Nothing here allocates after
//! construction.

use crate::dsp::{Oscillator, ToneEnvelope};

use super::{
    message::{MessageReceiver, ToneMessage},
    ScheduledTone,
};

struct ToneVoice {
    osc: Oscillator,
    envelope: ToneEnvelope,
    start_frame: u64,
}

pub struct ToneRenderer<R: MessageReceiver> {
    rx: R,
    voices: Vec<ToneVoice>,
    max_voices: usize,
    sample_rate: f32,
    /// Frames rendered so far; the renderer's clock.
    frame: u64,
    dropped: u64,
}

impl<R: MessageReceiver> ToneRenderer<R> {
    pub fn new(sample_rate: f32, max_voices: usize, rx: R) -> Self {
        let max_voices = max_voices.max(1);
        Self {
            rx,
            voices: Vec::with_capacity(max_voices),
            max_voices,
            sample_rate,
            frame: 0,
            dropped: 0,
        }
    }

    /// Apply pending commands, then render one mono block.
    pub fn render_block(&mut self, out: &mut [f32]) {
        while let Some(msg) = self.rx.pop() {
            self.handle_message(msg);
        }

        out.fill(0.0);

        let block_start = self.frame;
        let sample_rate = self.sample_rate;
        for voice in &mut self.voices {
            for (i, sample) in out.iter_mut().enumerate() {
                if block_start + (i as u64) < voice.start_frame {
                    continue;
                }
                if !voice.envelope.is_active() {
                    break;
                }
                *sample += voice.osc.next_sample(sample_rate) * voice.envelope.next_sample();
            }
        }

        // Finished and cancelled voices free their slot.
        self.voices.retain(|v| v.envelope.is_active());
        self.frame += out.len() as u64;
    }

    pub fn handle_message(&mut self, msg: ToneMessage) {
        match msg {
            ToneMessage::Start { tone, .. } => self.start(tone),
            ToneMessage::StopAll => {
                for voice in &mut self.voices {
                    voice.envelope.cut();
                }
            }
        }
    }

    fn start(&mut self, tone: ScheduledTone) {
        if self.voices.len() >= self.max_voices {
            // Growing the Vec would allocate on the audio thread.
            self.dropped += 1;
            return;
        }

        let scheduled = (tone.start * f64::from(self.sample_rate)).round().max(0.0) as u64;
        self.voices.push(ToneVoice {
            osc: Oscillator::new(tone.waveform, tone.frequency_hz),
            envelope: ToneEnvelope::new(tone.envelope, tone.duration as f32, self.sample_rate),
            // A start time already in the past plays as soon as possible.
            start_frame: scheduled.max(self.frame),
        });
    }

    /// Seconds rendered so far.
    pub fn current_time(&self) -> f64 {
        self.frame as f64 / f64::from(self.sample_rate)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Tones that are sounding or still waiting for their start frame.
    pub fn pending_tones(&self) -> usize {
        self.voices.len()
    }

    /// Tones rejected because every voice slot was in use.
    pub fn dropped_tones(&self) -> u64 {
        self.dropped
    }

    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.rx
    }
}
