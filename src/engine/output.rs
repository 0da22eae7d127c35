//! Real-time output over cpal.
//!
//! The control side keeps the rtrb producer (behind a [`CommandSender`]); the
//! audio callback owns the consumer and a [`ToneRenderer`]. The callback
//! publishes how many frames it has rendered through an atomic, which is the
//! context's clock, and how many tones it had no voice slot for.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, RingBuffer};
use tracing::{debug, warn};

use crate::{config::PlayerConfig, error::AudioError, MAX_BLOCK_SIZE};

use super::{
    message::{CommandSender, ToneMessage},
    renderer::ToneRenderer,
    AudioContext, ScheduledTone, ToneHandle,
};

pub struct CpalContext {
    stream: cpal::Stream,
    commands: CommandSender,
    frames: Arc<AtomicU64>,
    dropped: Arc<AtomicU64>,
    /// Last `dropped` value that was logged.
    dropped_reported: u64,
    sample_rate: f32,
    channels: usize,
    suspended: bool,
    next_handle: u64,
}

impl CpalContext {
    /// Open the default output device and start the stream.
    pub fn open(config: &PlayerConfig) -> Result<Self, AudioError> {
        Self::open_inner(config, None)
    }

    /// Like [`CpalContext::open`], also copying every rendered mono sample
    /// into `scope` (dropped when it is full) for visualization.
    pub fn open_with_scope(
        config: &PlayerConfig,
        scope: Producer<f32>,
    ) -> Result<Self, AudioError> {
        Self::open_inner(config, Some(scope))
    }

    fn open_inner(
        config: &PlayerConfig,
        mut scope: Option<Producer<f32>>,
    ) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let supported = device.default_output_config()?;

        if supported.sample_format() != cpal::SampleFormat::F32 {
            return Err(AudioError::UnsupportedSampleFormat(format!(
                "{:?}",
                supported.sample_format()
            )));
        }

        let sample_rate = supported.sample_rate().0 as f32;
        let channels = (supported.channels() as usize).max(1);
        let stream_config = supported.config();

        // Room for at least one tone plus the StopAll reserved behind it.
        let (tx, rx) = RingBuffer::<ToneMessage>::new(config.queue_capacity.max(2));
        let mut renderer = ToneRenderer::new(sample_rate, config.max_voices, rx);

        let frames = Arc::new(AtomicU64::new(0));
        let frames_clock = Arc::clone(&frames);
        let dropped = Arc::new(AtomicU64::new(0));
        let dropped_count = Arc::clone(&dropped);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    renderer.render_block(block);

                    // Mono to every channel
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    if let Some(scope) = scope.as_mut() {
                        for &s in block.iter() {
                            if scope.push(s).is_err() {
                                break;
                            }
                        }
                    }

                    frames_written += frames_to_render;
                }

                frames_clock.store(renderer.frame(), Ordering::Release);
                dropped_count.store(renderer.dropped_tones(), Ordering::Relaxed);
            },
            |err| warn!(%err, "audio stream error"),
            None,
        )?;

        stream.play()?;
        debug!(sample_rate, channels, "audio output opened");

        Ok(Self {
            stream,
            commands: CommandSender::new(tx),
            frames,
            dropped,
            dropped_reported: 0,
            sample_rate,
            channels,
            suspended: false,
            next_handle: 0,
        })
    }

    /// Pause the stream. The clock stops with it.
    pub fn suspend(&mut self) -> Result<(), AudioError> {
        if !self.suspended {
            self.stream.pause()?;
            self.suspended = true;
        }
        Ok(())
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Tones the audio thread had no free voice slot for, so far.
    pub fn dropped_tones(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn report_dropped(&mut self) {
        let dropped = self.dropped_tones();
        if dropped > self.dropped_reported {
            warn!(
                dropped = dropped - self.dropped_reported,
                "voice pool full, tones were not played"
            );
            self.dropped_reported = dropped;
        }
    }
}

impl AudioContext for CpalContext {
    fn current_time(&self) -> f64 {
        self.frames.load(Ordering::Acquire) as f64 / f64::from(self.sample_rate)
    }

    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        if self.suspended {
            self.stream.play()?;
            self.suspended = false;
            debug!("audio output resumed");
        }
        Ok(())
    }

    fn start_tone(&mut self, tone: ScheduledTone) -> Option<ToneHandle> {
        self.report_dropped();
        let handle = ToneHandle(self.next_handle);
        if !self.commands.start(handle, tone) {
            return None;
        }
        self.next_handle += 1;
        Some(handle)
    }

    fn stop_all(&mut self) {
        if !self.commands.stop_all() {
            debug!("stop already queued");
        }
    }
}
