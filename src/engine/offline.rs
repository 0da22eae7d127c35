//! Offline audio context.
//!
//! Time only moves when audio is rendered, which makes playback fully
//! deterministic: render 0.5 s and the clock reads 0.5 s. The context also
//! keeps a log of the tones it was asked to start and stop.

use std::collections::VecDeque;

use crate::{config::PlayerConfig, error::AudioError, MAX_BLOCK_SIZE};

use super::{
    message::ToneMessage, renderer::ToneRenderer, AudioContext, ScheduledTone, ToneHandle,
};

pub struct OfflineContext {
    renderer: ToneRenderer<VecDeque<ToneMessage>>,
    next_handle: u64,
    suspended: bool,
    resumes: usize,
    started: Vec<ScheduledTone>,
    stop_alls: usize,
}

impl OfflineContext {
    pub fn new(sample_rate: f32, config: &PlayerConfig) -> Self {
        Self {
            renderer: ToneRenderer::new(
                sample_rate,
                config.max_voices,
                VecDeque::with_capacity(config.queue_capacity),
            ),
            next_handle: 0,
            suspended: false,
            resumes: 0,
            started: Vec::new(),
            stop_alls: 0,
        }
    }

    /// Render `frames` mono samples, advancing the clock.
    ///
    /// A suspended context produces nothing and its clock stands still.
    pub fn render(&mut self, frames: usize) -> Vec<f32> {
        if self.suspended {
            return Vec::new();
        }

        let mut out = vec![0.0; frames];
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.renderer.render_block(block);
        }
        out
    }

    /// Render roughly `seconds` of audio.
    pub fn advance(&mut self, seconds: f64) -> Vec<f32> {
        let frames = (seconds.max(0.0) * f64::from(self.renderer.sample_rate())).round() as usize;
        self.render(frames)
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn sample_rate(&self) -> f32 {
        self.renderer.sample_rate()
    }

    /// How many times a suspended context was resumed.
    pub fn resume_count(&self) -> usize {
        self.resumes
    }

    /// Every tone accepted by `start_tone`, in call order.
    pub fn started_tones(&self) -> &[ScheduledTone] {
        &self.started
    }

    /// How many times `stop_all` was called.
    pub fn stop_all_count(&self) -> usize {
        self.stop_alls
    }

    /// Tones held by the renderer as of the last render.
    pub fn pending_tones(&self) -> usize {
        self.renderer.pending_tones()
    }
}

impl AudioContext for OfflineContext {
    fn current_time(&self) -> f64 {
        self.renderer.current_time()
    }

    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn resume(&mut self) -> Result<(), AudioError> {
        if self.suspended {
            self.suspended = false;
            self.resumes += 1;
        }
        Ok(())
    }

    fn start_tone(&mut self, tone: ScheduledTone) -> Option<ToneHandle> {
        let handle = ToneHandle(self.next_handle);
        self.next_handle += 1;
        self.renderer
            .receiver_mut()
            .push_back(ToneMessage::Start { handle, tone });
        self.started.push(tone);
        Some(handle)
    }

    fn stop_all(&mut self) {
        self.renderer.receiver_mut().push_back(ToneMessage::StopAll);
        self.stop_alls += 1;
    }
}
