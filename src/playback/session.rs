//! One in-progress playback of a decoded tune.

use crate::engine::{AudioContext, ToneHandle};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// `stop()` was called.
    Stopped,
    /// A new `play()` replaced it.
    Superseded,
    /// The end-of-life timer fired after the last tone.
    Completed,
}

/// Coarse player state: at most one session is ever live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
}

/// What `play()` hands back when a tune was scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackHandle {
    pub id: String,
    /// Number of decoded tones, rests included.
    pub tone_count: usize,
    /// Seconds from the `play()` call to the end of the last tone,
    /// startup latency included.
    pub total_duration: f64,
    /// Context time at which `play()` scheduled the tune.
    pub started_at: f64,
}

#[derive(Debug)]
pub struct PlaybackSession {
    id: String,
    handles: Vec<ToneHandle>,
    started_at: f64,
    total_duration: f64,
    /// Context time at which the session tears itself down.
    deadline: f64,
    cancelled: bool,
}

impl PlaybackSession {
    pub(crate) fn new(
        id: String,
        handles: Vec<ToneHandle>,
        started_at: f64,
        total_duration: f64,
        deadline: f64,
    ) -> Self {
        Self {
            id,
            handles,
            started_at,
            total_duration,
            deadline,
            cancelled: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Tones still owned by the session.
    pub fn handles(&self) -> &[ToneHandle] {
        &self.handles
    }

    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn deadline(&self) -> f64 {
        self.deadline
    }

    pub fn is_due(&self, now: f64) -> bool {
        now >= self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop every tone the session started and release its handles. Runs
    /// once; later calls return `false` and touch nothing.
    ///
    /// At most one session exists per context, so silencing everything the
    /// context holds silences exactly this session.
    pub(crate) fn cancel<C: AudioContext>(&mut self, context: &mut C) -> bool {
        if self.cancelled {
            return false;
        }
        self.cancelled = true;
        context.stop_all();
        self.handles.clear();
        true
    }
}
