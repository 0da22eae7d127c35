//! The playback manager: owner of the shared audio context and the single
//! active session.
//!
//! ```text
//!            play (≥1 tone)
//!   ┌──────┐ ─────────────→ ┌─────────┐
//!   │ Idle │                │ Playing │
//!   └──────┘ ←───────────── └─────────┘
//!        teardown(Stopped | Superseded | Completed)
//! ```
//!
//! Every exit from Playing runs the same teardown: stop every tone the
//! session started, drop the session (and with it the end-of-life deadline),
//! then notify observers once.
//!
//! Nothing here blocks or spawns. The end-of-life timer is a deadline on the
//! audio context's clock, checked whenever the host calls
//! [`PlaybackManager::poll`] from its event loop.

use tracing::{debug, warn};

use crate::{
    config::PlayerConfig,
    engine::{AudioContext, ScheduledTone},
    error::AudioError,
    rtttl::{decode, DecodedTune},
};

use super::{
    observer::{Observers, PlaybackObserver, StateChange, SubscriptionId, Transition},
    session::{PlaybackHandle, PlaybackSession, PlaybackState, SessionEnd},
};

type Opener<C> = Box<dyn FnMut() -> Result<C, AudioError>>;

/// Opened on first use, then kept for the life of the manager.
struct SharedContext<C> {
    context: Option<C>,
    opener: Opener<C>,
}

impl<C: AudioContext> SharedContext<C> {
    /// The context, opening it if needed and resuming it if suspended.
    fn acquire(&mut self) -> Result<&mut C, AudioError> {
        let context = match self.context.take() {
            Some(context) => context,
            None => {
                let context = (self.opener)()?;
                debug!("audio context opened");
                context
            }
        };
        let context = self.context.insert(context);
        if context.is_suspended() {
            context.resume()?;
        }
        Ok(context)
    }
}

pub struct PlaybackManager<C: AudioContext> {
    config: PlayerConfig,
    context: SharedContext<C>,
    active: Option<PlaybackSession>,
    observers: Observers,
}

impl<C: AudioContext> PlaybackManager<C> {
    /// The context is opened by `opener` on the first `play`. If opening
    /// fails, that `play` returns `None` and the next one tries again.
    pub fn new<F>(config: PlayerConfig, opener: F) -> Self
    where
        F: FnMut() -> Result<C, AudioError> + 'static,
    {
        Self {
            config,
            context: SharedContext {
                context: None,
                opener: Box::new(opener),
            },
            active: None,
            observers: Observers::default(),
        }
    }

    /// Use an already-open context.
    pub fn with_context(config: PlayerConfig, context: C) -> Self {
        Self {
            config,
            context: SharedContext {
                context: Some(context),
                opener: Box::new(|| Err(AudioError::NoOutputDevice)),
            },
            active: None,
            observers: Observers::default(),
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// The shared context, if it has been opened.
    pub fn context(&self) -> Option<&C> {
        self.context.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut C> {
        self.context.context.as_mut()
    }

    /// Decode `source` and play it as `id`.
    ///
    /// Whatever was playing is stopped first, even when `source` turns out
    /// to have nothing playable. Returns `None` (and starts nothing) for
    /// text that does not decode, decodes to zero tones, or when the audio
    /// output cannot be opened.
    pub fn play(&mut self, source: &str, id: impl Into<String>) -> Option<PlaybackHandle> {
        let id = id.into();
        self.teardown(SessionEnd::Superseded);

        let tune = match decode(source) {
            Some(tune) if !tune.is_empty() => tune,
            _ => {
                debug!(%id, "nothing to play");
                return None;
            }
        };

        self.start(tune, id)
    }

    /// Stop `id` if it is the one playing, otherwise play it.
    pub fn toggle(&mut self, source: &str, id: &str) -> Option<PlaybackHandle> {
        if self.is_playing(id) {
            self.stop();
            None
        } else {
            self.play(source, id)
        }
    }

    /// Stop the active session. Does nothing when idle.
    pub fn stop(&mut self) {
        self.teardown(SessionEnd::Stopped);
    }

    pub fn is_playing(&self, id: &str) -> bool {
        self.active_id() == Some(id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_ref().map(PlaybackSession::id)
    }

    pub fn active_session(&self) -> Option<&PlaybackSession> {
        self.active.as_ref()
    }

    pub fn state(&self) -> PlaybackState {
        if self.active.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }

    /// Seconds until the active session tears itself down.
    pub fn time_remaining(&self) -> Option<f64> {
        let now = self.context()?.current_time();
        self.active
            .as_ref()
            .map(|session| (session.deadline() - now).max(0.0))
    }

    pub fn subscribe(&mut self, observer: impl PlaybackObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Fire the end-of-life timer if it is due. Returns the id of the
    /// session that completed, if any.
    pub fn poll(&mut self) -> Option<String> {
        let now = self.context()?.current_time();
        let session = self.active.as_ref().filter(|s| s.is_due(now))?;
        let id = session.id().to_string();
        self.teardown(SessionEnd::Completed);
        Some(id)
    }

    fn start(&mut self, tune: DecodedTune, id: String) -> Option<PlaybackHandle> {
        let context = match self.context.acquire() {
            Ok(context) => context,
            Err(err) => {
                warn!(%err, %id, "audio output unavailable");
                return None;
            }
        };

        let now = context.current_time();
        let mut offset = now + self.config.startup_latency;
        let mut handles = Vec::with_capacity(tune.len());
        let mut refused = 0usize;

        for tone in tune.tones() {
            let duration = tone.duration_secs;
            // Degenerate tempos produce durations that cannot be scheduled.
            if !(duration.is_finite() && duration > 0.0) {
                continue;
            }
            let frequency_hz = tone.frequency_hz as f32;
            // Extreme octaves overflow f32 and would render NaN; they sound as rests.
            if !tone.is_rest() && frequency_hz.is_finite() {
                let scheduled = ScheduledTone {
                    frequency_hz,
                    start: offset,
                    duration,
                    waveform: self.config.waveform,
                    envelope: self.config.envelope,
                };
                match context.start_tone(scheduled) {
                    Some(handle) => handles.push(handle),
                    None => refused += 1,
                }
            }
            offset += duration;
        }

        if refused > 0 {
            warn!(%id, refused, "audio output refused tones, they will be silent");
        }

        let total_duration = offset - now;
        let deadline = offset + self.config.teardown_margin;
        debug!(
            %id,
            name = tune.name(),
            tones = tune.len(),
            duration_secs = total_duration,
            "playback started"
        );

        let session = PlaybackSession::new(id.clone(), handles, now, total_duration, deadline);
        let session = self.active.insert(session);
        self.observers.notify(&StateChange::new(
            Transition::Started,
            session.id(),
            Some(session.id()),
        ));

        Some(PlaybackHandle {
            id,
            tone_count: tune.len(),
            total_duration,
            started_at: now,
        })
    }

    fn teardown(&mut self, reason: SessionEnd) {
        let Some(mut session) = self.active.take() else {
            return;
        };
        let Some(context) = self.context.context.as_mut() else {
            return;
        };
        if !session.cancel(context) {
            return;
        }

        debug!(id = session.id(), ?reason, "playback ended");
        self.observers.notify(&StateChange::new(
            Transition::Ended(reason),
            session.id(),
            None,
        ));
    }
}
