//! RTTTL ringtone decoding and single-session tone playback.
//!
//! ```no_run
//! use rtttl_player::{engine::OfflineContext, PlaybackManager, PlayerConfig};
//!
//! let config = PlayerConfig::default();
//! let context = OfflineContext::new(48_000.0, &config);
//! let mut player = PlaybackManager::with_context(config, context);
//!
//! player.play("Beep:d=8,o=6,b=160:c,e,g", "beep");
//! assert!(player.is_playing("beep"));
//! ```

#[cfg(feature = "serde")]
pub mod catalog; // Pre-fetched ringtone records
pub mod config;
pub mod dsp;
pub mod engine; // Audio output seam and backends
pub mod error;
pub mod playback; // Session scheduling and notification
pub mod rtttl; // Text → tones

pub use config::PlayerConfig;
pub use error::{AudioError, LoadError};
pub use playback::{PlaybackHandle, PlaybackManager, StateChange, Transition};
pub use rtttl::{decode, DecodedTune, ToneEvent};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
