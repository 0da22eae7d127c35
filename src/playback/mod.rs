// Purpose: turn decoded tunes into scheduled tones, one session at a time.
// Sits between the decoder and an AudioContext; owns all "what is playing" state.

pub mod manager;
pub mod observer;
pub mod session;

pub use manager::PlaybackManager;
pub use observer::{PlaybackObserver, StateChange, SubscriptionId, Transition};
pub use session::{PlaybackHandle, PlaybackSession, PlaybackState, SessionEnd};
