//! RTTTL (Ring Tone Text Transfer Language) decoding.
//!
//! An RTTTL string has three colon-separated parts:
//!
//! ```text
//! Nokia:d=4,o=5,b=180:8e6,8d6,4f#,4g#,8c#6,8b,4d,4e
//! ^^^^^ ^^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//! name  header        comma-separated notes
//! ```
//!
//! Decoding is a pure function from text to a [`DecodedTune`]; timing and
//! audio are handled by [`crate::playback`].

pub mod decoder;
pub mod defaults;
pub mod pitch;
pub mod token;

pub use decoder::{decode, DecodedTune, ToneEvent};
pub use defaults::TuneDefaults;
pub use pitch::NoteLetter;
pub use token::NoteToken;
