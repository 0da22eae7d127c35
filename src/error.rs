//! Error types.
//!
//! Decoding never fails with an error (malformed input decodes to `None`),
//! so these only cover the audio device and file loading.

/// Failures opening or driving the audio output.
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    /// The host has no default output device.
    #[error("no default output device available")]
    NoOutputDevice,

    #[error("failed to fetch default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("failed to pause output stream: {0}")]
    PauseStream(#[from] cpal::PauseStreamError),

    /// The device's default config is not 32-bit float.
    #[error("unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),
}

/// Failures loading a catalog or config file.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog parsed but holds no ringtones.
    #[error("catalog contains no ringtones")]
    EmptyCatalog,
}
