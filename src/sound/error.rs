//! Sound system error types.
//!
//! Every variant is recoverable: the timer keeps running whatever the
//! audio layer reports.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("failed to decode sound file: {0}")]
    DecodeError(String),

    /// Failed to open a sink on the output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// The file extension is not one the decoder handles.
    #[error("unsupported sound format: {0}")]
    UnsupportedFormat(String),
}

impl SoundError {
    /// Returns true if playback should fall back to the synthesized tone.
    #[must_use]
    pub fn should_fallback_to_tone(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "connect an audio output device",
            Self::FileNotFound(_) => "check --assets-dir or the sound file paths",
            Self::DecodeError(_) => "the sound file may be corrupted",
            Self::StreamError(_) => "check the system audio settings",
            Self::UnsupportedFormat(_) => "use a wav, mp3, flac or ogg file",
        }
    }
}
