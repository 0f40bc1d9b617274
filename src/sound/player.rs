//! Sound player implementation using rodio.
//!
//! This module provides the `RodioSoundPlayer` which uses the rodio v0.20
//! audio library for cross-platform sound playback.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{SoundSource, FALLBACK_TONE_HZ};

/// Length of the synthesized fallback tone.
const TONE_DURATION: Duration = Duration::from_millis(600);
/// Volume of the synthesized fallback tone.
const TONE_VOLUME: f32 = 0.25;

/// A sound player that uses rodio for audio playback.
///
/// Sound playback is non-blocking; sounds continue playing in the background.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Opens the default audio output.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a sound from the given source.
    ///
    /// If a file cannot be opened or decoded, a short tone is played in its
    /// place.
    ///
    /// # Errors
    ///
    /// Returns an error if no sink can be created or the file fails in a way
    /// a tone cannot cover.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::File { path, name } => {
                debug!("Playing sound file: {}", name);
                match self.play_file(path) {
                    Ok(()) => Ok(()),
                    Err(e) if e.should_fallback_to_tone() => {
                        warn!("Failed to play '{}': {}, falling back to tone", name, e);
                        self.play_tone(FALLBACK_TONE_HZ)
                    }
                    Err(e) => Err(e),
                }
            }
            SoundSource::Tone { name, frequency_hz } => {
                debug!("Playing tone: {}", name);
                self.play_tone(*frequency_hz)
            }
        }
    }

    /// Plays a sound file from the filesystem.
    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(format!("{}: {}", path.display(), e)))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach(); // Non-blocking: sound continues after function returns

        debug!("Sound playback started (detached)");
        Ok(())
    }

    /// Plays a short sine tone.
    fn play_tone(&self, frequency_hz: u32) -> Result<(), SoundError> {
        let tone = SineWave::new(frequency_hz as f32)
            .take_duration(TONE_DURATION)
            .amplify(TONE_VOLUME);

        let sink = self.new_sink()?;
        sink.append(tone);
        sink.detach();

        debug!("Tone playback started (detached)");
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player() -> Option<Rc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(Rc::new(player)),
        Err(e) => {
            warn!("Audio not available, sound disabled: {} ({})", e, e.suggestion());
            None
        }
    }
}
