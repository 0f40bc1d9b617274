//! Sound playback for phase-expiry notifications.
//!
//! Playback is best-effort. The timer never depends on it: missing files
//! fall back to a synthesized tone, and every other failure is logged by
//! the caller and dropped.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Injected into the app
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundAssets    │────▶│   Audio files    │
//! │  (per phase)     │     │  (assets dir)    │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Sine tone       │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use pomotimer::sound::{RodioSoundPlayer, SoundAssets};
//! use pomotimer::types::Phase;
//!
//! let player = RodioSoundPlayer::new().expect("audio init");
//! let assets = SoundAssets::from_dir(Path::new("assets"));
//! player.play(assets.for_phase(Phase::Work)).expect("playback failed");
//! ```

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{SoundAssets, SoundSource, FALLBACK_TONE_HZ, RELAX_ASSET, WORK_ASSET};

/// Plays the sound for a phase boundary.
///
/// The app holds one of these behind an `Rc`; tests inject
/// `MockSoundPlayer` instead of the rodio backend.
pub trait SoundPlayer {
    /// Starts playback without blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if playback cannot start.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::StreamError("mock failure".to_string()));
        }
        if let Ok(mut calls) = self.play_calls.lock() {
            calls.push(source.clone());
        }
        Ok(())
    }
}
