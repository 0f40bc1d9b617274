//! Interval Timer Library
//!
//! This library provides the core functionality for the `pomotimer` CLI.
//! It includes:
//! - Configuration gate and countdown state (`types`)
//! - Timer engine publishing phase events (`timer`)
//! - Terminal front end driving the engine (`app`)
//! - CLI command parsing and display utilities (`cli`)
//! - Sound playback for phase expiry (`sound`)

pub mod app;
pub mod cli;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use app::{App, AppOptions, AppState};
pub use cli::format_countdown;
pub use timer::{TimerEngine, TimerEvent};
pub use types::{ConfigError, ConfigInput, Phase, TimerConfig, TimerState};

// Re-export sound types
pub use sound::{
    try_create_player, MockSoundPlayer, RodioSoundPlayer, SoundAssets, SoundError, SoundPlayer,
    SoundSource,
};
