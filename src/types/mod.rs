//! Core data types for the interval timer.
//!
//! This module defines the data structures used for:
//! - Phase tracking (work / relax)
//! - Timer configuration and the configuration gate
//! - Countdown state and its transitions

use thiserror::Error;

/// Default long interval in minutes.
pub const DEFAULT_LONG_MINUTES: i64 = 25;
/// Default short interval in minutes.
pub const DEFAULT_SHORT_MINUTES: i64 = 5;
/// Default number of work phases before a long rest.
pub const DEFAULT_CYCLE_LENGTH: i64 = 4;

// ============================================================================
// Phase
// ============================================================================

/// Represents the current phase of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Counting down a work interval
    #[default]
    Work,
    /// Counting down a rest interval
    Relax,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Relax => "relax",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Reasons the configuration gate rejects input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A field did not parse as an integer.
    #[error("{field} is not a number: {value:?}")]
    NotANumber {
        /// Field name
        field: &'static str,
        /// Raw input
        value: String,
    },

    /// A field was zero or negative.
    #[error("{field} must be greater than zero")]
    NonPositive {
        /// Field name
        field: &'static str,
    },

    /// The short interval is longer than the long interval.
    #[error("short interval must not exceed the long interval")]
    ShortExceedsLong,

    /// A field was too large to represent.
    #[error("{field} is out of range")]
    OutOfRange {
        /// Field name
        field: &'static str,
    },
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Accepted timer configuration. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    long_seconds: u32,
    short_seconds: u32,
    cycle_length: u32,
}

impl TimerConfig {
    /// Validates raw minute inputs and builds the configuration.
    ///
    /// Rejects non-positive values and a short interval longer than the
    /// long one.
    pub fn validate(
        long_minutes: i64,
        short_minutes: i64,
        cycle_length: i64,
    ) -> Result<Self, ConfigError> {
        if long_minutes <= 0 {
            return Err(ConfigError::NonPositive { field: "long" });
        }
        if short_minutes <= 0 {
            return Err(ConfigError::NonPositive { field: "short" });
        }
        if cycle_length <= 0 {
            return Err(ConfigError::NonPositive { field: "cycle" });
        }
        if short_minutes > long_minutes {
            return Err(ConfigError::ShortExceedsLong);
        }

        Ok(Self {
            long_seconds: minutes_to_seconds(long_minutes, "long")?,
            short_seconds: minutes_to_seconds(short_minutes, "short")?,
            cycle_length: u32::try_from(cycle_length)
                .map_err(|_| ConfigError::OutOfRange { field: "cycle" })?,
        })
    }

    /// Duration of a work phase and of every cycle-ending rest, in seconds.
    pub fn long_seconds(&self) -> u32 {
        self.long_seconds
    }

    /// Duration of an ordinary rest, in seconds.
    pub fn short_seconds(&self) -> u32 {
        self.short_seconds
    }

    /// Number of completed work phases per cycle.
    pub fn cycle_length(&self) -> u32 {
        self.cycle_length
    }
}

fn minutes_to_seconds(minutes: i64, field: &'static str) -> Result<u32, ConfigError> {
    minutes
        .checked_mul(60)
        .and_then(|s| u32::try_from(s).ok())
        .ok_or(ConfigError::OutOfRange { field })
}

// ============================================================================
// ConfigInput
// ============================================================================

/// Raw values collected by the configuration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigInput {
    /// Long interval in minutes
    pub long_minutes: i64,
    /// Short interval in minutes
    pub short_minutes: i64,
    /// Cycle length
    pub cycle_length: i64,
}

impl Default for ConfigInput {
    fn default() -> Self {
        Self {
            long_minutes: DEFAULT_LONG_MINUTES,
            short_minutes: DEFAULT_SHORT_MINUTES,
            cycle_length: DEFAULT_CYCLE_LENGTH,
        }
    }
}

impl ConfigInput {
    /// Parses three text fields. Blank fields fall back to `self`.
    pub fn parse(&self, long: &str, short: &str, cycle: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            long_minutes: parse_field(long, "long", self.long_minutes)?,
            short_minutes: parse_field(short, "short", self.short_minutes)?,
            cycle_length: parse_field(cycle, "cycle", self.cycle_length)?,
        })
    }

    /// Runs the values through the configuration gate.
    pub fn accept(&self) -> Result<TimerConfig, ConfigError> {
        TimerConfig::validate(self.long_minutes, self.short_minutes, self.cycle_length)
    }
}

fn parse_field(raw: &str, field: &'static str, default: i64) -> Result<i64, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse().map_err(|_| ConfigError::NotANumber {
        field,
        value: raw.to_string(),
    })
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the live countdown state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    /// Current phase
    pub phase: Phase,
    /// Remaining seconds in the current phase
    pub remaining_seconds: u32,
    /// Whether the expiry notification for this phase has fired
    pub expired: bool,
    /// Whether the countdown is paused
    pub paused: bool,
    /// Number of completed work phases
    pub completed_work_count: u32,
}

impl TimerState {
    /// Creates the initial state for an accepted configuration.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            phase: Phase::Work,
            remaining_seconds: config.long_seconds(),
            expired: false,
            paused: false,
            completed_work_count: 0,
        }
    }

    /// Advances the countdown by one tick.
    ///
    /// Returns the phase that expired on this tick, if any. Expiry is
    /// reported once, on the tick that brings the countdown to zero.
    pub fn tick(&mut self) -> Option<Phase> {
        if self.paused || self.expired {
            return None;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }
        self.expired = true;
        Some(self.phase)
    }

    /// Returns true once the countdown has reached zero.
    pub fn is_done(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Moves to the next phase. The new phase always starts paused.
    ///
    /// Callers must check `expired` first.
    pub fn advance(&mut self, config: &TimerConfig) {
        self.paused = true;
        self.expired = false;

        match self.phase {
            Phase::Work => {
                self.completed_work_count += 1;
                self.remaining_seconds = if self.completed_work_count % config.cycle_length() == 0 {
                    config.long_seconds()
                } else {
                    config.short_seconds()
                };
                self.phase = Phase::Relax;
            }
            Phase::Relax => {
                // Work always runs for the long interval.
                self.phase = Phase::Work;
                self.remaining_seconds = config.long_seconds();
            }
        }
    }

    /// Flips the paused flag.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}

// ============================================================================
// Tests
// ============================================================================
