//! Timer engine for the interval timer.
//!
//! This module provides the core timer functionality:
//! - Countdown driven by an external tick
//! - Work → Relax → Work transitions on explicit advance
//! - Pause / resume while counting down
//! - Event publishing for the display and sound layers

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::types::{Phase, TimerConfig, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// One tick elapsed while counting down
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// The countdown for a phase hit zero
    PhaseExpired {
        /// Phase that expired
        phase: Phase,
    },
    /// The user moved on to the next phase
    Advanced {
        /// Phase now active
        phase: Phase,
        /// Duration of the new phase
        remaining_seconds: u32,
        /// Completed work phases so far
        completed_work_count: u32,
    },
    /// Timer paused
    Paused,
    /// Timer resumed
    Resumed,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the countdown state for an accepted configuration.
#[derive(Debug)]
pub struct TimerEngine {
    config: TimerConfig,
    state: TimerState,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates an engine in its initial state (work phase, running).
    pub fn new(config: TimerConfig, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(&config),
            config,
            event_tx,
        }
    }

    /// Handles one tick of the external clock.
    ///
    /// Returns the phase that expired on this tick, if any.
    pub fn tick(&mut self) -> Result<Option<Phase>> {
        if self.state.paused {
            return Ok(None);
        }

        let was_counting = !self.state.is_done();
        let expired = self.state.tick();

        if was_counting {
            self.event_tx
                .send(TimerEvent::Tick {
                    remaining_seconds: self.state.remaining_seconds,
                })
                .context("Failed to send tick event")?;
        }

        if let Some(phase) = expired {
            tracing::debug!(phase = %phase, "phase expired");
            self.event_tx
                .send(TimerEvent::PhaseExpired { phase })
                .context("Failed to send phase expired event")?;
        }

        Ok(expired)
    }

    /// Moves to the next phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the current phase has not expired yet.
    pub fn advance(&mut self) -> Result<()> {
        if !self.state.expired {
            anyhow::bail!("Cannot advance while the countdown is running");
        }

        self.state.advance(&self.config);
        tracing::debug!(
            phase = %self.state.phase,
            remaining_seconds = self.state.remaining_seconds,
            completed = self.state.completed_work_count,
            "advanced to next phase"
        );

        self.event_tx
            .send(TimerEvent::Advanced {
                phase: self.state.phase,
                remaining_seconds: self.state.remaining_seconds,
                completed_work_count: self.state.completed_work_count,
            })
            .context("Failed to send advanced event")?;

        Ok(())
    }

    /// Pauses or resumes the countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the current phase is already done.
    pub fn toggle_pause(&mut self) -> Result<()> {
        if self.state.is_done() {
            anyhow::bail!("Cannot pause a finished phase");
        }

        self.state.toggle_pause();

        let event = if self.state.paused {
            TimerEvent::Paused
        } else {
            TimerEvent::Resumed
        };
        self.event_tx
            .send(event)
            .context("Failed to send pause event")?;

        Ok(())
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the accepted configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }
}

// ============================================================================
// Tests
// ============================================================================
