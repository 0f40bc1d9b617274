//! Display utilities for the interval timer.
//!
//! This module produces the text shown on screen:
//! - Countdown formatting
//! - Configuration prompts
//! - The running status line
//! - Error messages

use crate::types::{Phase, TimerState};

/// Title shown above the running timer.
const TITLE: &str = "Pomodoro";

/// Formats remaining time for display.
///
/// Non-positive values read `Done` whether or not the timer is paused.
/// Minutes are neither padded nor rolled over into hours.
pub fn format_countdown(remaining_seconds: i64, paused: bool) -> String {
    if remaining_seconds <= 0 {
        return "Done".to_string();
    }

    let (minutes, seconds) = Display::format_time(remaining_seconds);
    let mut display = format!("{}:{:02}", minutes, seconds);
    if paused {
        display.push_str(" (paused)");
    }
    display
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for terminal output.
pub struct Display;

impl Display {
    /// Heading for the configuration screen.
    pub fn config_heading() -> &'static str {
        "Configure the timer (press Enter to keep the value in brackets)"
    }

    /// Prompt for a single configuration field.
    pub fn prompt(label: &str, default: i64) -> String {
        format!("{} [{}]: ", label, default)
    }

    /// Message line for the current phase.
    pub fn phase_message(phase: Phase) -> String {
        format!("{} · {}", TITLE, phase)
    }

    /// Controls available in the given state.
    ///
    /// Pause is offered only while counting down, restart only once done.
    pub fn controls(state: &TimerState) -> &'static str {
        if state.is_done() {
            "[r] restart  [q] quit"
        } else if state.paused {
            "[p] resume  [q] quit"
        } else {
            "[p] pause  [q] quit"
        }
    }

    /// Full status line for the running screen.
    pub fn status_line(state: &TimerState) -> String {
        format!(
            "{} | completed: {} | {} | {}",
            Self::phase_message(state.phase),
            state.completed_work_count,
            format_countdown(i64::from(state.remaining_seconds), state.paused),
            Self::controls(state),
        )
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Formats seconds as (minutes, seconds).
    fn format_time(total_seconds: i64) -> (i64, i64) {
        (total_seconds / 60, total_seconds % 60)
    }
}

// ============================================================================
// Tests
// ============================================================================
