//! Command definitions for the interval timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::types::ConfigInput;

// ============================================================================
// CLI Structure
// ============================================================================

/// Work/relax interval timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomotimer",
    version,
    about = "Single-screen work/relax interval timer",
    long_about = "Counts down a work interval, then a rest interval, and plays a sound \
                  when each one ends. Every N-th rest uses the long interval.",
    args_conflicts_with_subcommands = true,
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (runs the timer when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Timer options
    #[command(flatten)]
    pub run: RunArgs,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Arguments
// ============================================================================

/// Arguments for running the timer
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Long interval in minutes (work, and every cycle-ending rest)
    #[arg(short, long, allow_negative_numbers = true)]
    pub long: Option<i64>,

    /// Short interval in minutes (ordinary rest)
    #[arg(short, long, allow_negative_numbers = true)]
    pub short: Option<i64>,

    /// Number of work intervals before a long rest
    #[arg(short, long, allow_negative_numbers = true)]
    pub cycle: Option<i64>,

    /// Directory holding the bundled notification sounds
    #[arg(long, default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Sound played when a work interval ends
    #[arg(long)]
    pub work_sound: Option<PathBuf>,

    /// Sound played when a rest interval ends
    #[arg(long)]
    pub relax_sound: Option<PathBuf>,

    /// Disable notification sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Tick period in milliseconds
    #[arg(
        long,
        hide = true,
        default_value = "1000",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            long: None,
            short: None,
            cycle: None,
            assets_dir: PathBuf::from("assets"),
            work_sound: None,
            relax_sound: None,
            no_sound: false,
            tick_ms: 1000,
        }
    }
}

impl RunArgs {
    /// Values offered as prompt defaults, with command-line values applied.
    pub fn config_defaults(&self) -> ConfigInput {
        let defaults = ConfigInput::default();
        ConfigInput {
            long_minutes: self.long.unwrap_or(defaults.long_minutes),
            short_minutes: self.short.unwrap_or(defaults.short_minutes),
            cycle_length: self.cycle.unwrap_or(defaults.cycle_length),
        }
    }

    /// True when all three timer values were given on the command line.
    pub fn has_full_config(&self) -> bool {
        self.long.is_some() && self.short.is_some() && self.cycle.is_some()
    }

    /// Tick period.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

// ============================================================================
// Tests
// ============================================================================
