//! Terminal front end for the interval timer.
//!
//! The app is a two-state machine: `Configuring` collects the three timer
//! values and hands them to the configuration gate; `Running` owns the
//! timer engine until the user quits or input ends. There is no way back
//! from `Running` to `Configuring`.
//!
//! A single `tokio::select!` loop multiplexes the tick interval, stdin
//! lines and engine events, so all state changes happen sequentially.

use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cli::{Display, RunArgs};
use crate::sound::{try_create_player, SoundAssets, SoundPlayer};
use crate::timer::{TimerEngine, TimerEvent};
use crate::types::{ConfigInput, Phase, TimerConfig};

/// Labels for the three configuration prompts, in order.
const PROMPTS: [&str; 3] = [
    "long interval (minutes)",
    "short interval (minutes)",
    "cycle length",
];

// ============================================================================
// AppState
// ============================================================================

/// Which screen is active.
#[derive(Debug)]
pub enum AppState {
    /// Collecting timer values
    Configuring,
    /// Counting down
    Running(TimerEngine),
}

impl AppState {
    /// Returns the engine once running.
    pub fn engine(&self) -> Option<&TimerEngine> {
        match self {
            AppState::Configuring => None,
            AppState::Running(engine) => Some(engine),
        }
    }
}

// ============================================================================
// AppOptions
// ============================================================================

/// Everything the app needs besides its input and output.
pub struct AppOptions {
    /// Values shown as prompt defaults
    pub defaults: ConfigInput,
    /// Submit `defaults` to the gate before prompting
    pub preset: bool,
    /// Tick period
    pub tick: Duration,
    /// Sounds for each phase
    pub assets: SoundAssets,
    /// Playback capability, if audio is enabled and available
    pub player: Option<Rc<dyn SoundPlayer>>,
}

impl AppOptions {
    /// Builds options from command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if a sound override has an unsupported format.
    pub fn from_args(args: &RunArgs) -> Result<Self> {
        let mut assets = SoundAssets::from_dir(&args.assets_dir);
        if let Some(path) = &args.work_sound {
            assets = assets.with_override(Phase::Work, path)?;
        }
        if let Some(path) = &args.relax_sound {
            assets = assets.with_override(Phase::Relax, path)?;
        }

        let player: Option<Rc<dyn SoundPlayer>> = if args.no_sound {
            info!("Sound disabled by --no-sound");
            None
        } else {
            try_create_player().map(|p| p as Rc<dyn SoundPlayer>)
        };

        if player.is_some() {
            for path in assets.missing() {
                warn!("Sound file {} not found, a tone will play instead", path.display());
            }
        }

        Ok(Self {
            defaults: args.config_defaults(),
            preset: args.has_full_config(),
            tick: args.tick(),
            assets,
            player,
        })
    }
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            defaults: ConfigInput::default(),
            preset: false,
            tick: Duration::from_secs(1),
            assets: SoundAssets::from_dir(std::path::Path::new("assets")),
            player: None,
        }
    }
}

// ============================================================================
// Screen
// ============================================================================

/// Output side of the app: rendering and sound.
struct Screen<W> {
    output: W,
    assets: SoundAssets,
    player: Option<Rc<dyn SoundPlayer>>,
}

impl<W: Write> Screen<W> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .context("Failed to write to the terminal")
    }

    fn render(&mut self, engine: &TimerEngine) -> Result<()> {
        let line = Display::status_line(engine.state());
        self.write(&format!("\r\x1b[2K{}", line))
    }

    fn handle_event(&mut self, event: TimerEvent, engine: &TimerEngine) -> Result<()> {
        if let TimerEvent::PhaseExpired { phase } = event {
            self.play(phase);
        }
        self.render(engine)
    }

    fn play(&self, phase: Phase) {
        let Some(player) = &self.player else {
            return;
        };
        let source = self.assets.for_phase(phase);
        if let Err(e) = player.play(source) {
            warn!("Could not play '{}': {} ({})", source.name(), e, e.suggestion());
        }
    }
}

// ============================================================================
// App
// ============================================================================

/// Outcome of a typed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

/// The interactive timer.
pub struct App<R, W> {
    input: Lines<R>,
    screen: Screen<W>,
    state: AppState,
    defaults: ConfigInput,
    preset: bool,
    tick: Duration,
}

impl<R, W> App<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// Creates the app on the configuration screen.
    pub fn new(input: R, output: W, options: AppOptions) -> Self {
        Self {
            input: input.lines(),
            screen: Screen {
                output,
                assets: options.assets,
                player: options.player,
            },
            state: AppState::Configuring,
            defaults: options.defaults,
            preset: options.preset,
            tick: options.tick,
        }
    }

    /// Runs until the user quits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        let Some(config) = self.configure().await? else {
            debug!("Input closed on the configuration screen");
            return Ok(());
        };

        info!(
            long_seconds = config.long_seconds(),
            short_seconds = config.short_seconds(),
            cycle_length = config.cycle_length(),
            "Configuration accepted"
        );

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        self.state = AppState::Running(TimerEngine::new(config, event_tx));
        self.run_timer(&mut event_rx).await
    }

    /// Returns the current screen state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Consumes the app and returns its output.
    pub fn into_output(self) -> W {
        self.screen.output
    }

    /// Collects values until the gate accepts them. `None` on end of input.
    async fn configure(&mut self) -> Result<Option<TimerConfig>> {
        if self.preset {
            match self.defaults.accept() {
                Ok(config) => return Ok(Some(config)),
                Err(e) => debug!(reason = %e, "Command-line configuration rejected"),
            }
        }

        self.screen
            .write(&format!("{}\n", Display::config_heading()))?;

        let defaults = [
            self.defaults.long_minutes,
            self.defaults.short_minutes,
            self.defaults.cycle_length,
        ];

        loop {
            let mut fields: [String; 3] = Default::default();
            for ((field, label), default) in fields.iter_mut().zip(PROMPTS).zip(defaults) {
                self.screen.write(&Display::prompt(label, default))?;
                match self.input.next_line().await.context("Failed to read input")? {
                    Some(line) => *field = line,
                    None => return Ok(None),
                }
            }

            let accepted = self
                .defaults
                .parse(&fields[0], &fields[1], &fields[2])
                .and_then(|input| input.accept());
            match accepted {
                Ok(config) => return Ok(Some(config)),
                // Rejection is silent on screen: the prompts simply restart.
                Err(e) => debug!(reason = %e, "Configuration rejected"),
            }
        }
    }

    async fn run_timer(&mut self, event_rx: &mut mpsc::UnboundedReceiver<TimerEvent>) -> Result<()> {
        let AppState::Running(engine) = &mut self.state else {
            return Ok(());
        };

        let mut ticker = interval_at(Instant::now() + self.tick, self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.screen.render(engine)?;

        loop {
            tokio::select! {
                // Drain engine events before reading more input.
                biased;

                Some(event) = event_rx.recv() => {
                    self.screen.handle_event(event, engine)?;
                }
                _ = ticker.tick() => {
                    engine.tick()?;
                }
                line = self.input.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        debug!("Input closed, stopping timer");
                        break;
                    };
                    if handle_command(engine, line.trim()) == Control::Quit {
                        break;
                    }
                }
            }
        }

        self.screen.write("\n")
    }
}

/// Applies one typed command to the engine.
///
/// Commands that are not allowed in the current state are ignored.
fn handle_command(engine: &mut TimerEngine, command: &str) -> Control {
    let result = match command {
        "q" | "quit" => return Control::Quit,
        "p" | "pause" | "resume" => engine.toggle_pause(),
        "r" | "restart" => engine.advance(),
        "" => Ok(()),
        other => {
            debug!(command = other, "Unknown command ignored");
            Ok(())
        }
    };

    if let Err(e) = result {
        debug!(command, error = %e, "Command ignored");
    }
    Control::Continue
}

// ============================================================================
// Tests
// ============================================================================
