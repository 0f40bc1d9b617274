//! pomotimer - a single-screen work/relax interval timer
//!
//! Configure a long interval, a short interval and a cycle length, then:
//! - work for the long interval
//! - rest for the short interval
//! - rest for the long interval after every N-th work interval

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use pomotimer::cli::{Cli, Commands, Display};
use pomotimer::{App, AppOptions};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never mix with the timer screen.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            let options = AppOptions::from_args(&cli.run)?;
            let input = BufReader::new(tokio::io::stdin());
            let mut app = App::new(input, std::io::stdout(), options);
            app.run().await?;
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
