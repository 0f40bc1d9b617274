//! Workflow tests for the configuration gate, timer engine and sound layer.
//!
//! These drive the public library API the way the terminal front end does:
//! accept a configuration, feed ticks, react to events, advance phases.

use std::fs;

use tokio::sync::mpsc;

use pomotimer::sound::{MockSoundPlayer, SoundAssets, SoundPlayer};
use pomotimer::{
    format_countdown, ConfigError, ConfigInput, Phase, TimerConfig, TimerEngine, TimerEvent,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_engine(
    long: i64,
    short: i64,
    cycle: i64,
) -> (TimerEngine, mpsc::UnboundedReceiver<TimerEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let config = TimerConfig::validate(long, short, cycle).expect("valid config");
    (TimerEngine::new(config, tx), rx)
}

/// Ticks until the current phase expires, playing the sound like the app does.
fn run_phase_to_expiry(
    engine: &mut TimerEngine,
    rx: &mut mpsc::UnboundedReceiver<TimerEvent>,
    player: &dyn SoundPlayer,
    assets: &SoundAssets,
) -> u32 {
    let mut ticks = 0;
    loop {
        engine.tick().unwrap();
        ticks += 1;
        let mut expired = false;
        while let Ok(event) = rx.try_recv() {
            if let TimerEvent::PhaseExpired { phase } = event {
                player.play(assets.for_phase(phase)).unwrap();
                expired = true;
            }
        }
        if expired {
            return ticks;
        }
    }
}

// ============================================================================
// Configuration Gate
// ============================================================================

#[test]
fn gate_rejects_short_longer_than_long() {
    let input = ConfigInput::default().parse("5", "10", "4").unwrap();
    assert_eq!(input.accept(), Err(ConfigError::ShortExceedsLong));
}

#[test]
fn gate_accepts_standard_pomodoro() {
    let config = ConfigInput::default().parse("25", "5", "4").unwrap().accept().unwrap();
    assert_eq!(config.long_seconds(), 25 * 60);
    assert_eq!(config.short_seconds(), 5 * 60);
    assert_eq!(config.cycle_length(), 4);
}

// ============================================================================
// Engine Workflows
// ============================================================================

#[test]
fn single_minute_cycle_end_to_end() {
    let (mut engine, mut rx) = create_engine(1, 1, 1);
    let player = MockSoundPlayer::new();
    let assets = SoundAssets::from_dir(std::path::Path::new("assets"));

    assert_eq!(
        format_countdown(i64::from(engine.state().remaining_seconds), engine.state().paused),
        "1:00"
    );

    let ticks = run_phase_to_expiry(&mut engine, &mut rx, &player, &assets);
    assert_eq!(ticks, 60);
    assert_eq!(
        format_countdown(i64::from(engine.state().remaining_seconds), engine.state().paused),
        "Done"
    );
    assert_eq!(player.play_count(), 1);

    // Further ticks while expired never replay the sound.
    for _ in 0..10 {
        engine.tick().unwrap();
    }
    while let Ok(event) = rx.try_recv() {
        assert!(!matches!(event, TimerEvent::PhaseExpired { .. }));
    }

    engine.advance().unwrap();
    let state = engine.state();
    assert_eq!(state.completed_work_count, 1);
    assert_eq!(state.phase, Phase::Relax);
    assert_eq!(state.remaining_seconds, 60);
    assert!(state.paused);
    assert_eq!(format_countdown(60, true), "1:00 (paused)");
}

#[test]
fn relax_phase_plays_relax_sound() {
    let (mut engine, mut rx) = create_engine(1, 1, 4);
    let player = MockSoundPlayer::new();
    let assets = SoundAssets::from_dir(std::path::Path::new("assets"));

    run_phase_to_expiry(&mut engine, &mut rx, &player, &assets);
    engine.advance().unwrap();
    engine.toggle_pause().unwrap(); // advancing always leaves the timer paused
    run_phase_to_expiry(&mut engine, &mut rx, &player, &assets);

    let calls = player.get_play_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].name(), "chill-chords-143504");
    assert_eq!(calls[1].name(), "trance-loop");
}

#[test]
fn restart_as_soon_as_done_keeps_the_sound() {
    let (mut engine, mut rx) = create_engine(1, 1, 1);
    let player = MockSoundPlayer::new();
    let assets = SoundAssets::from_dir(std::path::Path::new("assets"));

    // Work: press restart on the first tick that reads Done.
    while !engine.state().is_done() {
        engine.tick().unwrap();
    }
    engine.advance().unwrap();
    while let Ok(event) = rx.try_recv() {
        if let TimerEvent::PhaseExpired { phase } = event {
            player.play(assets.for_phase(phase)).unwrap();
        }
    }
    assert_eq!(player.play_count(), 1);

    // Relax: resume and run it out normally.
    engine.toggle_pause().unwrap();
    run_phase_to_expiry(&mut engine, &mut rx, &player, &assets);

    let names: Vec<String> = player
        .get_play_calls()
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(names, vec!["chill-chords-143504", "trance-loop"]);
}

#[test]
fn paused_timer_does_not_count_down() {
    let (mut engine, mut rx) = create_engine(25, 5, 4);
    engine.toggle_pause().unwrap();

    for _ in 0..100 {
        engine.tick().unwrap();
    }

    assert_eq!(engine.state().remaining_seconds, 1500);
    assert_eq!(rx.try_recv().unwrap(), TimerEvent::Paused);
    assert!(rx.try_recv().is_err());
}

#[test]
fn long_rest_every_cycle_length_work_phases() {
    let (mut engine, _rx) = create_engine(25, 5, 4);
    let mut rest_lengths = Vec::new();

    for _ in 0..8 {
        // Finish work.
        while !engine.state().is_done() {
            engine.tick().unwrap();
        }
        engine.advance().unwrap();
        rest_lengths.push(engine.state().remaining_seconds);
        engine.toggle_pause().unwrap();

        // Finish rest; work always comes back at the long interval.
        while !engine.state().is_done() {
            engine.tick().unwrap();
        }
        engine.advance().unwrap();
        assert_eq!(engine.state().phase, Phase::Work);
        assert_eq!(engine.state().remaining_seconds, 1500);
        engine.toggle_pause().unwrap();
    }

    assert_eq!(
        rest_lengths,
        vec![300, 300, 300, 1500, 300, 300, 300, 1500]
    );
    assert_eq!(engine.state().completed_work_count, 8);
}

// ============================================================================
// Sound Assets
// ============================================================================

#[test]
fn assets_dir_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(pomotimer::sound::WORK_ASSET), b"not really mp3").unwrap();

    let assets = SoundAssets::from_dir(dir.path());
    let missing = assets.missing();

    assert_eq!(missing.len(), 1);
    assert_eq!(
        missing[0].file_name().unwrap(),
        pomotimer::sound::RELAX_ASSET
    );
}

#[test]
fn assets_override_with_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let bell = dir.path().join("bell.wav");
    fs::write(&bell, b"RIFF").unwrap();

    let assets = SoundAssets::from_dir(dir.path())
        .with_override(Phase::Work, &bell)
        .unwrap();

    assert_eq!(assets.for_phase(Phase::Work).path(), Some(bell.as_path()));
    assert_eq!(assets.missing().len(), 1);
}
