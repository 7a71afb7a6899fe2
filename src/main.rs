//! Terminal rockfall runner (default binary).
//!
//! Single-threaded fixed-rate loop: render, poll input until the next tick
//! deadline, tick the simulation, then drain its sound cues and lifecycle
//! events. The only blocking sleeps are the deliberate pacing stalls after
//! a (re)start and before the outro cue.

mod config;

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_rockfall::core::GameState;
use tui_rockfall::input::{map_key, should_quit};
use tui_rockfall::score::ScoreLedger;
use tui_rockfall::term::{AudioSink, BellAudio, GameView, NullAudio, TerminalRenderer, Viewport};
use tui_rockfall::types::{
    Difficulty, GameEvent, SoundKind, GAME_OVER_PAUSE_MS, START_PAUSE_MS, TICK_MS,
};

use config::Config;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load();
    let difficulty =
        Difficulty::from_level(config.difficulty as usize).unwrap_or_default();
    let seed = config.seed.unwrap_or_else(clock_seed);
    let ledger = ScoreLedger::open(&config.scores_path);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, ledger, seed, difficulty);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(
    term: &mut TerminalRenderer,
    config: &Config,
    mut ledger: ScoreLedger,
    seed: u32,
    difficulty: Difficulty,
) -> Result<()> {
    let mut game = GameState::new(seed, difficulty);
    let view = GameView;
    let mut audio: Box<dyn AudioSink> = if config.bell {
        Box::new(BellAudio)
    } else {
        Box::new(NullAudio)
    };

    // Score-0 query: show the table on the attract screen (and create the
    // file with just its header on a true first run).
    let mut table = ledger.record(0, "", "", 0);

    audio.play(SoundKind::Intro);
    std::thread::sleep(Duration::from_millis(START_PAUSE_MS));

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 36));
        let frame = view.render(&game, &table, Viewport::new(w, h));
        term.draw(&frame)?;

        // Input with timeout until the next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        // An abrupt quit persists nothing; only a death
                        // transition commits a score.
                        return Ok(());
                    }
                    if let Some(action) = map_key(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick();
        }

        for sound in game.take_sounds() {
            audio.play(sound);
        }

        for game_event in game.take_events() {
            match game_event {
                GameEvent::Started { restart } => {
                    if restart {
                        std::thread::sleep(Duration::from_millis(START_PAUSE_MS));
                        last_tick = Instant::now();
                    }
                }
                GameEvent::Ended { score } => {
                    std::thread::sleep(Duration::from_millis(GAME_OVER_PAUSE_MS));
                    audio.play(SoundKind::Outro);
                    table = ledger.record(
                        score,
                        &username(),
                        game.difficulty().label(),
                        unix_now(),
                    );
                    last_tick = Instant::now();
                }
            }
        }
    }
}

fn username() -> String {
    std::env::var("USERNAME")
        .or_else(|_| std::env::var("USER"))
        .unwrap_or_else(|_| "player".to_string())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos().wrapping_add(d.as_secs() as u32))
        .unwrap_or(1)
}
