//! Core simulation - pure, deterministic, and testable.
//!
//! All the game rules live here: the rock grid, falling bombs and loot, the
//! hazard model and the run state machine. The crate has **zero
//! dependencies** on UI, audio, or I/O, which keeps it:
//!
//! - **Deterministic**: the same seed replays the same cave and loot
//! - **Testable**: every rule has unit tests that run headless
//! - **Portable**: usable from any shell (terminal, benchmark, test harness)
//!
//! # Module Structure
//!
//! - [`grid`]: the 20x30 rock field with procedural population, scrolling
//!   and clamped blast clearing
//! - [`entities`]: bomb and loot lists with fall, shift and despawn rules
//! - [`loot`]: the difficulty-scaled loot table and kind draws
//! - [`player`]: position, facing, meters and the death timer
//! - [`game_state`]: the tick orchestration and attract/running/game-over
//!   state machine
//! - [`rng`]: small LCG random source for reproducible runs
//!
//! # Example
//!
//! ```
//! use tui_rockfall_core::GameState;
//! use tui_rockfall_types::{Difficulty, GameAction, RunPhase};
//!
//! let mut game = GameState::new(12345, Difficulty::Medium);
//! game.apply_action(GameAction::Start);
//! assert_eq!(game.phase(), RunPhase::Running);
//!
//! // The spawn headroom guarantees the first fall step.
//! game.tick();
//! assert_eq!(game.player().score, 1);
//! ```
//!
//! # Timing
//!
//! [`GameState::tick`] advances exactly one fixed tick; the shell is
//! expected to call it at `TICK_MS` intervals. Everything slower runs on a
//! tick-modulo cadence (`FALL_INTERVAL_TICKS`, `FUSE_INTERVAL_TICKS`), and
//! the deliberate start/death pauses are the shell's job; the core never
//! blocks.

pub mod entities;
pub mod game_state;
pub mod grid;
pub mod loot;
pub mod player;
pub mod rng;

pub use tui_rockfall_types as types;

// Re-export the types most shells need.
pub use entities::{Bomb, Loot};
pub use game_state::GameState;
pub use grid::Grid;
pub use player::Player;
pub use rng::SimpleRng;
