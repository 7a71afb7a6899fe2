//! Shared types and tuning constants.
//!
//! Pure data definitions used by every other crate (core simulation, input
//! mapping, terminal rendering, score ledger). No dependencies, no I/O.
//!
//! # Playfield
//!
//! - **Width**: 20 columns (indexed 0-19)
//! - **Height**: 30 rows (indexed 0-29)
//! - **Spawn position**: column 10, row 0
//! - **Scroll threshold**: row 8; past this the world scrolls up instead of
//!   the player descending further
//!
//! # Timing
//!
//! The simulation runs at a fixed tick rate; everything slower than the tick
//! is expressed as a tick-modulo interval:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep (~60 ticks/sec) |
//! | `FALL_INTERVAL_TICKS` | 5 | Gravity step for player, bombs and loot |
//! | `FUSE_INTERVAL_TICKS` | 50 | Bomb fuse countdown step |
//! | `DEATH_TIMEOUT` | 500 | Death-timer ticks before forced detonation |
//! | `START_PAUSE_MS` | 1000 | Deliberate stall after a run (re)starts |
//! | `GAME_OVER_PAUSE_MS` | 500 | Deliberate stall before the outro cue |

/// Playfield width in cells.
pub const GRID_WIDTH: i16 = 20;

/// Playfield height in cells.
pub const GRID_HEIGHT: i16 = 30;

/// Player row above which falling scrolls the world instead of moving the
/// player down.
pub const SCROLL_LIMIT: i16 = 8;

/// Player spawn column.
pub const PLAYER_START_COL: i16 = 10;

/// Player spawn row.
pub const PLAYER_START_ROW: i16 = 0;

/// Probability that a freshly generated cell is rock.
pub const ROCK_PROB: f32 = 0.3;

/// Probability that an empty cell of a newly scrolled-in row carries loot.
pub const LOOT_PROB: f32 = 0.01;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 ticks/sec).
pub const TICK_MS: u32 = 16;

/// Ticks between automatic fall/fly steps.
pub const FALL_INTERVAL_TICKS: u64 = 5;

/// Ticks between bomb fuse countdown events.
pub const FUSE_INTERVAL_TICKS: u64 = 50;

/// Fuse value a freshly planted bomb starts with; it detonates after this
/// many countdown events.
pub const BOMB_FUSE: u8 = 3;

/// Score awarded for collecting a gem.
pub const GEM_SCORE: u32 = 50;

/// Jet fuel at the start of a run.
pub const STARTING_FUEL: u32 = 40;

/// Bombs carried at the start of a run.
pub const STARTING_BOMBS: u32 = 5;

/// Shields at the start of a run.
pub const STARTING_SHIELDS: i32 = 4;

/// Death-timer value that forces a detonation at the player's position.
pub const DEATH_TIMEOUT: u32 = 500;

/// Maximum number of entries kept in the high-score table.
pub const HIGH_SCORE_LIMIT: usize = 6;

/// Scales how many hazard entries the loot table gains per difficulty level.
pub const DIFFICULTY_MULTIPLIER: usize = 4;

/// Full-loop stall after a run starts or restarts, in milliseconds.
pub const START_PAUSE_MS: u64 = 1000;

/// Full-loop stall between a fatal explosion and the outro cue.
pub const GAME_OVER_PAUSE_MS: u64 = 500;

/// A single playfield cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Rock,
}

/// The effect a loot item has when collected.
///
/// The numeric index is stable and doubles as the draw index into the
/// difficulty-scaled loot table (4 = hazard, the table's trailing run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LootKind {
    Gem,
    BombRefill,
    FuelRefill,
    ShieldRefill,
    Hazard,
}

impl LootKind {
    /// Stable table index for this kind.
    pub fn index(&self) -> usize {
        match self {
            LootKind::Gem => 0,
            LootKind::BombRefill => 1,
            LootKind::FuelRefill => 2,
            LootKind::ShieldRefill => 3,
            LootKind::Hazard => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(LootKind::Gem),
            1 => Some(LootKind::BombRefill),
            2 => Some(LootKind::FuelRefill),
            3 => Some(LootKind::ShieldRefill),
            4 => Some(LootKind::Hazard),
            _ => None,
        }
    }

    /// Whether collecting this kind is good news for the player.
    pub fn is_pickup(&self) -> bool {
        !matches!(self, LootKind::Hazard)
    }
}

/// Vertical motion mode of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Falling,
    Flying,
}

/// Difficulty level, selected on the attract screen with keys 1-3.
///
/// Harder levels extend the hazard run at the tail of the loot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Numeric level, 1-3.
    pub fn level(&self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn from_level(level: usize) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Label written into the score file. The trailing padding on `Easy` and
    /// `Hard` is part of the on-disk format and kept as-is.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy  ",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard  ",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// Semantic game actions.
///
/// The core only understands these; binding them to physical keys is the
/// input crate's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the player one column left.
    MoveLeft,
    /// Move the player one column right.
    MoveRight,
    /// Plant a bomb at the player's cell.
    PlantBomb,
    /// Flip between falling and flying.
    ToggleFlight,
    /// Pick a difficulty (also starts a run from the attract screen).
    SelectDifficulty(Difficulty),
    /// Start or restart a run.
    Start,
    /// Leave the game immediately. Handled by the shell, never the core.
    Quit,
}

/// Audio cues the simulation emits. Playback is an external capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    Intro,
    Outro,
    Boom,
    Bling,
    Spark,
    Crunch,
}

/// Lifecycle events consumed by the shell (pacing stalls, ledger commit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A run began. `restart` is true when it replaced a finished run.
    Started { restart: bool },
    /// The run ended in an explosion; `score` is the final score to record.
    Ended { score: u32 },
}

/// Coarse state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Title screen, waiting for a start key.
    Attract,
    /// A run is in progress.
    Running,
    /// The last run ended; waiting for a restart key.
    GameOver,
}
