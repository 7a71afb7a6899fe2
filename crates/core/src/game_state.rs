//! The complete simulation state and its fixed-rate tick.
//!
//! Ties together the grid, the entity lists and the player, runs the hazard
//! model (fuses, explosions, the death timer) and the attract/running/
//! game-over state machine. The core performs no I/O: audio cues and
//! lifecycle events accumulate in small queues that the shell drains after
//! every tick.

use arrayvec::ArrayVec;

use tui_rockfall_types::{
    Difficulty, Direction, GameAction, GameEvent, LootKind, RunPhase, SoundKind, DEATH_TIMEOUT,
    FALL_INTERVAL_TICKS, FUSE_INTERVAL_TICKS, GEM_SCORE, LOOT_PROB, PLAYER_START_COL,
    PLAYER_START_ROW, SCROLL_LIMIT, STARTING_BOMBS, STARTING_FUEL, STARTING_SHIELDS,
};

use crate::entities::{
    fall_bombs, fall_loot, settle_loot, shift_up_bombs, shift_up_loot, Bomb, Loot,
};
use crate::grid::Grid;
use crate::loot::{draw_kind, table_for};
use crate::player::Player;
use crate::rng::SimpleRng;

const STATUS_START: &str = " Press <SPACE> to start ";
const STATUS_RETRY: &str = " Press <SPACE> to retry ";
const NOTICE_DIFFICULTY: &str = " Press 1-3 for difficulty ";

/// Bounded per-tick queues; anything past the cap is dropped silently.
pub const SOUND_QUEUE_CAP: usize = 16;
pub const EVENT_QUEUE_CAP: usize = 4;

/// Everything the simulation owns. No globals, no hidden state.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    bombs: Vec<Bomb>,
    loot: Vec<Loot>,
    player: Player,
    difficulty: Difficulty,
    loot_table: Vec<LootKind>,
    rng: SimpleRng,
    /// Tick counter; fall and fuse cadences are modulo checks against it.
    cycles: u64,
    phase: RunPhase,
    status: &'static str,
    notice: &'static str,
    sounds: ArrayVec<SoundKind, SOUND_QUEUE_CAP>,
    events: ArrayVec<GameEvent, EVENT_QUEUE_CAP>,
}

impl GameState {
    /// Fresh session on the attract screen, field already populated.
    pub fn new(seed: u32, difficulty: Difficulty) -> Self {
        let mut rng = SimpleRng::new(seed);
        let mut grid = Grid::new();
        grid.populate(&mut rng, PLAYER_START_ROW, PLAYER_START_COL);

        Self {
            grid,
            bombs: Vec::new(),
            loot: Vec::new(),
            player: Player::new(),
            difficulty,
            loot_table: table_for(difficulty),
            rng,
            cycles: 0,
            phase: RunPhase::Attract,
            status: STATUS_START,
            notice: NOTICE_DIFFICULTY,
            sounds: ArrayVec::new(),
            events: ArrayVec::new(),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    pub fn loot(&self) -> &[Loot] {
        &self.loot
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Status line ("press space" prompts; empty while running).
    pub fn status(&self) -> &'static str {
        self.status
    }

    /// Secondary prompt line (difficulty hint).
    pub fn notice(&self) -> &'static str {
        self.notice
    }

    /// Drain the audio cues queued since the last drain.
    pub fn take_sounds(&mut self) -> ArrayVec<SoundKind, SOUND_QUEUE_CAP> {
        std::mem::take(&mut self.sounds)
    }

    /// Drain the lifecycle events queued since the last drain.
    pub fn take_events(&mut self) -> ArrayVec<GameEvent, EVENT_QUEUE_CAP> {
        std::mem::take(&mut self.events)
    }

    /// Apply a semantic action. Returns whether it had any effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match self.phase {
            RunPhase::Attract | RunPhase::GameOver => match action {
                GameAction::Start => {
                    self.start_run();
                    true
                }
                GameAction::SelectDifficulty(difficulty) => {
                    self.difficulty = difficulty;
                    self.loot_table = table_for(difficulty);
                    self.start_run();
                    true
                }
                _ => false,
            },
            RunPhase::Running => match action {
                GameAction::MoveLeft => self.player.try_step(&self.grid, -1),
                GameAction::MoveRight => self.player.try_step(&self.grid, 1),
                GameAction::PlantBomb => match self.player.arm_bomb() {
                    Some(bomb) => {
                        self.bombs.push(bomb);
                        true
                    }
                    None => false,
                },
                GameAction::ToggleFlight => self.toggle_flight(),
                _ => false,
            },
        }
    }

    fn start_run(&mut self) {
        let restart = self.phase == RunPhase::GameOver;
        if restart {
            self.grid
                .populate(&mut self.rng, PLAYER_START_ROW, PLAYER_START_COL);
            self.player.reset();
            self.bombs.clear();
            self.loot.clear();
            let _ = self.sounds.try_push(SoundKind::Intro);
        }
        self.phase = RunPhase::Running;
        self.status = "";
        let _ = self.events.try_push(GameEvent::Started { restart });
    }

    fn toggle_flight(&mut self) -> bool {
        if self.player.fuel == 0 {
            return false;
        }
        self.player.direction = match self.player.direction {
            Direction::Falling => Direction::Flying,
            Direction::Flying => Direction::Falling,
        };
        let _ = self.sounds.try_push(SoundKind::Crunch);
        true
    }

    /// Advance the simulation by one fixed tick.
    ///
    /// Order matters and mirrors the classic loop: vertical motion, entity
    /// falls, loot housekeeping, collisions, fuse countdown, death-timeout
    /// check, then the counters.
    pub fn tick(&mut self) {
        if self.phase != RunPhase::Running {
            return;
        }

        if self.cycles % FALL_INTERVAL_TICKS == 0 {
            self.step_vertical();
            fall_bombs(&self.grid, &mut self.bombs);
            fall_loot(&self.grid, &mut self.loot);
        }

        settle_loot(&mut self.grid, &mut self.loot);
        self.collect_loot();

        if self.cycles % FUSE_INTERVAL_TICKS == 0 {
            self.burn_fuses();
        }

        if self.phase == RunPhase::Running && self.player.death_timer >= DEATH_TIMEOUT {
            self.player.shields = 0;
            self.boom(self.player.row, self.player.col);
        }

        self.cycles += 1;
        self.player.death_timer += 1;
    }

    /// Automatic fall or fly step.
    fn step_vertical(&mut self) {
        let (row, col) = (self.player.row, self.player.col);
        match self.player.direction {
            Direction::Falling => {
                if self.grid.is_empty(row + 1, col) {
                    if row > SCROLL_LIMIT {
                        self.scroll();
                    } else {
                        self.player.row += 1;
                    }
                    self.player.score += 1;
                    self.player.relieve_death_timer();
                }
            }
            Direction::Flying => {
                if row > 0 && self.player.fuel > 0 && self.grid.is_empty(row - 1, col) {
                    self.player.row -= 1;
                    self.player.fuel -= 1;
                    self.player.pay_flight_cost();
                    self.player.relieve_death_timer();
                } else {
                    // Head bump, ceiling, or an empty tank: back to falling.
                    self.player.direction = Direction::Falling;
                    let _ = self.sounds.try_push(SoundKind::Crunch);
                }
            }
        }
    }

    /// Scroll the world and seed the incoming row with loot.
    fn scroll(&mut self) {
        self.grid.scroll_up(&mut self.rng);
        shift_up_bombs(&mut self.bombs);
        shift_up_loot(&mut self.loot);

        let bottom = self.grid.height() - 1;
        for col in 0..self.grid.width() {
            if self.grid.is_empty(bottom, col) && self.rng.chance(LOOT_PROB) {
                let kind = draw_kind(&mut self.rng, &self.loot_table);
                self.loot.push(Loot {
                    row: bottom,
                    col,
                    kind,
                });
            }
        }
    }

    /// Pick up (or suffer) any loot sharing the player's cell.
    fn collect_loot(&mut self) {
        for i in (0..self.loot.len()).rev() {
            if self.loot[i].row != self.player.row || self.loot[i].col != self.player.col {
                continue;
            }
            let item = self.loot.remove(i);
            let cue = if item.kind.is_pickup() {
                SoundKind::Bling
            } else {
                SoundKind::Spark
            };
            let _ = self.sounds.try_push(cue);

            match item.kind {
                LootKind::Gem => self.player.score += GEM_SCORE,
                LootKind::BombRefill => self.player.bombs += STARTING_BOMBS / 2,
                LootKind::FuelRefill => self.player.fuel += STARTING_FUEL / 2,
                LootKind::ShieldRefill => self.player.shields += STARTING_SHIELDS / 2,
                LootKind::Hazard => {
                    self.player.shields -= 1;
                    if self.player.shields < 0 {
                        // Shield debt: instantly lethal.
                        self.boom(self.player.row, self.player.col);
                    }
                }
            }
        }
    }

    /// Count every fuse down one; a bomb at the end of its fuse detonates.
    fn burn_fuses(&mut self) {
        for i in (0..self.bombs.len()).rev() {
            if self.bombs[i].fuse <= 1 {
                let bomb = self.bombs.remove(i);
                self.boom(bomb.row, bomb.col);
            } else {
                self.bombs[i].fuse -= 1;
            }
        }
    }

    /// Resolve an explosion centered on (row, col).
    ///
    /// Clears the clamped 3x3 neighborhood. A player within Manhattan
    /// distance 1 either spends a shield or the run ends.
    fn boom(&mut self, row: i16, col: i16) {
        let _ = self.sounds.try_push(SoundKind::Boom);
        self.grid.clear_blast(row, col);

        let distance = (self.player.row - row).abs() + (self.player.col - col).abs();
        if distance < 2 {
            if self.player.shields > 0 {
                self.player.shields -= 1;
                let _ = self.sounds.try_push(SoundKind::Spark);
            } else {
                self.end_run();
            }
        }
    }

    fn end_run(&mut self) {
        if self.phase != RunPhase::Running {
            return;
        }
        self.phase = RunPhase::GameOver;
        self.player.bombs = 0;
        self.status = STATUS_RETRY;
        self.notice = NOTICE_DIFFICULTY;
        let _ = self.events.try_push(GameEvent::Ended {
            score: self.player.score,
        });
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_rockfall_types::Cell;

    fn started(seed: u32) -> GameState {
        let mut state = GameState::new(seed, Difficulty::Medium);
        assert!(state.apply_action(GameAction::Start));
        state
    }

    /// Pin the player in place by putting rock directly underneath.
    fn pin_player(state: &mut GameState) {
        let (row, col) = (state.player.row, state.player.col);
        state.grid_mut().set(row + 1, col, Cell::Rock);
    }

    #[test]
    fn starts_on_the_attract_screen() {
        let state = GameState::new(1, Difficulty::Medium);
        assert_eq!(state.phase(), RunPhase::Attract);
        assert_eq!(state.status(), STATUS_START);
        assert_eq!(state.notice(), NOTICE_DIFFICULTY);
    }

    #[test]
    fn movement_actions_are_inert_before_start() {
        let mut state = GameState::new(1, Difficulty::Medium);
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::PlantBomb));
        assert_eq!(state.player().col, PLAYER_START_COL);
    }

    #[test]
    fn difficulty_selection_starts_a_run() {
        let mut state = GameState::new(1, Difficulty::Medium);
        assert!(state.apply_action(GameAction::SelectDifficulty(Difficulty::Hard)));
        assert_eq!(state.difficulty(), Difficulty::Hard);
        assert_eq!(state.phase(), RunPhase::Running);
        let events = state.take_events();
        assert!(events.contains(&GameEvent::Started { restart: false }));
    }

    #[test]
    fn first_fall_uses_the_guaranteed_headroom() {
        let mut state = started(1);
        // Spawn row and the row below are forced empty, so the very first
        // fall tick always moves the player down one row.
        state.tick();
        assert_eq!(state.player().row, PLAYER_START_ROW + 1);
        assert_eq!(state.player().score, 1);
    }

    #[test]
    fn pinned_player_neither_falls_nor_scores() {
        let mut state = started(1);
        pin_player(&mut state);
        for _ in 0..20 {
            state.tick();
        }
        assert_eq!(state.player().row, PLAYER_START_ROW);
        assert_eq!(state.player().score, 0);
        assert_eq!(state.player().death_timer, 20);
    }

    #[test]
    fn falling_halves_the_death_timer() {
        let mut state = started(1);
        pin_player(&mut state);
        for _ in 0..100 {
            state.tick();
        }
        assert_eq!(state.player().death_timer, 100);

        // Unpin: the next fall tick relieves the timer.
        let (row, col) = (state.player.row, state.player.col);
        state.grid_mut().set(row + 1, col, Cell::Empty);
        for _ in 0..5 {
            state.tick();
        }
        // One fall happened somewhere in those five ticks; 100ish halved.
        assert!(state.player().death_timer < 60);
        assert_eq!(state.player().row, row + 1);
    }

    #[test]
    fn fuse_burns_down_over_three_countdown_events() {
        let mut state = started(1);
        state.tick(); // falls to row 1, so planting is allowed
        assert!(state.apply_action(GameAction::PlantBomb));
        assert_eq!(state.bombs().len(), 1);
        assert_eq!(state.player().bombs, STARTING_BOMBS - 1);

        // Pin both the player and the bomb where they are.
        pin_player(&mut state);
        let _ = state.take_sounds();

        let mut booms = 0;
        for _ in 0..160 {
            state.tick();
            booms += state
                .take_sounds()
                .iter()
                .filter(|s| **s == SoundKind::Boom)
                .count();
        }

        // Countdown events land on cycles 50, 100 and 150; the third one
        // detonates the bomb at the player's cell.
        assert_eq!(state.bombs().len(), 0);
        assert_eq!(booms, 1);
        assert_eq!(state.player().shields, STARTING_SHIELDS - 1);
        assert_eq!(state.phase(), RunPhase::Running);
    }

    #[test]
    fn planting_needs_stock() {
        let mut state = started(1);
        state.tick();
        for _ in 0..STARTING_BOMBS {
            assert!(state.apply_action(GameAction::PlantBomb));
        }
        assert!(!state.apply_action(GameAction::PlantBomb));
        assert_eq!(state.bombs().len(), STARTING_BOMBS as usize);
    }

    #[test]
    fn shields_absorb_adjacent_booms_then_the_run_ends() {
        let mut state = started(1);
        let (row, col) = (state.player.row, state.player.col);

        for n in 0..STARTING_SHIELDS {
            state.boom(row, col);
            assert_eq!(state.player().shields, STARTING_SHIELDS - 1 - n);
            assert_eq!(state.phase(), RunPhase::Running, "boom {} survived", n);
        }

        state.boom(row, col);
        assert_eq!(state.phase(), RunPhase::GameOver);
        assert_eq!(state.player().bombs, 0);
        assert_eq!(state.status(), STATUS_RETRY);

        let events = state.take_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::Ended { .. }))
                .count(),
            1
        );

        // Further booms change nothing.
        state.boom(row, col);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn distant_booms_leave_the_player_alone() {
        let mut state = started(1);
        let (row, col) = (state.player.row, state.player.col);
        state.boom(row + 2, col);
        state.boom(row + 1, col + 1);
        assert_eq!(state.player().shields, STARTING_SHIELDS);
    }

    #[test]
    fn boom_clears_the_neighborhood() {
        let mut state = started(1);
        for r in 4..=6 {
            for c in 4..=6 {
                state.grid_mut().set(r, c, Cell::Rock);
            }
        }
        state.boom(5, 5);
        for r in 4..=6 {
            for c in 4..=6 {
                assert!(state.grid().is_empty(r, c));
            }
        }
    }

    #[test]
    fn pickups_apply_their_effects() {
        let cases = [
            (LootKind::Gem, "score"),
            (LootKind::BombRefill, "bombs"),
            (LootKind::FuelRefill, "fuel"),
            (LootKind::ShieldRefill, "shields"),
        ];
        for (kind, what) in cases {
            let mut state = started(1);
            pin_player(&mut state);
            let (row, col) = (state.player.row, state.player.col);
            state.loot.push(Loot { row, col, kind });
            state.tick();

            assert!(state.loot().is_empty(), "{} not collected", what);
            let player = state.player();
            match kind {
                LootKind::Gem => assert_eq!(player.score, GEM_SCORE),
                LootKind::BombRefill => {
                    assert_eq!(player.bombs, STARTING_BOMBS + STARTING_BOMBS / 2)
                }
                LootKind::FuelRefill => assert_eq!(player.fuel, STARTING_FUEL + STARTING_FUEL / 2),
                LootKind::ShieldRefill => {
                    assert_eq!(player.shields, STARTING_SHIELDS + STARTING_SHIELDS / 2)
                }
                LootKind::Hazard => unreachable!(),
            }
            let sounds = state.take_sounds();
            assert!(sounds.contains(&SoundKind::Bling));
        }
    }

    #[test]
    fn hazard_loot_chips_a_shield() {
        let mut state = started(1);
        pin_player(&mut state);
        let (row, col) = (state.player.row, state.player.col);
        state.loot.push(Loot {
            row,
            col,
            kind: LootKind::Hazard,
        });
        state.tick();
        assert_eq!(state.player().shields, STARTING_SHIELDS - 1);
        assert_eq!(state.phase(), RunPhase::Running);
        assert!(state.take_sounds().contains(&SoundKind::Spark));
    }

    #[test]
    fn shield_debt_is_lethal() {
        let mut state = started(1);
        pin_player(&mut state);
        state.player.shields = 0;
        let (row, col) = (state.player.row, state.player.col);
        state.loot.push(Loot {
            row,
            col,
            kind: LootKind::Hazard,
        });
        state.tick();
        assert_eq!(state.phase(), RunPhase::GameOver);
    }

    #[test]
    fn ceiling_bump_forces_falling() {
        let mut state = started(1);
        // Player is on the top row; flying has nowhere to go.
        assert!(state.apply_action(GameAction::ToggleFlight));
        assert_eq!(state.player().direction, Direction::Flying);
        let _ = state.take_sounds();

        state.tick();
        assert_eq!(state.player().direction, Direction::Falling);
        assert_eq!(state.player().fuel, STARTING_FUEL);
        assert!(state.take_sounds().contains(&SoundKind::Crunch));
    }

    #[test]
    fn flying_climbs_and_burns_fuel() {
        let mut state = started(1);
        state.tick(); // row 0 -> 1
        assert!(state.apply_action(GameAction::ToggleFlight));

        // Next fall tick is at cycle 5.
        for _ in 0..5 {
            state.tick();
        }
        assert_eq!(state.player().row, 0);
        assert_eq!(state.player().fuel, STARTING_FUEL - 1);
    }

    #[test]
    fn toggle_without_fuel_is_a_no_op() {
        let mut state = started(1);
        state.player.fuel = 0;
        assert!(!state.apply_action(GameAction::ToggleFlight));
        assert_eq!(state.player().direction, Direction::Falling);
    }

    #[test]
    fn world_scrolls_instead_of_the_player_sinking() {
        let mut state = started(1);
        // Open cave: the player free-falls to the scroll threshold and the
        // world starts scrolling beneath them.
        *state.grid_mut() = Grid::new();
        for _ in 0..400 {
            state.tick();
            assert!(state.player().row <= SCROLL_LIMIT + 1);
        }
        assert_eq!(state.player().row, SCROLL_LIMIT + 1);
        // Still scoring while the world scrolled beneath them.
        assert!(state.player().score > 20);
    }

    #[test]
    fn death_timer_detonates_at_exactly_the_timeout() {
        let mut state = started(1);
        pin_player(&mut state);

        for _ in 0..DEATH_TIMEOUT {
            state.tick();
        }
        assert_eq!(state.phase(), RunPhase::Running);
        assert_eq!(state.player().death_timer, DEATH_TIMEOUT);

        state.tick();
        assert_eq!(state.phase(), RunPhase::GameOver);
        assert_eq!(state.player().shields, 0);

        let events = state.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::Ended { score: 0 })));
    }

    #[test]
    fn restart_resets_the_run() {
        let mut state = started(1);
        state.tick();
        let (row, col) = (state.player.row, state.player.col);
        state.player.shields = 0;
        state.boom(row, col);
        assert_eq!(state.phase(), RunPhase::GameOver);
        let _ = state.take_events();
        let _ = state.take_sounds();

        assert!(state.apply_action(GameAction::Start));
        assert_eq!(state.phase(), RunPhase::Running);

        let player = state.player();
        assert_eq!((player.row, player.col), (PLAYER_START_ROW, PLAYER_START_COL));
        assert_eq!(player.score, 0);
        assert_eq!(player.fuel, STARTING_FUEL);
        assert_eq!(player.bombs, STARTING_BOMBS);
        assert_eq!(player.shields, STARTING_SHIELDS);
        assert!(state.bombs().is_empty());
        assert!(state.loot().is_empty());

        assert!(state.take_sounds().contains(&SoundKind::Intro));
        assert!(state
            .take_events()
            .contains(&GameEvent::Started { restart: true }));
    }

    #[test]
    fn ticks_do_nothing_outside_a_run() {
        let mut state = GameState::new(1, Difficulty::Medium);
        for _ in 0..100 {
            state.tick();
        }
        assert_eq!(state.cycles(), 0);
        assert_eq!(state.player().death_timer, 0);
    }
}
