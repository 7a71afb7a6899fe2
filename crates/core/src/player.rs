//! Player state: position, facing, meters and the death timer.

use tui_rockfall_types::{
    Direction, BOMB_FUSE, PLAYER_START_COL, PLAYER_START_ROW, STARTING_BOMBS, STARTING_FUEL,
    STARTING_SHIELDS,
};

use crate::entities::Bomb;
use crate::grid::Grid;

/// The miner.
///
/// `shields` is signed on purpose: collecting a hazard at zero shields
/// drives it to -1, which is the instantly lethal "shield debt" state, as
/// opposed to plain zero (alive but unprotected).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub row: i16,
    pub col: i16,
    pub direction: Direction,
    pub fuel: u32,
    pub bombs: u32,
    pub shields: i32,
    pub score: u32,
    pub death_timer: u32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            row: PLAYER_START_ROW,
            col: PLAYER_START_COL,
            direction: Direction::Falling,
            fuel: STARTING_FUEL,
            bombs: STARTING_BOMBS,
            shields: STARTING_SHIELDS,
            score: 0,
            death_timer: 0,
        }
    }

    /// Back to spawn with full meters for a fresh run.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Step one column left or right. Succeeds only when the destination is
    /// inside the grid and empty.
    pub fn try_step(&mut self, grid: &Grid, dcol: i16) -> bool {
        if grid.is_empty(self.row, self.col + dcol) {
            self.col += dcol;
            true
        } else {
            false
        }
    }

    /// Take a bomb from the pack and arm it at the current cell.
    ///
    /// Refused on the top row (nothing to drop it into yet) and with an
    /// empty pack.
    pub fn arm_bomb(&mut self) -> Option<Bomb> {
        if self.row <= 0 || self.bombs == 0 {
            return None;
        }
        self.bombs -= 1;
        Some(Bomb {
            row: self.row,
            col: self.col,
            fuse: BOMB_FUSE,
        })
    }

    /// Vertical progress relieves the death timer (integer halving).
    pub fn relieve_death_timer(&mut self) {
        self.death_timer /= 2;
    }

    /// Proportional score cost of one flying step; shrinks to nothing as the
    /// score does.
    pub fn pay_flight_cost(&mut self) {
        self.score -= self.score / 100;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_rockfall_types::{Cell, GRID_WIDTH};

    #[test]
    fn steps_respect_bounds_and_rock() {
        let mut grid = Grid::new();
        grid.set(0, 11, Cell::Rock);

        let mut player = Player::new();
        assert!(!player.try_step(&grid, 1), "rock to the right");
        assert_eq!(player.col, PLAYER_START_COL);

        assert!(player.try_step(&grid, -1));
        assert_eq!(player.col, PLAYER_START_COL - 1);

        // Walk to the left wall; one more step must fail.
        while player.col > 0 {
            assert!(player.try_step(&grid, -1));
        }
        assert!(!player.try_step(&grid, -1));
        assert_eq!(player.col, 0);

        // And the right wall.
        player.row = 5;
        while player.col < GRID_WIDTH - 1 {
            assert!(player.try_step(&grid, 1));
        }
        assert!(!player.try_step(&grid, 1));
    }

    #[test]
    fn arming_needs_depth_and_stock() {
        let mut player = Player::new();
        assert!(player.arm_bomb().is_none(), "top row refuses");

        player.row = 3;
        let bomb = player.arm_bomb().expect("armed");
        assert_eq!((bomb.row, bomb.col, bomb.fuse), (3, PLAYER_START_COL, BOMB_FUSE));
        assert_eq!(player.bombs, STARTING_BOMBS - 1);

        player.bombs = 0;
        assert!(player.arm_bomb().is_none(), "empty pack refuses");
    }

    #[test]
    fn death_timer_halves_with_integer_division() {
        let mut player = Player::new();
        player.death_timer = 301;
        player.relieve_death_timer();
        assert_eq!(player.death_timer, 150);
        player.death_timer = 1;
        player.relieve_death_timer();
        assert_eq!(player.death_timer, 0);
    }

    #[test]
    fn flight_cost_shrinks_with_the_score() {
        let mut player = Player::new();
        player.score = 250;
        player.pay_flight_cost();
        assert_eq!(player.score, 248);

        player.score = 99;
        player.pay_flight_cost();
        assert_eq!(player.score, 99, "below 100 flying is free");
    }
}
