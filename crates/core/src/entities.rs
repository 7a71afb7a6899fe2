//! Falling entities: planted bombs and spawned loot.
//!
//! Both kinds live in plain `Vec`s owned by the game state. Every pass that
//! can remove items walks the list in reverse index order so removal never
//! skips or invalidates anything.

use tui_rockfall_types::{Cell, LootKind, GRID_HEIGHT};

use crate::grid::Grid;

/// A planted bomb with a burning fuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bomb {
    pub row: i16,
    pub col: i16,
    pub fuse: u8,
}

/// A collectible (or hazardous) item sitting in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loot {
    pub row: i16,
    pub col: i16,
    pub kind: LootKind,
}

/// Drop every bomb one row where the cell below is empty.
///
/// A bomb on the bottom row has no cell below it and simply rests there
/// until its fuse runs out.
pub fn fall_bombs(grid: &Grid, bombs: &mut [Bomb]) {
    for bomb in bombs.iter_mut().rev() {
        if grid.is_empty(bomb.row + 1, bomb.col) {
            bomb.row += 1;
        }
    }
}

/// Drop loot one row where possible. Loot never falls off the bottom edge.
pub fn fall_loot(grid: &Grid, loot: &mut [Loot]) {
    for item in loot.iter_mut().rev() {
        if item.row < GRID_HEIGHT - 1 && grid.is_empty(item.row + 1, item.col) {
            item.row += 1;
        }
    }
}

/// Shift bombs up one row after a scroll; bombs pushed past the top edge
/// are discarded.
pub fn shift_up_bombs(bombs: &mut Vec<Bomb>) {
    for i in (0..bombs.len()).rev() {
        if bombs[i].row <= 0 {
            bombs.remove(i);
        } else {
            bombs[i].row -= 1;
        }
    }
}

/// Shift loot up one row after a scroll, discarding items at the top edge.
pub fn shift_up_loot(loot: &mut Vec<Loot>) {
    for i in (0..loot.len()).rev() {
        if loot[i].row <= 0 {
            loot.remove(i);
        } else {
            loot[i].row -= 1;
        }
    }
}

/// Per-tick loot housekeeping.
///
/// Loot cannot rest on rock: whatever cell an item occupies is forced
/// empty. Items that somehow left the grid are dropped from the list.
pub fn settle_loot(grid: &mut Grid, loot: &mut Vec<Loot>) {
    for i in (0..loot.len()).rev() {
        let item = loot[i];
        if grid.get(item.row, item.col).is_none() {
            loot.remove(i);
            continue;
        }
        if grid.is_rock(item.row, item.col) {
            grid.set(item.row, item.col, Cell::Empty);
        }
    }
}
