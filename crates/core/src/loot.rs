//! Difficulty-scaled loot table and kind draws.
//!
//! The table is the four pickup kinds followed by a run of hazards whose
//! length grows with difficulty. A kind is drawn by picking an index in
//! `[0, len]` (inclusive) and capping it at the hazard index, so the whole
//! trailing mass of the range lands on `Hazard`: longer table, meaner cave.

use tui_rockfall_types::{Difficulty, LootKind, DIFFICULTY_MULTIPLIER};

use crate::rng::SimpleRng;

/// Build the loot table for a difficulty level.
pub fn table_for(difficulty: Difficulty) -> Vec<LootKind> {
    let hazards = hazard_run_len(difficulty);
    let mut table = vec![
        LootKind::Gem,
        LootKind::BombRefill,
        LootKind::FuelRefill,
        LootKind::ShieldRefill,
    ];
    table.extend(std::iter::repeat(LootKind::Hazard).take(hazards));
    table
}

/// Number of hazard entries at the tail of the table:
/// `base + level * multiplier` with a base of two multipliers.
pub fn hazard_run_len(difficulty: Difficulty) -> usize {
    2 * DIFFICULTY_MULTIPLIER + difficulty.level() * DIFFICULTY_MULTIPLIER
}

/// Draw a loot kind for a freshly scrolled-in cell.
///
/// The draw range is `[0, table.len()]` inclusive, capped at the hazard
/// index. The cap (rather than a half-open range) is intentional: it is how
/// the original game skews spawns toward hazards as the table grows.
pub fn draw_kind(rng: &mut SimpleRng, table: &[LootKind]) -> LootKind {
    let idx = (rng.next_inclusive(table.len() as u32) as usize).min(LootKind::Hazard.index());
    table[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_run_scales_with_level() {
        assert_eq!(hazard_run_len(Difficulty::Easy), 12);
        assert_eq!(hazard_run_len(Difficulty::Medium), 16);
        assert_eq!(hazard_run_len(Difficulty::Hard), 20);
    }

    #[test]
    fn table_layout_per_difficulty() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let table = table_for(difficulty);
            assert_eq!(table.len(), 4 + hazard_run_len(difficulty));
            assert_eq!(table[0], LootKind::Gem);
            assert_eq!(table[3], LootKind::ShieldRefill);
            let hazards = table.iter().filter(|k| **k == LootKind::Hazard).count();
            assert_eq!(hazards, hazard_run_len(difficulty));
        }
    }

    #[test]
    fn draw_covers_every_kind_and_favors_hazards() {
        let table = table_for(Difficulty::Medium);
        let mut rng = SimpleRng::new(11);
        let mut counts = [0usize; 5];
        for _ in 0..20_000 {
            counts[draw_kind(&mut rng, &table).index()] += 1;
        }
        // Every kind is reachable.
        assert!(counts.iter().all(|&c| c > 0), "counts: {:?}", counts);
        // The capped inclusive draw dumps indices >= 4 onto Hazard, so
        // hazards dominate all pickups combined.
        let pickups: usize = counts[..4].iter().sum();
        assert!(counts[4] > pickups);
    }
}
