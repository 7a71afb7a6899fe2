//! Keyboard handling: crossterm key events to semantic game actions.
//!
//! The game is strictly keydown-driven (no hold-to-repeat), so this is a
//! pure mapping. The classic `j`/`k`/`l`/`i` cluster is kept alongside the
//! arrow keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tui_rockfall_types::{Difficulty, GameAction};

/// Map a key press to a game action.
pub fn map_key(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('j') | KeyCode::Char('J') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::MoveRight),

        // Plant a bomb at the current cell
        KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('K') => Some(GameAction::PlantBomb),

        // Jet toggle
        KeyCode::Up | KeyCode::Char('i') | KeyCode::Char('I') => Some(GameAction::ToggleFlight),

        // Difficulty (also starts a run from the attract screen)
        KeyCode::Char('1') => Some(GameAction::SelectDifficulty(Difficulty::Easy)),
        KeyCode::Char('2') => Some(GameAction::SelectDifficulty(Difficulty::Medium)),
        KeyCode::Char('3') => Some(GameAction::SelectDifficulty(Difficulty::Hard)),

        // Start / restart
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::Start),

        _ => None,
    }
}

/// Whether this key should quit the game immediately.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
