//! Maps the simulation state onto a terminal frame.
//!
//! Pure (no I/O) so it can be unit-tested: given a `GameState` and the
//! formatted score table, produce a [`Frame`]. The shell decides when to
//! flush frames to a real terminal.
//!
//! The picture wants roughly 70x36 cells; smaller terminals clip.

use tui_rockfall_core::GameState;
use tui_rockfall_types::{
    Direction, LootKind, RunPhase, DEATH_TIMEOUT, FALL_INTERVAL_TICKS, GRID_HEIGHT, GRID_WIDTH,
};

use crate::fb::{Frame, Rgb, Style};

const BROWN: Rgb = Rgb::new(128, 96, 64);
const DARK_GREY: Rgb = Rgb::new(64, 64, 64);
const BLACK: Rgb = Rgb::new(0, 0, 0);
const WHITE: Rgb = Rgb::new(255, 255, 255);
const YELLOW: Rgb = Rgb::new(220, 220, 20);
const CYAN: Rgb = Rgb::new(16, 220, 220);
const EMBER: Rgb = Rgb::new(172, 48, 16);

/// Each grid cell is two terminal columns wide to compensate for glyph
/// aspect ratio.
const CELL_W: u16 = 2;

/// Top-left of the playfield interior.
const FIELD_X: u16 = 1;
const FIELD_Y: u16 = 1;

/// Left edge of the side panel.
const PANEL_X: u16 = FIELD_X + GRID_WIDTH as u16 * CELL_W + 3;

/// Terminal dimensions handed in by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders a `GameState` into frames.
#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    pub fn render(&self, state: &GameState, scores: &str, viewport: Viewport) -> Frame {
        let mut frame = Frame::new(viewport.width, viewport.height);
        frame.clear(Style::new(WHITE, BLACK));

        if state.phase() == RunPhase::Attract {
            self.draw_title_screen(&mut frame, state, scores);
        } else {
            self.draw_playfield(&mut frame, state);
            self.draw_panel(&mut frame, state, scores);
            self.draw_footer(&mut frame, state);
        }
        frame
    }

    fn draw_title_screen(&self, frame: &mut Frame, state: &GameState, scores: &str) {
        let title = Style::new(YELLOW, BLACK).bold();
        frame.print(14, 2, " R O C K F A L L ", title);
        frame.print(
            18,
            4,
            concat!(" v ", env!("CARGO_PKG_VERSION"), " "),
            Style::new(YELLOW, BLACK),
        );

        draw_score_table(frame, 4, 7, scores, true);

        frame.print(10, 18, state.notice(), Style::new(WHITE, DARK_GREY));
        frame.print(8, 20, state.status(), Style::new(CYAN, BLACK).bold());
        frame.print(10, 22, " <ESC> to quit ", Style::new(WHITE, BLACK).dim());
    }

    fn draw_playfield(&self, frame: &mut Frame, state: &GameState) {
        let field_w = GRID_WIDTH as u16 * CELL_W;
        let field_h = GRID_HEIGHT as u16;

        // Backdrop and border.
        let backdrop = Style::new(BROWN, DARK_GREY);
        frame.fill_rect(FIELD_X, FIELD_Y, field_w, field_h, ' ', backdrop);
        draw_border(
            frame,
            FIELD_X - 1,
            FIELD_Y - 1,
            field_w + 2,
            field_h + 2,
            Style::new(WHITE, BLACK),
        );

        // Rock.
        for row in 0..GRID_HEIGHT {
            for col in 0..GRID_WIDTH {
                if state.grid().is_rock(row, col) {
                    let (x, y) = cell_origin(row, col);
                    frame.put(x, y, '▓', backdrop);
                    frame.put(x + 1, y, '▓', backdrop);
                }
            }
        }

        // Loot.
        for item in state.loot() {
            let (x, y) = cell_origin(item.row, item.col);
            let (ch, color) = loot_glyph(item.kind);
            frame.put(x, y, ch, Style::new(color, DARK_GREY).bold());
        }

        // Bombs with their fuse digit.
        for bomb in state.bombs() {
            let (x, y) = cell_origin(bomb.row, bomb.col);
            frame.put(x, y, '●', Style::new(BLACK, DARK_GREY).bold());
            if let Some(digit) = char::from_digit(bomb.fuse as u32, 10) {
                frame.put(x + 1, y, digit, Style::new(WHITE, DARK_GREY));
            }
        }

        // The miner (or what is left of them).
        let player = state.player();
        let (px, py) = cell_origin(player.row, player.col);
        if state.phase() == RunPhase::GameOver {
            frame.put(px, py, 'X', Style::new(EMBER, DARK_GREY).bold());
        } else {
            frame.put(px, py, '@', Style::new(YELLOW, DARK_GREY).bold());
            if player.direction == Direction::Flying {
                frame.put(px + 1, py, '^', Style::new(YELLOW, DARK_GREY));
            }
        }
    }

    fn draw_panel(&self, frame: &mut Frame, state: &GameState, scores: &str) {
        let label = Style::new(WHITE, DARK_GREY);
        let player = state.player();

        draw_death_gauge(frame, PANEL_X, 1, player.death_timer, DEATH_TIMEOUT);

        frame.print(PANEL_X, 3, &format!(" JET FUEL: {} ", player.fuel), label);
        if player.shields > 0 {
            frame.print(PANEL_X, 5, &format!(" SHIELDS: {} ", player.shields), label);
        }
        if player.bombs > 0 {
            frame.print(PANEL_X, 7, &format!(" BOMBS: {} ", player.bombs), label);
        }
        frame.print(PANEL_X, 11, &format!(" SCORE: {} ", player.score), label);

        if state.phase() == RunPhase::GameOver {
            frame.print(PANEL_X, 14, state.status(), label);
            frame.print(PANEL_X, 16, state.notice(), label);
            draw_score_table(frame, PANEL_X, 19, scores, false);
        }
    }

    fn draw_footer(&self, frame: &mut Frame, state: &GameState) {
        let y = FIELD_Y + GRID_HEIGHT as u16 + 1;
        let gravity = FALL_INTERVAL_TICKS as f32 * 2.0 - 0.02;
        frame.print(
            FIELD_X,
            y,
            &format!(
                "g:{:.2} m/s\u{00B2}  Difficulty: {}",
                gravity,
                state.difficulty().label()
            ),
            Style::new(WHITE, BLACK),
        );
        frame.print(PANEL_X, y, " <ESC> to quit ", Style::new(WHITE, BLACK).dim());
    }
}

/// Frame (x, y) of a grid cell's left character.
fn cell_origin(row: i16, col: i16) -> (u16, u16) {
    (FIELD_X + col as u16 * CELL_W, FIELD_Y + row as u16)
}

fn loot_glyph(kind: LootKind) -> (char, Rgb) {
    match kind {
        LootKind::Gem => ('◆', CYAN),
        LootKind::BombRefill => ('■', WHITE),
        LootKind::FuelRefill => ('▮', Rgb::new(64, 200, 64)),
        LootKind::ShieldRefill => ('+', Rgb::new(80, 128, 255)),
        LootKind::Hazard => ('!', EMBER),
    }
}

fn draw_border(frame: &mut Frame, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    for dx in 0..w {
        frame.put(x + dx, y, '─', style);
        frame.put(x + dx, y + h - 1, '─', style);
    }
    for dy in 0..h {
        frame.put(x, y + dy, '│', style);
        frame.put(x + w - 1, y + dy, '│', style);
    }
    frame.put(x, y, '┌', style);
    frame.put(x + w - 1, y, '┐', style);
    frame.put(x, y + h - 1, '└', style);
    frame.put(x + w - 1, y + h - 1, '┘', style);
}

/// The death clock: a small gauge filling toward the timeout.
fn draw_death_gauge(frame: &mut Frame, x: u16, y: u16, value: u32, range: u32) {
    const SLOTS: u32 = 8;
    let filled = (value.min(range) * SLOTS) / range.max(1);

    frame.put(x, y, '[', Style::new(WHITE, BLACK));
    for slot in 0..SLOTS {
        let (ch, color) = if slot < filled {
            ('█', EMBER)
        } else {
            ('·', DARK_GREY)
        };
        frame.put(x + 1 + slot as u16, y, ch, Style::new(color, BLACK));
    }
    frame.put(x + 1 + SLOTS as u16, y, ']', Style::new(WHITE, BLACK));
}

/// Lay the comma-separated score table out in columns.
///
/// The header row is capitalized; a blank line separates it from the data
/// rows. Dates are omitted on the cramped game-over panel.
fn draw_score_table(frame: &mut Frame, x: u16, y: u16, table: &str, with_date: bool) {
    const COLUMNS: [u16; 4] = [0, 12, 20, 29];

    for (r, line) in table.lines().enumerate() {
        let row_y = y + r as u16 + if r > 0 { 1 } else { 0 };
        for (c, field) in line.split(',').enumerate().take(COLUMNS.len()) {
            if c == 3 && !with_date {
                continue;
            }
            let text = if r == 0 { capitalize(field) } else { field.to_string() };
            frame.print(x + COLUMNS[c], row_y, &text, Style::new(WHITE, BLACK));
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
