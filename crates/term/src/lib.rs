//! Terminal capability crate: rendering and audio for the game core.
//!
//! The core never touches the terminal; this crate implements the other
//! side of that boundary:
//!
//! - [`fb`]: a styled character framebuffer the view draws into
//! - [`game_view`]: pure mapping from `GameState` to a frame
//! - [`renderer`]: raw-mode crossterm backend with changed-run diffing
//! - [`audio`]: the sound-cue sink (bell or silence)

pub mod audio;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use audio::{AudioSink, BellAudio, NullAudio};
pub use fb::{Frame, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
