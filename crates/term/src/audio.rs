//! Audio capability for terminal shells.
//!
//! The core emits [`SoundKind`] cues; what happens to them is the shell's
//! choice. A real terminal has no mixer, so the options are the classic
//! ones: silence, or the bell.

use std::io::Write;

use tui_rockfall_types::SoundKind;

/// Something that can play (or swallow) a sound cue.
pub trait AudioSink {
    fn play(&mut self, kind: SoundKind);
}

/// Discards every cue.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _kind: SoundKind) {}
}

/// Rings the terminal bell for the percussive cues and stays quiet for the
/// jingles, which would otherwise ring constantly.
#[derive(Debug, Default)]
pub struct BellAudio;

impl AudioSink for BellAudio {
    fn play(&mut self, kind: SoundKind) {
        match kind {
            SoundKind::Boom | SoundKind::Spark | SoundKind::Crunch => {
                let mut stdout = std::io::stdout();
                let _ = stdout.write_all(b"\x07");
                let _ = stdout.flush();
            }
            SoundKind::Intro | SoundKind::Outro | SoundKind::Bling => {}
        }
    }
}
