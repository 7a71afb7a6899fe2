//! Persistent high-score ledger.
//!
//! The table lives in a plain comma-separated text file: a fixed header
//! line, then up to [`HIGH_SCORE_LIMIT`] entries ordered by descending
//! score (ties keep insertion order). Fields are never quoted or escaped,
//! so a name containing a comma will corrupt its line. This is a documented
//! limitation of the format, deliberately not papered over.
//!
//! A missing file is the normal first-run state. A storage path that cannot
//! be read or written degrades the ledger to memory-only with a warning;
//! it never takes the game down.

pub mod date;
mod persist;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use tui_rockfall_types::HIGH_SCORE_LIMIT;

pub use date::format_run_timestamp;

/// Header line of the score file.
pub const SCORE_HEADER: &str = "name,score,difficulty,date";

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub difficulty: String,
    pub date: String,
}

impl ScoreEntry {
    fn to_line(&self) -> String {
        format!("{},{},{},{}", self.name, self.score, self.difficulty, self.date)
    }

    /// Parse one data line. `None` means the line is malformed and should
    /// be skipped (the caller logs it).
    fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split(',');
        let name = fields.next()?.to_string();
        let score = fields.next()?.parse().ok()?;
        let difficulty = fields.next()?.to_string();
        let date = fields.next()?.to_string();
        if fields.next().is_some() {
            return None;
        }
        Some(Self {
            name,
            score,
            difficulty,
            date,
        })
    }
}

/// The ranked high-score table and its storage.
#[derive(Debug)]
pub struct ScoreLedger {
    /// `None` once storage has failed: the table keeps working in memory.
    path: Option<PathBuf>,
    entries: Vec<ScoreEntry>,
}

impl ScoreLedger {
    /// Open the ledger at `path`, loading any existing table.
    ///
    /// A missing file is not an error; an unreadable one logs a warning and
    /// yields a memory-only ledger.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            return Self {
                path: Some(path),
                entries: Vec::new(),
            };
        }
        match load_entries(&path) {
            Ok(entries) => Self {
                path: Some(path),
                entries,
            },
            Err(err) => {
                log::warn!(
                    "score file {} unreadable ({err:#}); scores kept in memory only",
                    path.display()
                );
                Self {
                    path: None,
                    entries: Vec::new(),
                }
            }
        }
    }

    /// A ledger with no backing storage.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Record a run, returning the formatted table.
    ///
    /// A `score` of 0 is a read-only query: the table is returned untouched
    /// (though the file is created with just its header on a true first
    /// run). Otherwise the entry is inserted at the first position whose
    /// stored score is strictly lower (equal scores are not displaced, so
    /// earlier runs keep the higher slot), the table is truncated to
    /// capacity, and the result is persisted.
    pub fn record(&mut self, score: u32, name: &str, difficulty: &str, timestamp: u64) -> String {
        if let Some(path) = self.path.clone() {
            if !path.exists() {
                self.persist();
            }
        }

        if score == 0 {
            return self.format();
        }

        let entry = ScoreEntry {
            name: name.to_string(),
            score,
            difficulty: difficulty.to_string(),
            date: date::format_run_timestamp(timestamp),
        };
        match self.entries.iter().position(|e| e.score < score) {
            Some(pos) => self.entries.insert(pos, entry),
            None => self.entries.push(entry),
        }
        self.entries.truncate(HIGH_SCORE_LIMIT);

        self.persist();
        self.format()
    }

    /// The whole table as text: header plus one line per entry.
    pub fn format(&self) -> String {
        let mut out = String::from(SCORE_HEADER);
        for entry in &self.entries {
            out.push('\n');
            out.push_str(&entry.to_line());
        }
        out
    }

    fn persist(&mut self) {
        let Some(path) = self.path.clone() else {
            return;
        };
        let mut content = self.format();
        content.push('\n');
        if let Err(err) = persist::atomic_write(&path, content.as_bytes()) {
            log::warn!(
                "could not write score file {} ({err}); scores kept in memory only",
                path.display()
            );
            self.path = None;
        }
    }
}

fn load_entries(path: &Path) -> Result<Vec<ScoreEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let mut entries = Vec::new();
    for line in content.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match ScoreEntry::parse(line) {
            Some(entry) => entries.push(entry),
            None => log::warn!("skipping malformed score line: {line:?}"),
        }
    }
    entries.truncate(HIGH_SCORE_LIMIT);
    Ok(entries)
}
