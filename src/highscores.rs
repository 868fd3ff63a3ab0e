//! High score leaderboard
//!
//! Stored as plain text, one `name,score` line per entry, best first. The file
//! is rewritten in full whenever an entry is added.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Longest name kept, in characters
pub const MAX_NAME_LEN: usize = 9;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
}

impl LeaderboardEntry {
    pub fn new(name: &str, score: u64) -> Self {
        Self {
            name: sanitize_name(name),
            score,
        }
    }

    fn parse(line: &str) -> Option<Self> {
        let (name, score) = line.rsplit_once(',')?;
        let score = score.trim().parse().ok()?;
        Some(Self::new(name, score))
    }
}

/// Strip the separator and line breaks, then cap the length
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ',' | '\n' | '\r'))
        .take(MAX_NAME_LEN)
        .collect()
}

/// Top scores backed by a file
#[derive(Debug, Clone)]
pub struct Leaderboard {
    path: PathBuf,
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Empty board that will save to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Read the board from `path`. A missing file is an empty board.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let mut board = Self::new(path);
        let bytes = match fs::read(&board.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No leaderboard at {}, starting fresh", board.path.display());
                return Ok(board);
            }
            Err(e) => return Err(e.into()),
        };

        board.entries = parse_entries(&bytes);
        log::info!("Loaded {} high scores", board.entries.len());
        Ok(board)
    }

    /// Write every entry back to the file
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.to_text())?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{},{}\n", e.name, e.score))
            .collect()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a score in order and persist the board.
    ///
    /// Returns the rank achieved (1-indexed), or None if it didn't qualify.
    pub fn add_entry(&mut self, name: &str, score: u64) -> Result<Option<usize>> {
        let Some(rank) = self.insert(LeaderboardEntry::new(name, score)) else {
            return Ok(None);
        };
        self.save()?;
        Ok(Some(rank))
    }

    fn insert(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let rank = self.potential_rank(entry.score)?;
        self.entries.insert(rank - 1, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Parse `name,score` lines, skipping anything malformed, best first.
///
/// Lines are decoded one at a time so a single corrupt line costs only itself.
fn parse_entries(bytes: &[u8]) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = bytes
        .split(|&b| b == b'\n')
        .filter_map(|raw| {
            let entry = std::str::from_utf8(raw)
                .ok()
                .and_then(|line| LeaderboardEntry::parse(line.trim_end_matches('\r')));
            if entry.is_none() && !raw.trim_ascii().is_empty() {
                log::warn!(
                    "Skipping malformed leaderboard line: {:?}",
                    String::from_utf8_lossy(raw)
                );
            }
            entry
        })
        .collect();
    // Stable, so equal scores keep file order
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_HIGH_SCORES);
    entries
}
