//! Top scores kept in a flat text file: one decimal integer per line, highest first.

use crate::config::MAX_HIGH_SCORES;
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreFileError {
    #[error("Failed to read score file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write score file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    scores: Vec<u32>, // Sorted descending, at most MAX_HIGH_SCORES
}

impl HighScores {
    pub fn new() -> Self {
        HighScores { scores: Vec::new() }
    }

    /// Parse file contents. Lines that are not a non-negative integer are skipped.
    pub fn parse(text: &str) -> Self {
        let mut scores: Vec<u32> = text
            .lines()
            .filter_map(|line| line.trim().parse::<u32>().ok())
            .collect();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        HighScores { scores }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for score in &self.scores {
            out.push_str(&score.to_string());
            out.push('\n');
        }
        out
    }

    /// Load from `path`. A missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self, ScoreFileError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let table = Self::parse(&text);
                info!("Loaded {} high scores from {}", table.len(), path.display());
                Ok(table)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No high score file at {}, starting fresh", path.display());
                Ok(Self::new())
            }
            Err(source) => Err(ScoreFileError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Rewrite the whole file.
    pub fn save(&self, path: &Path) -> Result<(), ScoreFileError> {
        if let Err(source) = fs::write(path, self.to_text()) {
            return Err(ScoreFileError::Write {
                path: path.to_path_buf(),
                source,
            });
        }
        info!("High scores saved ({} entries)", self.len());
        Ok(())
    }

    /// Insert a finished run's score. Returns its 1-based rank if it made the table.
    pub fn insert(&mut self, score: u32) -> Option<usize> {
        let pos = self
            .scores
            .iter()
            .position(|s| score > *s)
            .unwrap_or(self.scores.len());
        if pos >= MAX_HIGH_SCORES {
            return None;
        }
        self.scores.insert(pos, score);
        self.scores.truncate(MAX_HIGH_SCORES);
        Some(pos + 1)
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn best(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "circle_vs_square_{}_{}.txt",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_parse_filters_malformed_lines() {
        let table = HighScores::parse("12\nabc\n\n  7 \n-3\n40\n3.5\n");
        assert_eq!(table.scores(), &[40, 12, 7]);
    }

    #[test]
    fn test_parse_sorts_and_truncates() {
        let table = HighScores::parse("1\n2\n3\n4\n5\n6\n7\n");
        assert_eq!(table.scores(), &[7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_insert_ranks() {
        let mut table = HighScores::new();
        assert_eq!(table.insert(10), Some(1));
        assert_eq!(table.insert(30), Some(1));
        assert_eq!(table.insert(20), Some(2));
        assert_eq!(table.insert(20), Some(3)); // Ties go below existing entries
        assert_eq!(table.scores(), &[30, 20, 20, 10]);
        assert_eq!(table.insert(0), Some(5));
        assert_eq!(table.insert(0), None); // Table full, does not beat the lowest
        assert_eq!(table.insert(25), Some(2));
        assert_eq!(table.scores(), &[30, 25, 20, 20, 10]);
        assert_eq!(table.best(), Some(30));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = temp_file("missing");
        let table = HighScores::load(&path).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_repeated_saves_keep_top_five_descending() {
        let path = temp_file("saves");
        for score in [5, 50, 3, 17, 42, 8, 99, 1, 23] {
            let mut table = HighScores::load(&path).unwrap();
            table.insert(score);
            table.save(&path).unwrap();

            let text = fs::read_to_string(&path).unwrap();
            let lines: Vec<u32> = text.lines().map(|l| l.parse().unwrap()).collect();
            assert!(lines.len() <= MAX_HIGH_SCORES);
            assert!(lines.windows(2).all(|w| w[0] >= w[1]));
        }
        let table = HighScores::load(&path).unwrap();
        assert_eq!(table.scores(), &[99, 50, 42, 23, 17]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_error_reported() {
        let dir = std::env::temp_dir();
        let table = HighScores::parse("1\n");
        // A directory cannot be written as a file
        match table.save(&dir) {
            Err(ScoreFileError::Write { path, .. }) => assert_eq!(path, dir),
            other => panic!("expected write error, got {:?}", other),
        }
    }
}
