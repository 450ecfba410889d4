//! High score leaderboard system
//!
//! Tracks the top 10 sessions by seconds survived.

use serde::{Deserialize, Serialize};

use crate::config::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Whole seconds survived
    pub score: u32,
    /// Coins collected in the session
    pub coins: u32,
    /// Tier the session was played on
    pub difficulty: Difficulty,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(
        &mut self,
        score: u32,
        coins: u32,
        difficulty: Difficulty,
        timestamp: f64,
    ) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            coins,
            difficulty,
            timestamp,
        };

        // Sorted descending; ties keep the older entry first
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Entries that still fit the board, highest first. Used after loading
    /// a board edited by hand or an older build.
    pub fn normalize(&mut self) {
        self.entries.retain(|e| e.score > 0);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let board = HighScores::new();
        assert!(!board.qualifies(0));
        assert!(board.qualifies(1));
    }

    #[test]
    fn test_add_keeps_descending_order() {
        let mut board = HighScores::new();
        assert_eq!(board.add_score(10, 1, Difficulty::Easy, 0.0), Some(1));
        assert_eq!(board.add_score(30, 0, Difficulty::Hard, 1.0), Some(1));
        assert_eq!(board.add_score(20, 2, Difficulty::Medium, 2.0), Some(2));
        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![30, 20, 10]);
        assert_eq!(board.top_score(), Some(30));
    }

    #[test]
    fn test_board_is_capped() {
        let mut board = HighScores::new();
        for score in 1..=15 {
            board.add_score(score, 0, Difficulty::Medium, score as f64);
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(6));
        assert!(!board.qualifies(6));
        assert_eq!(board.potential_rank(7), Some(10));
        assert_eq!(board.add_score(3, 0, Difficulty::Easy, 0.0), None);
    }

    #[test]
    fn test_normalize() {
        let mut board = HighScores {
            entries: vec![
                HighScoreEntry { score: 0, coins: 0, difficulty: Difficulty::Easy, timestamp: 0.0 },
                HighScoreEntry { score: 5, coins: 0, difficulty: Difficulty::Easy, timestamp: 0.0 },
                HighScoreEntry { score: 9, coins: 0, difficulty: Difficulty::Easy, timestamp: 0.0 },
            ],
        };
        board.normalize();
        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![9, 5]);
    }
}
