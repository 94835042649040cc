//! High score leaderboard
//!
//! Top 10 scores, persisted through the store.

use serde::{Deserialize, Serialize};

use crate::storage::Store;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Distance travelled (meters)
    pub distance_m: f64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Store key
    const KEY: &'static str = "highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Slot a score would occupy (0-indexed). The board is sorted
    /// descending, so this is the count of entries it does not beat;
    /// ties rank below the existing entry.
    fn slot_for(&self, score: u64) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0 && self.slot_for(score) < MAX_HIGH_SCORES
    }

    /// Add a new score (if it qualifies). Returns the 1-indexed rank
    /// achieved, or None.
    pub fn add_score(&mut self, score: u64, distance_m: f64, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let slot = self.slot_for(score);
        self.entries.insert(
            slot,
            HighScoreEntry {
                score,
                distance_m,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(slot + 1)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from the store, falling back to an empty board
    pub fn load(store: &Store) -> Self {
        match store.get::<HighScores>(Self::KEY) {
            Some(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Persist, best-effort
    pub fn save(&self, store: &Store) {
        store.set(Self::KEY, self);
        log::info!("High scores saved ({} entries)", self.entries.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_add_keeps_descending_order() {
        let mut scores = HighScores::new();
        scores.add_score(100, 80.0, 0.0);
        scores.add_score(300, 200.0, 1.0);
        scores.add_score(200, 150.0, 2.0);

        let vals: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(vals, vec![300, 200, 100]);
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn test_rank_and_truncation() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(i * 10, 0.0, 0.0);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);

        // Beats everything: rank 1, board stays capped
        assert_eq!(scores.add_score(10_000, 0.0, 0.0), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);

        // Worse than the whole board: rejected
        assert_eq!(scores.add_score(5, 0.0, 0.0), None);
    }

    #[test]
    fn test_tied_score_ranks_below_existing() {
        let mut scores = HighScores::new();
        scores.add_score(200, 0.0, 0.0);
        assert_eq!(scores.add_score(200, 0.0, 1.0), Some(2));

        // A full board of the same value rejects another tie
        let mut full = HighScores::new();
        for _ in 0..MAX_HIGH_SCORES {
            full.add_score(50, 0.0, 0.0);
        }
        assert!(!full.qualifies(50));
        assert_eq!(full.add_score(50, 0.0, 0.0), None);
        assert_eq!(full.add_score(51, 0.0, 0.0), Some(1));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let store = Store::in_memory();
        let mut scores = HighScores::new();
        scores.add_score(420, 333.0, 123.0);
        scores.save(&store);

        let loaded = HighScores::load(&store);
        assert_eq!(loaded.top_score(), Some(420));
        assert_eq!(loaded.entries.len(), 1);
    }
}
