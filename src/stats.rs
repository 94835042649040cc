//! Lifetime statistics
//!
//! Accumulated across runs and persisted through the store.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;
use crate::storage::Store;

/// Lifetime statistics across all runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    pub games_played: u64,
    pub total_score: u64,
    pub best_distance_m: f64,
    pub enemies_dodged: u64,
}

impl Stats {
    /// Store key
    const KEY: &'static str = "stats";

    /// Fold a finished run into the totals
    pub fn record_run(&mut self, state: &GameState) {
        self.games_played += 1;
        self.total_score += state.score;
        self.enemies_dodged += state.dodged;
        if state.distance_m > self.best_distance_m {
            self.best_distance_m = state.distance_m;
        }
    }

    /// Load from the store, falling back to zeroes
    pub fn load(store: &Store) -> Self {
        store.get(Self::KEY).unwrap_or_default()
    }

    /// Persist, best-effort
    pub fn save(&self, store: &Store) {
        store.set(Self::KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_run_accumulates() {
        let mut stats = Stats::default();
        let mut state = GameState::new(1);
        state.score = 150;
        state.dodged = 12;
        state.distance_m = 900.0;
        stats.record_run(&state);

        let mut second = GameState::new(2);
        second.score = 50;
        second.dodged = 3;
        second.distance_m = 400.0;
        stats.record_run(&second);

        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.total_score, 200);
        assert_eq!(stats.enemies_dodged, 15);
        // Best distance is a max, not a sum
        assert_eq!(stats.best_distance_m, 900.0);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let store = Store::in_memory();
        let mut stats = Stats::default();
        stats.games_played = 7;
        stats.save(&store);
        assert_eq!(Stats::load(&store).games_played, 7);
    }
}
