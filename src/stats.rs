//! Lifetime player statistics
//!
//! Four counters, updated once per finished match and persisted as JSON.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// Longest run of consecutive wins
    pub best_streak: u32,
    /// Wins since the last loss
    pub current_streak: u32,
    pub total_games: u32,
    pub total_wins: u32,
}

impl Stats {
    /// Storage key
    const STORAGE_KEY: &'static str = "arcade_pong_stats";

    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one finished match from player 1's point of view
    pub fn record_match(&mut self, won: bool) {
        self.total_games += 1;
        if won {
            self.total_wins += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
    }

    /// Win percentage rounded to the nearest integer (0 with no games)
    pub fn win_rate(&self) -> u32 {
        if self.total_games == 0 {
            return 0;
        }
        (self.total_wins as f64 / self.total_games as f64 * 100.0).round() as u32
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        match persistence::load_json::<Stats>(store, Self::STORAGE_KEY) {
            Some(stats) => {
                log::info!("Loaded stats ({} games)", stats.total_games);
                stats
            }
            None => {
                log::info!("No stats found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match persistence::save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Stats saved ({} games)", self.total_games),
            Err(e) => log::warn!("Failed to save stats: {}", e),
        }
    }
}
