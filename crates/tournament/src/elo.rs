//! Elo rating calculation and tracking

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::outcome::GameResult;

/// Default starting Elo for new engines
pub const DEFAULT_ELO: f64 = 1500.0;

/// K-factor for Elo updates (higher = more volatile)
pub const K_FACTOR: f64 = 32.0;

/// Elo rating system for tracking engine strength
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloTracker {
    /// Ratings for each engine (by name/version)
    pub ratings: HashMap<String, f64>,
    /// Number of games played by each engine
    pub games_played: HashMap<String, u32>,
    /// Game history for analysis
    pub history: Vec<GameRecord>,
}

/// Record of a single rated game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub first: String,
    pub second: String,
    pub result: GameResult,
    pub reason: String,
    pub timestamp: String,
    pub elo_change: f64,
}

impl Default for EloTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl EloTracker {
    pub fn new() -> Self {
        Self {
            ratings: HashMap::new(),
            games_played: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Load tracker from a JSON file
    pub fn load(path: &str) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse JSON: {}", e))
    }

    /// Save tracker to a JSON file
    pub fn save(&self, path: &str) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write file: {}", e))
    }

    /// Get or initialize rating for an engine
    pub fn get_rating(&mut self, engine: &str) -> f64 {
        *self.ratings.entry(engine.to_string()).or_insert(DEFAULT_ELO)
    }

    /// Expected score for the first mover against the second
    pub fn expected_score(&mut self, first: &str, second: &str) -> f64 {
        let r1 = self.get_rating(first);
        let r2 = self.get_rating(second);
        1.0 / (1.0 + 10.0_f64.powf((r2 - r1) / 400.0))
    }

    /// Update ratings after a single game
    pub fn update_game(&mut self, first: &str, second: &str, result: GameResult, reason: &str) {
        let expected = self.expected_score(first, second);
        let actual = result.first_mover_score();
        let elo_change = K_FACTOR * (actual - expected);

        let r1 = self.get_rating(first);
        let r2 = self.get_rating(second);
        self.ratings.insert(first.to_string(), r1 + elo_change);
        self.ratings.insert(second.to_string(), r2 - elo_change);

        *self.games_played.entry(first.to_string()).or_insert(0) += 1;
        *self.games_played.entry(second.to_string()).or_insert(0) += 1;

        self.history.push(GameRecord {
            first: first.to_string(),
            second: second.to_string(),
            result,
            reason: reason.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            elo_change,
        });
    }

    /// Get a sorted leaderboard
    pub fn leaderboard(&self) -> Vec<(String, f64, u32)> {
        let mut entries: Vec<_> = self
            .ratings
            .iter()
            .map(|(name, &rating)| {
                let games = self.games_played.get(name).copied().unwrap_or(0);
                (name.clone(), rating, games)
            })
            .collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }

    /// Print leaderboard to stdout
    pub fn print_leaderboard(&self) {
        println!("\n=== Engine Leaderboard ===");
        println!("{:<30} {:>8} {:>8}", "Engine", "Elo", "Games");
        println!("{}", "-".repeat(50));
        for (name, rating, games) in self.leaderboard() {
            println!("{:<30} {:>8.1} {:>8}", name, rating, games);
        }
        println!();
    }
}
