//! Tournament results storage and reporting

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::outcome::{GameResult, MatchOutcome};

/// Complete tournament results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResults {
    /// Name/description of the tournament
    pub name: String,
    /// Participating engines
    pub participants: Vec<String>,
    /// One entry per game, in playing order
    pub games: Vec<GameEntry>,
}

/// A single recorded game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEntry {
    pub first: String,
    pub second: String,
    pub outcome: MatchOutcome,
    pub timestamp: String,
}

/// Win/loss/draw tally for one engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Standing {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Standing {
    pub fn points(&self) -> f64 {
        f64::from(self.wins) + 0.5 * f64::from(self.draws)
    }
}

impl TournamentResults {
    pub fn new(name: &str, participants: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            participants,
            games: Vec::new(),
        }
    }

    /// Record a finished game
    pub fn add_game(&mut self, first: &str, second: &str, outcome: MatchOutcome) {
        self.games.push(GameEntry {
            first: first.to_string(),
            second: second.to_string(),
            outcome,
            timestamp: chrono::Utc::now().to_rfc3339(),
        });
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write: {}", e))
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read: {}", e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse: {}", e))
    }

    /// Per-engine tallies, best score first
    pub fn standings(&self) -> Vec<(String, Standing)> {
        let mut table: BTreeMap<&str, Standing> = BTreeMap::new();
        for entry in &self.games {
            let (first, second) = (entry.first.as_str(), entry.second.as_str());
            match entry.outcome.result {
                GameResult::FirstMoverWins => {
                    table.entry(first).or_default().wins += 1;
                    table.entry(second).or_default().losses += 1;
                }
                GameResult::SecondMoverWins => {
                    table.entry(first).or_default().losses += 1;
                    table.entry(second).or_default().wins += 1;
                }
                GameResult::Draw => {
                    table.entry(first).or_default().draws += 1;
                    table.entry(second).or_default().draws += 1;
                }
            }
        }
        let mut standings: Vec<(String, Standing)> = table
            .into_iter()
            .map(|(name, standing)| (name.to_string(), standing))
            .collect();
        standings.sort_by(|a, b| {
            b.1.points()
                .partial_cmp(&a.1.points())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        standings
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Tournament: {} ===\n\n", self.name));
        report.push_str(&format!("Participants: {}\n\n", self.participants.join(", ")));

        report.push_str("Games:\n");
        report.push_str(&format!(
            "{:<20} vs {:<20} {:>5}  {}\n",
            "First", "Second", "Score", "Reason"
        ));
        report.push_str(&"-".repeat(70));
        report.push('\n');
        for entry in &self.games {
            report.push_str(&format!(
                "{:<20} vs {:<20} {:>5}  {}\n",
                entry.first,
                entry.second,
                entry.outcome.result.marker(),
                entry.outcome.reason
            ));
        }

        report.push_str("\nStandings:\n");
        report.push_str(&format!(
            "{:<20} {:>3}-{:<3}-{:<3} {:>6}\n",
            "Engine", "W", "L", "D", "Pts"
        ));
        report.push_str(&"-".repeat(40));
        report.push('\n');
        for (name, standing) in self.standings() {
            report.push_str(&format!(
                "{:<20} {:>3}-{:<3}-{:<3} {:>6.1}\n",
                name,
                standing.wins,
                standing.losses,
                standing.draws,
                standing.points()
            ));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn outcome(result: GameResult, reason: &str) -> MatchOutcome {
        MatchOutcome {
            result,
            reason: reason.to_string(),
            game_string: String::new(),
            elapsed: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_standings_tally() {
        let mut results =
            TournamentResults::new("smoke", vec!["mzinga".to_string(), "nokamute".to_string()]);
        results.add_game("mzinga", "nokamute", outcome(GameResult::FirstMoverWins, "normal ending"));
        results.add_game("nokamute", "mzinga", outcome(GameResult::Draw, "maxed out plies"));

        let standings = results.standings();
        assert_eq!(standings[0].0, "mzinga");
        assert_eq!(
            standings[0].1,
            Standing {
                wins: 1,
                losses: 0,
                draws: 1
            }
        );
        assert_eq!(
            standings[1].1,
            Standing {
                wins: 0,
                losses: 1,
                draws: 1
            }
        );
    }

    #[test]
    fn test_report_mentions_games_and_reasons() {
        let mut results =
            TournamentResults::new("smoke", vec!["mzinga".to_string(), "nokamute".to_string()]);
        results.add_game(
            "mzinga",
            "nokamute",
            outcome(GameResult::SecondMoverWins, "white proposed invalid move"),
        );

        let report = results.generate_report();
        assert!(report.contains("=== Tournament: smoke ==="));
        assert!(report.contains("0-1"));
        assert!(report.contains("white proposed invalid move"));
    }
}
