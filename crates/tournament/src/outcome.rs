//! Match outcomes produced by the game loop.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a single match. The first mover always occupies white, so the
/// referee's `WhiteWins`/`BlackWins` vocabulary maps onto these directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    FirstMoverWins,
    SecondMoverWins,
    Draw,
}

impl GameResult {
    /// Score from the first mover's perspective, for rating updates.
    pub fn first_mover_score(self) -> f64 {
        match self {
            GameResult::FirstMoverWins => 1.0,
            GameResult::Draw => 0.5,
            GameResult::SecondMoverWins => 0.0,
        }
    }

    /// Conventional score marker for reports.
    pub fn marker(self) -> &'static str {
        match self {
            GameResult::FirstMoverWins => "1-0",
            GameResult::SecondMoverWins => "0-1",
            GameResult::Draw => "1/2",
        }
    }
}

/// The single artifact a finished match hands to its caller.
///
/// Created exactly once, at the moment the match reaches a terminal
/// condition, and never modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub result: GameResult,
    /// Free-text classification of how the match ended.
    pub reason: String,
    /// Final board-state serialization reported by the referee. Empty when
    /// no move was ever accepted.
    pub game_string: String,
    /// Wall-clock duration from handshake to terminal condition.
    pub elapsed: Duration,
}
