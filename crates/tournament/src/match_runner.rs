//! Match runner for playing games between engines
//!
//! One runner drives one match: three engine processes (a trusted referee
//! plus the two players) complete the protocol handshake, then alternate
//! plies until the referee reports a terminal state, a player forfeits, or
//! the ply budget runs out. Every path ends in exactly one [`MatchOutcome`].

use std::time::{Duration, Instant};

use tracing::{info, warn};
use uhp_core::{EngineSession, INVALID_MOVE_PREFIX, UhpError};

use crate::outcome::{GameResult, MatchOutcome};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Game variant passed to `newgame`
    pub variant: String,
    /// Thinking budget granted to the mover each ply
    pub move_time: Duration,
    /// Extra slack past the budget before a move request is forfeited
    pub grace: Duration,
    /// Maximum half-moves before declaring a draw
    pub max_plies: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            variant: "Base+MLP".to_string(),
            move_time: Duration::from_secs(5),
            grace: Duration::from_secs(1),
            max_plies: 200,
        }
    }
}

/// The two logical colors. The first mover always plays white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    White,
    Black,
}

impl Side {
    fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }

    fn wins(self) -> GameResult {
        match self {
            Side::White => GameResult::FirstMoverWins,
            Side::Black => GameResult::SecondMoverWins,
        }
    }
}

/// Plays one match between two engines under a referee.
///
/// Owns its three sessions for the duration of the match and nothing else;
/// terminating the underlying processes afterwards is the caller's job.
/// Each runner is an independent value, so concurrent matches need no
/// coordination.
pub struct MatchRunner {
    config: MatchConfig,
    referee: EngineSession,
    white: EngineSession,
    black: EngineSession,
}

impl MatchRunner {
    pub fn new(
        config: MatchConfig,
        referee: EngineSession,
        white: EngineSession,
        black: EngineSession,
    ) -> Self {
        Self {
            config,
            referee,
            white,
            black,
        }
    }

    /// Play the match to its terminal condition.
    ///
    /// Handshake failures surface as errors; every failure during play is
    /// folded into the returned outcome instead. The runner is consumed so
    /// no channel operation can follow the terminal state.
    pub fn play(mut self) -> Result<MatchOutcome, UhpError> {
        let start = Instant::now();
        self.handshake()?;

        let budget = format_clock(self.config.move_time);
        let deadline = self.config.move_time + self.config.grace;
        let mut game_string = String::new();

        for ply in 0..self.config.max_plies {
            let side = if ply % 2 == 0 { Side::White } else { Side::Black };
            info!(ply, side = side.label(), "requesting move");

            let move_text = {
                let mover = self.player_mut(side);
                mover.send(&format!("bestmove time {budget}"))?;
                match mover.receive(Some(deadline)) {
                    Ok(msg) => msg.body(),
                    Err(err) => {
                        // A non-responding process cannot be asked anything
                        // further, so this forfeit skips the referee.
                        warn!(side = side.label(), %err, "no move before deadline");
                        return Ok(finish(
                            side.opponent().wins(),
                            "timeout while recommending best move",
                            &game_string,
                            start,
                        ));
                    }
                }
            };

            // The referee is the sole legality authority.
            self.referee.send(&format!("play {move_text}"))?;
            let verdict = self.referee.receive(None)?.body();
            if verdict.starts_with(INVALID_MOVE_PREFIX) {
                return Ok(finish(
                    side.opponent().wins(),
                    &format!("{} proposed invalid move", side.label()),
                    &game_string,
                    start,
                ));
            }
            game_string = verdict;
            info!(%game_string, "board state");

            if let Some(result) = terminal_result(&game_string) {
                return Ok(finish(result, "normal ending", &game_string, start));
            }

            // Replay the accepted move into both participants, mover first.
            // A rejection here means that engine disagrees with the referee
            // about a move the referee already accepted.
            for echo_side in [side, side.opponent()] {
                let player = self.player_mut(echo_side);
                player.send(&format!("play {move_text}"))?;
                if player.receive(None)?.body().starts_with(INVALID_MOVE_PREFIX) {
                    return Ok(finish(
                        echo_side.opponent().wins(),
                        &format!("unrecognized valid move by {}", echo_side.label()),
                        &game_string,
                        start,
                    ));
                }
            }
        }

        Ok(finish(GameResult::Draw, "maxed out plies", &game_string, start))
    }

    fn handshake(&mut self) -> Result<(), UhpError> {
        let variant = self.config.variant.clone();
        for session in [&mut self.referee, &mut self.white, &mut self.black] {
            session.greet()?;
        }
        for session in [&mut self.referee, &mut self.white, &mut self.black] {
            session.start_game(&variant)?;
        }
        Ok(())
    }

    fn player_mut(&mut self, side: Side) -> &mut EngineSession {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }
}

fn finish(result: GameResult, reason: &str, game_string: &str, start: Instant) -> MatchOutcome {
    MatchOutcome {
        result,
        reason: reason.to_string(),
        game_string: game_string.to_string(),
        elapsed: start.elapsed(),
    }
}

/// The second `;`-field of the board state names the game state; three of
/// its tokens are terminal. A trace without that field is still in play.
fn terminal_result(game_string: &str) -> Option<GameResult> {
    match game_string.split(';').nth(1)? {
        "Draw" => Some(GameResult::Draw),
        "WhiteWins" => Some(GameResult::FirstMoverWins),
        "BlackWins" => Some(GameResult::SecondMoverWins),
        _ => None,
    }
}

fn format_clock(budget: Duration) -> String {
    let secs = budget.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
