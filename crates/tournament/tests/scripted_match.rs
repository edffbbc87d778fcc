//! End-to-end match flow against scripted engine transcripts.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use tournament::{GameResult, MatchConfig, MatchRunner};
use uhp_core::{EngineIo, EngineSession};

struct ScriptedIo {
    lines: VecDeque<String>,
}

impl EngineIo for ScriptedIo {
    fn send_line(&mut self, _line: &str) -> io::Result<()> {
        Ok(())
    }

    fn poll_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

fn session(name: &str, rest: &[&str]) -> EngineSession {
    let mut lines = vec!["id ScriptedEngine 1.0", "Mosquito;Ladybug;Pillbug", "ok", "ok"];
    lines.extend_from_slice(rest);
    let io = ScriptedIo {
        lines: lines.iter().map(|s| s.to_string()).collect(),
    };
    EngineSession::with_poll_interval(name, Box::new(io), Duration::from_millis(1))
}

/// A full game: four in-progress plies, then the referee declares a draw.
/// The recorded trace must be exactly the referee's final response.
#[test]
fn scripted_game_ends_in_draw_with_referee_trace() {
    let final_trace = "Base+MLP;Draw;White[3];wS1;bS1 wS1-;wA1 -wS1;bA1 bS1/;wG1 /wS1";

    let referee = session(
        "referee",
        &[
            "Base+MLP;InProgress;White[1];wS1",
            "ok",
            "Base+MLP;InProgress;White[2];wS1;bS1 wS1-",
            "ok",
            "Base+MLP;InProgress;Black[2];wS1;bS1 wS1-;wA1 -wS1",
            "ok",
            "Base+MLP;InProgress;White[3];wS1;bS1 wS1-;wA1 -wS1;bA1 bS1/",
            "ok",
            final_trace,
            "ok",
        ],
    );
    let white = session(
        "mzinga",
        &["wS1", "ok", "ok", "ok", "wA1 -wS1", "ok", "ok", "ok", "wG1 /wS1", "ok"],
    );
    let black = session(
        "nokamute",
        &["ok", "bS1 wS1-", "ok", "ok", "ok", "bA1 bS1/", "ok", "ok"],
    );

    let config = MatchConfig {
        move_time: Duration::from_millis(50),
        grace: Duration::from_millis(50),
        ..MatchConfig::default()
    };
    let outcome = MatchRunner::new(config, referee, white, black)
        .play()
        .unwrap();

    assert_eq!(outcome.result, GameResult::Draw);
    assert_eq!(outcome.reason, "normal ending");
    assert_eq!(outcome.game_string, final_trace);
    assert!(outcome.elapsed > Duration::ZERO);
}
