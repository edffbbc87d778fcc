use super::*;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

struct ScriptedIo {
    lines: VecDeque<String>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedIo {
    fn new(lines: &[&str], sent: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            sent,
        }
    }
}

impl EngineIo for ScriptedIo {
    fn send_line(&mut self, line: &str) -> io::Result<()> {
        self.sent.lock().unwrap().push(line.to_string());
        Ok(())
    }

    fn poll_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

fn session(name: &str, lines: &[&str]) -> (EngineSession, Arc<Mutex<Vec<String>>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let io = ScriptedIo::new(lines, sent.clone());
    let session = EngineSession::with_poll_interval(name, Box::new(io), Duration::from_millis(1));
    (session, sent)
}

#[test]
fn test_greet_accepts_full_extension_set() {
    let (mut s, _) = session("mzinga", &["id Mzinga v1.13", "Mosquito;Ladybug;Pillbug", "ok"]);
    assert!(s.greet().is_ok());
}

#[test]
fn test_greet_rejects_partial_extension_set() {
    let (mut s, _) = session("mzinga", &["id Mzinga v1.13", "Mosquito;Ladybug", "ok"]);
    match s.greet() {
        Err(UhpError::CapabilityMismatch { engine, found }) => {
            assert_eq!(engine, "mzinga");
            assert_eq!(found, "Mosquito;Ladybug");
        }
        other => panic!("expected capability mismatch, got {other:?}"),
    }
}

#[test]
fn test_greet_rejects_single_line_banner() {
    let (mut s, _) = session("nokamute", &["id Nokamute 0.1", "ok"]);
    match s.greet() {
        Err(UhpError::CapabilityMismatch { found, .. }) => assert_eq!(found, ""),
        other => panic!("expected capability mismatch, got {other:?}"),
    }
}

#[test]
fn test_start_game_sends_newgame_and_waits_for_ack() {
    let (mut s, sent) = session("mzinga", &["Base+MLP;NotStarted;White[1]", "ok"]);
    s.start_game("Base+MLP").unwrap();
    assert_eq!(*sent.lock().unwrap(), ["newgame Base+MLP"]);
}

#[test]
fn test_passthrough_send_and_receive() {
    let (mut s, sent) = session("mzinga", &["wS1", "ok"]);
    s.send("bestmove time 00:00:05").unwrap();
    let msg = s.receive(Some(Duration::from_millis(50))).unwrap();
    assert_eq!(msg.body(), "wS1");
    assert_eq!(*sent.lock().unwrap(), ["bestmove time 00:00:05"]);
}
