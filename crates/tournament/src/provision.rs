//! Spawning engine processes and handing their pipes to sessions.

use std::io;
use std::process::{Child, Command, Stdio};

use serde::Deserialize;
use tracing::info;
use uhp_core::{EngineSession, ProcessIo, UhpError};

/// How to start one engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSpec {
    /// Display name used in results and logs
    pub name: String,
    /// Executable to run
    pub command: String,
    /// Arguments passed to the executable
    #[serde(default)]
    pub args: Vec<String>,
}

impl EngineSpec {
    pub fn new(name: &str, command: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Engine distributed as a container image, run the way the reference
    /// deployment does.
    pub fn docker_image(name: &str, image: &str) -> Self {
        Self::new(name, "docker", &["run", "-i", "--rm", "-w", "/app", image])
    }
}

/// Owns a spawned engine's process handle.
///
/// The match engine never sees this; whoever launched the engine terminates
/// it after the match outcome is in hand.
pub struct EngineProcess {
    child: Child,
    stopped: bool,
}

impl EngineProcess {
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Kill the process and reap it.
    pub fn terminate(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if self.child.try_wait().ok().flatten().is_none() {
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
        info!(pid = self.child.id(), "stopped engine process");
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Start an engine process and wrap its pipes in a protocol session,
/// ready for `greet()`.
pub fn launch(spec: &EngineSpec) -> Result<(EngineSession, EngineProcess), UhpError> {
    let mut child = Command::new(&spec.command)
        .args(&spec.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;
    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| io::Error::other("engine stdin unavailable"))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("engine stdout unavailable"))?;
    let io = ProcessIo::new(stdin, stdout)?;

    info!(engine = %spec.name, pid = child.id(), "started engine process");
    Ok((
        EngineSession::new(&spec.name, Box::new(io)),
        EngineProcess {
            child,
            stopped: false,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docker_spec_shape() {
        let spec = EngineSpec::docker_image("mzinga", "mzinga");
        assert_eq!(spec.command, "docker");
        assert_eq!(spec.args, ["run", "-i", "--rm", "-w", "/app", "mzinga"]);
    }

    #[test]
    fn test_launch_missing_binary_is_an_error() {
        let spec = EngineSpec::new("ghost", "/nonexistent/engine", &[]);
        assert!(launch(&spec).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_and_terminate() {
        let spec = EngineSpec::new("sleeper", "/bin/sh", &["-c", "sleep 30"]);
        let (_session, process) = launch(&spec).unwrap();
        assert!(process.id() > 0);
        process.terminate();
    }
}
