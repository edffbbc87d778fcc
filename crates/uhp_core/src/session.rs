//! Engine handshake and game-start sequencing.

use std::time::Duration;

use crate::EngineIo;
use crate::channel::Channel;
use crate::error::UhpError;
use crate::message::Message;

/// Extension set every engine must announce in its banner. Move handling
/// downstream assumes exactly these rules, so anything else is fatal.
pub const REQUIRED_EXTENSIONS: &str = "Mosquito;Ladybug;Pillbug";

/// Prefix an engine uses to reject a `play` command.
pub const INVALID_MOVE_PREFIX: &str = "invalidmove";

/// One engine process seen through the protocol: a channel plus the fixed
/// preamble every engine (the referee included) completes before play.
pub struct EngineSession {
    name: String,
    channel: Channel,
}

impl EngineSession {
    pub fn new(name: impl Into<String>, io: Box<dyn EngineIo>) -> Self {
        Self {
            name: name.into(),
            channel: Channel::new(io),
        }
    }

    /// Session whose channel polls at a custom interval (tests).
    pub fn with_poll_interval(
        name: impl Into<String>,
        io: Box<dyn EngineIo>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            channel: Channel::with_poll_interval(io, poll_interval),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consume the identification banner the engine emits unprompted and
    /// verify its second line declares the full extension set.
    pub fn greet(&mut self) -> Result<(), UhpError> {
        let banner = self.channel.receive(None)?;
        let found = banner.line(1).unwrap_or_default();
        if found != REQUIRED_EXTENSIONS {
            return Err(UhpError::CapabilityMismatch {
                engine: self.name.clone(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// Start a game of `variant` and wait for the acknowledgement.
    pub fn start_game(&mut self, variant: &str) -> Result<(), UhpError> {
        self.channel.send(&format!("newgame {variant}"))?;
        self.channel.receive(None)?;
        Ok(())
    }

    pub fn send(&mut self, text: &str) -> Result<(), UhpError> {
        self.channel.send(text)
    }

    pub fn receive(&mut self, timeout: Option<Duration>) -> Result<Message, UhpError> {
        self.channel.receive(timeout)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
