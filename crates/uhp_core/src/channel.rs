//! Message framing over an engine's input/output streams.
//!
//! Engines speak a command-per-line request format: the driver writes one
//! newline-terminated command, the engine answers with zero or more payload
//! lines followed by a sentinel line. The channel turns that unbounded,
//! line-buffered traffic into discrete, bounded messages and enforces
//! deadlines by polling a non-blocking transport instead of relying on
//! signal-based interruption.

use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::EngineIo;
use crate::error::UhpError;
use crate::message::Message;

/// Line that terminates every engine message.
pub const SENTINEL: &str = "ok";

/// Prefix marking an explicit engine-side failure.
pub const ERROR_PREFIX: &str = "err";

/// Maximum payload lines accepted before the sentinel. Guards against a
/// misbehaving engine that never terminates its message.
pub const MAX_MESSAGE_LINES: usize = 100;

/// Default pause between polls while waiting for more output.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Frames one engine's line traffic into messages.
pub struct Channel {
    io: Box<dyn EngineIo>,
    poll_interval: Duration,
}

impl Channel {
    pub fn new(io: Box<dyn EngineIo>) -> Self {
        Self::with_poll_interval(io, POLL_INTERVAL)
    }

    /// Channel with a custom poll interval. Tests use a short one so
    /// deadline behavior can be exercised quickly.
    pub fn with_poll_interval(io: Box<dyn EngineIo>, poll_interval: Duration) -> Self {
        Self { io, poll_interval }
    }

    /// Write one command line, newline-terminated and flushed immediately.
    pub fn send(&mut self, text: &str) -> Result<(), UhpError> {
        debug!(%text, "send");
        self.io.send_line(text)?;
        Ok(())
    }

    /// Accumulate lines until the sentinel, then return the message.
    ///
    /// Blank lines are skipped. A line beginning with [`ERROR_PREFIX`]
    /// aborts the exchange with the partial payload attached; more than
    /// [`MAX_MESSAGE_LINES`] payload lines abort it as an overflow. With a
    /// timeout, the deadline is honored to within one poll interval; the
    /// lines accumulated so far are discarded, while any bytes not yet
    /// forming a complete line stay buffered in the transport.
    pub fn receive(&mut self, timeout: Option<Duration>) -> Result<Message, UhpError> {
        let deadline = timeout.map(|waited| (waited, Instant::now() + waited));
        let mut lines: Vec<String> = Vec::new();

        loop {
            while let Some(raw) = self.io.poll_line()? {
                let line = raw.trim();
                if line.is_empty() {
                    continue;
                }
                if line == SENTINEL {
                    let message = Message::from_lines(lines);
                    debug!(body = %message.body(), "recv");
                    return Ok(message);
                }
                if line.starts_with(ERROR_PREFIX) {
                    return Err(UhpError::Protocol {
                        partial: lines.join("\n"),
                    });
                }
                lines.push(line.to_string());
                if lines.len() > MAX_MESSAGE_LINES {
                    return Err(UhpError::Overflow {
                        limit: MAX_MESSAGE_LINES,
                    });
                }
            }

            if let Some((waited, at)) = deadline
                && Instant::now() >= at
            {
                return Err(UhpError::Timeout { waited });
            }
            thread::sleep(self.poll_interval);
        }
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod channel_tests;
