pub mod channel;
pub mod error;
pub mod message;
pub mod process;
pub mod session;

// Re-export the protocol-level API (not tournament-specific)
pub use channel::{Channel, ERROR_PREFIX, MAX_MESSAGE_LINES, POLL_INTERVAL, SENTINEL};
pub use error::UhpError;
pub use message::Message;
pub use process::ProcessIo;
pub use session::{EngineSession, INVALID_MOVE_PREFIX, REQUIRED_EXTENSIONS};

use std::io;

// =============================================================================
// EngineIo trait — implemented by every transport an engine can sit behind
// =============================================================================

/// Raw line transport bound to one engine process.
///
/// Implementations expose exactly two operations: write one line to the
/// process's input, and poll its output for the next complete line without
/// blocking. Everything above this trait (message framing, handshakes, the
/// match loop) is transport-agnostic, which is what lets tests substitute
/// scripted transcripts for live processes.
pub trait EngineIo: Send {
    /// Write `line`, append a newline, and flush so the peer observes it
    /// without buffering delay.
    fn send_line(&mut self, line: &str) -> io::Result<()>;

    /// Return the next complete line if one has already arrived.
    ///
    /// Must never block: `Ok(None)` means no full line is available yet.
    fn poll_line(&mut self) -> io::Result<Option<String>>;
}
