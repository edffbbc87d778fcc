//! Error types for engine protocol exchanges.

use std::time::Duration;

use thiserror::Error;

/// Failures surfaced by channels and sessions.
///
/// Handshake-phase failures are fatal to a match attempt. During play, the
/// match loop translates a mover's failure into a forfeit outcome instead
/// of propagating it.
#[derive(Debug, Error)]
pub enum UhpError {
    /// The engine emitted an explicit error line mid-message. Carries the
    /// payload collected before the error line, for diagnostics.
    #[error("protocol error: {partial}")]
    Protocol { partial: String },

    /// The engine produced more payload lines than one message may carry.
    #[error("message exceeded {limit} lines without a terminator")]
    Overflow { limit: usize },

    /// No terminated message arrived before the deadline.
    #[error("no message within {waited:?}")]
    Timeout { waited: Duration },

    /// The handshake banner did not declare the required extension set.
    #[error("{engine}: banner declared extensions {found:?}")]
    CapabilityMismatch { engine: String, found: String },

    /// The underlying stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
