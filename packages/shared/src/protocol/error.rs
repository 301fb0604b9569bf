//! Error types for the wire protocol.

use thiserror::Error;

/// Errors raised while building or interpreting protocol values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The received text is not a well-formed frame or broadcast line
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),

    /// A field contains a character the wire format cannot carry
    #[error("Unsupported input in {field}: {reason}")]
    UnsupportedInput { field: &'static str, reason: String },

    /// The encoded frame does not fit the receive buffer of the peer
    #[error("Encoded frame is {size} bytes, limit is {max}")]
    FrameTooLarge { size: usize, max: usize },

    /// The username is empty, too long, or contains reserved characters
    #[error("Invalid username '{0}': must be 1-5 characters without '|', '[', ']' or whitespace")]
    InvalidUsername(String),
}

/// Errors raised by the newline framing layer
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line exceeded the configured limit; the remainder was discarded
    #[error("Line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("Line is not valid UTF-8")]
    InvalidUtf8,
}
