//! Error types for the chat client.

use pipechat_shared::protocol::ProtocolError;
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connecting failed or the connection was lost
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The message cannot be expressed as a frame
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
