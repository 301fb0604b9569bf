//! Error types for the chat server.

use thiserror::Error;

/// Fatal server errors (the acceptor cannot start or continue)
#[derive(Debug, Error)]
pub enum ServerError {
    /// Binding the listening socket failed
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
