//! UseCase 層のエラー型

use thiserror::Error;

/// Admission failures for a new connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// The registry has no empty slot; the connection must be closed
    #[error("Server is full ({capacity} clients)")]
    CapacityExceeded { capacity: usize },
}
