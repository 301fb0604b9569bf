//! MessagePusher trait
//!
//! Fan-out of one formatted line to the connected sessions. A failure to
//! reach one recipient is counted, never propagated.

use async_trait::async_trait;

use super::session::SessionId;

/// Outcome of one fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Recipients whose outbound queue accepted the line
    pub delivered: usize,
    /// Recipients skipped because their queue was full or closed
    pub failed: usize,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Send `line` to every registered session except `exclude`
    async fn broadcast(&self, line: &str, exclude: Option<SessionId>) -> BroadcastReport;
}
