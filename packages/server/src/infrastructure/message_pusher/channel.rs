//! Queue-based MessagePusher
//!
//! Each session owns a writer task fed by a bounded `mpsc` queue whose sender
//! is stored in the registry. Broadcasting copies the senders out of the
//! registry under its lock and then `try_send`s, so a slow peer can only fill
//! its own queue: once full, lines for that peer are dropped instead of
//! stalling the fan-out.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::{BroadcastReport, ClientRegistry, MessagePusher, SessionId};

pub struct ChannelMessagePusher {
    registry: Arc<dyn ClientRegistry>,
}

impl ChannelMessagePusher {
    pub fn new(registry: Arc<dyn ClientRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl MessagePusher for ChannelMessagePusher {
    async fn broadcast(&self, line: &str, exclude: Option<SessionId>) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for (session_id, outbound) in self.registry.outbound_channels().await {
            if exclude == Some(session_id) {
                continue;
            }
            match outbound.try_send(line.to_string()) {
                Ok(()) => report.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Outbound queue of session {} is full, dropping line",
                        session_id
                    );
                    report.failed += 1;
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::warn!(
                        "Session {} stopped writing, skipping it in broadcast",
                        session_id
                    );
                    report.failed += 1;
                }
            }
        }

        report
    }
}
