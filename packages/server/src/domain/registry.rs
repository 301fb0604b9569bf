//! Client Registry trait
//!
//! The only shared mutable state of the server: a bounded set of slots, one
//! per live session. Implementations must serialise every claim, release and
//! snapshot so a slot is never handed out twice or read while half-freed.

use async_trait::async_trait;
use thiserror::Error;

use super::session::{OutboundSender, SessionId, SlotIndex};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Every slot is occupied
    #[error("All {capacity} client slots are occupied")]
    CapacityExceeded { capacity: usize },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// Claim the lowest empty slot for a new session
    async fn claim_slot(
        &self,
        session_id: SessionId,
        outbound: OutboundSender,
    ) -> Result<SlotIndex, RegistryError>;

    /// Empty `slot` if it is still held by `session_id`.
    ///
    /// Returns `false` (and changes nothing) when the slot is already empty
    /// or has been reused by another session.
    async fn release_slot(&self, slot: SlotIndex, session_id: SessionId) -> bool;

    /// Copy of the outbound queues of every occupied slot
    async fn outbound_channels(&self) -> Vec<(SessionId, OutboundSender)>;

    /// Number of occupied slots
    async fn occupied_count(&self) -> usize;

    /// Total number of slots
    fn capacity(&self) -> usize;
}
