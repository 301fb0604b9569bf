//! In-memory Client Registry
//!
//! A fixed-length slot table guarded by a single `tokio::sync::Mutex`.
//! Every claim, release and snapshot takes the lock for the whole structural
//! operation.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientRegistry, OutboundSender, RegistryError, SessionId, SlotIndex};

struct SlotEntry {
    session_id: SessionId,
    outbound: OutboundSender,
}

/// Slot table sized once at construction
pub struct InMemoryClientRegistry {
    slots: Mutex<Vec<Option<SlotEntry>>>,
    capacity: usize,
}

impl InMemoryClientRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Mutex::new((0..capacity).map(|_| None).collect()),
            capacity,
        }
    }
}

#[async_trait]
impl ClientRegistry for InMemoryClientRegistry {
    async fn claim_slot(
        &self,
        session_id: SessionId,
        outbound: OutboundSender,
    ) -> Result<SlotIndex, RegistryError> {
        let mut slots = self.slots.lock().await;

        let Some(index) = slots.iter().position(Option::is_none) else {
            return Err(RegistryError::CapacityExceeded {
                capacity: self.capacity,
            });
        };
        slots[index] = Some(SlotEntry {
            session_id,
            outbound,
        });
        tracing::debug!("Session {} claimed slot {}", session_id, index);

        Ok(index)
    }

    async fn release_slot(&self, slot: SlotIndex, session_id: SessionId) -> bool {
        let mut slots = self.slots.lock().await;

        match slots.get_mut(slot) {
            Some(entry) if entry.as_ref().is_some_and(|e| e.session_id == session_id) => {
                *entry = None;
                tracing::debug!("Session {} released slot {}", session_id, slot);
                true
            }
            _ => {
                tracing::debug!(
                    "Slot {} is not held by session {}, nothing to release",
                    slot,
                    session_id
                );
                false
            }
        }
    }

    async fn outbound_channels(&self) -> Vec<(SessionId, OutboundSender)> {
        let slots = self.slots.lock().await;
        slots
            .iter()
            .flatten()
            .map(|entry| (entry.session_id, entry.outbound.clone()))
            .collect()
    }

    async fn occupied_count(&self) -> usize {
        let slots = self.slots.lock().await;
        slots.iter().filter(|slot| slot.is_some()).count()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
