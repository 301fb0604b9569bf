//! Domain layer: session identity and the interfaces the use cases depend on.
//!
//! Concrete implementations live in the infrastructure layer.

mod message_pusher;
mod registry;
mod session;

pub use message_pusher::{BroadcastReport, MessagePusher};
pub use registry::{ClientRegistry, RegistryError};
pub use session::{OutboundSender, SessionId, SlotIndex};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use registry::MockClientRegistry;
