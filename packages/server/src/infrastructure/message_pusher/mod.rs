//! MessagePusher implementations
//!
//! - `channel`: pushes into each session's bounded outbound queue

pub mod channel;

pub use channel::ChannelMessagePusher;
