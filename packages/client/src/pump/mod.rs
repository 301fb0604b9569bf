//! Send and receive halves of a client connection.

mod receiver;
mod sender;

pub use receiver::{ReceiveEnd, ReceivePump};
pub use sender::FrameSender;
