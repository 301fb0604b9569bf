//! Interactive client for the pipechat TCP chat.
//!
//! Input lines are cut into protocol frames and sent to the server; lines
//! broadcast back by the server are handed to a [`Renderer`], flagged when
//! they came from this client.

pub mod config;
pub mod error;
mod formatter;
pub mod pump;
pub mod renderer;
mod session;
pub mod ui;

pub use config::ClientConfig;
pub use error::ClientError;
pub use renderer::{Renderer, TerminalRenderer};
pub use session::{Connection, connect, run_client, run_session};
