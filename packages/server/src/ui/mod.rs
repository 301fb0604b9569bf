//! TCP chat server implementation.

mod acceptor;
mod config;
mod server;
mod session;
mod signal;
pub mod state;

pub use config::ServerConfig;
pub use server::Server;
pub use session::SessionEnd;
pub use signal::shutdown_signal;
