//! Server runtime configuration.

use std::time::Duration;

use pipechat_shared::protocol::SERVER_PORT;

/// Runtime settings for [`Server`](super::Server)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: String,
    /// Port to bind to; `0` picks a free port
    pub port: u16,
    /// Number of registry slots
    pub max_clients: usize,
    /// Lines buffered per session before broadcasts to it are dropped
    pub outbound_queue: usize,
    /// A session that sends nothing for this long is closed
    pub idle_timeout: Duration,
    /// Limit for writing one line to a session's socket
    pub write_timeout: Duration,
    /// How long sessions may take to finish after shutdown is requested
    pub shutdown_grace: Duration,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: SERVER_PORT,
            max_clients: 10,
            outbound_queue: 32,
            idle_timeout: Duration::from_secs(15 * 60),
            write_timeout: Duration::from_secs(5),
            shutdown_grace: Duration::from_secs(2),
        }
    }
}
