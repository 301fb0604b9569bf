//! Client runtime configuration.

use std::time::Duration;

use pipechat_shared::protocol::{SERVER_PORT, Username};

/// Settings for one client session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server host name or IP address
    pub server: String,
    pub port: u16,
    pub username: Username,
    /// IP written into outgoing frames; the socket's local address when unset
    pub sender_ip: Option<String>,
    /// Pause between the two halves of a split message
    pub split_delay: Duration,
    pub connect_timeout: Duration,
}

impl ClientConfig {
    pub fn new(server: impl Into<String>, username: Username) -> Self {
        Self {
            server: server.into(),
            port: SERVER_PORT,
            username,
            sender_ip: None,
            split_delay: Duration::from_millis(50),
            connect_timeout: Duration::from_secs(5),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}
