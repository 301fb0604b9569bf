//! The server → client display line.

use std::fmt;

use super::{error::ProtocolError, frame::Frame};

/// One `IP [USERNAME] TEXT` line fanned out by the server.
///
/// Field padding is left to the renderer; the line itself carries no widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastLine {
    pub sender_ip: String,
    pub username: String,
    pub text: String,
}

impl BroadcastLine {
    pub fn new(
        sender_ip: impl Into<String>,
        username: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender_ip: sender_ip.into(),
            username: username.into(),
            text: text.into(),
        }
    }

    /// Parse a line received from the server
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let malformed = || ProtocolError::MalformedFrame(format!("not a broadcast line: '{line}'"));

        let (sender_ip, rest) = line.split_once(" [").ok_or_else(malformed)?;
        let (username, rest) = rest.split_once(']').ok_or_else(malformed)?;
        if sender_ip.is_empty() || sender_ip.contains(' ') {
            return Err(malformed());
        }
        // A single space separates the closing bracket from the text.
        let text = rest.strip_prefix(' ').unwrap_or(rest);

        Ok(Self::new(sender_ip, username, text))
    }
}

impl From<&Frame> for BroadcastLine {
    fn from(frame: &Frame) -> Self {
        Self::new(&frame.sender_ip, &frame.username, &frame.text)
    }
}

impl fmt::Display for BroadcastLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.sender_ip, self.username, self.text)
    }
}
