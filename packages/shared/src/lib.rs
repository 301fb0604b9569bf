//! Shared building blocks for the pipechat server and client.
//!
//! - [`protocol`] defines the pipe-delimited wire frame, the broadcast line
//!   the server sends back, the word-aware splitter and newline framing.
//! - [`logger`] installs the tracing subscriber used by both binaries.
//! - [`time`] provides a clock abstraction for display timestamps.

pub mod logger;
pub mod protocol;
pub mod time;
