//! Message formatting utilities for client display.

use chrono::NaiveDateTime;
use pipechat_shared::{
    protocol::{BroadcastLine, MAX_PART_LEN, MAX_USERNAME_LEN},
    time::format_hms,
};

/// Widest dotted IPv4 address
const IP_WIDTH: usize = 15;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a broadcast chat line in fixed-width columns
    ///
    /// # Arguments
    ///
    /// * `line` - The parsed broadcast line
    /// * `is_self` - Whether this client sent the message
    /// * `received_at` - Local time the line arrived
    ///
    /// # Returns
    ///
    /// `IP [USER] >> TEXT (HH:MM:SS)`, with `<<` instead of `>>` for the
    /// client's own messages
    pub fn format_broadcast(
        line: &BroadcastLine,
        is_self: bool,
        received_at: &NaiveDateTime,
    ) -> String {
        let marker = if is_self { "<<" } else { ">>" };
        format!(
            "{:<ip$} [{:<user$}] {} {:<text$} ({})",
            line.sender_ip,
            line.username,
            marker,
            line.text,
            format_hms(received_at),
            ip = IP_WIDTH,
            user = MAX_USERNAME_LEN,
            text = MAX_PART_LEN,
        )
    }

    /// Format a line that is not a chat message (status or unparsable text)
    pub fn format_raw_message(text: &str) -> String {
        text.to_string()
    }
}
