//! Display of received lines.

use std::sync::Arc;

use pipechat_shared::{
    protocol::BroadcastLine,
    time::{Clock, SystemClock},
};

use crate::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Sink for every line the client shows to the user
#[cfg_attr(test, mockall::automock)]
pub trait Renderer: Send + Sync {
    /// Show one line; `is_self` marks messages this client sent
    fn render(&self, line: &str, is_self: bool);
}

/// Renderer that prints to stdout and restores the input prompt
pub struct TerminalRenderer {
    clock: Arc<dyn Clock>,
    prompt: String,
}

impl TerminalRenderer {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self::with_clock(prompt, Arc::new(SystemClock))
    }

    pub fn with_clock(prompt: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            prompt: prompt.into(),
        }
    }

    /// Text shown for `line`: chat lines in columns with a receive time,
    /// anything else unchanged
    pub fn display_text(&self, line: &str, is_self: bool) -> String {
        match BroadcastLine::parse(line) {
            Ok(parsed) => MessageFormatter::format_broadcast(&parsed, is_self, &self.clock.now()),
            Err(_) => MessageFormatter::format_raw_message(line),
        }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, line: &str, is_self: bool) {
        // Overwrite the prompt the input thread is showing.
        println!("\r{}", self.display_text(line, is_self));
        redisplay_prompt(&self.prompt);
    }
}
