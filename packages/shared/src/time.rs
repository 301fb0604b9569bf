//! Time-related utilities with clock abstraction for testability.

use chrono::{Local, NaiveDateTime};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: NaiveDateTime,
}

impl FixedClock {
    /// Create a new fixed clock with the given local time
    pub fn new(fixed_time: NaiveDateTime) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.fixed_time
    }
}

/// Format a time as `HH:MM:SS`
pub fn format_hms(time: &NaiveDateTime) -> String {
    time.format("%H:%M:%S").to_string()
}
