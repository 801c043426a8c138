// Failure notices.
// A dismissible, time-limited message with an optional retry action.

use std::time::{Duration, Instant};

/// How long a notice stays visible before it expires on its own.
pub const NOTICE_TTL: Duration = Duration::from_secs(7);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    /// Whether the notice offers a retry action.
    pub retry: bool,
    pub shown_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>, retry: bool) -> Self {
        Self {
            message: message.into(),
            retry,
            shown_at: Instant::now(),
        }
    }

    /// Notice raised when a page fetch fails.
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::new(message, true)
    }

    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }
}
