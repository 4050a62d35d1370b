//! Transient notices shown after a failed search or a failed save.

use std::time::{Duration, Instant};

/// How long a notification stays up unless dismissed.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A search failed
    Error,
    /// Something could not be saved; the dashboard keeps working
    Warning,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    raised_at: Instant,
    ttl: Duration,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        message: impl Into<String>,
        raised_at: Instant,
        ttl: Duration,
    ) -> Self {
        Self {
            message: message.into(),
            kind,
            raised_at,
            ttl,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) < self.ttl
    }

    /// Time left before auto-dismissal, zero once expired.
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.ttl
            .saturating_sub(now.saturating_duration_since(self.raised_at))
    }
}
