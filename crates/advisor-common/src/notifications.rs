use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity level for user-facing notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Warning,
    Error,
}

/// A user-facing notice: a status banner or an alert.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub body: String,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    /// Creates a warning notification.
    ///
    /// Warnings back status banners (e.g. "backend offline") that stay
    /// relevant until restart, so they use a long TTL.
    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_ttl(
            NotificationLevel::Warning,
            title,
            body,
            Duration::from_secs(60 * 60),
        )
    }

    /// Creates an error notification with a 10-second TTL.
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_ttl(NotificationLevel::Error, title, body, Duration::from_secs(10))
    }

    fn with_ttl(
        level: NotificationLevel,
        title: impl Into<String>,
        body: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
            created_at: Instant::now(),
            ttl,
        }
    }

    /// Returns `true` if this notification has exceeded its TTL.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }
}

/// A bounded queue of notifications that auto-evicts expired entries.
#[derive(Debug)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl NotificationQueue {
    /// Creates a new queue with the given maximum capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes a notification, evicting expired entries first.
    /// If still at capacity after eviction, the oldest entry is removed.
    pub fn push(&mut self, notification: Notification) {
        self.evict_expired();
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    /// Removes and returns every non-expired notification.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.evict_expired();
        self.items.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn evict_expired(&mut self) {
        self.items.retain(|n| !n.is_expired());
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(16)
    }
}
