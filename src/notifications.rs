//! Notification Queue
//!
//! Ordered list of transient toasts. The queue itself is plain data; the
//! reactive wrapper that schedules removal lives in `context::Notifier`.

use std::time::Duration;

use chrono::{DateTime, Utc};

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "toast toast-success",
            Severity::Warning => "toast toast-warning",
            Severity::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub severity: Severity,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    last_id: NotificationId,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail and return the new id.
    ///
    /// Ids are `millis * 1000 + jitter`, bumped past the previous id when two
    /// pushes land in the same millisecond.
    pub fn push(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        now: DateTime<Utc>,
        jitter: u32,
    ) -> NotificationId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let candidate = millis * 1000 + u64::from(jitter % 1000);
        let id = candidate.max(self.last_id + 1);
        self.last_id = id;
        self.items.push(Notification {
            id,
            severity,
            message: message.into(),
            created_at: now,
        });
        id
    }

    /// Remove by id. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drop everything shown for at least `ttl`, returning the removed ids
    pub fn expire(&mut self, now: DateTime<Utc>, ttl: Duration) -> Vec<NotificationId> {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(1));
        let mut expired = Vec::new();
        self.items.retain(|n| {
            let keep = now - n.created_at < ttl;
            if !keep {
                expired.push(n.id);
            }
            keep
        });
        expired
    }

    /// A display timer for `id` went off: drop it, plus anything whose own
    /// timer was lost
    pub fn timer_fired(&mut self, id: NotificationId, now: DateTime<Utc>, ttl: Duration) -> usize {
        let removed = usize::from(self.remove(id));
        removed + self.expire(now, ttl).len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Anything that can show a toast
pub trait Notify {
    fn notify(&self, severity: Severity, message: String);

    fn success(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Severity::Success, message.into());
    }

    fn warning(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Severity::Warning, message.into());
    }

    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Severity::Error, message.into());
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;

    use super::{Notify, Severity};

    /// Collects notifications instead of showing them
    #[derive(Default)]
    pub struct RecordingNotify {
        pub sent: RefCell<Vec<(Severity, String)>>,
    }

    impl RecordingNotify {
        pub fn of(&self, severity: Severity) -> Vec<String> {
            self.sent
                .borrow()
                .iter()
                .filter(|(s, _)| *s == severity)
                .map(|(_, m)| m.clone())
                .collect()
        }

        pub fn count(&self) -> usize {
            self.sent.borrow().len()
        }
    }

    impl Notify for RecordingNotify {
        fn notify(&self, severity: Severity, message: String) {
            self.sent.borrow_mut().push((severity, message));
        }
    }
}
