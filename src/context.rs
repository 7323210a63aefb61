//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::time::Duration;

use chrono::Utc;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

use crate::api::HttpApi;
use crate::config::AppConfig;
use crate::notifications::{Notification, NotificationId, NotificationQueue, Notify, Severity};
use crate::tasks::TaskScope;

/// Reactive toast queue. Each toast removes itself after `ttl`.
#[derive(Clone, Copy)]
pub struct Notifier {
    queue: RwSignal<NotificationQueue>,
    timers: TaskScope,
    ttl: Duration,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            queue: RwSignal::new(NotificationQueue::new()),
            timers: TaskScope::new(),
            ttl,
        }
    }

    /// Current toasts, oldest first (tracked)
    pub fn items(&self) -> Vec<Notification> {
        self.queue.with(|q| q.items().to_vec())
    }

    pub fn is_empty(&self) -> bool {
        self.queue.with(|q| q.is_empty())
    }

    pub fn dismiss(&self, id: NotificationId) {
        self.queue.try_update(|q| q.remove(id));
    }

    /// Cancel pending timers and empty the queue
    pub fn teardown(&self) {
        self.timers.cancel_all();
        self.queue.try_update(|q| q.clear());
    }

    fn schedule_removal(&self, id: NotificationId) {
        let queue = self.queue;
        let ttl = self.ttl;
        let millis = u32::try_from(ttl.as_millis()).unwrap_or(u32::MAX);
        self.timers.spawn(async move {
            TimeoutFuture::new(millis).await;
            queue.try_update(|q| q.timer_fired(id, Utc::now(), ttl));
        });
    }
}

impl Notify for Notifier {
    fn notify(&self, severity: Severity, message: String) {
        let jitter = (js_sys::Math::random() * 1000.0) as u32;
        let Some(id) = self
            .queue
            .try_update(|q| q.push(severity, message.clone(), Utc::now(), jitter))
        else {
            log::debug!("notifier disposed, dropping {:?} toast: {}", severity, message);
            return;
        };
        log::debug!("toast {} ({:?}): {}", id, severity, message);
        self.schedule_removal(id);
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub notifier: Notifier,
    api: StoredValue<HttpApi, LocalStorage>,
    reminders_sent: StoredValue<bool>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            notifier: Notifier::new(config.toast_duration),
            api: StoredValue::new_local(HttpApi::new(&config)),
            reminders_sent: StoredValue::new(false),
        }
    }

    /// HTTP client for the configured server
    pub fn api(&self) -> HttpApi {
        self.api.get_value()
    }

    /// True exactly once per session; gates the "upcoming" reminders
    pub fn claim_reminders(&self) -> bool {
        self.reminders_sent
            .try_update_value(|sent| !std::mem::replace(sent, true))
            .unwrap_or(false)
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
