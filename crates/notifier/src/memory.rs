// In crates/notifier/src/memory.rs

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{NewNotification, Notification};
use tokio::sync::Mutex;

use crate::{Error, NotificationSink, Result};

/// A process-local sink for dry runs and tests.
///
/// Ids start at 1 and `created_at` never goes backwards, even if the wall
/// clock does.
#[derive(Debug, Default)]
pub struct InMemorySink {
    state: Mutex<MemoryState>,
    fail_writes: AtomicBool,
}

#[derive(Debug, Default)]
struct MemoryState {
    notifications: Vec<Notification>,
    last_created_at: Option<DateTime<Utc>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following write fail with `PersistenceFailure`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// All stored notifications in insertion order.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.state.lock().await.notifications.clone()
    }
}

#[async_trait]
impl NotificationSink for InMemorySink {
    fn name(&self) -> &'static str {
        "InMemory"
    }

    async fn persist(&self, notification: NewNotification) -> Result<Notification> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::PersistenceFailure {
                sink: self.name(),
                reason: "writes are disabled".into(),
            });
        }

        let mut state = self.state.lock().await;
        let now = Utc::now();
        let created_at = match state.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        let id = state.notifications.len() as i64 + 1;

        let stored = Notification::from_new(notification, id, created_at);
        state.last_created_at = Some(created_at);
        state.notifications.push(stored.clone());
        Ok(stored)
    }
}
