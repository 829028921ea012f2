// In crates/notifier/src/postgres.rs

use async_trait::async_trait;
use core_types::{NewNotification, Notification};
use database::Db;

use crate::{Error, NotificationSink, Result};

/// Persists notifications into the `notification` table.
#[derive(Debug, Clone)]
pub struct PostgresSink {
    db: Db,
}

impl PostgresSink {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationSink for PostgresSink {
    fn name(&self) -> &'static str {
        "Postgres"
    }

    async fn persist(&self, notification: NewNotification) -> Result<Notification> {
        self.db
            .insert_notification(&notification)
            .await
            .map_err(|e| Error::PersistenceFailure {
                sink: self.name(),
                reason: e.to_string(),
            })
    }
}
