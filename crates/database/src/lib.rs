// In crates/database/src/lib.rs

use app_config::types::DatabaseSettings;
use core_types::{NewNotification, Notification};
use sqlx::{PgPool, postgres::PgPoolOptions};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::NotificationRow;

/// The columns of `notification`, aliased to the field names of `NotificationRow`.
const NOTIFICATION_COLUMNS: &str = r#"
    id, asset, signal::text AS signal, "priceAtSignal" AS price_at_signal,
    indicator, reason, "createdAt" AS created_at
"#;

/// A wrapper around the `sqlx` connection pool.
#[derive(Debug, Clone)]
pub struct Db(PgPool);

/// Establishes a connection pool to the PostgreSQL database and runs migrations.
///
/// # Arguments
///
/// * `settings`: The database configuration settings.
///
/// # Returns
///
/// A `Result` containing the `Db` wrapper on success, or an `Error` on failure.
pub async fn connect(settings: &DatabaseSettings) -> Result<Db> {
    // Create a connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.url)
        .await?;

    // Run database migrations. This ensures the database schema is up-to-date.
    sqlx::migrate!("../../migrations").run(&pool).await?;
    tracing::debug!(max_connections = settings.max_connections, "Database pool ready.");

    Ok(Db(pool))
}

impl Db {
    /// Wraps an existing pool without running migrations.
    pub fn from_pool(pool: PgPool) -> Self {
        Self(pool)
    }

    pub fn pool(&self) -> &PgPool {
        &self.0
    }

    /// Inserts one notification and returns it with its generated `id` and `createdAt`.
    ///
    /// This is a single-row insert; the table is append-only for this service.
    pub async fn insert_notification(&self, new: &NewNotification) -> Result<Notification> {
        let sql = format!(
            r#"
            INSERT INTO notification (asset, signal, "priceAtSignal", indicator, reason)
            VALUES ($1, $2::notification_signal, $3, $4, $5)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        );

        let row: NotificationRow = sqlx::query_as(&sql)
            .bind(&new.asset)
            .bind(new.signal.as_str())
            .bind(new.price_at_signal)
            .bind(&new.indicator)
            .bind(&new.reason)
            .fetch_one(&self.0)
            .await
            .map_err(Error::OperationFailed)?;

        Notification::try_from(row)
    }

    /// Fetches one page of notifications, newest first, with the total row count.
    ///
    /// `page` starts at 1.
    pub async fn get_notifications_paginated(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Notification>, i64)> {
        let offset = i64::from(page.max(1) - 1) * i64::from(page_size);

        let total_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notification")
            .fetch_one(&self.0)
            .await
            .map_err(Error::OperationFailed)?;

        let sql = format!(
            r#"SELECT {NOTIFICATION_COLUMNS} FROM notification
               ORDER BY "createdAt" DESC, id DESC
               LIMIT $1 OFFSET $2"#
        );
        let rows: Vec<NotificationRow> = sqlx::query_as(&sql)
            .bind(i64::from(page_size))
            .bind(offset)
            .fetch_all(&self.0)
            .await
            .map_err(Error::OperationFailed)?;

        let notifications = rows
            .into_iter()
            .map(Notification::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok((notifications, total_items))
    }

    /// Fetches the `limit` most recent notifications.
    pub async fn get_recent_notifications(&self, limit: u32) -> Result<Vec<Notification>> {
        let (notifications, _) = self.get_notifications_paginated(1, limit).await?;
        Ok(notifications)
    }
}
