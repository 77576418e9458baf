//! Repository for the `notifications` table.
//!
//! The store keeps full history; the live view cap is the dispatcher's
//! concern, applied via the `limit` on [`NotificationRepo::list_desc`].

use guardtower_core::model::Notification;

use crate::row::{notification_from_row, to_millis};
use crate::{DbPool, StoreError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, message, kind, read, timestamp";

/// Provides CRUD operations for operator notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification.
    pub async fn insert(pool: &DbPool, notification: &Notification) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO notifications (id, message, kind, read, timestamp) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&notification.id)
        .bind(&notification.message)
        .bind(notification.kind.as_str())
        .bind(notification.read)
        .bind(to_millis(notification.timestamp))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// The `limit` most recent notifications, newest first (ties broken by
    /// insertion order).
    pub async fn list_desc(pool: &DbPool, limit: i64) -> Result<Vec<Notification>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             ORDER BY timestamp DESC, rowid DESC \
             LIMIT ?1"
        );
        let rows = sqlx::query(&query).bind(limit).fetch_all(pool).await?;
        rows.iter()
            .map(notification_from_row)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    /// Mark every unread notification as read. Idempotent; only `read` is
    /// ever mutated after creation.
    ///
    /// Returns the number of rows that changed.
    pub async fn mark_all_read(pool: &DbPool) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE notifications SET read = 1 WHERE read = 0")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Number of unread notifications in the store.
    pub async fn unread_count(pool: &DbPool) -> Result<i64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE read = 0")
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    pub async fn count(pool: &DbPool) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
