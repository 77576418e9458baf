//! Notification dispatch.
//!
//! Builds and persists operator notifications; the live-view cap and the
//! 1-second suppression of repeated critical posts are the caller's concern
//! (the monitor applies the cap to its view, the ingesting host applies the
//! debounce before appending).

use guardtower_core::model::Notification;
use guardtower_core::types::{new_id, NotificationKind, Timestamp};
use guardtower_db::repositories::NotificationRepo;
use guardtower_db::{DbPool, StoreError};

/// Persists operator notifications to the record store.
pub struct NotificationDispatcher {
    pool: DbPool,
}

impl NotificationDispatcher {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Post a critical alert sourced from a detection subsystem. The message
    /// is prefixed with the subsystem label, e.g.
    /// `"Prompt Firewall: Prompt injection attack blocked."`.
    pub async fn critical(
        &self,
        source_label: &str,
        message: &str,
        now: Timestamp,
    ) -> Result<Notification, StoreError> {
        self.post(
            format!("{source_label}: {message}"),
            NotificationKind::Critical,
            now,
        )
        .await
    }

    /// Post an informational notice (endpoint lifecycle events).
    pub async fn info(&self, message: String, now: Timestamp) -> Result<Notification, StoreError> {
        self.post(message, NotificationKind::Info, now).await
    }

    async fn post(
        &self,
        message: String,
        kind: NotificationKind,
        now: Timestamp,
    ) -> Result<Notification, StoreError> {
        let notification = Notification {
            id: new_id("notif"),
            message,
            kind,
            read: false,
            timestamp: now,
        };
        NotificationRepo::insert(&self.pool, &notification).await?;
        tracing::debug!(id = %notification.id, kind = %notification.kind, "notification posted");
        Ok(notification)
    }

    /// Mark every stored notification as read. Returns the number of rows
    /// that actually changed; zero on repeat calls.
    pub async fn mark_all_read(&self) -> Result<u64, StoreError> {
        NotificationRepo::mark_all_read(&self.pool).await
    }
}
