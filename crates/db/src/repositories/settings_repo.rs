//! Repository for the single-row `settings` table.

use guardtower_core::model::AppSettings;
use guardtower_core::retention::RetentionPeriod;
use guardtower_core::types::Theme;

use crate::row::settings_from_row;
use crate::{DbPool, StoreError};

/// The fixed primary key of the settings singleton.
const SINGLETON_ID: i64 = 0;

/// Provides access to the settings singleton. After initialization exactly
/// one row exists; every method addresses it by its fixed id.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Fetch the singleton, or `None` before first initialization.
    pub async fn get(pool: &DbPool) -> Result<Option<AppSettings>, StoreError> {
        let row = sqlx::query(
            "SELECT theme, log_retention_days FROM settings WHERE id = ?1",
        )
        .bind(SINGLETON_ID)
        .fetch_optional(pool)
        .await?;
        row.as_ref().map(settings_from_row).transpose().map_err(Into::into)
    }

    /// Insert or replace the singleton.
    pub async fn put(pool: &DbPool, settings: &AppSettings) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO settings (id, theme, log_retention_days) VALUES (?1, ?2, ?3) \
             ON CONFLICT (id) DO UPDATE SET \
                 theme = excluded.theme, \
                 log_retention_days = excluded.log_retention_days",
        )
        .bind(SINGLETON_ID)
        .bind(settings.theme.as_str())
        .bind(i64::from(settings.log_retention.days()))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Update the theme only.
    pub async fn set_theme(pool: &DbPool, theme: Theme) -> Result<(), StoreError> {
        sqlx::query("UPDATE settings SET theme = ?2 WHERE id = ?1")
            .bind(SINGLETON_ID)
            .bind(theme.as_str())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Update the retention period only.
    pub async fn set_retention(pool: &DbPool, period: RetentionPeriod) -> Result<(), StoreError> {
        sqlx::query("UPDATE settings SET log_retention_days = ?2 WHERE id = ?1")
            .bind(SINGLETON_ID)
            .bind(i64::from(period.days()))
            .execute(pool)
            .await?;
        Ok(())
    }
}
