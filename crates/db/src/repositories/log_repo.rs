//! Repository for the two log collections (`prompt_logs`, `data_logs`).
//!
//! The collections share a schema but are fully disjoint: independent
//! identity spaces, independent retention. Every method takes a
//! [`LogKind`] selecting the table it operates on.

use guardtower_core::model::LogEntry;
use guardtower_core::types::{LogKind, Timestamp};

use crate::row::{log_from_row, to_millis};
use crate::{DbPool, StoreError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, timestamp, endpoint, ip, level, message, payload, latency_ms";

fn table(kind: LogKind) -> &'static str {
    match kind {
        LogKind::Prompt => "prompt_logs",
        LogKind::Data => "data_logs",
    }
}

/// Provides append, range-delete, and ordered-read operations for log
/// entries. Entries are immutable: there is no update method by design.
pub struct LogRepo;

impl LogRepo {
    /// Append a single entry.
    pub async fn insert(pool: &DbPool, kind: LogKind, entry: &LogEntry) -> Result<(), StoreError> {
        let query = format!(
            "INSERT INTO {} (id, timestamp, endpoint, ip, level, message, payload, latency_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            table(kind)
        );
        sqlx::query(&query)
            .bind(&entry.id)
            .bind(to_millis(entry.timestamp))
            .bind(&entry.endpoint)
            .bind(&entry.ip)
            .bind(entry.level.as_str())
            .bind(&entry.message)
            .bind(&entry.payload)
            .bind(entry.latency_ms)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Append many entries inside one transaction (used by seeding).
    pub async fn bulk_insert(
        pool: &DbPool,
        kind: LogKind,
        entries: &[LogEntry],
    ) -> Result<(), StoreError> {
        let query = format!(
            "INSERT INTO {} (id, timestamp, endpoint, ip, level, message, payload, latency_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            table(kind)
        );
        let mut tx = pool.begin().await?;
        for entry in entries {
            sqlx::query(&query)
                .bind(&entry.id)
                .bind(to_millis(entry.timestamp))
                .bind(&entry.endpoint)
                .bind(&entry.ip)
                .bind(entry.level.as_str())
                .bind(&entry.message)
                .bind(&entry.payload)
                .bind(entry.latency_ms)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// All entries, newest first. Equal timestamps tie-break by insertion
    /// order: the latest physical write comes first.
    pub async fn list_desc(pool: &DbPool, kind: LogKind) -> Result<Vec<LogEntry>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} ORDER BY timestamp DESC, rowid DESC",
            table(kind)
        );
        let rows = sqlx::query(&query).fetch_all(pool).await?;
        rows.iter()
            .map(log_from_row)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    /// Delete every entry strictly older than `cutoff`; an entry timestamped
    /// exactly at the cutoff survives. Idempotent: re-running over an
    /// already-purged range deletes nothing.
    ///
    /// Returns the number of deleted rows.
    pub async fn delete_before(
        pool: &DbPool,
        kind: LogKind,
        cutoff: Timestamp,
    ) -> Result<u64, StoreError> {
        let query = format!("DELETE FROM {} WHERE timestamp < ?1", table(kind));
        let result = sqlx::query(&query)
            .bind(to_millis(cutoff))
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every entry whose denormalized endpoint name equals `name`
    /// (endpoint cascade delete). Returns the number of deleted rows.
    pub async fn delete_by_endpoint(
        pool: &DbPool,
        kind: LogKind,
        name: &str,
    ) -> Result<u64, StoreError> {
        let query = format!("DELETE FROM {} WHERE endpoint = ?1", table(kind));
        let result = sqlx::query(&query).bind(name).execute(pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &DbPool, kind: LogKind) -> Result<i64, StoreError> {
        let query = format!("SELECT COUNT(*) FROM {}", table(kind));
        let count: i64 = sqlx::query_scalar(&query).fetch_one(pool).await?;
        Ok(count)
    }
}
