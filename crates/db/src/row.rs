//! Row mapping helpers.
//!
//! Domain entities live in `guardtower-core`, which stays free of sqlx, so
//! each repository maps rows by hand through the functions here instead of
//! deriving `FromRow`. Timestamps are persisted as integer Unix milliseconds;
//! nested lineage/whitelist values as JSON text.

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use guardtower_core::model::{AppSettings, Endpoint, LogEntry, ModelLineage, Notification, User};
use guardtower_core::retention::RetentionPeriod;
use guardtower_core::types::{ParseEnumError, Timestamp};

pub(crate) fn to_millis(ts: Timestamp) -> i64 {
    ts.timestamp_millis()
}

pub(crate) fn from_millis(ms: i64) -> Timestamp {
    chrono::DateTime::from_timestamp_millis(ms).unwrap_or(chrono::DateTime::UNIX_EPOCH)
}

/// Encode a JSON-column value for binding.
pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<String, crate::StoreError> {
    serde_json::to_string(value).map_err(|e| crate::StoreError::Corrupt(e.to_string()))
}

fn decode_error(
    column: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

/// Parse a persisted enum string column.
fn parse_enum<T>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = ParseEnumError>,
{
    let text: String = row.try_get(column)?;
    text.parse().map_err(|e| decode_error(column, e))
}

/// Parse a JSON text column.
fn parse_json<T: serde::de::DeserializeOwned>(
    row: &SqliteRow,
    column: &str,
) -> Result<T, sqlx::Error> {
    let text: String = row.try_get(column)?;
    serde_json::from_str(&text).map_err(|e| decode_error(column, e))
}

pub(crate) fn endpoint_from_row(row: &SqliteRow) -> Result<Endpoint, sqlx::Error> {
    Ok(Endpoint {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        url: row.try_get("url")?,
        api_key: row.try_get("api_key")?,
        rate_limit: row.try_get("rate_limit")?,
        ip_whitelist: parse_json(row, "ip_whitelist")?,
        status: parse_enum(row, "status")?,
        created_at: from_millis(row.try_get("created_at")?),
    })
}

pub(crate) fn log_from_row(row: &SqliteRow) -> Result<LogEntry, sqlx::Error> {
    Ok(LogEntry {
        id: row.try_get("id")?,
        timestamp: from_millis(row.try_get("timestamp")?),
        endpoint: row.try_get("endpoint")?,
        ip: row.try_get("ip")?,
        level: parse_enum(row, "level")?,
        message: row.try_get("message")?,
        payload: row.try_get("payload")?,
        latency_ms: row.try_get("latency_ms")?,
    })
}

pub(crate) fn notification_from_row(row: &SqliteRow) -> Result<Notification, sqlx::Error> {
    Ok(Notification {
        id: row.try_get("id")?,
        message: row.try_get("message")?,
        kind: parse_enum(row, "kind")?,
        read: row.try_get("read")?,
        timestamp: from_millis(row.try_get("timestamp")?),
    })
}

pub(crate) fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        role: parse_enum(row, "role")?,
        last_active: from_millis(row.try_get("last_active")?),
        password: row.try_get("password")?,
    })
}

pub(crate) fn settings_from_row(row: &SqliteRow) -> Result<AppSettings, sqlx::Error> {
    let days: i64 = row.try_get("log_retention_days")?;
    let days = u16::try_from(days)
        .map_err(|e| decode_error("log_retention_days", e))?;
    let log_retention = RetentionPeriod::try_from(days).map_err(|e| {
        decode_error(
            "log_retention_days",
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })?;
    Ok(AppSettings {
        theme: parse_enum(row, "theme")?,
        log_retention,
    })
}

pub(crate) fn lineage_from_row(row: &SqliteRow) -> Result<ModelLineage, sqlx::Error> {
    Ok(ModelLineage {
        model_id: row.try_get("model_id")?,
        model_name: row.try_get("model_name")?,
        model_version: row.try_get("model_version")?,
        training_data: parse_json(row, "training_data")?,
        inference_input_source: parse_json(row, "inference_input_source")?,
    })
}
