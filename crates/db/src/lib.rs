//! SQLite-backed record store for the Guard Tower monitor.
//!
//! The store is embedded and local: one file (or one in-memory database)
//! owned by the host process, no server, no multi-process coordination. The
//! pool is pinned to a single connection — the host serializes per-collection
//! operations, and a single connection is also what keeps `sqlite::memory:`
//! databases alive for the lifetime of the pool.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod error;
pub mod repositories;
mod row;
pub mod seed;

pub use error::StoreError;
pub use seed::SeedData;

/// Shared connection pool type used by every repository.
pub type DbPool = sqlx::SqlitePool;

/// Embedded migrations, applied on every [`connect`].
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Open (creating if missing) the store at `url` and bring the schema up to
/// date.
///
/// Any failure here is fatal to initialization: callers must halt and
/// surface the error rather than continue with an empty in-memory view.
///
/// Accepts any SQLite URL, e.g. `sqlite://guardtower.db` or
/// `sqlite::memory:`.
pub async fn connect(url: &str) -> Result<DbPool, StoreError> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| StoreError::Unavailable(format!("invalid database url {url:?}: {e}")))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .map_err(|e| StoreError::Unavailable(format!("failed to open store at {url:?}: {e}")))?;

    MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| StoreError::Unavailable(format!("migration failed: {e}")))?;

    tracing::info!(url, "record store opened");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn connect_in_memory_runs_migrations() {
        let pool = connect("sqlite::memory:").await.expect("open store");
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        for expected in [
            "data_logs",
            "endpoints",
            "model_lineage",
            "notifications",
            "prompt_logs",
            "settings",
            "users",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }
    }

    #[tokio::test]
    async fn connect_to_unwritable_path_is_unavailable() {
        let err = connect("sqlite:///nonexistent-dir/guardtower.db")
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Unavailable(_));
    }
}
