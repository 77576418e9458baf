//! Repository for the `endpoints` table.

use guardtower_core::model::{Endpoint, UpdateEndpoint};
use guardtower_core::types::EndpointStatus;

use crate::row::{endpoint_from_row, to_json, to_millis};
use crate::{DbPool, StoreError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, url, api_key, rate_limit, ip_whitelist, status, created_at";

/// Provides CRUD operations for monitored endpoints.
pub struct EndpointRepo;

impl EndpointRepo {
    /// Insert a fully formed endpoint (ids and api keys are generated by the
    /// caller, not here).
    pub async fn insert(pool: &DbPool, endpoint: &Endpoint) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO endpoints (id, name, url, api_key, rate_limit, ip_whitelist, status, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&endpoint.id)
        .bind(&endpoint.name)
        .bind(&endpoint.url)
        .bind(&endpoint.api_key)
        .bind(endpoint.rate_limit)
        .bind(to_json(&endpoint.ip_whitelist)?)
        .bind(endpoint.status.as_str())
        .bind(to_millis(endpoint.created_at))
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fetch an endpoint by id.
    pub async fn get(pool: &DbPool, id: &str) -> Result<Option<Endpoint>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM endpoints WHERE id = ?1");
        let row = sqlx::query(&query).bind(id).fetch_optional(pool).await?;
        row.as_ref().map(endpoint_from_row).transpose().map_err(Into::into)
    }

    /// Fetch an endpoint by its (denormalized-referenced) name.
    pub async fn find_by_name(pool: &DbPool, name: &str) -> Result<Option<Endpoint>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM endpoints WHERE name = ?1");
        let row = sqlx::query(&query).bind(name).fetch_optional(pool).await?;
        row.as_ref().map(endpoint_from_row).transpose().map_err(Into::into)
    }

    /// List all endpoints, most recently created first.
    pub async fn list(pool: &DbPool) -> Result<Vec<Endpoint>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM endpoints ORDER BY created_at DESC, rowid DESC");
        let rows = sqlx::query(&query).fetch_all(pool).await?;
        rows.iter()
            .map(endpoint_from_row)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    /// Replace the mutable fields of an endpoint. The api key and creation
    /// time are fixed at creation and never touched here.
    ///
    /// Returns the updated row, or `None` if no endpoint with `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: &UpdateEndpoint,
    ) -> Result<Option<Endpoint>, StoreError> {
        let query = format!(
            "UPDATE endpoints \
             SET name = ?2, url = ?3, rate_limit = ?4, ip_whitelist = ?5, status = ?6 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.url)
            .bind(input.rate_limit)
            .bind(to_json(&input.ip_whitelist)?)
            .bind(input.status.as_str())
            .fetch_optional(pool)
            .await?;
        row.as_ref().map(endpoint_from_row).transpose().map_err(Into::into)
    }

    /// Set just the status flag.
    ///
    /// Returns `false` if no endpoint with `id` exists.
    pub async fn set_status(
        pool: &DbPool,
        id: &str,
        status: EndpointStatus,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE endpoints SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an endpoint. Returns `false` if it was already gone.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM endpoints WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &DbPool) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM endpoints")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
