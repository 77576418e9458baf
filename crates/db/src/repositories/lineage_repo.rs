//! Repository for the `model_lineage` table.
//!
//! Lineage rows are 1:1 with endpoints (`model_id` == endpoint id): created
//! alongside, deleted alongside, read-mostly in between. The nested
//! provenance graph is stored as JSON.

use guardtower_core::model::ModelLineage;

use crate::row::{lineage_from_row, to_json};
use crate::{DbPool, StoreError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "model_id, model_name, model_version, training_data, inference_input_source";

/// Provides access to model provenance records.
pub struct LineageRepo;

impl LineageRepo {
    /// Insert a lineage record.
    pub async fn insert(pool: &DbPool, lineage: &ModelLineage) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO model_lineage \
                 (model_id, model_name, model_version, training_data, inference_input_source) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&lineage.model_id)
        .bind(&lineage.model_name)
        .bind(&lineage.model_version)
        .bind(to_json(&lineage.training_data)?)
        .bind(to_json(&lineage.inference_input_source)?)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fetch the lineage for one model (endpoint) id.
    pub async fn get(pool: &DbPool, model_id: &str) -> Result<Option<ModelLineage>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM model_lineage WHERE model_id = ?1");
        let row = sqlx::query(&query)
            .bind(model_id)
            .fetch_optional(pool)
            .await?;
        row.as_ref().map(lineage_from_row).transpose().map_err(Into::into)
    }

    /// List all lineage records.
    pub async fn list(pool: &DbPool) -> Result<Vec<ModelLineage>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM model_lineage ORDER BY rowid");
        let rows = sqlx::query(&query).fetch_all(pool).await?;
        rows.iter()
            .map(lineage_from_row)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    /// Delete the lineage for one model id. Returns `false` if it was
    /// already gone.
    pub async fn delete(pool: &DbPool, model_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM model_lineage WHERE model_id = ?1")
            .bind(model_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &DbPool) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM model_lineage")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
