//! Repository for the `users` table.
//!
//! Emails are unique and compared case-insensitively: the column carries a
//! NOCASE collation, so equality lookups get the same folding the unique
//! index enforces.

use guardtower_core::model::{UpdateUser, User};
use guardtower_core::types::Timestamp;

use crate::row::{to_millis, user_from_row};
use crate::{DbPool, StoreError};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, role, last_active, password";

/// Provides CRUD operations for dashboard users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a fully formed user. A duplicate email (any casing) is a
    /// [`StoreError::ConstraintViolation`].
    pub async fn insert(pool: &DbPool, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, role, last_active, password) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(to_millis(user.last_active))
        .bind(&user.password)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fetch a user by id.
    pub async fn get(pool: &DbPool, id: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?1");
        let row = sqlx::query(&query).bind(id).fetch_optional(pool).await?;
        row.as_ref().map(user_from_row).transpose().map_err(Into::into)
    }

    /// Find a user by email, case-insensitively.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = ?1");
        let row = sqlx::query(&query).bind(email).fetch_optional(pool).await?;
        row.as_ref().map(user_from_row).transpose().map_err(Into::into)
    }

    /// List all users in insertion order.
    pub async fn list(pool: &DbPool) -> Result<Vec<User>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY rowid");
        let rows = sqlx::query(&query).fetch_all(pool).await?;
        rows.iter()
            .map(user_from_row)
            .collect::<Result<_, _>>()
            .map_err(Into::into)
    }

    /// Update a user's profile fields and touch `last_active`.
    ///
    /// Returns the updated row, or `None` if no user with `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: &UpdateUser,
        last_active: Timestamp,
    ) -> Result<Option<User>, StoreError> {
        let query = format!(
            "UPDATE users SET name = ?2, email = ?3, role = ?4, last_active = ?5 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.role.as_str())
            .bind(to_millis(last_active))
            .fetch_optional(pool)
            .await?;
        row.as_ref().map(user_from_row).transpose().map_err(Into::into)
    }

    /// Delete a user. Returns `false` if it was already gone.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &DbPool) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
