//! Storage error taxonomy.

/// Errors surfaced by the record store.
///
/// The mapping policy: open/connection failures are [`Unavailable`]
/// (fatal at startup), duplicate-key inserts are [`ConstraintViolation`]
/// (operation aborted, no partial state), missing update/delete targets are
/// [`NotFound`] (non-fatal; callers reconcile their in-memory view), and
/// rows that no longer decode are [`Corrupt`].
///
/// [`Unavailable`]: StoreError::Unavailable
/// [`ConstraintViolation`]: StoreError::ConstraintViolation
/// [`NotFound`]: StoreError::NotFound
/// [`Corrupt`]: StoreError::Corrupt
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => StoreError::NotFound {
                entity: "record",
                id: String::new(),
            },
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Corrupt(err.to_string())
            }
            sqlx::Error::Database(db) if db.is_unique_violation() || db.is_check_violation() => {
                StoreError::ConstraintViolation(db.message().to_string())
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}
