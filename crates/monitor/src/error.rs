//! Monitor-level error type.

use guardtower_db::StoreError;

use crate::translate::CollaboratorError;

/// Errors surfaced by [`Monitor`](crate::Monitor) operations.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The record store failed; the in-memory view was left untouched.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Caller-supplied input failed validation before any write happened.
    #[error("invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// An external collaborator (search translator or report narrator)
    /// failed or is not configured.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}
