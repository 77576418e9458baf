//! Retention enforcement over the two log collections.
//!
//! Enforcement runs once at startup and again whenever the retention period
//! changes; there is no background timer. A purge deletes entries strictly
//! older than `now - period` from both collections, so re-running it over
//! an already-purged range is a no-op.

use guardtower_core::retention::RetentionPeriod;
use guardtower_core::types::{LogKind, Timestamp};
use guardtower_db::repositories::LogRepo;
use guardtower_db::{DbPool, StoreError};

/// Rows removed from each collection by one enforcement pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeOutcome {
    pub prompt_removed: u64,
    pub data_removed: u64,
}

impl PurgeOutcome {
    pub fn total(&self) -> u64 {
        self.prompt_removed + self.data_removed
    }
}

/// Purge both collections against `period`, anchored at `now`.
///
/// `Forever` purges nothing. An entry timestamped exactly at the cutoff
/// survives.
pub async fn apply_retention(
    pool: &DbPool,
    period: RetentionPeriod,
    now: Timestamp,
) -> Result<PurgeOutcome, StoreError> {
    let Some(cutoff) = period.cutoff(now) else {
        return Ok(PurgeOutcome::default());
    };

    let prompt_removed = LogRepo::delete_before(pool, LogKind::Prompt, cutoff).await?;
    let data_removed = LogRepo::delete_before(pool, LogKind::Data, cutoff).await?;

    let outcome = PurgeOutcome {
        prompt_removed,
        data_removed,
    };
    if outcome.total() > 0 {
        tracing::info!(
            retention_days = period.days(),
            prompt_removed,
            data_removed,
            "retention purge removed expired log entries"
        );
    }
    Ok(outcome)
}
