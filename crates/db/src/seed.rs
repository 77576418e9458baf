//! First-run seeding.
//!
//! A brand-new store is populated from a host-supplied [`SeedData`] so the
//! dashboard has something to show before live traffic arrives. Seeding is
//! keyed off the `users` collection being empty and is idempotent: a
//! populated store is left untouched apart from two reconciliations — a
//! missing settings singleton is recreated, and an empty lineage collection
//! is backfilled when the seed carries one.

use guardtower_core::model::{AppSettings, Endpoint, LogEntry, ModelLineage, User};
use guardtower_core::types::LogKind;

use crate::repositories::{
    EndpointRepo, LineageRepo, LogRepo, NotificationRepo, SettingsRepo, UserRepo,
};
use crate::{DbPool, StoreError};

/// Initial contents for a brand-new store.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub endpoints: Vec<Endpoint>,
    pub prompt_logs: Vec<LogEntry>,
    pub data_logs: Vec<LogEntry>,
    pub lineage: Vec<ModelLineage>,
    pub settings: AppSettings,
}

/// Populate an empty store from `seed`; reconcile an already-populated one.
///
/// Returns `true` when the full seed was applied.
pub async fn ensure_seeded(pool: &DbPool, seed: &SeedData) -> Result<bool, StoreError> {
    if UserRepo::count(pool).await? == 0 {
        tracing::info!("store is empty, seeding initial data");
        for user in &seed.users {
            UserRepo::insert(pool, user).await?;
        }
        for endpoint in &seed.endpoints {
            EndpointRepo::insert(pool, endpoint).await?;
        }
        LogRepo::bulk_insert(pool, LogKind::Prompt, &seed.prompt_logs).await?;
        LogRepo::bulk_insert(pool, LogKind::Data, &seed.data_logs).await?;
        for lineage in &seed.lineage {
            LineageRepo::insert(pool, lineage).await?;
        }
        SettingsRepo::put(pool, &seed.settings).await?;
        tracing::info!(
            users = seed.users.len(),
            endpoints = seed.endpoints.len(),
            prompt_logs = seed.prompt_logs.len(),
            data_logs = seed.data_logs.len(),
            "store seeded"
        );
        return Ok(true);
    }

    // Older stores may predate the lineage collection; backfill it once.
    if !seed.lineage.is_empty() && LineageRepo::count(pool).await? == 0 {
        tracing::info!("backfilling model lineage records");
        for lineage in &seed.lineage {
            LineageRepo::insert(pool, lineage).await?;
        }
    }

    // The settings singleton must exist after initialization, whatever state
    // the store was left in.
    if SettingsRepo::get(pool).await?.is_none() {
        SettingsRepo::put(pool, &seed.settings).await?;
    }

    Ok(false)
}

/// Sanity accessor used by tests and startup logging.
pub async fn is_empty(pool: &DbPool) -> Result<bool, StoreError> {
    Ok(UserRepo::count(pool).await? == 0
        && EndpointRepo::count(pool).await? == 0
        && NotificationRepo::count(pool).await? == 0)
}
