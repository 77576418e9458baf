//! The monitor: owns the record store, the view mirror, and the event bus,
//! and exposes every dashboard operation as an async method.
//!
//! Locking discipline: all mutable state sits behind one `parking_lot`
//! RwLock that is never held across an await. Store writes happen first,
//! then the view is updated under the lock, then events are published — so
//! a subscriber never observes an event ahead of the state it describes.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use rand::distr::Alphanumeric;
use rand::Rng;
use tokio::sync::broadcast;
use validator::Validate;

use guardtower_core::filter::LogFilter;
use guardtower_core::model::{
    AppSettings, CreateEndpoint, CreateUser, DataSource, Endpoint, LogEntry, ModelLineage,
    NewLogEntry, Notification, TrainingData, UpdateEndpoint, UpdateUser, User,
};
use guardtower_core::report::{build_report, ReportData, NARRATIVE_FALLBACK};
use guardtower_core::retention::RetentionPeriod;
use guardtower_core::score::security_score;
use guardtower_core::types::{new_id, LogKind, LogLevel, Theme, Timestamp, TrustStatus, UserRole};
use guardtower_db::repositories::{
    EndpointRepo, LineageRepo, LogRepo, NotificationRepo, SettingsRepo, UserRepo,
};
use guardtower_db::seed::{ensure_seeded, SeedData};
use guardtower_db::{connect, DbPool};
use guardtower_events::{EventBus, StoreEvent};

use crate::error::MonitorError;
use crate::notify::NotificationDispatcher;
use crate::retention::{apply_retention, PurgeOutcome};
use crate::translate::{CollaboratorError, ReportNarrator, SearchTranslator};
use crate::view::{ViewMirror, NOTIFICATION_VIEW_CAP};

/// How a search request resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The translated filter is now active.
    Applied,
    /// The view returned to the unfiltered state (empty query, or the
    /// translator answered with an unconstrained filter).
    Cleared,
    /// A later search was issued while this one was in flight; its result
    /// was discarded.
    Superseded,
}

/// A report together with its narrative.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub data: ReportData,
    pub narrative: String,
}

struct State {
    view: ViewMirror,
    endpoints: Vec<Endpoint>,
    users: Vec<User>,
    lineage: Vec<ModelLineage>,
    settings: AppSettings,
    /// Monotonic tag for in-flight searches; only the latest issued search
    /// may touch the view when it lands.
    search_seq: u64,
}

/// Application root for the security dashboard.
pub struct Monitor {
    pool: DbPool,
    bus: Arc<EventBus>,
    dispatcher: NotificationDispatcher,
    translator: Option<Arc<dyn SearchTranslator>>,
    narrator: Option<Arc<dyn ReportNarrator>>,
    state: RwLock<State>,
}

impl Monitor {
    // -----------------------------------------------------------------------
    // Initialization
    // -----------------------------------------------------------------------

    /// Open the store at `url`, seed it on first run, enforce retention, and
    /// load the full view.
    ///
    /// Any store failure here is fatal: the monitor refuses to start with an
    /// empty mirror over an unreachable store.
    pub async fn open(url: &str, seed: SeedData) -> Result<Self, MonitorError> {
        let pool = connect(url).await?;
        ensure_seeded(&pool, &seed).await?;

        let settings = SettingsRepo::get(&pool).await?.unwrap_or_default();

        let purged = apply_retention(&pool, settings.log_retention, Utc::now()).await?;
        if purged.total() > 0 {
            tracing::info!(removed = purged.total(), "startup retention purge");
        }

        let endpoints = EndpointRepo::list(&pool).await?;
        let users = UserRepo::list(&pool).await?;
        let lineage = LineageRepo::list(&pool).await?;

        let mut view = ViewMirror::default();
        view.reload_logs(LogKind::Prompt, LogRepo::list_desc(&pool, LogKind::Prompt).await?);
        view.reload_logs(LogKind::Data, LogRepo::list_desc(&pool, LogKind::Data).await?);
        view.set_notifications(
            NotificationRepo::list_desc(&pool, NOTIFICATION_VIEW_CAP as i64).await?,
        );

        tracing::info!(
            endpoints = endpoints.len(),
            users = users.len(),
            "monitor initialized"
        );

        Ok(Self {
            dispatcher: NotificationDispatcher::new(pool.clone()),
            pool,
            bus: Arc::new(EventBus::default()),
            translator: None,
            narrator: None,
            state: RwLock::new(State {
                view,
                endpoints,
                users,
                lineage,
                settings,
                search_seq: 0,
            }),
        })
    }

    /// Attach the natural-language search translator.
    pub fn with_translator(mut self, translator: Arc<dyn SearchTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Attach the report narrator.
    pub fn with_narrator(mut self, narrator: Arc<dyn ReportNarrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// Subscribe to store mutation events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.bus.subscribe()
    }

    // -----------------------------------------------------------------------
    // Logs
    // -----------------------------------------------------------------------

    /// Append a log entry to one of the two collections.
    ///
    /// A critical entry additionally posts an operator notification prefixed
    /// with the originating subsystem label. Hosts that ingest bursty
    /// traffic are expected to debounce repeated critical posts (1s in the
    /// reference host) before calling this.
    pub async fn append_log(
        &self,
        kind: LogKind,
        input: NewLogEntry,
    ) -> Result<LogEntry, MonitorError> {
        let prefix = match kind {
            LogKind::Prompt => "log-p",
            LogKind::Data => "log-d",
        };
        let entry = LogEntry {
            id: new_id(prefix),
            timestamp: input.timestamp,
            endpoint: input.endpoint,
            ip: input.ip,
            level: input.level,
            message: input.message,
            payload: input.payload,
            latency_ms: input.latency_ms,
        };
        LogRepo::insert(&self.pool, kind, &entry).await?;

        self.state.write().view.prepend_log(kind, entry.clone());
        self.bus.publish(StoreEvent::LogAppended {
            kind,
            entry: entry.clone(),
        });

        if entry.level == LogLevel::Critical {
            let notification = self
                .dispatcher
                .critical(kind.source_label(), &entry.message, entry.timestamp)
                .await?;
            self.state.write().view.push_notification(notification.clone());
            self.bus.publish(StoreEvent::NotificationPosted { notification });
        }

        Ok(entry)
    }

    /// The canonical (unfiltered) sequence for `kind`, newest first.
    pub fn logs(&self, kind: LogKind) -> Vec<LogEntry> {
        self.state.read().view.canonical(kind).to_vec()
    }

    /// The sequence a renderer should show for `kind`.
    pub fn displayed_logs(&self, kind: LogKind) -> Vec<LogEntry> {
        self.state.read().view.displayed(kind).to_vec()
    }

    pub fn is_filtered(&self) -> bool {
        self.state.read().view.is_filtered()
    }

    // -----------------------------------------------------------------------
    // Endpoints
    // -----------------------------------------------------------------------

    /// Register a new endpoint. The id and api key are generated here; a
    /// placeholder lineage record is created alongside.
    pub async fn add_endpoint(&self, input: CreateEndpoint) -> Result<Endpoint, MonitorError> {
        input.validate()?;
        let now = Utc::now();
        let endpoint = Endpoint {
            id: new_id("ep"),
            name: input.name,
            url: input.url,
            api_key: generate_api_key(),
            rate_limit: input.rate_limit,
            ip_whitelist: input.ip_whitelist,
            status: input.status,
            created_at: now,
        };
        EndpointRepo::insert(&self.pool, &endpoint).await?;

        let lineage = placeholder_lineage(&endpoint, now);
        LineageRepo::insert(&self.pool, &lineage).await?;

        {
            let mut state = self.state.write();
            state.endpoints.insert(0, endpoint.clone());
            state.lineage.push(lineage);
        }
        self.bus.publish(StoreEvent::EndpointCreated {
            id: endpoint.id.clone(),
            name: endpoint.name.clone(),
        });
        Ok(endpoint)
    }

    /// Replace an endpoint's mutable fields. A rename does not rewrite
    /// existing log entries; they keep referencing the old name.
    ///
    /// Returns `None` (after reconciling the cached list) when the endpoint
    /// no longer exists.
    pub async fn update_endpoint(
        &self,
        id: &str,
        input: UpdateEndpoint,
    ) -> Result<Option<Endpoint>, MonitorError> {
        input.validate()?;
        match EndpointRepo::update(&self.pool, id, &input).await? {
            None => {
                tracing::warn!(id, "update for unknown endpoint, reconciling view");
                self.reload_endpoints().await?;
                Ok(None)
            }
            Some(updated) => {
                self.replace_cached_endpoint(&updated);
                self.bus.publish(StoreEvent::EndpointUpdated { id: id.to_string() });
                Ok(Some(updated))
            }
        }
    }

    /// Flip an endpoint between active and inactive.
    pub async fn toggle_endpoint(&self, id: &str) -> Result<Option<Endpoint>, MonitorError> {
        let Some(current) = EndpointRepo::get(&self.pool, id).await? else {
            tracing::warn!(id, "toggle for unknown endpoint, reconciling view");
            self.reload_endpoints().await?;
            return Ok(None);
        };
        let toggled = current.status.toggled();
        EndpointRepo::set_status(&self.pool, id, toggled).await?;
        let updated = Endpoint {
            status: toggled,
            ..current
        };
        self.replace_cached_endpoint(&updated);
        self.bus.publish(StoreEvent::EndpointUpdated { id: id.to_string() });
        Ok(Some(updated))
    }

    /// Delete an endpoint and its lineage record, optionally cascading to
    /// every log entry carrying its name, and post an info notification.
    ///
    /// Returns `false` when the endpoint was already gone.
    pub async fn delete_endpoint(&self, id: &str, delete_logs: bool) -> Result<bool, MonitorError> {
        let Some(endpoint) = EndpointRepo::get(&self.pool, id).await? else {
            tracing::warn!(id, "delete for unknown endpoint, reconciling view");
            self.reload_endpoints().await?;
            return Ok(false);
        };

        let mut purged = PurgeOutcome::default();
        if delete_logs {
            purged.prompt_removed =
                LogRepo::delete_by_endpoint(&self.pool, LogKind::Prompt, &endpoint.name).await?;
            purged.data_removed =
                LogRepo::delete_by_endpoint(&self.pool, LogKind::Data, &endpoint.name).await?;
        }
        EndpointRepo::delete(&self.pool, id).await?;
        LineageRepo::delete(&self.pool, id).await?;

        let endpoints = EndpointRepo::list(&self.pool).await?;
        let lineage = LineageRepo::list(&self.pool).await?;
        let reloaded_logs = if delete_logs {
            Some((
                LogRepo::list_desc(&self.pool, LogKind::Prompt).await?,
                LogRepo::list_desc(&self.pool, LogKind::Data).await?,
            ))
        } else {
            None
        };

        let message = if delete_logs {
            format!("Endpoint \"{}\" and all its logs have been deleted.", endpoint.name)
        } else {
            format!("Endpoint \"{}\" has been deleted.", endpoint.name)
        };
        let notification = self.dispatcher.info(message, Utc::now()).await?;

        {
            let mut state = self.state.write();
            state.endpoints = endpoints;
            state.lineage = lineage;
            if let Some((prompt, data)) = reloaded_logs {
                // The reload drops any active filter; invalidate in-flight
                // searches along with it.
                state.search_seq += 1;
                state.view.reload_logs(LogKind::Prompt, prompt);
                state.view.reload_logs(LogKind::Data, data);
            }
            state.view.push_notification(notification.clone());
        }

        if purged.prompt_removed > 0 {
            self.bus.publish(StoreEvent::LogsPurged {
                kind: LogKind::Prompt,
                removed: purged.prompt_removed,
            });
        }
        if purged.data_removed > 0 {
            self.bus.publish(StoreEvent::LogsPurged {
                kind: LogKind::Data,
                removed: purged.data_removed,
            });
        }
        self.bus.publish(StoreEvent::EndpointDeleted {
            id: id.to_string(),
            name: endpoint.name.clone(),
            kept_logs: !delete_logs,
        });
        self.bus.publish(StoreEvent::NotificationPosted { notification });

        tracing::info!(id, name = %endpoint.name, delete_logs, "endpoint deleted");
        Ok(true)
    }

    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.state.read().endpoints.clone()
    }

    /// The current security score for an endpoint, over the full canonical
    /// log sequences. `None` for an unknown id.
    pub fn security_score(&self, endpoint_id: &str) -> Option<u8> {
        let state = self.state.read();
        let endpoint = state.endpoints.iter().find(|e| e.id == endpoint_id)?;
        Some(security_score(
            endpoint,
            state.view.canonical(LogKind::Prompt),
            state.view.canonical(LogKind::Data),
        ))
    }

    pub fn lineage(&self) -> Vec<ModelLineage> {
        self.state.read().lineage.clone()
    }

    /// Lineage for one endpoint id.
    pub fn lineage_for(&self, model_id: &str) -> Option<ModelLineage> {
        self.state
            .read()
            .lineage
            .iter()
            .find(|l| l.model_id == model_id)
            .cloned()
    }

    async fn reload_endpoints(&self) -> Result<(), MonitorError> {
        let endpoints = EndpointRepo::list(&self.pool).await?;
        let lineage = LineageRepo::list(&self.pool).await?;
        let mut state = self.state.write();
        state.endpoints = endpoints;
        state.lineage = lineage;
        Ok(())
    }

    fn replace_cached_endpoint(&self, updated: &Endpoint) {
        let mut state = self.state.write();
        if let Some(slot) = state.endpoints.iter_mut().find(|e| e.id == updated.id) {
            *slot = updated.clone();
        }
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    /// The capped live notification feed, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.state.read().view.notifications().to_vec()
    }

    pub fn unread_notifications(&self) -> usize {
        self.state.read().view.unread_count()
    }

    /// Mark every notification as read, in the store and in the view.
    pub async fn mark_notifications_read(&self) -> Result<u64, MonitorError> {
        let changed = self.dispatcher.mark_all_read().await?;
        self.state.write().view.mark_all_read();
        if changed > 0 {
            self.bus.publish(StoreEvent::NotificationsMarkedRead);
        }
        Ok(changed)
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Run a natural-language search over the log view.
    ///
    /// The query is handed to the configured translator together with the
    /// current endpoint names; the structured filter that comes back is
    /// evaluated locally. Concurrent searches race safely: each request
    /// takes a sequence tag before the translator call, and only the latest
    /// issued request may install its result. A blank query clears any
    /// active filter without consulting the translator; a translation
    /// failure leaves the view exactly as it was.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, MonitorError> {
        let query = query.trim();
        if query.is_empty() {
            let mut state = self.state.write();
            state.search_seq += 1;
            state.view.clear_filter();
            return Ok(SearchOutcome::Cleared);
        }

        let translator = self
            .translator
            .as_ref()
            .ok_or(CollaboratorError::NotConfigured("search translator"))?
            .clone();

        let (seq, endpoint_names) = {
            let mut state = self.state.write();
            state.search_seq += 1;
            let names = state.endpoints.iter().map(|e| e.name.clone()).collect::<Vec<_>>();
            (state.search_seq, names)
        };

        let filter = translator.translate(query, &endpoint_names).await?;
        let now = Utc::now();

        let mut state = self.state.write();
        if state.search_seq != seq {
            tracing::debug!(query, "search result superseded, dropping");
            return Ok(SearchOutcome::Superseded);
        }
        if filter.is_empty() {
            state.view.clear_filter();
            Ok(SearchOutcome::Cleared)
        } else {
            state.view.set_filter(filter, now);
            Ok(SearchOutcome::Applied)
        }
    }

    /// Drop any active filter and invalidate in-flight searches.
    pub fn clear_search(&self) {
        let mut state = self.state.write();
        state.search_seq += 1;
        state.view.clear_filter();
    }

    /// The active filter, if a search is currently applied.
    pub fn active_filter(&self) -> Option<LogFilter> {
        self.state.read().view.filter().cloned()
    }

    // -----------------------------------------------------------------------
    // Reports
    // -----------------------------------------------------------------------

    /// Assemble the security report for an endpoint over the last
    /// `window_days` days. The narrative comes from the configured narrator
    /// fed only the redacted summary; on failure (or with no narrator) the
    /// fixed fallback text is used and the report still succeeds.
    pub async fn generate_report(
        &self,
        endpoint_id: &str,
        window_days: u16,
    ) -> Result<Option<Report>, MonitorError> {
        let (endpoint, prompt_logs, data_logs) = {
            let state = self.state.read();
            let Some(endpoint) = state.endpoints.iter().find(|e| e.id == endpoint_id) else {
                return Ok(None);
            };
            (
                endpoint.clone(),
                state.view.canonical(LogKind::Prompt).to_vec(),
                state.view.canonical(LogKind::Data).to_vec(),
            )
        };

        let data = build_report(&endpoint, &prompt_logs, &data_logs, window_days, Utc::now());

        let narrative = match &self.narrator {
            Some(narrator) => match narrator.narrate(&data.summary()).await {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(%err, "report narration failed, using fallback");
                    NARRATIVE_FALLBACK.to_string()
                }
            },
            None => NARRATIVE_FALLBACK.to_string(),
        };

        Ok(Some(Report { data, narrative }))
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    pub async fn add_user(&self, input: CreateUser) -> Result<User, MonitorError> {
        input.validate()?;
        let user = User {
            id: new_id("usr"),
            name: input.name,
            email: input.email,
            role: input.role,
            last_active: Utc::now(),
            password: input.password,
        };
        UserRepo::insert(&self.pool, &user).await?;
        self.state.write().users.push(user.clone());
        Ok(user)
    }

    /// Update a user's profile and touch their `last_active` stamp.
    pub async fn update_user(
        &self,
        id: &str,
        input: UpdateUser,
    ) -> Result<Option<User>, MonitorError> {
        input.validate()?;
        match UserRepo::update(&self.pool, id, &input, Utc::now()).await? {
            None => {
                tracing::warn!(id, "update for unknown user, reconciling view");
                let users = UserRepo::list(&self.pool).await?;
                self.state.write().users = users;
                Ok(None)
            }
            Some(updated) => {
                let mut state = self.state.write();
                if let Some(slot) = state.users.iter_mut().find(|u| u.id == id) {
                    *slot = updated.clone();
                }
                drop(state);
                Ok(Some(updated))
            }
        }
    }

    pub async fn delete_user(&self, id: &str) -> Result<bool, MonitorError> {
        let deleted = UserRepo::delete(&self.pool, id).await?;
        if deleted {
            self.state.write().users.retain(|u| u.id != id);
        }
        Ok(deleted)
    }

    /// Self-service registration: a new Viewer account.
    ///
    /// Returns `None` when the email (any casing) is already taken, so the
    /// caller gets a clean conflict instead of a raw constraint error.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, MonitorError> {
        if UserRepo::find_by_email(&self.pool, email).await?.is_some() {
            return Ok(None);
        }
        let user = self
            .add_user(CreateUser {
                name: name.to_string(),
                email: email.to_string(),
                role: UserRole::Viewer,
                password: Some(password.to_string()),
            })
            .await?;
        Ok(Some(user))
    }

    /// Check a login attempt against the stored credentials.
    ///
    /// The email comparison is case-insensitive; the password comparison is
    /// plaintext equality against the stored value (a documented weakness of
    /// the data this system inherits) and the selected role must match.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<Option<User>, MonitorError> {
        let Some(user) = UserRepo::find_by_email(&self.pool, email).await? else {
            return Ok(None);
        };
        let ok = user.role == role && user.password.as_deref() == Some(password);
        Ok(ok.then_some(user))
    }

    pub fn users(&self) -> Vec<User> {
        self.state.read().users.clone()
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    pub fn settings(&self) -> AppSettings {
        self.state.read().settings
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), MonitorError> {
        SettingsRepo::set_theme(&self.pool, theme).await?;
        self.state.write().settings.theme = theme;
        self.bus.publish(StoreEvent::SettingsChanged);
        Ok(())
    }

    /// Change the retention period and immediately enforce it.
    ///
    /// When the purge removed anything, the canonical sequences are reloaded
    /// and any active filtered view is cleared rather than left referencing
    /// purged entries.
    pub async fn set_log_retention(
        &self,
        period: RetentionPeriod,
    ) -> Result<PurgeOutcome, MonitorError> {
        SettingsRepo::set_retention(&self.pool, period).await?;
        let purged = apply_retention(&self.pool, period, Utc::now()).await?;

        let reloaded_logs = if purged.total() > 0 {
            Some((
                LogRepo::list_desc(&self.pool, LogKind::Prompt).await?,
                LogRepo::list_desc(&self.pool, LogKind::Data).await?,
            ))
        } else {
            None
        };

        {
            let mut state = self.state.write();
            state.settings.log_retention = period;
            if let Some((prompt, data)) = reloaded_logs {
                state.search_seq += 1;
                state.view.clear_filter();
                state.view.reload_logs(LogKind::Prompt, prompt);
                state.view.reload_logs(LogKind::Data, data);
            }
        }

        self.bus.publish(StoreEvent::RetentionChanged { period });
        if purged.prompt_removed > 0 {
            self.bus.publish(StoreEvent::LogsPurged {
                kind: LogKind::Prompt,
                removed: purged.prompt_removed,
            });
        }
        if purged.data_removed > 0 {
            self.bus.publish(StoreEvent::LogsPurged {
                kind: LogKind::Data,
                removed: purged.data_removed,
            });
        }
        Ok(purged)
    }
}

// ---------------------------------------------------------------------------
// Generated artifacts
// ---------------------------------------------------------------------------

/// Generate a display api key: `prod_sk_` plus ten alphanumerics plus a
/// truncation marker. The full credential is managed by the gateway, not
/// stored here.
fn generate_api_key() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect();
    format!("prod_sk_{suffix}...")
}

/// Placeholder provenance record created alongside a new endpoint, to be
/// replaced once real lineage is supplied.
fn placeholder_lineage(endpoint: &Endpoint, now: Timestamp) -> ModelLineage {
    let mut details = BTreeMap::new();
    details.insert(
        "info".to_string(),
        "Auto-generated for new endpoint.".to_string(),
    );
    ModelLineage {
        model_id: endpoint.id.clone(),
        model_name: format!("{} Model", endpoint.name),
        model_version: "1.0.0".into(),
        training_data: vec![TrainingData {
            dataset_id: new_id("ds"),
            dataset_name: "Generic Placeholder Dataset".into(),
            sources: vec![DataSource {
                id: new_id("src"),
                name: "Unspecified Data Source".into(),
                kind: "Internal Dataset".into(),
                trust_status: TrustStatus::Unverified,
                timestamp: now,
                details,
            }],
            processing_script_url: "N/A".into(),
            processing_script_hash: "N/A".into(),
            timestamp: now,
        }],
        inference_input_source: DataSource {
            id: new_id("src"),
            name: "Live User Input Stream".into(),
            kind: "API Feed".into(),
            trust_status: TrustStatus::Unverified,
            timestamp: now,
            details: BTreeMap::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_keys_carry_prefix_and_truncation_marker() {
        let key = generate_api_key();
        assert!(key.starts_with("prod_sk_"));
        assert!(key.ends_with("..."));
        let body = &key["prod_sk_".len()..key.len() - 3];
        assert_eq!(body.len(), 10);
        assert!(body.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn placeholder_lineage_is_keyed_by_endpoint_id() {
        let now = Utc::now();
        let ep = Endpoint {
            id: "ep-001".into(),
            name: "Production Chatbot API".into(),
            url: "https://api.example.com/v1/chatbot".into(),
            api_key: generate_api_key(),
            rate_limit: 100,
            ip_whitelist: vec![],
            status: guardtower_core::types::EndpointStatus::Active,
            created_at: now,
        };
        let lineage = placeholder_lineage(&ep, now);
        assert_eq!(lineage.model_id, "ep-001");
        assert_eq!(lineage.model_name, "Production Chatbot API Model");
        assert_eq!(lineage.training_data.len(), 1);
        assert_eq!(
            lineage.inference_input_source.trust_status,
            TrustStatus::Unverified
        );
    }
}
