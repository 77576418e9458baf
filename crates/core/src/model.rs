//! Entity structs and create/update DTOs.
//!
//! These are the canonical domain shapes; the storage layer maps them to and
//! from rows without redefining them.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::retention::RetentionPeriod;
use crate::types::{
    EndpointStatus, EntityId, LogLevel, NotificationKind, Theme, Timestamp, TrustStatus, UserRole,
};

/// A monitored AI API endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: EntityId,
    /// Unique among endpoints in active use. Log entries reference this name,
    /// not the id — see [`LogEntry::endpoint`].
    pub name: String,
    pub url: String,
    /// Generated at creation, never user-editable afterwards.
    pub api_key: String,
    /// Requests per minute, always positive.
    pub rate_limit: i64,
    pub ip_whitelist: Vec<String>,
    pub status: EndpointStatus,
    pub created_at: Timestamp,
}

/// A single firewall/detector log event. Immutable once created; entries are
/// only ever deleted (individually by retention, in bulk by endpoint or
/// account deletion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: EntityId,
    pub timestamp: Timestamp,
    /// Weak reference: the *name* of the endpoint at the time the entry was
    /// written, resolved against current endpoint names at query time. May
    /// dangle after an endpoint rename or delete; that is accepted behavior,
    /// not a bug to fix by switching to id references.
    pub endpoint: String,
    pub ip: String,
    pub level: LogLevel,
    pub message: String,
    pub payload: Option<String>,
    /// Milliseconds, non-negative when present.
    pub latency_ms: Option<i64>,
}

/// Operator-facing alert derived from critical log writes and endpoint
/// lifecycle events. Only `read` is ever mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: EntityId,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    pub timestamp: Timestamp,
}

/// A dashboard operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    /// Unique, compared case-insensitively.
    pub email: String,
    pub role: UserRole,
    pub last_active: Timestamp,
    /// Stored in plaintext for interface compatibility with the data this
    /// system inherits. A known weakness, deliberately not papered over with
    /// hashing here; treat any deployment of this field as insecure.
    pub password: Option<String>,
}

/// The settings singleton. Exactly one row exists after initialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub theme: Theme,
    pub log_retention: RetentionPeriod,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            log_retention: RetentionPeriod::Forever,
        }
    }
}

/// One upstream source feeding a model, with its provenance trust status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub id: EntityId,
    pub name: String,
    /// Free-form source kind, e.g. "Internal Dataset" or "API Feed".
    #[serde(rename = "type")]
    pub kind: String,
    pub trust_status: TrustStatus,
    pub timestamp: Timestamp,
    pub details: std::collections::BTreeMap<String, String>,
}

/// A training dataset and the sources it was assembled from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingData {
    pub dataset_id: EntityId,
    pub dataset_name: String,
    pub sources: Vec<DataSource>,
    pub processing_script_url: String,
    pub processing_script_hash: String,
    pub timestamp: Timestamp,
}

/// Provenance graph for the model behind an endpoint. Created alongside its
/// endpoint (`model_id` == endpoint id), deleted alongside it, read-mostly
/// in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelLineage {
    pub model_id: EntityId,
    pub model_name: String,
    pub model_version: String,
    pub training_data: Vec<TrainingData>,
    pub inference_input_source: DataSource,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Input for creating an endpoint. Id, api key, and creation time are
/// generated by the monitor, never supplied by callers.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEndpoint {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(url)]
    pub url: String,
    #[validate(range(min = 1))]
    pub rate_limit: i64,
    #[serde(default)]
    pub ip_whitelist: Vec<String>,
    pub status: EndpointStatus,
}

/// Mutable endpoint fields. The api key and creation time stay fixed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEndpoint {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(url)]
    pub url: String,
    #[validate(range(min = 1))]
    pub rate_limit: i64,
    #[serde(default)]
    pub ip_whitelist: Vec<String>,
    pub status: EndpointStatus,
}

/// Input for appending a log entry; the id is generated on write.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLogEntry {
    pub timestamp: Timestamp,
    pub endpoint: String,
    pub ip: String,
    pub level: LogLevel,
    pub message: String,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub latency_ms: Option<i64>,
}

/// Input for creating a user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: UserRole,
    pub password: Option<String>,
}

/// Mutable user profile fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: UserRole,
}
