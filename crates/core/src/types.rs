//! Shared identifier aliases and closed enums.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// All entity primary keys are opaque strings, generated via [`new_id`].
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a new entity id with a collection-specific prefix,
/// e.g. `ep-0190c9a2-...`. UUIDv7 keeps ids roughly time-ordered.
pub fn new_id(prefix: &str) -> EntityId {
    format!("{prefix}-{}", Uuid::now_v7())
}

/// Error returned when a persisted enum string no longer matches any
/// known variant.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized {what}: {value}")]
pub struct ParseEnumError {
    pub what: &'static str,
    pub value: String,
}

macro_rules! impl_str_enum {
    ($ty:ident, $what:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Canonical persisted form.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ParseEnumError {
                        what: $what,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Severity of a single log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Critical,
}

impl_str_enum!(LogLevel, "log level", {
    Info => "info",
    Warning => "warning",
    Critical => "critical",
});

/// Which of the two log collections an entry belongs to.
///
/// Prompt logs come from the prompt firewall, data logs from the data
/// detector. The two collections share a schema but have independent
/// identity spaces and retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Prompt,
    Data,
}

impl LogKind {
    /// Human label identifying the originating subsystem, used as the
    /// notification message prefix.
    pub fn source_label(&self) -> &'static str {
        match self {
            LogKind::Prompt => "Prompt Firewall",
            LogKind::Data => "Data Detector",
        }
    }
}

impl_str_enum!(LogKind, "log kind", {
    Prompt => "prompt",
    Data => "data",
});

/// Whether an endpoint is currently serving traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    Active,
    Inactive,
}

impl EndpointStatus {
    pub fn toggled(&self) -> Self {
        match self {
            EndpointStatus::Active => EndpointStatus::Inactive,
            EndpointStatus::Inactive => EndpointStatus::Active,
        }
    }
}

impl_str_enum!(EndpointStatus, "endpoint status", {
    Active => "active",
    Inactive => "inactive",
});

/// Operator role. Capitalized spellings are part of the persisted format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Admin,
    Developer,
    Viewer,
}

impl_str_enum!(UserRole, "user role", {
    Admin => "Admin",
    Developer => "Developer",
    Viewer => "Viewer",
});

/// Notification severity shown to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Critical,
    Warning,
    Info,
}

impl_str_enum!(NotificationKind, "notification kind", {
    Critical => "critical",
    Warning => "warning",
    Info => "info",
});

/// UI theme, persisted in the settings singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl_str_enum!(Theme, "theme", {
    Light => "light",
    Dark => "dark",
});

/// Provenance trust status of a lineage data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustStatus {
    Trusted,
    Untrusted,
    Unverified,
}

impl_str_enum!(TrustStatus, "trust status", {
    Trusted => "Trusted",
    Untrusted => "Untrusted",
    Unverified => "Unverified",
});
