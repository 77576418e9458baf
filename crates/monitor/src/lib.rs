//! Orchestration layer for the AI endpoint security dashboard.
//!
//! [`Monitor`] ties the pieces together: the SQLite record store
//! (`guardtower-db`), the in-memory view mirror, retention enforcement,
//! notification dispatch, natural-language search via a pluggable
//! translator, report generation, and the mutation event bus
//! (`guardtower-events`).

pub mod error;
pub mod monitor;
pub mod notify;
pub mod retention;
pub mod translate;
pub mod view;

pub use error::MonitorError;
pub use monitor::{Monitor, Report, SearchOutcome};
pub use notify::NotificationDispatcher;
pub use retention::{apply_retention, PurgeOutcome};
pub use translate::{CollaboratorError, ReportNarrator, SearchTranslator};
pub use view::{ViewMirror, NOTIFICATION_VIEW_CAP};
