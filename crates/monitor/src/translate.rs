//! External-collaborator traits: search translation and report narration.
//!
//! Both collaborators are optional and strictly advisory. The monitor hands
//! them a bounded input (the raw search text plus the current endpoint
//! names, or a redacted report summary) and treats anything that comes back
//! as untrusted: a translated filter is deserialized into the structured
//! [`LogFilter`] shape and evaluated locally, never executed, and a failed
//! narration falls back to a fixed string. Raw log content is never sent
//! through either channel.

use async_trait::async_trait;

use guardtower_core::filter::LogFilter;
use guardtower_core::report::ReportSummary;

/// Failure of an external collaborator call.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    /// No collaborator is configured for the requested capability.
    #[error("no {0} configured")]
    NotConfigured(&'static str),

    /// The collaborator was reached but the call failed.
    #[error("collaborator call failed: {0}")]
    Unavailable(String),

    /// The collaborator answered with output that does not parse into the
    /// expected shape.
    #[error("malformed collaborator output: {0}")]
    Malformed(String),
}

/// Translates a natural-language query into a structured [`LogFilter`].
///
/// The translator receives the verbatim query plus the current endpoint
/// names (so it can ground name mentions); it must not receive log content.
/// Implementations typically call an external language model and parse its
/// JSON answer with `serde_json`.
#[async_trait]
pub trait SearchTranslator: Send + Sync {
    async fn translate(
        &self,
        query: &str,
        endpoint_names: &[String],
    ) -> Result<LogFilter, CollaboratorError>;
}

/// Produces the prose narrative for a security report from its redacted
/// [`ReportSummary`] projection.
#[async_trait]
pub trait ReportNarrator: Send + Sync {
    async fn narrate(&self, summary: &ReportSummary) -> Result<String, CollaboratorError>;
}
