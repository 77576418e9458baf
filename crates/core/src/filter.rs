//! Structured log filter and its evaluation.
//!
//! A [`LogFilter`] is produced either by explicit operator input or by the
//! natural-language translator collaborator, which returns it as JSON in the
//! shape deserialized here (camelCase keys, every field optional).
//!
//! Evaluation is pure and order-preserving: it only removes entries, never
//! reorders or invents them. An all-defaults filter matches everything;
//! callers that mean "no filter" must signal a clear explicitly instead of
//! applying an empty filter, so the two states stay distinguishable.

use serde::{Deserialize, Serialize};

use crate::model::LogEntry;
use crate::types::{LogKind, LogLevel, Timestamp};

/// Fixed time windows evaluated against wall-clock `now` at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    LastHour,
    Last24Hours,
    Last7Days,
    #[default]
    AllTime,
}

impl Timeframe {
    /// Window length in milliseconds; `None` for [`AllTime`](Self::AllTime).
    pub fn window_ms(&self) -> Option<i64> {
        match self {
            Timeframe::LastHour => Some(3_600_000),
            Timeframe::Last24Hours => Some(86_400_000),
            Timeframe::Last7Days => Some(604_800_000),
            Timeframe::AllTime => None,
        }
    }
}

/// Which log collection participates in a filtered view.
///
/// When a single collection is selected, the other collection's displayed
/// result becomes empty — not merely unfiltered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTypeSelector {
    Prompt,
    Data,
    #[default]
    All,
}

impl LogTypeSelector {
    /// Whether entries of `kind` participate in the filtered result.
    pub fn includes(&self, kind: LogKind) -> bool {
        match self {
            LogTypeSelector::All => true,
            LogTypeSelector::Prompt => kind == LogKind::Prompt,
            LogTypeSelector::Data => kind == LogKind::Data,
        }
    }
}

/// A structured predicate over log entries. Every field defaults to
/// "no constraint"; active constraints are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogFilter {
    pub log_type: LogTypeSelector,
    /// Entry excluded when non-empty and its level is not a member.
    pub levels: Vec<LogLevel>,
    /// Entry excluded when non-empty and its endpoint name is not a member.
    pub endpoint_names: Vec<String>,
    pub timeframe: Timeframe,
    /// Case-insensitive substring match against message OR payload.
    pub search_text: String,
}

impl LogFilter {
    /// True when no field constrains anything. Such a filter matches every
    /// entry; callers should treat it as a signal to clear rather than apply.
    pub fn is_empty(&self) -> bool {
        self.log_type == LogTypeSelector::All
            && self.levels.is_empty()
            && self.endpoint_names.is_empty()
            && self.timeframe == Timeframe::AllTime
            && self.search_text.trim().is_empty()
    }

    /// Whether a single entry survives the per-entry constraints.
    ///
    /// The `log_type` selector is a collection-level concern and is not
    /// evaluated here; see [`LogTypeSelector::includes`].
    pub fn matches(&self, entry: &LogEntry, now: Timestamp) -> bool {
        if let Some(window_ms) = self.timeframe.window_ms() {
            // Strictly-inside-the-window: an entry exactly at the edge is out.
            if entry.timestamp.timestamp_millis() <= now.timestamp_millis() - window_ms {
                return false;
            }
        }

        if !self.levels.is_empty() && !self.levels.contains(&entry.level) {
            return false;
        }

        if !self.endpoint_names.is_empty()
            && !self.endpoint_names.iter().any(|n| n == &entry.endpoint)
        {
            return false;
        }

        let needle = self.search_text.trim();
        if !needle.is_empty() {
            let needle = needle.to_lowercase();
            let in_message = entry.message.to_lowercase().contains(&needle);
            let in_payload = entry
                .payload
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(&needle));
            if !in_message && !in_payload {
                return false;
            }
        }

        true
    }

    /// Apply the per-entry constraints over a collection of `kind`, keeping
    /// survivors in their original relative order.
    ///
    /// Returns an empty vec when `kind` is deselected by `log_type`.
    pub fn apply(&self, kind: LogKind, entries: &[LogEntry], now: Timestamp) -> Vec<LogEntry> {
        if !self.log_type.includes(kind) {
            return Vec::new();
        }
        entries
            .iter()
            .filter(|entry| self.matches(entry, now))
            .cloned()
            .collect()
    }
}
