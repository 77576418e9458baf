//! Security report assembly.
//!
//! Builds the per-endpoint compliance report over a lookback window. The
//! AI narrative that accompanies a report is produced by an external
//! collaborator from a [`ReportSummary`] — a redacted projection that
//! deliberately excludes the raw incident lists, so no log content leaves
//! the process through that channel.

use serde::{Deserialize, Serialize};

use crate::model::{Endpoint, LogEntry};
use crate::score::security_score;
use crate::types::{EndpointStatus, LogLevel, Timestamp};

/// Fixed narrative used when the summary collaborator is unavailable or
/// fails. Report assembly never blocks on it.
pub const NARRATIVE_FALLBACK: &str = "Could not generate an AI summary for this report \
     due to an API error. Please review the raw data below.";

/// A fully assembled security & compliance report for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub endpoint_name: String,
    pub timeframe_text: String,
    pub generated_at: Timestamp,
    pub security_score: u8,
    /// SLA uptime figure: "99.98" for active endpoints, "0.00" for inactive.
    pub uptime: String,
    /// Rounded mean latency over all in-window requests, in milliseconds.
    pub avg_latency_ms: i64,
    pub total_requests: usize,
    pub threats_blocked: usize,
    pub critical_incidents: Vec<LogEntry>,
    pub warning_incidents: Vec<LogEntry>,
    pub endpoint_status: EndpointStatus,
    pub has_ip_whitelist: bool,
}

/// The redacted report projection handed to the narrative collaborator.
/// Carries scores and aggregates only — no incident lists, no generation
/// timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub endpoint_name: String,
    pub timeframe_text: String,
    pub security_score: u8,
    pub uptime: String,
    pub avg_latency_ms: i64,
    pub total_requests: usize,
    pub threats_blocked: usize,
    pub endpoint_status: EndpointStatus,
    pub has_ip_whitelist: bool,
}

impl ReportData {
    /// Project the redacted summary for the narrative collaborator.
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            endpoint_name: self.endpoint_name.clone(),
            timeframe_text: self.timeframe_text.clone(),
            security_score: self.security_score,
            uptime: self.uptime.clone(),
            avg_latency_ms: self.avg_latency_ms,
            total_requests: self.total_requests,
            threats_blocked: self.threats_blocked,
            endpoint_status: self.endpoint_status,
            has_ip_whitelist: self.has_ip_whitelist,
        }
    }
}

/// Assemble a report for `endpoint` over the last `window_days` days.
///
/// Logs are matched by the endpoint's current name and by
/// `timestamp >= now - window_days` (reports use an inclusive cutoff,
/// unlike retention's strict one). The security score is computed over the
/// same windowed subset.
pub fn build_report(
    endpoint: &Endpoint,
    prompt_logs: &[LogEntry],
    data_logs: &[LogEntry],
    window_days: u16,
    now: Timestamp,
) -> ReportData {
    let cutoff = now - chrono::Duration::days(i64::from(window_days));

    let in_window = |log: &&LogEntry| log.endpoint == endpoint.name && log.timestamp >= cutoff;
    let window_prompt: Vec<LogEntry> = prompt_logs.iter().filter(in_window).cloned().collect();
    let window_data: Vec<LogEntry> = data_logs.iter().filter(in_window).cloned().collect();

    let total_requests = window_prompt.len() + window_data.len();
    let total_latency: i64 = window_prompt
        .iter()
        .chain(&window_data)
        .filter_map(|log| log.latency_ms)
        .sum();
    let avg_latency_ms = if total_requests > 0 {
        // Mean over all in-window requests; entries without a latency
        // measurement count toward the denominator.
        (total_latency as f64 / total_requests as f64).round() as i64
    } else {
        0
    };

    let score = security_score(endpoint, &window_prompt, &window_data);

    let mut critical_incidents = Vec::new();
    let mut warning_incidents = Vec::new();
    for log in window_prompt.iter().chain(&window_data) {
        match log.level {
            LogLevel::Critical => critical_incidents.push(log.clone()),
            LogLevel::Warning => warning_incidents.push(log.clone()),
            LogLevel::Info => {}
        }
    }
    let threats_blocked = critical_incidents.len() + warning_incidents.len();

    ReportData {
        endpoint_name: endpoint.name.clone(),
        timeframe_text: format!("Last {window_days} days"),
        generated_at: now,
        security_score: score,
        uptime: match endpoint.status {
            EndpointStatus::Active => "99.98".to_string(),
            EndpointStatus::Inactive => "0.00".to_string(),
        },
        avg_latency_ms,
        total_requests,
        threats_blocked,
        critical_incidents,
        warning_incidents,
        endpoint_status: endpoint.status,
        has_ip_whitelist: !endpoint.ip_whitelist.is_empty(),
    }
}
