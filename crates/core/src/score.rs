//! Endpoint security score.
//!
//! A 0-100 health figure summarizing an endpoint's incident history and
//! configuration hygiene. Pure function of its inputs so reports can score
//! an arbitrary time-windowed log subset with the same code path.

use crate::model::{Endpoint, LogEntry};
use crate::types::{EndpointStatus, LogLevel};

pub const BASE_SCORE: i64 = 100;
pub const CRITICAL_PENALTY: i64 = 10;
pub const WARNING_PENALTY: i64 = 5;
pub const EMPTY_WHITELIST_PENALTY: i64 = 5;
pub const INACTIVE_PENALTY: i64 = 20;

/// Compute the security score for `endpoint` over the given prompt and data
/// log sets.
///
/// Only entries whose denormalized `endpoint` field matches the endpoint's
/// current name count against it. The result is clamped to `[0, 100]` and is
/// non-increasing in the number of critical/warning entries, in an empty
/// whitelist, and in inactive status.
pub fn security_score(endpoint: &Endpoint, prompt_logs: &[LogEntry], data_logs: &[LogEntry]) -> u8 {
    let relevant = prompt_logs
        .iter()
        .chain(data_logs)
        .filter(|log| log.endpoint == endpoint.name);

    let mut criticals = 0i64;
    let mut warnings = 0i64;
    for log in relevant {
        match log.level {
            LogLevel::Critical => criticals += 1,
            LogLevel::Warning => warnings += 1,
            LogLevel::Info => {}
        }
    }

    let mut score = BASE_SCORE;
    score -= criticals * CRITICAL_PENALTY;
    score -= warnings * WARNING_PENALTY;

    if endpoint.ip_whitelist.is_empty() {
        score -= EMPTY_WHITELIST_PENALTY;
    }
    if endpoint.status == EndpointStatus::Inactive {
        score -= INACTIVE_PENALTY;
    }

    score.clamp(0, 100) as u8
}
