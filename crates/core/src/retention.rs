//! Retention periods and cutoff math.
//!
//! The operator picks one of four retention settings; everything older than
//! the derived cutoff is purged from both log collections. The comparison is
//! strict: an entry timestamped exactly at the cutoff is retained.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// How long log entries are kept before being purged.
///
/// Persisted as a day count; `0` means forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum RetentionPeriod {
    Forever,
    Days7,
    Days30,
    Days90,
}

impl RetentionPeriod {
    /// Day count as persisted in settings; `0` for [`Forever`](Self::Forever).
    pub fn days(&self) -> u16 {
        match self {
            RetentionPeriod::Forever => 0,
            RetentionPeriod::Days7 => 7,
            RetentionPeriod::Days30 => 30,
            RetentionPeriod::Days90 => 90,
        }
    }

    /// The purge cutoff for this period, or `None` when logs are kept
    /// forever. Entries strictly older than the cutoff are eligible for
    /// deletion.
    pub fn cutoff(&self, now: Timestamp) -> Option<Timestamp> {
        match self {
            RetentionPeriod::Forever => None,
            period => Some(now - Duration::days(i64::from(period.days()))),
        }
    }
}

impl TryFrom<u16> for RetentionPeriod {
    type Error = String;

    fn try_from(days: u16) -> Result<Self, Self::Error> {
        match days {
            0 => Ok(RetentionPeriod::Forever),
            7 => Ok(RetentionPeriod::Days7),
            30 => Ok(RetentionPeriod::Days30),
            90 => Ok(RetentionPeriod::Days90),
            other => Err(format!("unsupported retention period: {other} days")),
        }
    }
}

impl From<RetentionPeriod> for u16 {
    fn from(period: RetentionPeriod) -> Self {
        period.days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn forever_has_no_cutoff() {
        assert_eq!(RetentionPeriod::Forever.cutoff(Utc::now()), None);
    }

    #[test]
    fn seven_day_cutoff_is_exactly_seven_days_back() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let cutoff = RetentionPeriod::Days7.cutoff(now).unwrap();
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap());
    }

    #[test]
    fn day_counts_round_trip_through_serde() {
        for period in [
            RetentionPeriod::Forever,
            RetentionPeriod::Days7,
            RetentionPeriod::Days30,
            RetentionPeriod::Days90,
        ] {
            let json = serde_json::to_string(&period).unwrap();
            let back: RetentionPeriod = serde_json::from_str(&json).unwrap();
            assert_eq!(back, period);
        }
        assert_eq!(serde_json::to_string(&RetentionPeriod::Forever).unwrap(), "0");
    }

    #[test]
    fn arbitrary_day_counts_are_rejected() {
        assert!(serde_json::from_str::<RetentionPeriod>("14").is_err());
    }
}
