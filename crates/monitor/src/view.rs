//! In-memory view mirror.
//!
//! The mirror is the render-ready projection of the record store: the two
//! log collections newest-first, the capped notification feed, and — when a
//! filter is active — a displayed subset per collection alongside the
//! canonical one. It is plain data guarded by the monitor's lock; all
//! persistence happens elsewhere, and every mutation here follows a write
//! that already landed.

use guardtower_core::filter::LogFilter;
use guardtower_core::model::{LogEntry, Notification};
use guardtower_core::types::{LogKind, Timestamp};

/// Maximum number of notifications the live view retains. The store keeps
/// full history; only the mirror is capped.
pub const NOTIFICATION_VIEW_CAP: usize = 20;

/// Render-ready mirror of the record store.
#[derive(Debug, Default)]
pub struct ViewMirror {
    prompt_logs: Vec<LogEntry>,
    data_logs: Vec<LogEntry>,
    displayed_prompt: Vec<LogEntry>,
    displayed_data: Vec<LogEntry>,
    active: Option<LogFilter>,
    notifications: Vec<Notification>,
}

impl ViewMirror {
    // -----------------------------------------------------------------------
    // Logs
    // -----------------------------------------------------------------------

    /// Replace one canonical log sequence wholesale (initial load, retention
    /// purge, cascade delete) and drop any active filter: a filtered view
    /// must never outlive the sequence it was derived from.
    pub fn reload_logs(&mut self, kind: LogKind, entries: Vec<LogEntry>) {
        match kind {
            LogKind::Prompt => self.prompt_logs = entries,
            LogKind::Data => self.data_logs = entries,
        }
        self.clear_filter();
    }

    /// Prepend a freshly appended entry to its canonical sequence.
    ///
    /// A filtered view is a snapshot taken when the filter was applied;
    /// entries arriving afterwards join the canonical sequence only and
    /// become visible when the filter is cleared or re-applied.
    pub fn prepend_log(&mut self, kind: LogKind, entry: LogEntry) {
        match kind {
            LogKind::Prompt => self.prompt_logs.insert(0, entry),
            LogKind::Data => self.data_logs.insert(0, entry),
        }
    }

    /// The canonical (unfiltered) sequence for `kind`, newest first.
    pub fn canonical(&self, kind: LogKind) -> &[LogEntry] {
        match kind {
            LogKind::Prompt => &self.prompt_logs,
            LogKind::Data => &self.data_logs,
        }
    }

    /// The sequence a renderer should show for `kind`: the filtered subset
    /// while a filter is active, the canonical sequence otherwise.
    pub fn displayed(&self, kind: LogKind) -> &[LogEntry] {
        if self.active.is_none() {
            return self.canonical(kind);
        }
        match kind {
            LogKind::Prompt => &self.displayed_prompt,
            LogKind::Data => &self.displayed_data,
        }
    }

    // -----------------------------------------------------------------------
    // Filter
    // -----------------------------------------------------------------------

    /// Apply `filter` over both canonical sequences, anchored at `now`.
    /// Replaces any previously active filter.
    pub fn set_filter(&mut self, filter: LogFilter, now: Timestamp) {
        self.displayed_prompt = filter.apply(LogKind::Prompt, &self.prompt_logs, now);
        self.displayed_data = filter.apply(LogKind::Data, &self.data_logs, now);
        self.active = Some(filter);
    }

    /// Drop the active filter and return to the canonical sequences.
    /// A no-op when no filter is active.
    pub fn clear_filter(&mut self) {
        self.active = None;
        self.displayed_prompt.clear();
        self.displayed_data.clear();
    }

    pub fn is_filtered(&self) -> bool {
        self.active.is_some()
    }

    /// The active filter, if any.
    pub fn filter(&self) -> Option<&LogFilter> {
        self.active.as_ref()
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    /// Replace the notification feed (initial load). Keeps at most
    /// [`NOTIFICATION_VIEW_CAP`] entries, assuming newest-first input.
    pub fn set_notifications(&mut self, notifications: Vec<Notification>) {
        self.notifications = notifications;
        self.notifications.truncate(NOTIFICATION_VIEW_CAP);
    }

    /// Prepend a freshly posted notification, evicting the oldest entry
    /// beyond the cap.
    pub fn push_notification(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
        self.notifications.truncate(NOTIFICATION_VIEW_CAP);
    }

    /// Flip every notification in the view to read.
    pub fn mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.read = true;
        }
    }

    /// The capped notification feed, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use guardtower_core::types::{LogLevel, NotificationKind};

    fn entry(id: &str, level: LogLevel, age_minutes: i64) -> LogEntry {
        LogEntry {
            id: id.into(),
            timestamp: Utc::now() - Duration::minutes(age_minutes),
            endpoint: "E".into(),
            ip: "10.0.0.1".into(),
            level,
            message: format!("event {id}"),
            payload: None,
            latency_ms: None,
        }
    }

    fn notification(id: &str) -> Notification {
        Notification {
            id: id.into(),
            message: format!("alert {id}"),
            kind: NotificationKind::Critical,
            read: false,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn unfiltered_view_displays_the_canonical_sequence() {
        let mut view = ViewMirror::default();
        view.reload_logs(
            LogKind::Prompt,
            vec![entry("a", LogLevel::Info, 1), entry("b", LogLevel::Info, 2)],
        );
        assert!(!view.is_filtered());
        assert_eq!(view.displayed(LogKind::Prompt).len(), 2);
        assert_eq!(view.displayed(LogKind::Data).len(), 0);
    }

    #[test]
    fn filter_narrows_displayed_but_not_canonical() {
        let mut view = ViewMirror::default();
        view.reload_logs(
            LogKind::Prompt,
            vec![
                entry("a", LogLevel::Critical, 1),
                entry("b", LogLevel::Info, 2),
            ],
        );
        view.set_filter(
            LogFilter {
                levels: vec![LogLevel::Critical],
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(view.displayed(LogKind::Prompt).len(), 1);
        assert_eq!(view.displayed(LogKind::Prompt)[0].id, "a");
        assert_eq!(view.canonical(LogKind::Prompt).len(), 2);
    }

    #[test]
    fn appended_entry_stays_out_of_an_active_filtered_view() {
        let mut view = ViewMirror::default();
        view.set_filter(LogFilter::default(), Utc::now());
        view.prepend_log(LogKind::Prompt, entry("live", LogLevel::Critical, 0));
        assert!(view.displayed(LogKind::Prompt).is_empty());
        assert_eq!(view.canonical(LogKind::Prompt).len(), 1);

        view.clear_filter();
        assert_eq!(view.displayed(LogKind::Prompt)[0].id, "live");
    }

    #[test]
    fn reload_drops_an_active_filter() {
        let mut view = ViewMirror::default();
        view.reload_logs(LogKind::Data, vec![entry("a", LogLevel::Critical, 1)]);
        view.set_filter(
            LogFilter {
                levels: vec![LogLevel::Critical],
                ..Default::default()
            },
            Utc::now(),
        );
        assert!(view.is_filtered());

        view.reload_logs(
            LogKind::Data,
            vec![
                entry("a", LogLevel::Critical, 1),
                entry("b", LogLevel::Info, 1),
            ],
        );
        assert!(!view.is_filtered());
        assert_eq!(view.displayed(LogKind::Data).len(), 2);
    }

    #[test]
    fn notification_feed_is_capped_with_oldest_evicted() {
        let mut view = ViewMirror::default();
        for i in 0..NOTIFICATION_VIEW_CAP + 5 {
            view.push_notification(notification(&format!("n{i}")));
        }
        assert_eq!(view.notifications().len(), NOTIFICATION_VIEW_CAP);
        // Newest first; the earliest five were evicted.
        assert_eq!(view.notifications()[0].id, "n24");
        assert_eq!(view.notifications().last().unwrap().id, "n5");
    }

    #[test]
    fn mark_all_read_flips_every_entry() {
        let mut view = ViewMirror::default();
        view.push_notification(notification("a"));
        view.push_notification(notification("b"));
        assert_eq!(view.unread_count(), 2);
        view.mark_all_read();
        assert_eq!(view.unread_count(), 0);
    }
}
