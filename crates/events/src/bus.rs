//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`StoreEvent`]s. Every
//! record store mutation publishes here *after* the write has landed and the
//! in-memory view has been updated, so a subscriber (typically the host's
//! re-render trigger) never observes an event ahead of the state it
//! describes. Shared via `Arc<EventBus>` across the application.

use serde::Serialize;
use tokio::sync::broadcast;

use guardtower_core::model::{LogEntry, Notification};
use guardtower_core::retention::RetentionPeriod;
use guardtower_core::types::{EntityId, LogKind};

// ---------------------------------------------------------------------------
// StoreEvent
// ---------------------------------------------------------------------------

/// A mutation that happened to the canonical record store.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A log entry was appended to one of the two log collections.
    LogAppended { kind: LogKind, entry: LogEntry },
    /// A retention purge or cascade delete removed entries from a collection.
    LogsPurged { kind: LogKind, removed: u64 },
    EndpointCreated { id: EntityId, name: String },
    EndpointUpdated { id: EntityId },
    EndpointDeleted {
        id: EntityId,
        name: String,
        kept_logs: bool,
    },
    RetentionChanged { period: RetentionPeriod },
    NotificationPosted { notification: Notification },
    NotificationsMarkedRead,
    SettingsChanged,
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`StoreEvent`].
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped; the
    /// view mirror is updated synchronously by the monitor, not through this
    /// channel, so nothing is lost.
    pub fn publish(&self, event: StoreEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use guardtower_core::types::{LogLevel, Timestamp};

    fn sample_entry(ts: Timestamp) -> LogEntry {
        LogEntry {
            id: "log-p-1".into(),
            timestamp: ts,
            endpoint: "Production Chatbot API".into(),
            ip: "192.168.1.20".into(),
            level: LogLevel::Critical,
            message: "Prompt injection attack blocked.".into(),
            payload: None,
            latency_ms: Some(80),
        }
    }

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(StoreEvent::LogAppended {
            kind: LogKind::Prompt,
            entry: sample_entry(chrono::Utc::now()),
        });

        let received = rx.recv().await.expect("should receive the event");
        match received {
            StoreEvent::LogAppended { kind, entry } => {
                assert_eq!(kind, LogKind::Prompt);
                assert_eq!(entry.level, LogLevel::Critical);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(StoreEvent::NotificationsMarkedRead);

        assert!(matches!(
            rx1.recv().await.unwrap(),
            StoreEvent::NotificationsMarkedRead
        ));
        assert!(matches!(
            rx2.recv().await.unwrap(),
            StoreEvent::NotificationsMarkedRead
        ));
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        // No subscribers — this must not panic.
        bus.publish(StoreEvent::SettingsChanged);
    }
}
