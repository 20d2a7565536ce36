//! In-process change bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`ChangeBus`] is the central publish/subscribe hub for [`StoreChange`]
//! notifications. It is designed to be shared via `Arc<ChangeBus>` across
//! the application. Writers publish a change after every mutation of a
//! watched collection; consumers re-read the collection rather than acting
//! on deltas.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// StoreChange
// ---------------------------------------------------------------------------

/// A store collection watched by the metric projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WatchedCollection {
    Transactions,
    Students,
    Partners,
    Enrollments,
    PayoutsPending,
}

/// What happened to a document in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
}

/// Notification that a watched collection changed.
///
/// Deliberately carries no document payload: consumers are pure functions
/// of the full current collection and must re-read it.
#[derive(Debug, Clone, Serialize)]
pub struct StoreChange {
    pub collection: WatchedCollection,
    pub kind: ChangeKind,
    pub occurred_at: DateTime<Utc>,
}

impl StoreChange {
    pub fn new(collection: WatchedCollection, kind: ChangeKind) -> Self {
        Self {
            collection,
            kind,
            occurred_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// ChangeBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out bus for store change notifications.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`StoreChange`].
pub struct ChangeBus {
    sender: broadcast::Sender<StoreChange>,
}

impl ChangeBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged` — which the
    /// projection treats as a full-resync signal.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change to all current subscribers.
    ///
    /// If there are no active subscribers the change is silently dropped.
    pub fn publish(&self, change: StoreChange) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(change);
    }

    /// Subscribe to all changes published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.sender.subscribe()
    }
}

impl Default for ChangeBus {
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

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = ChangeBus::default();
        let mut rx = bus.subscribe();

        bus.publish(StoreChange::new(
            WatchedCollection::Enrollments,
            ChangeKind::Added,
        ));

        let received = rx.recv().await.expect("should receive the change");
        assert_eq!(received.collection, WatchedCollection::Enrollments);
        assert_eq!(received.kind, ChangeKind::Added);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_change() {
        let bus = ChangeBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(StoreChange::new(
            WatchedCollection::Transactions,
            ChangeKind::Updated,
        ));

        let c1 = rx1.recv().await.expect("subscriber 1 should receive");
        let c2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(c1.collection, WatchedCollection::Transactions);
        assert_eq!(c2.collection, WatchedCollection::Transactions);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = ChangeBus::default();
        // No subscribers — this must not panic.
        bus.publish(StoreChange::new(
            WatchedCollection::PayoutsPending,
            ChangeKind::Removed,
        ));
    }
}
