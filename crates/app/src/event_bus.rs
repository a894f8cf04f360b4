//! In-process eventing bus backed by a tokio broadcast channel.
//!
//! The second fan-out path for state changes: where the change bridge feeds
//! the local surface, this bus feeds remote-eventing consumers.

use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use lumen_domain::notification::ChangeNotification;

use crate::switch_power::StateObserver;

/// Broadcasts every [`ChangeNotification`] it observes.
///
/// Publishing succeeds even when there are no active subscribers
/// (the notification is simply dropped).
pub struct StateEventBus {
    sender: broadcast::Sender<ChangeNotification>,
}

impl StateEventBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to notifications on this bus.
    ///
    /// Returns a receiver that will get all notifications published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeNotification> {
        self.sender.subscribe()
    }

    /// Same as [`subscribe`](Self::subscribe), as a `Stream`.
    #[must_use]
    pub fn stream(&self) -> BroadcastStream<ChangeNotification> {
        BroadcastStream::new(self.sender.subscribe())
    }
}

impl StateObserver for StateEventBus {
    fn on_change(&self, notification: &ChangeNotification) {
        // send fails only when there are zero receivers
        let _ = self.sender.send(notification.clone());
    }
}
