//! `SwitchPower`: the state holder behind the one exposed service.
//!
//! Owns the on/off flag of a registered light and an explicit, ordered list of
//! observers. Every read and write of the flag goes through this type.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lumen_domain::notification::ChangeNotification;

/// Receives [`ChangeNotification`]s from a [`SwitchPower`].
///
/// Called synchronously on the thread that mutated the state. Implementations
/// that need another execution context must hand the work off and return.
/// An observer must not write back into the switch that notified it.
pub trait StateObserver: Send + Sync {
    fn on_change(&self, notification: &ChangeNotification);
}

/// Handle returned by [`SwitchPower::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// On/off state of one binary light.
pub struct SwitchPower {
    status: Mutex<bool>,
    observers: Mutex<Vec<(SubscriptionId, Arc<dyn StateObserver>)>>,
    // Serializes delivery so observers see transitions in mutation order.
    delivery: Mutex<()>,
    next_id: AtomicU64,
}

impl Default for SwitchPower {
    fn default() -> Self {
        Self {
            status: Mutex::new(false),
            observers: Mutex::new(Vec::new()),
            delivery: Mutex::new(()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl std::fmt::Debug for SwitchPower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchPower")
            .field("status", &self.status())
            .field("observers", &self.observer_count())
            .finish()
    }
}

impl SwitchPower {
    /// A switch that starts off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current power flag.
    #[must_use]
    pub fn status(&self) -> bool {
        *lock(&self.status)
    }

    /// Set the power flag.
    ///
    /// Returns the notification that was delivered, or `None` when `on`
    /// equals the current value (no-op writes notify nobody). Observers run
    /// in subscription order before this returns.
    pub fn set_status(&self, on: bool) -> Option<ChangeNotification> {
        let _delivery = lock(&self.delivery);
        let notification = {
            let mut status = lock(&self.status);
            if *status == on {
                return None;
            }
            let old = std::mem::replace(&mut *status, on);
            ChangeNotification::status(old, on)
        };

        tracing::debug!(old = notification.old_value, new = on, "status changed");
        let observers: Vec<Arc<dyn StateObserver>> = lock(&self.observers)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer.on_change(&notification);
        }
        Some(notification)
    }

    /// Register an observer. Observers are notified in subscription order.
    pub fn subscribe(&self, observer: Arc<dyn StateObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.observers).push((id, observer));
        id
    }

    /// Remove an observer. Returns whether it was subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = lock(&self.observers);
        let before = observers.len();
        observers.retain(|(candidate, _)| *candidate != id);
        observers.len() != before
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        lock(&self.observers).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Observer that records every notification it sees.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub(crate) seen: Mutex<Vec<ChangeNotification>>,
    }

    impl Recorder {
        pub(crate) fn values(&self) -> Vec<(bool, bool)> {
            lock(&self.seen)
                .iter()
                .map(|n| (n.old_value, n.new_value))
                .collect()
        }
    }

    impl StateObserver for Recorder {
        fn on_change(&self, notification: &ChangeNotification) {
            lock(&self.seen).push(notification.clone());
        }
    }

    struct Tagged {
        tag: u8,
        log: Arc<Mutex<Vec<u8>>>,
    }

    impl StateObserver for Tagged {
        fn on_change(&self, _notification: &ChangeNotification) {
            lock(&self.log).push(self.tag);
        }
    }

    #[test]
    fn should_start_off() {
        assert!(!SwitchPower::new().status());
    }

    #[test]
    fn should_notify_once_when_value_changes() {
        let switch = SwitchPower::new();
        let recorder = Arc::new(Recorder::default());
        switch.subscribe(recorder.clone());

        let notification = switch.set_status(true).unwrap();

        assert!(notification.is_status());
        assert!(!notification.old_value);
        assert!(notification.new_value);
        assert_eq!(recorder.values(), vec![(false, true)]);
        assert!(switch.status());
    }

    #[test]
    fn should_not_notify_when_value_is_unchanged() {
        let switch = SwitchPower::new();
        let recorder = Arc::new(Recorder::default());
        switch.subscribe(recorder.clone());

        assert!(switch.set_status(false).is_none());
        assert!(recorder.values().is_empty());
    }

    #[test]
    fn should_notify_once_for_two_consecutive_identical_writes() {
        let switch = SwitchPower::new();
        let recorder = Arc::new(Recorder::default());
        switch.subscribe(recorder.clone());

        switch.set_status(true);
        switch.set_status(true);

        assert_eq!(recorder.values(), vec![(false, true)]);
    }

    #[test]
    fn should_notify_observers_in_subscription_order() {
        let switch = SwitchPower::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for tag in [3, 1, 2] {
            switch.subscribe(Arc::new(Tagged {
                tag,
                log: Arc::clone(&log),
            }));
        }

        switch.set_status(true);

        assert_eq!(*lock(&log), vec![3, 1, 2]);
    }

    #[test]
    fn should_stop_notifying_after_unsubscribe() {
        let switch = SwitchPower::new();
        let recorder = Arc::new(Recorder::default());
        let id = switch.subscribe(recorder.clone());

        assert!(switch.unsubscribe(id));
        switch.set_status(true);

        assert!(recorder.values().is_empty());
        assert_eq!(switch.observer_count(), 0);
    }

    #[test]
    fn should_report_unknown_subscription_on_second_unsubscribe() {
        let switch = SwitchPower::new();
        let id = switch.subscribe(Arc::new(Recorder::default()));
        assert!(switch.unsubscribe(id));
        assert!(!switch.unsubscribe(id));
    }

    #[test]
    fn should_keep_state_consistent_under_concurrent_writes() {
        let switch = Arc::new(SwitchPower::new());
        let recorder = Arc::new(Recorder::default());
        switch.subscribe(recorder.clone());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let switch = Arc::clone(&switch);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        switch.set_status(i % 2 == 0);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Every delivered transition starts where the previous one ended.
        let values = recorder.values();
        for pair in values.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        if let Some(last) = values.last() {
            assert_eq!(last.1, switch.status());
        }
    }
}
