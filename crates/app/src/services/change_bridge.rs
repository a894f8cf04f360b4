//! Change bridge: forwards switch status changes to the rendering surface.

use std::sync::Arc;

use lumen_domain::notification::ChangeNotification;

use crate::render::RenderHandle;
use crate::switch_power::{StateObserver, SubscriptionId, SwitchPower};

/// Observer that marshals `status` transitions onto the render task.
///
/// It never renders itself: it submits to the [`RenderHandle`] and returns.
pub struct ChangeBridge {
    render: RenderHandle,
}

impl ChangeBridge {
    #[must_use]
    pub fn new(render: RenderHandle) -> Self {
        Self { render }
    }

    /// Push a value to the surface outside of a notification, e.g. the
    /// initial state when a device handle is first obtained.
    pub fn show(&self, on: bool) {
        if !self.render.submit(on) {
            tracing::warn!(on, "render task is gone, dropping update");
        }
    }
}

impl StateObserver for ChangeBridge {
    fn on_change(&self, notification: &ChangeNotification) {
        if !notification.is_status() {
            return;
        }
        tracing::info!(
            "turning light {}",
            if notification.new_value { "on" } else { "off" }
        );
        self.show(notification.new_value);
    }
}

/// Standing subscriptions of a set of observers on one switch.
///
/// [`detach`](Self::detach) unsubscribes explicitly; anything still attached
/// when the value is dropped is unsubscribed then.
pub struct Attachment {
    switch: Arc<SwitchPower>,
    subscriptions: Vec<SubscriptionId>,
}

impl Attachment {
    /// Subscribe every observer, in order.
    pub fn attach(
        switch: Arc<SwitchPower>,
        observers: impl IntoIterator<Item = Arc<dyn StateObserver>>,
    ) -> Self {
        let subscriptions = observers
            .into_iter()
            .map(|observer| switch.subscribe(observer))
            .collect();
        Self {
            switch,
            subscriptions,
        }
    }

    /// Unsubscribe everything. Returns how many subscriptions were removed.
    pub fn detach(mut self) -> usize {
        self.release()
    }

    fn release(&mut self) -> usize {
        self.subscriptions
            .drain(..)
            .filter(|id| self.switch.unsubscribe(*id))
            .count()
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        let released = self.release();
        if released > 0 {
            tracing::debug!(released, "released subscriptions on drop");
        }
    }
}
