//! Light host: binds the lifecycle core to the hosting environment.
//!
//! [`LightHost`] is what a host process drives: `on_connected` /
//! `on_disconnected` from the binding lifecycle, and commands (toggle the
//! transport, read or set the switch) from its command surface. It keeps
//! only the device identity; the device itself lives in the registry and is
//! looked up again for every command.

use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};

use lumen_domain::device::DeviceDescriptor;
use lumen_domain::error::{LumenError, NotFoundError};
use lumen_domain::id::Udn;
use lumen_domain::notification::{ChangeNotification, TransportState};
use lumen_domain::service::ServiceDescriptor;

use crate::event_bus::StateEventBus;
use crate::ports::{AssetLoader, Registry, Transport};
use crate::render::RenderHandle;
use crate::services::change_bridge::{Attachment, ChangeBridge};
use crate::services::registration::DeviceRegistrar;
use crate::services::transport_toggle::TransportToggle;
use crate::switch_power::{StateObserver, SwitchPower};

/// Capacity of the remote-eventing broadcast channel.
const EVENT_CAPACITY: usize = 64;

/// Everything a host needs to describe its light.
#[derive(Debug, Clone)]
pub struct LightSpec {
    pub identity: Udn,
    pub descriptor: DeviceDescriptor,
    pub service: ServiceDescriptor,
}

/// Lifecycle facade over registration, state, bridge and transport.
pub struct LightHost<R, T, A> {
    spec: LightSpec,
    registrar: DeviceRegistrar<R, A>,
    toggle: TransportToggle<T>,
    bridge: Arc<ChangeBridge>,
    events: Arc<StateEventBus>,
    binding: Mutex<Option<Attachment>>,
}

impl<R, T, A> LightHost<R, T, A>
where
    R: Registry,
    T: Transport,
    A: AssetLoader,
{
    /// Create an unbound host. Nothing is registered until
    /// [`on_connected`](Self::on_connected).
    pub fn new(spec: LightSpec, registry: R, transport: T, assets: A, render: RenderHandle) -> Self {
        Self {
            spec,
            registrar: DeviceRegistrar::new(registry, assets),
            toggle: TransportToggle::new(transport),
            bridge: Arc::new(ChangeBridge::new(render)),
            events: Arc::new(StateEventBus::new(EVENT_CAPACITY)),
            binding: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn identity(&self) -> Udn {
        self.spec.identity
    }

    /// Notifications for remote-eventing consumers.
    #[must_use]
    pub fn subscribe_events(&self) -> broadcast::Receiver<ChangeNotification> {
        self.events.subscribe()
    }

    pub async fn is_bound(&self) -> bool {
        self.binding.lock().await.is_some()
    }

    /// The hosting environment is available: register the device if needed,
    /// show its current state and start observing it.
    ///
    /// Returns `false` when already bound (nothing is done).
    ///
    /// # Errors
    ///
    /// Propagates registration failures; the host stays unbound and the next
    /// connect tries again.
    #[tracing::instrument(skip(self), fields(identity = %self.spec.identity))]
    pub async fn on_connected(&self) -> Result<bool, LumenError> {
        let mut binding = self.binding.lock().await;
        if binding.is_some() {
            tracing::debug!("already bound");
            return Ok(false);
        }

        let handle = self
            .registrar
            .ensure_registered(self.spec.identity, &self.spec.descriptor, &self.spec.service)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "creating device failed"))?;

        let switch = handle.switch_power();
        self.bridge.show(switch.status());
        *binding = Some(Attachment::attach(
            switch,
            [
                Arc::clone(&self.bridge) as Arc<dyn StateObserver>,
                Arc::clone(&self.events) as Arc<dyn StateObserver>,
            ],
        ));
        tracing::info!("bound");
        Ok(true)
    }

    /// The hosting environment went away: stop observing the switch.
    ///
    /// Safe to call without a prior successful connect. The device stays
    /// registered so a later connect picks up the same state.
    #[tracing::instrument(skip(self), fields(identity = %self.spec.identity))]
    pub async fn on_disconnected(&self) {
        match self.binding.lock().await.take() {
            Some(attachment) => {
                let released = attachment.detach();
                tracing::info!(released, "unbound");
            }
            None => tracing::debug!("not bound"),
        }
    }

    /// Disconnect and remove the device from the registry.
    ///
    /// # Errors
    ///
    /// Returns a registry error.
    pub async fn shutdown(&self) -> Result<(), LumenError> {
        self.on_disconnected().await;
        self.registrar.unregister(self.spec.identity).await?;
        Ok(())
    }

    /// Toggle the transport, see [`TransportToggle::toggle`].
    ///
    /// # Errors
    ///
    /// [`LumenError::BindingUnavailable`] before a successful connect,
    /// otherwise lookup or transport errors.
    pub async fn toggle_transport(&self) -> Result<TransportState, LumenError> {
        let binding = self.binding.lock().await;
        if binding.is_none() {
            return Err(LumenError::BindingUnavailable);
        }
        let switch = self.switch().await?;
        self.toggle.toggle(&switch).await
    }

    /// Current reachability of the transport.
    ///
    /// # Errors
    ///
    /// [`LumenError::BindingUnavailable`] before a successful connect.
    pub async fn transport_state(&self) -> Result<TransportState, LumenError> {
        self.require_bound().await?;
        Ok(self.toggle.state().await)
    }

    /// Current switch status.
    ///
    /// # Errors
    ///
    /// [`LumenError::BindingUnavailable`] before a successful connect, or
    /// [`LumenError::NotFound`] if the device was removed from the registry.
    pub async fn status(&self) -> Result<bool, LumenError> {
        self.require_bound().await?;
        Ok(self.switch().await?.status())
    }

    /// Set the switch, as a control point's `SetTarget` action would.
    ///
    /// # Errors
    ///
    /// Same as [`status`](Self::status).
    pub async fn set_status(&self, on: bool) -> Result<Option<ChangeNotification>, LumenError> {
        self.require_bound().await?;
        Ok(self.switch().await?.set_status(on))
    }

    async fn require_bound(&self) -> Result<(), LumenError> {
        if self.binding.lock().await.is_some() {
            Ok(())
        } else {
            Err(LumenError::BindingUnavailable)
        }
    }

    async fn switch(&self) -> Result<Arc<SwitchPower>, LumenError> {
        let handle = self
            .registrar
            .lookup(self.spec.identity, &self.spec.service.service_type)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Device",
                id: self.spec.identity.to_string(),
            })?;
        Ok(handle.switch_power())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RenderSurface;
    use crate::render;
    use crate::services::registration::tests::{EmbeddedOnly, InMemoryRegistry, descriptor};
    use crate::services::transport_toggle::tests::FakeTransport;
    use lumen_domain::device::IconSource;
    use std::sync::atomic::Ordering;

    struct SharedSurface(Arc<std::sync::Mutex<Vec<bool>>>);

    impl RenderSurface for SharedSurface {
        fn render(&mut self, on: bool) {
            self.0.lock().unwrap().push(on);
        }
    }

    type TestHost = LightHost<Arc<InMemoryRegistry>, Arc<FakeTransport>, EmbeddedOnly>;

    struct Fixture {
        host: TestHost,
        registry: Arc<InMemoryRegistry>,
        transport: Arc<FakeTransport>,
        frames: Arc<std::sync::Mutex<Vec<bool>>>,
        render_task: tokio::task::JoinHandle<()>,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_descriptor(descriptor())
        }

        fn with_descriptor(descriptor: DeviceDescriptor) -> Self {
            let registry = Arc::new(InMemoryRegistry::default());
            let transport = Arc::new(FakeTransport::enabled());
            let frames = Arc::new(std::sync::Mutex::new(Vec::new()));
            let (render, render_task) = render::spawn(SharedSurface(Arc::clone(&frames)));
            let spec = LightSpec {
                identity: Udn::new(),
                descriptor,
                service: ServiceDescriptor::switch_power(),
            };
            let host = LightHost::new(
                spec,
                Arc::clone(&registry),
                Arc::clone(&transport),
                EmbeddedOnly,
                render,
            );
            Self {
                host,
                registry,
                transport,
                frames,
                render_task,
            }
        }

        /// Drop the host and wait until every submitted frame was rendered.
        async fn frames(self) -> Vec<bool> {
            drop(self.host);
            self.render_task.await.unwrap();
            self.frames.lock().unwrap().clone()
        }
    }

    #[tokio::test]
    async fn should_register_and_show_default_state_on_first_connect() {
        let fixture = Fixture::new();
        let mut events = fixture.host.subscribe_events();

        assert!(fixture.host.on_connected().await.unwrap());

        assert_eq!(fixture.registry.len(), 1);
        assert!(!fixture.host.status().await.unwrap());
        assert!(events.try_recv().is_err());
        assert_eq!(fixture.frames().await, vec![false]);
    }

    #[tokio::test]
    async fn should_not_register_twice_when_reconnecting() {
        let fixture = Fixture::new();
        fixture.host.on_connected().await.unwrap();
        fixture.host.set_status(true).await.unwrap();

        fixture.host.on_disconnected().await;
        assert!(fixture.host.on_connected().await.unwrap());

        assert_eq!(fixture.registry.len(), 1);
        assert_eq!(fixture.registry.adds.load(Ordering::SeqCst), 1);
        assert!(fixture.host.status().await.unwrap());
    }

    #[tokio::test]
    async fn should_ignore_second_connect_while_bound() {
        let fixture = Fixture::new();
        assert!(fixture.host.on_connected().await.unwrap());
        assert!(!fixture.host.on_connected().await.unwrap());

        fixture.host.set_status(true).await.unwrap();

        // One bridge subscription, so one frame per change.
        assert_eq!(fixture.frames().await, vec![false, true]);
    }

    #[tokio::test]
    async fn should_reject_commands_before_connect() {
        let fixture = Fixture::new();

        assert!(matches!(
            fixture.host.toggle_transport().await,
            Err(LumenError::BindingUnavailable)
        ));
        assert!(matches!(
            fixture.host.status().await,
            Err(LumenError::BindingUnavailable)
        ));
        assert!(matches!(
            fixture.host.set_status(true).await,
            Err(LumenError::BindingUnavailable)
        ));
        assert_eq!(fixture.registry.len(), 0);
    }

    #[tokio::test]
    async fn should_tolerate_disconnect_without_connect() {
        let fixture = Fixture::new();
        fixture.host.on_disconnected().await;
        assert!(!fixture.host.is_bound().await);
    }

    #[tokio::test]
    async fn should_stay_unbound_when_registration_fails() {
        let mut bad = descriptor();
        bad.icon.source = IconSource::File("nowhere.png".into());
        let fixture = Fixture::with_descriptor(bad);

        let result = fixture.host.on_connected().await;

        assert!(matches!(result, Err(LumenError::ResourceLoad(_))));
        assert!(!fixture.host.is_bound().await);
        assert_eq!(fixture.registry.len(), 0);
    }

    #[tokio::test]
    async fn should_forward_changes_to_surface_and_eventing() {
        let fixture = Fixture::new();
        fixture.host.on_connected().await.unwrap();
        let mut events = fixture.host.subscribe_events();

        fixture.host.set_status(true).await.unwrap();
        fixture.host.set_status(true).await.unwrap();

        let event = events.recv().await.unwrap();
        assert!(event.new_value);
        assert!(events.try_recv().is_err());
        assert_eq!(fixture.frames().await, vec![false, true]);
    }

    #[tokio::test]
    async fn should_stop_forwarding_after_disconnect() {
        let fixture = Fixture::new();
        fixture.host.on_connected().await.unwrap();
        let switch = fixture.host.switch().await.unwrap();
        fixture.host.on_disconnected().await;

        switch.set_status(true);

        assert_eq!(switch.observer_count(), 0);
        assert_eq!(fixture.frames().await, vec![false]);
    }

    #[tokio::test]
    async fn should_toggle_transport_and_render_result() {
        let fixture = Fixture::new();
        fixture.host.on_connected().await.unwrap();
        fixture.host.set_status(true).await.unwrap();

        let off = fixture.host.toggle_transport().await.unwrap();
        assert_eq!(off, TransportState::Disabled);
        assert!(!fixture.host.status().await.unwrap());

        let on = fixture.host.toggle_transport().await.unwrap();
        assert_eq!(on, TransportState::Enabled);
        assert!(fixture.host.status().await.unwrap());

        assert_eq!(fixture.frames().await, vec![false, true, false, true]);
    }

    #[tokio::test]
    async fn should_surface_enable_failure_and_keep_state() {
        let fixture = Fixture::new();
        fixture.transport.enabled.store(false, Ordering::SeqCst);
        fixture.transport.fail.store(true, Ordering::SeqCst);
        fixture.host.on_connected().await.unwrap();

        let result = fixture.host.toggle_transport().await;

        assert!(matches!(result, Err(LumenError::Transport(_))));
        assert!(!fixture.host.status().await.unwrap());
        assert_eq!(
            fixture.host.transport_state().await.unwrap(),
            TransportState::Disabled
        );
    }

    #[tokio::test]
    async fn should_unregister_on_shutdown() {
        let fixture = Fixture::new();
        fixture.host.on_connected().await.unwrap();

        fixture.host.shutdown().await.unwrap();

        assert_eq!(fixture.registry.len(), 0);
        assert!(!fixture.host.is_bound().await);
    }
}
