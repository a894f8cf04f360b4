//! Device registration: make sure the light is registered exactly once.

use lumen_domain::device::DeviceDescriptor;
use lumen_domain::error::{LumenError, NotFoundError};
use lumen_domain::id::Udn;
use lumen_domain::service::{ServiceDescriptor, ServiceType};

use crate::ports::{AssetLoader, Registry};
use crate::service_manager::{LocalService, RegisteredDevice, ServiceHandle};

/// Idempotent registration of a device into a [`Registry`], keyed by [`Udn`].
pub struct DeviceRegistrar<R, A> {
    registry: R,
    assets: A,
}

impl<R: Registry, A: AssetLoader> DeviceRegistrar<R, A> {
    /// Create a registrar backed by the given registry and asset loader.
    pub fn new(registry: R, assets: A) -> Self {
        Self { registry, assets }
    }

    /// Return a handle to the service of the device registered under
    /// `identity`, registering the device first if the registry does not
    /// know it yet.
    ///
    /// Calling this again for an identity that is already registered does
    /// not re-register; the existing service and its state are returned.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] for a malformed descriptor,
    /// [`LumenError::ResourceLoad`] when the icon cannot be read,
    /// [`LumenError::NotFound`] when the registered device lacks the service,
    /// or a registry error.
    #[tracing::instrument(skip(self, descriptor, service), fields(%identity, service = %service.service_type))]
    pub async fn ensure_registered(
        &self,
        identity: Udn,
        descriptor: &DeviceDescriptor,
        service: &ServiceDescriptor,
    ) -> Result<ServiceHandle, LumenError> {
        if let Some(handle) = self.lookup(identity, &service.service_type).await? {
            tracing::debug!("device already registered");
            return Ok(handle);
        }

        descriptor.validate()?;
        service.validate()?;
        let icon = self.assets.load(&descriptor.icon.source).await?;
        let device = RegisteredDevice::new(
            identity,
            descriptor.clone(),
            icon,
            LocalService::new(service.clone()),
        );

        tracing::info!(
            friendly_name = %descriptor.details.friendly_name,
            device_type = %descriptor.device_type,
            "registering device"
        );
        self.registry.add_device(device).await?;

        self.lookup(identity, &service.service_type)
            .await?
            .ok_or_else(|| {
                NotFoundError {
                    entity: "Device",
                    id: identity.to_string(),
                }
                .into()
            })
    }

    /// Resolve the service of a registered device.
    ///
    /// Returns `Ok(None)` when no device is registered under `identity`.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::NotFound`] when the device exists but exposes no
    /// service of `service_type`, or a registry error.
    pub async fn lookup(
        &self,
        identity: Udn,
        service_type: &ServiceType,
    ) -> Result<Option<ServiceHandle>, LumenError> {
        let Some(device) = self.registry.get_local_device(identity, true).await? else {
            return Ok(None);
        };
        let service = device.find_service(service_type).ok_or_else(|| NotFoundError {
            entity: "Service",
            id: format!("{identity}::{service_type}"),
        })?;
        Ok(Some(ServiceHandle::new(identity, service)))
    }

    /// Remove the device from the registry, discarding its state.
    ///
    /// # Errors
    ///
    /// Returns a registry error.
    #[tracing::instrument(skip(self), fields(%identity))]
    pub async fn unregister(&self, identity: Udn) -> Result<bool, LumenError> {
        let removed = self.registry.remove_device(identity).await?;
        if removed {
            tracing::info!("device unregistered");
        }
        Ok(removed)
    }
}
