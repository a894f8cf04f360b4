//! Service manager: binds a [`SwitchPower`] to a registered device.

use std::sync::Arc;

use lumen_domain::device::DeviceDescriptor;
use lumen_domain::id::Udn;
use lumen_domain::service::{ServiceDescriptor, ServiceType};

use crate::switch_power::SwitchPower;

/// Sole owner of the implementation instance for one service.
#[derive(Debug, Default)]
pub struct ServiceManager {
    implementation: Arc<SwitchPower>,
}

impl ServiceManager {
    /// A manager holding a fresh switch, initially off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The live implementation. All state reads and writes go through it.
    #[must_use]
    pub fn implementation(&self) -> Arc<SwitchPower> {
        Arc::clone(&self.implementation)
    }
}

/// A service exposed by a local device together with its manager.
#[derive(Debug)]
pub struct LocalService {
    pub descriptor: ServiceDescriptor,
    manager: ServiceManager,
}

impl LocalService {
    #[must_use]
    pub fn new(descriptor: ServiceDescriptor) -> Self {
        Self {
            descriptor,
            manager: ServiceManager::new(),
        }
    }

    #[must_use]
    pub fn manager(&self) -> &ServiceManager {
        &self.manager
    }
}

/// Identity, metadata and services of a device handed to the registry.
#[derive(Debug)]
pub struct RegisteredDevice {
    pub identity: Udn,
    pub descriptor: DeviceDescriptor,
    /// Icon bytes loaded at registration time.
    pub icon: Vec<u8>,
    services: Vec<Arc<LocalService>>,
}

impl RegisteredDevice {
    #[must_use]
    pub fn new(
        identity: Udn,
        descriptor: DeviceDescriptor,
        icon: Vec<u8>,
        service: LocalService,
    ) -> Self {
        Self {
            identity,
            descriptor,
            icon,
            services: vec![Arc::new(service)],
        }
    }

    /// Find a service implementing `service_type`.
    #[must_use]
    pub fn find_service(&self, service_type: &ServiceType) -> Option<Arc<LocalService>> {
        self.services
            .iter()
            .find(|service| service.descriptor.service_type.implements(service_type))
            .cloned()
    }

    pub fn services(&self) -> impl Iterator<Item = &Arc<LocalService>> {
        self.services.iter()
    }
}

/// What [`DeviceRegistrar::ensure_registered`](crate::services::registration::DeviceRegistrar::ensure_registered)
/// yields: the device identity and its resolved service.
#[derive(Debug, Clone)]
pub struct ServiceHandle {
    pub udn: Udn,
    service: Arc<LocalService>,
}

impl ServiceHandle {
    #[must_use]
    pub fn new(udn: Udn, service: Arc<LocalService>) -> Self {
        Self { udn, service }
    }

    #[must_use]
    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.service.descriptor
    }

    /// The live switch behind this service.
    #[must_use]
    pub fn switch_power(&self) -> Arc<SwitchPower> {
        self.service.manager().implementation()
    }
}
