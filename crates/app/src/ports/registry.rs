//! Registry port: directory of currently advertised local devices.

use std::future::Future;
use std::sync::Arc;

use lumen_domain::error::LumenError;
use lumen_domain::id::Udn;

use crate::service_manager::RegisteredDevice;

/// Directory of local devices, keyed by [`Udn`].
///
/// The registry owns every [`RegisteredDevice`] once added; callers keep only
/// the identity and look the device up again when they need it.
pub trait Registry {
    /// Take ownership of `device` and start advertising it.
    ///
    /// Adding a device under an identity that is already present replaces the
    /// previous entry, so the registry never holds two devices per [`Udn`].
    fn add_device(
        &self,
        device: RegisteredDevice,
    ) -> impl Future<Output = Result<(), LumenError>> + Send;

    /// Find a local device by identity.
    ///
    /// With `root_only` set, embedded devices are not considered. Every device
    /// registered by this core is a root device.
    fn get_local_device(
        &self,
        udn: Udn,
        root_only: bool,
    ) -> impl Future<Output = Result<Option<Arc<RegisteredDevice>>, LumenError>> + Send;

    /// Stop advertising a device. Returns whether it was present.
    fn remove_device(&self, udn: Udn) -> impl Future<Output = Result<bool, LumenError>> + Send;
}

impl<T: Registry + Send + Sync> Registry for Arc<T> {
    fn add_device(
        &self,
        device: RegisteredDevice,
    ) -> impl Future<Output = Result<(), LumenError>> + Send {
        (**self).add_device(device)
    }

    fn get_local_device(
        &self,
        udn: Udn,
        root_only: bool,
    ) -> impl Future<Output = Result<Option<Arc<RegisteredDevice>>, LumenError>> + Send {
        (**self).get_local_device(udn, root_only)
    }

    fn remove_device(&self, udn: Udn) -> impl Future<Output = Result<bool, LumenError>> + Send {
        (**self).remove_device(udn)
    }
}
