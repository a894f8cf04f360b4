//! In-memory implementation of [`Registry`].

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use lumen_app::ports::Registry;
use lumen_app::service_manager::RegisteredDevice;
use lumen_domain::error::LumenError;
use lumen_domain::id::Udn;

/// Process-local device directory.
#[derive(Default)]
pub struct InMemoryRegistry {
    devices: Mutex<HashMap<Udn, Arc<RegisteredDevice>>>,
}

impl InMemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Udn, Arc<RegisteredDevice>>> {
        self.devices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Registry for InMemoryRegistry {
    fn add_device(
        &self,
        device: RegisteredDevice,
    ) -> impl Future<Output = Result<(), LumenError>> + Send {
        let udn = device.identity;
        if self.lock().insert(udn, Arc::new(device)).is_some() {
            tracing::warn!(%udn, "replaced already registered device");
        } else {
            tracing::debug!(%udn, "device added");
        }
        async { Ok(()) }
    }

    fn get_local_device(
        &self,
        udn: Udn,
        _root_only: bool,
    ) -> impl Future<Output = Result<Option<Arc<RegisteredDevice>>, LumenError>> + Send {
        let result = self.lock().get(&udn).cloned();
        async { Ok(result) }
    }

    fn remove_device(&self, udn: Udn) -> impl Future<Output = Result<bool, LumenError>> + Send {
        let removed = self.lock().remove(&udn).is_some();
        async move { Ok(removed) }
    }
}
