//! Loopback implementation of [`Transport`].
//!
//! Tracks the enabled flag only; no sockets are opened. A failure can be armed
//! for the next enable or disable call.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use lumen_app::ports::Transport;
use lumen_domain::error::TransportError;

use crate::error::LocalError;

/// In-process stand-in for the network router.
pub struct LoopbackTransport {
    enabled: AtomicBool,
    fail_next: AtomicBool,
}

impl LoopbackTransport {
    /// A transport that starts enabled or disabled.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Make the next `enable` or `disable` fail without changing state.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn switch(&self, enable: bool) -> Result<(), LocalError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(LocalError::Injected);
        }
        let was = self.enabled.swap(enable, Ordering::SeqCst);
        if was == enable {
            tracing::debug!(enable, "transport already in requested state");
        } else {
            tracing::info!(enable, "transport switched");
        }
        Ok(())
    }
}

impl Default for LoopbackTransport {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Transport for LoopbackTransport {
    fn is_enabled(&self) -> impl Future<Output = bool> + Send {
        let enabled = self.enabled.load(Ordering::SeqCst);
        async move { enabled }
    }

    fn enable(&self) -> impl Future<Output = Result<(), TransportError>> + Send {
        let result = self.switch(true).map_err(LocalError::into_enable);
        async { result }
    }

    fn disable(&self) -> impl Future<Output = Result<(), TransportError>> + Send {
        let result = self.switch(false).map_err(LocalError::into_disable);
        async { result }
    }
}
