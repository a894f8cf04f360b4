//! Transport port: network advertisement and listening.

use std::future::Future;
use std::sync::Arc;

use lumen_domain::error::TransportError;

/// Subsystem that makes registered devices reachable on the network.
///
/// Enabling and disabling are global: they affect every advertised device.
pub trait Transport {
    /// Whether the transport is currently listening and announcing.
    fn is_enabled(&self) -> impl Future<Output = bool> + Send;

    /// Start listening and announcing.
    fn enable(&self) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Send byebye announcements and stop listening.
    fn disable(&self) -> impl Future<Output = Result<(), TransportError>> + Send;
}

impl<T: Transport + Send + Sync> Transport for Arc<T> {
    fn is_enabled(&self) -> impl Future<Output = bool> + Send {
        (**self).is_enabled()
    }

    fn enable(&self) -> impl Future<Output = Result<(), TransportError>> + Send {
        (**self).enable()
    }

    fn disable(&self) -> impl Future<Output = Result<(), TransportError>> + Send {
        (**self).disable()
    }
}
