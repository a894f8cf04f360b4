//! Local adapter error types.

use lumen_domain::error::TransportError;

/// Errors raised by the local adapters.
#[derive(Debug, thiserror::Error)]
pub enum LocalError {
    /// A failure armed with [`LoopbackTransport::fail_next`](crate::LoopbackTransport::fail_next).
    #[error("injected transport failure")]
    Injected,
}

impl LocalError {
    /// Wrap as the failure of an `enable` call.
    pub fn into_enable(self) -> TransportError {
        TransportError::Enable(Box::new(self))
    }

    /// Wrap as the failure of a `disable` call.
    pub fn into_disable(self) -> TransportError {
        TransportError::Disable(Box::new(self))
    }
}
