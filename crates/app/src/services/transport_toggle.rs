//! Transport toggle: switch network reachability on and off.

use lumen_domain::error::LumenError;
use lumen_domain::notification::TransportState;

use crate::ports::Transport;
use crate::switch_power::SwitchPower;

/// Flips the [`Transport`] and keeps the switch consistent with reachability.
///
/// There is no retry: a failed enable or disable ends the attempt and the
/// error goes back to the caller.
pub struct TransportToggle<T> {
    transport: T,
}

impl<T: Transport> TransportToggle<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Current reachability.
    pub async fn state(&self) -> TransportState {
        TransportState::from_enabled(self.transport.is_enabled().await)
    }

    /// Disable an enabled transport, or enable a disabled one.
    ///
    /// Disabling forces `switch` off *before* the transport goes down, whether
    /// or not `disable` then succeeds. Enabling turns `switch` on only after
    /// `enable` succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Transport`] when the transport refuses. The
    /// transport's actual state after a failed `disable` is not reconciled.
    #[tracing::instrument(skip_all)]
    pub async fn toggle(&self, switch: &SwitchPower) -> Result<TransportState, LumenError> {
        if self.transport.is_enabled().await {
            tracing::info!("disabling transport");
            switch.set_status(false);
            self.transport.disable().await.inspect_err(|err| {
                tracing::error!(error = %err, "error switching transport off");
            })?;
            Ok(TransportState::Disabled)
        } else {
            tracing::info!("enabling transport");
            self.transport.enable().await.inspect_err(|err| {
                tracing::error!(error = %err, "error switching transport on");
            })?;
            switch.set_status(true);
            Ok(TransportState::Enabled)
        }
    }
}
