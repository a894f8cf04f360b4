//! Change notification: an ephemeral record of one property transition.

use serde::{Deserialize, Serialize};

use crate::time::{Timestamp, now};

/// Name of the switch's power flag property.
pub const STATUS_PROPERTY: &str = "status";

/// `(property, old, new)` delivered to subscribers when state mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub property: String,
    pub old_value: bool,
    pub new_value: bool,
    pub at: Timestamp,
}

impl ChangeNotification {
    /// A notification stamped with the current time.
    #[must_use]
    pub fn new(property: impl Into<String>, old_value: bool, new_value: bool) -> Self {
        Self {
            property: property.into(),
            old_value,
            new_value,
            at: now(),
        }
    }

    /// A transition of the [`STATUS_PROPERTY`].
    #[must_use]
    pub fn status(old_value: bool, new_value: bool) -> Self {
        Self::new(STATUS_PROPERTY, old_value, new_value)
    }

    #[must_use]
    pub fn is_status(&self) -> bool {
        self.property == STATUS_PROPERTY
    }
}

/// Reachability of the network transport after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    Enabled,
    Disabled,
}

impl TransportState {
    #[must_use]
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl std::fmt::Display for TransportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enabled => f.write_str("enabled"),
            Self::Disabled => f.write_str("disabled"),
        }
    }
}
