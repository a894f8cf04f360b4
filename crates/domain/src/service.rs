//! Service descriptor: the type tag of the one capability a device exposes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::{UPNP_NAMESPACE, validate_type_name};
use crate::error::ValidationError;

/// Versioned service type, e.g. `urn:schemas-upnp-org:service:SwitchPower:1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceType {
    pub namespace: String,
    pub name: String,
    pub version: u32,
}

impl ServiceType {
    /// A service type in the standard UPnP namespace.
    #[must_use]
    pub fn standard(name: impl Into<String>, version: u32) -> Self {
        Self {
            namespace: UPNP_NAMESPACE.to_string(),
            name: name.into(),
            version,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTypeName`] or
    /// [`ValidationError::InvalidVersion`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_type_name(&self.namespace)?;
        validate_type_name(&self.name)?;
        if self.version == 0 {
            return Err(ValidationError::InvalidVersion);
        }
        Ok(())
    }

    /// Whether a service of type `self` can stand in for `other`.
    ///
    /// Same namespace and name, and a version at least as recent.
    #[must_use]
    pub fn implements(&self, other: &ServiceType) -> bool {
        self.namespace == other.namespace && self.name == other.name && self.version >= other.version
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "urn:{}:service:{}:{}",
            self.namespace, self.name, self.version
        )
    }
}

/// Immutable description of one exposed service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub service_type: ServiceType,
    /// Short id unique within the device (`SwitchPower`).
    pub service_id: String,
}

impl ServiceDescriptor {
    /// The `SwitchPower:1` service.
    #[must_use]
    pub fn switch_power() -> Self {
        Self {
            service_type: ServiceType::standard("SwitchPower", 1),
            service_id: "SwitchPower".to_string(),
        }
    }

    /// Full service id URN, e.g. `urn:upnp-org:serviceId:SwitchPower`.
    #[must_use]
    pub fn service_id_urn(&self) -> String {
        format!("urn:upnp-org:serviceId:{}", self.service_id)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the type or id is malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.service_type.validate()?;
        validate_type_name(&self.service_id)
    }
}
