//! Device descriptor: static metadata advertised for one local device.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LumenError, ValidationError};

/// Namespace of the standard UPnP device and service types.
pub const UPNP_NAMESPACE: &str = "schemas-upnp-org";

/// Longest friendly name the device architecture recommends.
pub const MAX_FRIENDLY_NAME_LEN: usize = 64;

/// Check a `urn:` type segment (namespace or type name).
pub(crate) fn validate_type_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || name.contains(|c: char| c == ':' || c.is_whitespace()) {
        return Err(ValidationError::InvalidTypeName(name.to_string()));
    }
    Ok(())
}

/// Versioned device type, e.g. `urn:schemas-upnp-org:device:BinaryLight:1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceType {
    pub namespace: String,
    pub name: String,
    pub version: u32,
}

impl DeviceType {
    /// A device type in the standard UPnP namespace.
    #[must_use]
    pub fn standard(name: impl Into<String>, version: u32) -> Self {
        Self {
            namespace: UPNP_NAMESPACE.to_string(),
            name: name.into(),
            version,
        }
    }

    /// The `BinaryLight:1` device type.
    #[must_use]
    pub fn binary_light() -> Self {
        Self::standard("BinaryLight", 1)
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
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "urn:{}:device:{}:{}",
            self.namespace, self.name, self.version
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerDetails {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDetails {
    pub name: String,
    pub description: Option<String>,
    pub number: Option<String>,
}

/// Human-readable details shown by control points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDetails {
    pub friendly_name: String,
    pub manufacturer: ManufacturerDetails,
    pub model: ModelDetails,
}

impl DeviceDetails {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a required name is empty or the
    /// friendly name is longer than [`MAX_FRIENDLY_NAME_LEN`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let length = self.friendly_name.chars().count();
        if self.friendly_name.trim().is_empty() {
            return Err(ValidationError::EmptyFriendlyName);
        }
        if length > MAX_FRIENDLY_NAME_LEN {
            return Err(ValidationError::FriendlyNameTooLong {
                length,
                max: MAX_FRIENDLY_NAME_LEN,
            });
        }
        if self.manufacturer.name.trim().is_empty() {
            return Err(ValidationError::EmptyManufacturer);
        }
        if self.model.name.trim().is_empty() {
            return Err(ValidationError::EmptyModelName);
        }
        Ok(())
    }
}

/// Where the bytes of an icon come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSource {
    /// Bytes compiled into the host binary.
    Embedded(Vec<u8>),
    /// A file read when the device is registered.
    File(PathBuf),
}

impl fmt::Display for IconSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded(bytes) => write!(f, "<embedded {} bytes>", bytes.len()),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconDescriptor {
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub source: IconSource,
}

impl IconDescriptor {
    /// A 48x48, 8-bit PNG icon.
    #[must_use]
    pub fn png(source: IconSource) -> Self {
        Self {
            mime_type: "image/png".to_string(),
            width: 48,
            height: 48,
            depth: 8,
            source,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for non-image mime types or zero
    /// dimensions.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.mime_type.starts_with("image/") {
            return Err(ValidationError::InvalidIconMimeType(self.mime_type.clone()));
        }
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(ValidationError::InvalidIconDimensions);
        }
        Ok(())
    }
}

/// Everything advertised about a device except its identity and services.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub device_type: DeviceType,
    pub details: DeviceDetails,
    pub icon: IconDescriptor,
}

impl DeviceDescriptor {
    /// Create a builder for constructing a [`DeviceDescriptor`].
    #[must_use]
    pub fn builder() -> DeviceDescriptorBuilder {
        DeviceDescriptorBuilder::default()
    }

    /// Check domain invariants of every part.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] for the first broken invariant.
    pub fn validate(&self) -> Result<(), LumenError> {
        self.device_type.validate()?;
        self.details.validate()?;
        self.icon.validate()?;
        Ok(())
    }
}

/// Step-by-step builder for [`DeviceDescriptor`].
#[derive(Debug, Default)]
pub struct DeviceDescriptorBuilder {
    device_type: Option<DeviceType>,
    friendly_name: Option<String>,
    manufacturer: Option<String>,
    model_name: Option<String>,
    model_description: Option<String>,
    model_number: Option<String>,
    icon: Option<IconDescriptor>,
}

impl DeviceDescriptorBuilder {
    #[must_use]
    pub fn device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = Some(device_type);
        self
    }

    #[must_use]
    pub fn friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn manufacturer(mut self, name: impl Into<String>) -> Self {
        self.manufacturer = Some(name.into());
        self
    }

    #[must_use]
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn model_description(mut self, description: impl Into<String>) -> Self {
        self.model_description = Some(description.into());
        self
    }

    #[must_use]
    pub fn model_number(mut self, number: impl Into<String>) -> Self {
        self.model_number = Some(number.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: IconDescriptor) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Consume the builder, validate, and return a [`DeviceDescriptor`].
    ///
    /// The device type defaults to [`DeviceType::binary_light`] and the icon
    /// to an empty embedded PNG.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] if a required field is missing or
    /// malformed.
    pub fn build(self) -> Result<DeviceDescriptor, LumenError> {
        let descriptor = DeviceDescriptor {
            device_type: self.device_type.unwrap_or_else(DeviceType::binary_light),
            details: DeviceDetails {
                friendly_name: self.friendly_name.unwrap_or_default(),
                manufacturer: ManufacturerDetails {
                    name: self.manufacturer.unwrap_or_default(),
                },
                model: ModelDetails {
                    name: self.model_name.unwrap_or_default(),
                    description: self.model_description,
                    number: self.model_number,
                },
            },
            icon: self
                .icon
                .unwrap_or_else(|| IconDescriptor::png(IconSource::Embedded(Vec::new()))),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> DeviceDescriptorBuilder {
        DeviceDescriptor::builder()
            .friendly_name("Kitchen Light")
            .manufacturer("ACME")
            .model_name("LumenLight")
    }

    #[test]
    fn should_build_binary_light_by_default() {
        let descriptor = builder().build().unwrap();
        assert_eq!(
            descriptor.device_type.to_string(),
            "urn:schemas-upnp-org:device:BinaryLight:1"
        );
        assert_eq!(descriptor.icon.mime_type, "image/png");
    }

    #[test]
    fn should_return_validation_error_when_friendly_name_missing() {
        let result = DeviceDescriptor::builder()
            .manufacturer("ACME")
            .model_name("LumenLight")
            .build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::EmptyFriendlyName))
        ));
    }

    #[test]
    fn should_reject_friendly_name_longer_than_limit() {
        let result = builder().friendly_name("x".repeat(65)).build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(
                ValidationError::FriendlyNameTooLong { length: 65, .. }
            ))
        ));
    }

    #[test]
    fn should_reject_blank_manufacturer() {
        let result = builder().manufacturer("  ").build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::EmptyManufacturer))
        ));
    }

    #[test]
    fn should_reject_device_type_with_colon() {
        let result = builder()
            .device_type(DeviceType::standard("Binary:Light", 1))
            .build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::InvalidTypeName(_)))
        ));
    }

    #[test]
    fn should_reject_zero_version() {
        let result = builder()
            .device_type(DeviceType::standard("BinaryLight", 0))
            .build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::InvalidVersion))
        ));
    }

    #[test]
    fn should_reject_non_image_icon() {
        let mut icon = IconDescriptor::png(IconSource::Embedded(vec![1, 2, 3]));
        icon.mime_type = "text/plain".to_string();
        let result = builder().icon(icon).build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::InvalidIconMimeType(_)))
        ));
    }

    #[test]
    fn should_reject_icon_without_dimensions() {
        let mut icon = IconDescriptor::png(IconSource::File("icon.png".into()));
        icon.width = 0;
        let result = builder().icon(icon).build();
        assert!(matches!(
            result,
            Err(LumenError::Validation(ValidationError::InvalidIconDimensions))
        ));
    }

    #[test]
    fn should_keep_optional_model_fields() {
        let descriptor = builder()
            .model_description("A light with on/off switch.")
            .model_number("v1")
            .build()
            .unwrap();
        assert_eq!(
            descriptor.details.model.description.as_deref(),
            Some("A light with on/off switch.")
        );
        assert_eq!(descriptor.details.model.number.as_deref(), Some("v1"));
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let descriptor = builder().build().unwrap();
        let json = serde_json::to_string(&descriptor).unwrap();
        let parsed: DeviceDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, descriptor);
    }
}
