//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `lumen.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;

use lumen_domain::device::{DeviceDescriptor, IconDescriptor, IconSource};
use lumen_domain::error::LumenError;
use serde::Deserialize;

/// Icon used when no `icon_path` is configured.
const EMBEDDED_ICON: &[u8] = include_bytes!("../assets/icon.png");

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Advertised device metadata.
    pub device: DeviceConfig,
    /// Transport settings.
    pub transport: TransportConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Metadata of the hosted light.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub friendly_name: String,
    pub manufacturer: String,
    pub model_name: String,
    pub model_description: Option<String>,
    pub model_number: Option<String>,
    /// PNG file to advertise instead of the embedded icon.
    pub icon_path: Option<PathBuf>,
}

/// Loopback transport configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Whether the transport starts enabled.
    pub enabled: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
    /// Filter installed by the verbosity toggle.
    pub verbose_filter: String,
}

impl Config {
    /// Load configuration from `lumen.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("lumen.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("LUMEN_FRIENDLY_NAME") {
            self.device.friendly_name = val;
        }
        if let Some(val) = var("LUMEN_ICON_PATH") {
            self.device.icon_path = Some(PathBuf::from(val));
        }
        if let Some(val) = var("LUMEN_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.device.friendly_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "device.friendly_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl DeviceConfig {
    /// Build the advertised descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] if the metadata is malformed.
    pub fn descriptor(&self) -> Result<DeviceDescriptor, LumenError> {
        let source = match &self.icon_path {
            Some(path) => IconSource::File(path.clone()),
            None => IconSource::Embedded(EMBEDDED_ICON.to_vec()),
        };
        let mut builder = DeviceDescriptor::builder()
            .friendly_name(&self.friendly_name)
            .manufacturer(&self.manufacturer)
            .model_name(&self.model_name)
            .icon(IconDescriptor::png(source));
        if let Some(description) = &self.model_description {
            builder = builder.model_description(description);
        }
        if let Some(number) = &self.model_number {
            builder = builder.model_number(number);
        }
        builder.build()
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            friendly_name: "Friendly Binary Light".to_string(),
            manufacturer: "ACME".to_string(),
            model_name: "LumenLight".to_string(),
            model_description: Some("A light with on/off switch.".to_string()),
            model_number: Some("v1".to_string()),
            icon_path: None,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "lumend=info,lumen_app=info,lumen_adapter_local=info".to_string(),
            verbose_filter: "lumend=trace,lumen_app=trace,lumen_adapter_local=trace".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
