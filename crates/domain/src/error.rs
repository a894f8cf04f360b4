//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`LumenError`]
//! via `#[from]`.

/// Top-level error for every lumen operation.
#[derive(Debug, thiserror::Error)]
pub enum LumenError {
    /// A descriptor broke a domain invariant. Registration is aborted.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// An asset referenced by a descriptor could not be loaded.
    #[error("resource load error")]
    ResourceLoad(#[from] ResourceLoadError),

    /// The transport refused to enable or disable.
    #[error("transport error")]
    Transport(#[from] TransportError),

    /// A device or service lookup came back empty.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The registry backend failed.
    #[error("registry error")]
    Registry(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A command was issued before the hosting environment connected.
    #[error("binding to the hosting environment is not available")]
    BindingUnavailable,
}

/// Descriptor invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("friendly name must not be empty")]
    EmptyFriendlyName,

    #[error("friendly name is {length} characters long, at most {max} allowed")]
    FriendlyNameTooLong { length: usize, max: usize },

    #[error("manufacturer must not be empty")]
    EmptyManufacturer,

    #[error("model name must not be empty")]
    EmptyModelName,

    #[error("invalid type name {0:?}")]
    InvalidTypeName(String),

    #[error("type version must be at least 1")]
    InvalidVersion,

    #[error("icon mime type {0:?} is not an image type")]
    InvalidIconMimeType(String),

    #[error("icon dimensions must be non-zero")]
    InvalidIconDimensions,
}

/// An asset (icon, …) could not be read.
#[derive(Debug, thiserror::Error)]
#[error("failed to load resource {resource}")]
pub struct ResourceLoadError {
    pub resource: String,
    #[source]
    pub source: std::io::Error,
}

/// Failure reported by the network transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to enable transport")]
    Enable(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to disable transport")]
    Disable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Lookup miss.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
