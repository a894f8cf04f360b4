//! # lumen-adapter-local
//!
//! Local, in-process implementations of the `lumen-app` ports, suitable for a
//! standalone host and for end-to-end tests.
//!
//! ## Provided adapters
//!
//! | Port | Adapter | Behaviour |
//! |------|---------|-----------|
//! | `Registry` | [`InMemoryRegistry`] | `HashMap` keyed by UDN |
//! | `Transport` | [`LoopbackTransport`] | enable/disable flag, injectable failures |
//! | `RenderSurface` | [`ConsoleSurface`] | writes one line per frame |
//! | `AssetLoader` | [`FsAssetLoader`] | embedded bytes or `tokio::fs::read` |
//!
//! ## Dependency rule
//!
//! Depends on `lumen-app` (port traits) and `lumen-domain` only.

mod assets;
mod error;
mod registry;
mod surface;
mod transport;

pub use assets::FsAssetLoader;
pub use error::LocalError;
pub use registry::InMemoryRegistry;
pub use surface::ConsoleSurface;
pub use transport::LoopbackTransport;
