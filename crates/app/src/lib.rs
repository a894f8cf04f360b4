//! # lumen-app
//!
//! Application layer: the device lifecycle core and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** for the external collaborators:
//!   - `Registry`: directory of advertised local devices
//!   - `Transport`: network advertisement/listening, enable/disable
//!   - `RenderSurface`: the visual light, driven from one task only
//!   - `AssetLoader`: icon bytes for registration
//! - Own the switch state (`SwitchPower`) and its service manager
//! - Define the use-cases:
//!   - `DeviceRegistrar`: idempotent registration keyed by UDN
//!   - `ChangeBridge`: status changes → render task
//!   - `TransportToggle`: transport on/off, switch kept consistent
//!   - `LightHost`: connect/disconnect lifecycle and commands
//! - Provide **in-process infrastructure** (render task, eventing bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `lumen-domain` only (plus `tokio` for channels and the render task).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod render;
pub mod service_manager;
pub mod services;
pub mod switch_power;
