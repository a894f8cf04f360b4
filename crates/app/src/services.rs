//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod change_bridge;
pub mod light_host;
pub mod registration;
pub mod transport_toggle;
