//! # lumen-domain
//!
//! Pure domain model for a locally hosted, discoverable binary light.
//!
//! ## Responsibilities
//! - Foundational types: device identity ([`id::Udn`]), error conventions, timestamps
//! - Define **device descriptors** (type, friendly name, manufacturer/model, icon)
//! - Define **service descriptors** (`SwitchPower:1`)
//! - Define **change notifications** and transport reachability
//! - Contain all descriptor invariant enforcement
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod notification;
pub mod service;
