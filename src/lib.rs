//! ATHERMO firmware library.
//!
//! Peripheral power sequencing for the ATB-THERMO weather station: the
//! PIR reset-gating line, the active-low peripheral VCC switch, and the
//! actions that drive them.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module, so the whole crate
//! builds and tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod power;

pub use error::{ConfigError, Error, Result};
