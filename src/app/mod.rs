//! Application layer: binds the power controller to the automation host.
//!
//! The [`actions`] are command objects over the shared controller, the
//! [`registry`] maps action names onto them, and [`dispatch`] feeds queued
//! requests into the registry from the executor.  [`console`] turns the
//! serial console into action names for the queue.

pub mod actions;
pub mod console;
pub mod dispatch;
pub mod registry;
