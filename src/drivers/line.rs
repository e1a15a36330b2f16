//! Digital output line.
//!
//! Wraps any `embedded-hal` [`OutputPin`] together with the GPIO identity
//! and inversion flag from its [`PinSpec`], and remembers the last logical
//! level it was asked to drive.
//!
//! Writes are treated as infallible: a HAL error is logged and the requested
//! level is still recorded, so the line always reports the most recent
//! request.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::config::PinSpec;

pub struct OutputLine<P> {
    pin: P,
    spec: PinSpec,
    level: PinState,
}

impl<P: OutputPin> OutputLine<P> {
    /// Take ownership of a pin already configured for output.
    ///
    /// The pin is not written; the reported level is LOW until the first
    /// [`drive`](Self::drive).
    pub fn new(pin: P, spec: PinSpec) -> Self {
        Self {
            pin,
            spec,
            level: PinState::Low,
        }
    }

    /// Drive the logical `level`, applying inversion at the pin.
    pub fn drive(&mut self, level: PinState) {
        let physical = if self.spec.inverted { !level } else { level };
        if let Err(e) = self.pin.set_state(physical) {
            warn!("GPIO{}: write {:?} failed: {:?}", self.spec.number, physical, e);
        }
        self.level = level;
    }

    /// Last logical level driven.
    pub fn level(&self) -> PinState {
        self.level
    }

    pub fn is_high(&self) -> bool {
        self.level == PinState::High
    }

    pub fn spec(&self) -> PinSpec {
        self.spec
    }

    pub fn gpio(&self) -> u8 {
        self.spec.number
    }
}
