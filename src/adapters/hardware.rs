//! Hardware adapter: binds configured pins to output lines.
//!
//! This is the only module that touches GPIO registers.
//!
//! - **`target_os = "espidf"`**: an `esp-idf-hal` [`PinDriver`] in output
//!   mode.
//! - **`not(target_os = "espidf")`**: [`SimPin`], which keeps its level in
//!   memory for host-side testing and simulation.

use log::{debug, error};

use crate::config::PinSpec;
use crate::drivers::line::OutputLine;
use crate::error::{Error, Result};
use crate::pins;

#[cfg(target_os = "espidf")]
use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

#[cfg(not(target_os = "espidf"))]
use embedded_hal::digital::{ErrorType, OutputPin, PinState};

/// Concrete pin type behind every hardware line.
#[cfg(target_os = "espidf")]
pub type HwPin = PinDriver<'static, AnyOutputPin, Output>;

/// Concrete pin type behind every hardware line.
#[cfg(not(target_os = "espidf"))]
pub type HwPin = SimPin;

pub type HwLine = OutputLine<HwPin>;

/// Configure `spec.number` as a push-pull output and wrap it in a line.
#[cfg(target_os = "espidf")]
pub fn bind_output(spec: PinSpec) -> Result<HwLine> {
    if !pins::is_output_capable(spec.number) {
        error!("GPIO{} cannot be used as an output", spec.number);
        return Err(Error::PinBinding(spec.number));
    }
    // SAFETY: config validation guarantees the two lines use distinct,
    // output-capable GPIOs, and each is bound exactly once at boot.
    let pin = unsafe { AnyOutputPin::new(i32::from(spec.number)) };
    let driver = PinDriver::output(pin).map_err(|e| {
        error!("GPIO{}: output config failed: {}", spec.number, e);
        Error::PinBinding(spec.number)
    })?;
    debug!("hw: {} bound as output", spec);
    Ok(OutputLine::new(driver, spec))
}

/// Simulation fallback. Validates the pin and returns an in-memory line.
#[cfg(not(target_os = "espidf"))]
pub fn bind_output(spec: PinSpec) -> Result<HwLine> {
    if !pins::is_output_capable(spec.number) {
        error!("GPIO{} cannot be used as an output", spec.number);
        return Err(Error::PinBinding(spec.number));
    }
    debug!("hw(sim): {} bound as output", spec);
    Ok(OutputLine::new(SimPin::new(spec.number), spec))
}

// ── Simulated pin ─────────────────────────────────────────────

/// In-memory output pin used off-target.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug)]
pub struct SimPin {
    gpio: u8,
    level: PinState,
}

#[cfg(not(target_os = "espidf"))]
impl SimPin {
    pub fn new(gpio: u8) -> Self {
        Self {
            gpio,
            level: PinState::Low,
        }
    }

    /// Physical level currently on the pin.
    pub fn level(&self) -> PinState {
        self.level
    }
}

#[cfg(not(target_os = "espidf"))]
impl ErrorType for SimPin {
    type Error = core::convert::Infallible;
}

#[cfg(not(target_os = "espidf"))]
impl OutputPin for SimPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        log::trace!("sim GPIO{} <- LOW", self.gpio);
        self.level = PinState::Low;
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        log::trace!("sim GPIO{} <- HIGH", self.gpio);
        self.level = PinState::High;
        Ok(())
    }
}
