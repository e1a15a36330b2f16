//! Peripheral power sequencing.
//!
//! [`PowerController`] owns the two board lines:
//!
//! | Line         | Boot level | Meaning                                   |
//! |--------------|------------|-------------------------------------------|
//! | `pir_dis`    | HIGH       | PIR disconnected from the reset line      |
//! | `periph_vcc` | LOW        | P-MOSFET conducts, peripheral bus powered |
//!
//! ```text
//!   ON ──power_off()──▶ OFF
//!  OFF ──power_on()───▶ ON
//!   ON ──power_cycle(d)──▶ [OFF for d ms] ──▶ ON
//! ```
//!
//! `pir_dis` is written once during [`PowerController::setup`] and never
//! again.  The power-cycle hold is an `.await` on the injected
//! [`DelayNs`] provider, so the executor keeps running other tasks while
//! the bus is off.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal_async::delay::DelayNs;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::drivers::line::OutputLine;

/// Hold time used when a power-cycle does not specify one.
pub const DEFAULT_CYCLE_DELAY_MS: u32 = 500;

/// Peripheral bus power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriphPower {
    On,
    Off,
}

impl PeriphPower {
    /// Level on the active-low `periph_vcc` line for this state.
    pub const fn line_level(self) -> PinState {
        match self {
            Self::On => PinState::Low,
            Self::Off => PinState::High,
        }
    }
}

/// Parameters of a single power-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerCycleRequest {
    /// How long the bus stays de-energised, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u32,
}

const fn default_delay_ms() -> u32 {
    DEFAULT_CYCLE_DELAY_MS
}

impl PowerCycleRequest {
    pub const fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

impl Default for PowerCycleRequest {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLE_DELAY_MS)
    }
}

// ───────────────────────────────────────────────────────────────
// PowerController
// ───────────────────────────────────────────────────────────────

pub struct PowerController<P, V, D> {
    pir_dis: OutputLine<P>,
    periph_vcc: OutputLine<V>,
    delay: D,
}

impl<P: OutputPin, V: OutputPin, D> PowerController<P, V, D> {
    /// Take ownership of both lines and drive the boot levels immediately.
    ///
    /// PIR_DIS goes HIGH first so a PIR trigger cannot reset the chip while
    /// the peripheral rail comes up.
    pub fn setup(mut pir_dis: OutputLine<P>, mut periph_vcc: OutputLine<V>, delay: D) -> Self {
        info!("Setting up ATHERMO power controller...");

        pir_dis.drive(PinState::High);
        debug!("PIR_DIS (GPIO{}) set to HIGH - PIR disconnected from reset", pir_dis.gpio());

        periph_vcc.drive(PeriphPower::On.line_level());
        debug!("PERIPH_VCC (GPIO{}) set to LOW - peripherals powered ON", periph_vcc.gpio());

        Self {
            pir_dis,
            periph_vcc,
            delay,
        }
    }

    /// Energise the peripheral bus (PERIPH_VCC LOW).
    pub fn power_on(&mut self) {
        self.periph_vcc.drive(PeriphPower::On.line_level());
        debug!("Peripherals power ON (PERIPH_VCC = LOW)");
    }

    /// De-energise the peripheral bus (PERIPH_VCC HIGH).
    pub fn power_off(&mut self) {
        self.periph_vcc.drive(PeriphPower::Off.line_level());
        debug!("Peripherals power OFF (PERIPH_VCC = HIGH)");
    }

    pub fn state(&self) -> PeriphPower {
        if self.periph_vcc.is_high() {
            PeriphPower::Off
        } else {
            PeriphPower::On
        }
    }

    pub fn is_powered(&self) -> bool {
        self.state() == PeriphPower::On
    }

    pub fn pir_dis_level(&self) -> PinState {
        self.pir_dis.level()
    }

    pub fn periph_vcc_level(&self) -> PinState {
        self.periph_vcc.level()
    }

    /// Log the pin assignment and boot contract.
    pub fn dump_config(&self) {
        info!("ATHERMO Component:");
        info!("  PIR_DIS Pin: {}", self.pir_dis.spec());
        info!("  PERIPH_VCC Pin: {}", self.periph_vcc.spec());
        info!("  Boot State: PIR_DIS=HIGH, PERIPH_VCC=LOW (power ON)");
    }
}

impl<P: OutputPin, V: OutputPin, D: DelayNs> PowerController<P, V, D> {
    /// OFF, hold for `request.delay_ms`, ON.
    ///
    /// A zero delay skips the timer entirely: the bus is switched off and
    /// straight back on without yielding.
    pub async fn power_cycle(&mut self, request: PowerCycleRequest) {
        debug!("Power cycling peripherals (delay: {} ms)", request.delay_ms);

        self.power_off();
        if request.delay_ms > 0 {
            self.delay.delay_ms(request.delay_ms).await;
        }
        self.power_on();

        debug!("Power cycle complete");
    }
}
