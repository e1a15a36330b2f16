//! GPIO pin assignments for the ATB-THERMO main board.
//!
//! Single source of truth for the board preset and for the chip-level pin
//! constraints applied during configuration validation.

// ---------------------------------------------------------------------------
// PIR reset gating
// ---------------------------------------------------------------------------

/// Digital output: HIGH = PIR disconnected from the reset line.
pub const PIR_DIS_GPIO: u8 = 15;

// ---------------------------------------------------------------------------
// Peripheral bus power (P-MOSFET high-side switch)
// ---------------------------------------------------------------------------

/// Digital output, active low: LOW = MOSFET conducts, peripherals powered.
pub const PERIPH_VCC_GPIO: u8 = 0;

// ---------------------------------------------------------------------------
// Chip constraints
// ---------------------------------------------------------------------------

/// Highest GPIO number that exists on the chip.
pub const MAX_GPIO: u8 = 48;

/// Gap in the ESP32-S3 GPIO matrix; these pads do not exist.
pub const MISSING_GPIOS: core::ops::RangeInclusive<u8> = 22..=25;

/// GPIOs wired to the SPI flash and quad PSRAM; never usable as outputs.
///
/// Octal-PSRAM modules also claim GPIO33-37; the ATB-THERMO module is quad.
pub const FLASH_GPIOS: core::ops::RangeInclusive<u8> = 26..=32;

/// Whether `gpio` may be bound as a general-purpose output.
pub fn is_output_capable(gpio: u8) -> bool {
    gpio <= MAX_GPIO && !MISSING_GPIOS.contains(&gpio) && !FLASH_GPIOS.contains(&gpio)
}
