//! Unified error types for the ATHERMO firmware.
//!
//! Configuration parsing, validation and pin binding all fail before the
//! power controller exists.  Once the lines are bound, power operations are
//! infallible; only the dispatch layer can still reject a request (unknown
//! name, full queue).  All variants are `Copy` so
//! they can be logged and returned without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
    /// A configured GPIO could not be bound as an output.
    PinBinding(u8),
    /// No action is registered under the requested name.
    UnknownAction,
    /// The action registry has no free slot.
    RegistryFull,
    /// The action queue is full; the request was dropped.
    QueueFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::PinBinding(gpio) => write!(f, "pin binding failed for GPIO{gpio}"),
            Self::UnknownAction => write!(f, "unknown action"),
            Self::RegistryFull => write!(f, "action registry full"),
            Self::QueueFull => write!(f, "action queue full"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the schema.
    Malformed,
    /// A pin expression could not be parsed (e.g. `"GPIOX"`).
    InvalidPinName,
    /// GPIO number beyond the chip's range.
    PinOutOfRange(u32),
    /// GPIO is missing on the chip or wired to the SPI flash / PSRAM.
    ReservedPin(u8),
    /// Both lines were assigned the same GPIO.
    DuplicatePin(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed document"),
            Self::InvalidPinName => write!(f, "invalid pin name"),
            Self::PinOutOfRange(gpio) => write!(f, "GPIO{gpio} out of range"),
            Self::ReservedPin(gpio) => write!(f, "GPIO{gpio} is not usable as an output"),
            Self::DuplicatePin(gpio) => write!(f, "GPIO{gpio} assigned to both lines"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
