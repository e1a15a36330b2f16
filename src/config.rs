//! Component configuration.
//!
//! Mirrors the declarative board description: which GPIO drives each line
//! and the delay bound into the `power_cycle` action.  The ESP-IDF binary
//! embeds `athermo.json`; tests build documents inline.
//!
//! ```json
//! {
//!   "pir_dis_pin": "GPIO15",
//!   "periph_vcc_pin": { "number": "GPIO0", "inverted": false },
//!   "power_cycle": { "delay_ms": 200 }
//! }
//! ```

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::pins;
use crate::power::PowerCycleRequest;

/// Complete component configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AthermoConfig {
    /// Line that gates the PIR sensor's access to the reset line.
    pub pir_dis_pin: PinSpec,
    /// Line that gates VCC to the peripheral bus (active low).
    pub periph_vcc_pin: PinSpec,
    /// Parameters bound into the `power_cycle` action.
    #[serde(default)]
    pub power_cycle: PowerCycleRequest,
}

impl AthermoConfig {
    /// ATB-THERMO board preset: PIR_DIS on GPIO15, PERIPH_VCC on GPIO0.
    pub fn atb_thermo() -> Self {
        Self {
            pir_dis_pin: PinSpec::new(pins::PIR_DIS_GPIO),
            periph_vcc_pin: PinSpec::new(pins::PERIPH_VCC_GPIO),
            power_cycle: PowerCycleRequest::default(),
        }
    }

    /// Parse, resolve and validate a JSON configuration document.
    pub fn from_json(doc: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(doc).map_err(|e| {
            warn!("config: parse failed: {}", e);
            ConfigError::Malformed
        })?;
        let config = raw.resolve().inspect_err(|e| warn!("config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check both pins against the chip's constraints.
    pub fn validate(&self) -> Result<()> {
        for pin in [self.pir_dis_pin, self.periph_vcc_pin] {
            if pin.number > pins::MAX_GPIO {
                return Err(ConfigError::PinOutOfRange(pin.number.into()).into());
            }
            if !pins::is_output_capable(pin.number) {
                return Err(ConfigError::ReservedPin(pin.number).into());
            }
        }
        if self.pir_dis_pin.number == self.periph_vcc_pin.number {
            return Err(ConfigError::DuplicatePin(self.pir_dis_pin.number).into());
        }
        Ok(())
    }
}

/// The document as written, before pin expressions are resolved.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    pir_dis_pin: RawPinSpec,
    periph_vcc_pin: RawPinSpec,
    #[serde(default)]
    power_cycle: PowerCycleRequest,
}

impl RawConfig {
    fn resolve(self) -> core::result::Result<AthermoConfig, ConfigError> {
        Ok(AthermoConfig {
            pir_dis_pin: self.pir_dis_pin.resolve()?,
            periph_vcc_pin: self.periph_vcc_pin.resolve()?,
            power_cycle: self.power_cycle,
        })
    }
}

// ───────────────────────────────────────────────────────────────
// Pin expressions
// ───────────────────────────────────────────────────────────────

/// An output pin: GPIO number plus optional logic inversion.
///
/// Accepted forms: `15`, `"GPIO15"`, `"15"`, or
/// `{ "number": "GPIO15", "inverted": true }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "RawPinSpec")]
pub struct PinSpec {
    pub number: u8,
    /// When set, a logical HIGH is driven as a physical LOW.
    pub inverted: bool,
}

impl PinSpec {
    pub const fn new(number: u8) -> Self {
        Self {
            number,
            inverted: false,
        }
    }

    pub const fn inverted(number: u8) -> Self {
        Self {
            number,
            inverted: true,
        }
    }
}

impl core::fmt::Display for PinSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.inverted {
            write!(f, "GPIO{} (inverted)", self.number)
        } else {
            write!(f, "GPIO{}", self.number)
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawPinSpec {
    Bare(RawPinNumber),
    Full {
        number: RawPinNumber,
        #[serde(default)]
        inverted: bool,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawPinNumber {
    Number(u32),
    Name(String),
}

impl RawPinNumber {
    fn resolve(&self) -> core::result::Result<u8, ConfigError> {
        let number = match self {
            Self::Number(n) => *n,
            Self::Name(name) => parse_pin_name(name)?,
        };
        u8::try_from(number).map_err(|_| ConfigError::PinOutOfRange(number))
    }
}

fn parse_pin_name(name: &str) -> core::result::Result<u32, ConfigError> {
    let name = name.trim();
    let digits = match name.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("GPIO") => &name[4..],
        _ => name,
    };
    digits.parse().map_err(|_| ConfigError::InvalidPinName)
}

impl RawPinSpec {
    fn resolve(&self) -> core::result::Result<PinSpec, ConfigError> {
        match self {
            Self::Bare(number) => Ok(PinSpec::new(number.resolve()?)),
            Self::Full { number, inverted } => Ok(PinSpec {
                number: number.resolve()?,
                inverted: *inverted,
            }),
        }
    }
}

impl From<PinSpec> for RawPinSpec {
    fn from(spec: PinSpec) -> Self {
        Self::Full {
            number: RawPinNumber::Name(format!("GPIO{}", spec.number)),
            inverted: spec.inverted,
        }
    }
}
