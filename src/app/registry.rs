//! Name → action table, built once at startup.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use heapless::FnvIndexMap;
use log::{debug, warn};

use super::actions::{
    Action, PeriphVccOffAction, PeriphVccOnAction, PowerCycleAction, SharedController,
};
use crate::error::{Error, Result};
use crate::power::PowerCycleRequest;

pub const PERIPH_VCC_ON: &str = "periph_vcc_on";
pub const PERIPH_VCC_OFF: &str = "periph_vcc_off";
pub const POWER_CYCLE: &str = "power_cycle";

/// Component namespace accepted in front of any action name.
pub const NAMESPACE_PREFIX: &str = "athermo.";

/// Registry capacity (power of two for the index map).
const MAX_ACTIONS: usize = 4;

/// Any of the three adapters, so they can share one table.
pub enum BoundAction<'a, P, V, D> {
    PeriphVccOn(PeriphVccOnAction<'a, P, V, D>),
    PeriphVccOff(PeriphVccOffAction<'a, P, V, D>),
    PowerCycle(PowerCycleAction<'a, P, V, D>),
}

impl<P: OutputPin, V: OutputPin, D: DelayNs> Action for BoundAction<'_, P, V, D> {
    async fn play(&self) {
        match self {
            Self::PeriphVccOn(a) => a.play().await,
            Self::PeriphVccOff(a) => a.play().await,
            Self::PowerCycle(a) => a.play().await,
        }
    }
}

pub struct ActionRegistry<'a, P, V, D> {
    actions: FnvIndexMap<&'static str, BoundAction<'a, P, V, D>, MAX_ACTIONS>,
}

impl<'a, P, V, D> ActionRegistry<'a, P, V, D> {
    pub fn new() -> Self {
        Self {
            actions: FnvIndexMap::new(),
        }
    }

    /// Registry holding the three power actions, the cycle bound to
    /// `cycle.delay_ms`.
    pub fn with_power_actions(
        parent: &'a SharedController<P, V, D>,
        cycle: PowerCycleRequest,
    ) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(
            PERIPH_VCC_ON,
            BoundAction::PeriphVccOn(PeriphVccOnAction::new(parent)),
        )?;
        registry.register(
            PERIPH_VCC_OFF,
            BoundAction::PeriphVccOff(PeriphVccOffAction::new(parent)),
        )?;
        registry.register(
            POWER_CYCLE,
            BoundAction::PowerCycle(PowerCycleAction::with_delay(parent, cycle.delay_ms)),
        )?;
        Ok(registry)
    }

    /// Bind `action` under `name`, replacing any previous binding.
    pub fn register(&mut self, name: &'static str, action: BoundAction<'a, P, V, D>) -> Result<()> {
        match self.actions.insert(name, action) {
            Ok(Some(_)) => {
                warn!("registry: '{}' re-bound", name);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(_) => Err(Error::RegistryFull),
        }
    }

    /// Look up an action; the `athermo.` prefix is optional.
    pub fn get(&self, name: &str) -> Option<&BoundAction<'a, P, V, D>> {
        let name = name.strip_prefix(NAMESPACE_PREFIX).unwrap_or(name);
        self.actions.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.actions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<P: OutputPin, V: OutputPin, D: DelayNs> ActionRegistry<'_, P, V, D> {
    /// Run the action registered under `name`.
    pub async fn invoke(&self, name: &str) -> Result<()> {
        let Some(action) = self.get(name) else {
            return Err(Error::UnknownAction);
        };
        debug!("action: {}", name);
        action.play().await;
        Ok(())
    }
}

impl<P, V, D> Default for ActionRegistry<'_, P, V, D> {
    fn default() -> Self {
        Self::new()
    }
}
