//! Action adapters: the command objects the automation host invokes.
//!
//! Each adapter borrows the single [`SharedController`] and forwards one
//! [`Action::play`] to exactly one controller operation.  The controller
//! sits behind an async mutex: a power-cycle keeps the lock across its
//! hold time, so any action that arrives meanwhile waits for the cycle to
//! finish before it touches the lines.

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::power::{PowerController, PowerCycleRequest};

/// The controller as shared between adapters on one executor.
pub type SharedController<P, V, D> = Mutex<NoopRawMutex, PowerController<P, V, D>>;

/// A host-invocable action.
#[allow(async_fn_in_trait)]
pub trait Action {
    /// Run the action to completion.  Effects are observable on the lines
    /// only; nothing is returned.
    async fn play(&self);
}

// ───────────────────────────────────────────────────────────────
// periph_vcc_on
// ───────────────────────────────────────────────────────────────

pub struct PeriphVccOnAction<'a, P, V, D> {
    parent: &'a SharedController<P, V, D>,
}

impl<'a, P, V, D> PeriphVccOnAction<'a, P, V, D> {
    pub fn new(parent: &'a SharedController<P, V, D>) -> Self {
        Self { parent }
    }
}

impl<P: OutputPin, V: OutputPin, D> Action for PeriphVccOnAction<'_, P, V, D> {
    async fn play(&self) {
        self.parent.lock().await.power_on();
    }
}

// ───────────────────────────────────────────────────────────────
// periph_vcc_off
// ───────────────────────────────────────────────────────────────

pub struct PeriphVccOffAction<'a, P, V, D> {
    parent: &'a SharedController<P, V, D>,
}

impl<'a, P, V, D> PeriphVccOffAction<'a, P, V, D> {
    pub fn new(parent: &'a SharedController<P, V, D>) -> Self {
        Self { parent }
    }
}

impl<P: OutputPin, V: OutputPin, D> Action for PeriphVccOffAction<'_, P, V, D> {
    async fn play(&self) {
        self.parent.lock().await.power_off();
    }
}

// ───────────────────────────────────────────────────────────────
// power_cycle
// ───────────────────────────────────────────────────────────────

/// Power-cycle with a hold time fixed when the action is built.
pub struct PowerCycleAction<'a, P, V, D> {
    parent: &'a SharedController<P, V, D>,
    delay_ms: u32,
}

impl<'a, P, V, D> PowerCycleAction<'a, P, V, D> {
    /// Action with the default 500 ms hold.
    pub fn new(parent: &'a SharedController<P, V, D>) -> Self {
        Self::with_delay(parent, PowerCycleRequest::default().delay_ms)
    }

    pub fn with_delay(parent: &'a SharedController<P, V, D>, delay_ms: u32) -> Self {
        Self { parent, delay_ms }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

impl<P: OutputPin, V: OutputPin, D: DelayNs> Action for PowerCycleAction<'_, P, V, D> {
    async fn play(&self) {
        let request = PowerCycleRequest::new(self.delay_ms);
        let mut controller = self.parent.lock().await;
        controller.power_cycle(request).await;
    }
}
