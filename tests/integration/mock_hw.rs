//! Mock hardware for integration tests.
//!
//! A [`Bench`] owns a simulated millisecond clock and a shared transition
//! log.  Pins handed out by the bench record every physical write with the
//! clock value at that moment; delays advance the clock instead of sleeping,
//! so hold times can be asserted exactly.

use athermo::config::PinSpec;
use athermo::drivers::line::OutputLine;
use athermo::power::PowerController;
use core::convert::Infallible;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal::digital::{ErrorType, OutputPin, PinState};
use embedded_hal_async::delay::DelayNs;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ── Transition record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub gpio: u8,
    pub level: PinState,
    pub at_ms: u64,
}

// ── Bench ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct Bench {
    pub clock: Rc<Cell<u64>>,
    pub log: Rc<RefCell<Vec<Transition>>>,
    pub delays: Rc<RefCell<Vec<u32>>>,
}

#[allow(dead_code)]
impl Bench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin(&self, gpio: u8) -> RecordingPin {
        RecordingPin {
            gpio,
            bench: self.clone(),
        }
    }

    pub fn line(&self, spec: PinSpec) -> OutputLine<RecordingPin> {
        OutputLine::new(self.pin(spec.number), spec)
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay {
            bench: self.clone(),
        }
    }

    /// Controller on the board pins (GPIO15 / GPIO0) with a simulated delay.
    pub fn controller(&self) -> PowerController<RecordingPin, RecordingPin, SimDelay> {
        self.controller_on(PinSpec::new(15), PinSpec::new(0))
    }

    pub fn controller_on(
        &self,
        pir_dis: PinSpec,
        periph_vcc: PinSpec,
    ) -> PowerController<RecordingPin, RecordingPin, SimDelay> {
        PowerController::setup(self.line(pir_dis), self.line(periph_vcc), self.delay())
    }

    pub fn now(&self) -> u64 {
        self.clock.get()
    }

    pub fn advance(&self, ms: u64) {
        self.clock.set(self.clock.get() + ms);
    }

    /// Every physical write to `gpio`, oldest first.
    pub fn writes(&self, gpio: u8) -> Vec<Transition> {
        self.log
            .borrow()
            .iter()
            .filter(|t| t.gpio == gpio)
            .copied()
            .collect()
    }

    /// Last physical level written to `gpio`.
    pub fn level(&self, gpio: u8) -> Option<PinState> {
        self.writes(gpio).last().map(|t| t.level)
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

// ── RecordingPin ──────────────────────────────────────────────

pub struct RecordingPin {
    gpio: u8,
    bench: Bench,
}

impl RecordingPin {
    fn record(&self, level: PinState) {
        self.bench.log.borrow_mut().push(Transition {
            gpio: self.gpio,
            level,
            at_ms: self.bench.now(),
        });
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.record(PinState::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.record(PinState::High);
        Ok(())
    }
}

// ── SimDelay ──────────────────────────────────────────────────

/// Advances the bench clock, then yields once to the executor.
pub struct SimDelay {
    bench: Bench,
}

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.bench.advance(u64::from(ns) / 1_000_000);
        futures_lite::future::yield_now().await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.bench.delays.borrow_mut().push(ms);
        self.bench.advance(u64::from(ms));
        futures_lite::future::yield_now().await;
    }
}

// ── GateDelay ─────────────────────────────────────────────────

/// Suspends until the test releases the gate.
pub struct GateDelay {
    pub gate: Rc<Signal<NoopRawMutex, ()>>,
}

#[allow(dead_code)]
impl GateDelay {
    pub fn new() -> (Self, Rc<Signal<NoopRawMutex, ()>>) {
        let gate = Rc::new(Signal::new());
        (Self { gate: gate.clone() }, gate)
    }
}

impl DelayNs for GateDelay {
    async fn delay_ns(&mut self, _ns: u32) {
        self.gate.wait().await;
    }
}
