//! Reactor-backed async delay.
//!
//! [`ReactorDelay`] implements `embedded-hal-async`'s [`DelayNs`] on top
//! of `async-io-mini` timers, which run on the `embassy-time` time base.
//! Awaiting it parks the calling task until the timer fires; the executor
//! keeps polling every other task in the meantime.
//!
//! On ESP-IDF the time base is driven by the `esp_timer` clock (see
//! `driver` below).  Host builds link the `embassy-time` `std` driver.

use core::time::Duration;

use async_io_mini::Timer;
use embedded_hal_async::delay::DelayNs;

#[derive(Debug, Default, Clone, Copy)]
pub struct ReactorDelay;

impl ReactorDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for ReactorDelay {
    async fn delay_ns(&mut self, ns: u32) {
        Timer::after(Duration::from_nanos(u64::from(ns))).await;
    }

    async fn delay_us(&mut self, us: u32) {
        Timer::after(Duration::from_micros(u64::from(us))).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        Timer::after(Duration::from_millis(u64::from(ms))).await;
    }
}

// ---------------------------------------------------------------------------
// embassy-time driver (ESP-IDF)
// ---------------------------------------------------------------------------

#[cfg(target_os = "espidf")]
mod driver {
    use core::task::Waker;
    use core::time::Duration;

    use embassy_time::TICK_HZ;
    use log::warn;

    const MICROS_PER_SEC: u64 = 1_000_000;
    const WAKER_STACK: usize = 2 * 1024;

    fn now_micros() -> u64 {
        // SAFETY: `esp_timer_get_time` only reads the free-running system timer.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        us.max(0) as u64
    }

    /// Current time in `embassy-time` ticks.
    #[unsafe(no_mangle)]
    pub fn _embassy_time_now() -> u64 {
        now_micros() * TICK_HZ / MICROS_PER_SEC
    }

    /// Wake `waker` once the tick counter reaches `at`.
    #[unsafe(no_mangle)]
    pub fn _embassy_time_schedule_wake(at: u64, waker: &Waker) {
        let now = _embassy_time_now();
        if at <= now {
            waker.wake_by_ref();
            return;
        }

        let wait = Duration::from_micros((at - now).saturating_mul(MICROS_PER_SEC) / TICK_HZ);
        let pending = waker.clone();
        let spawned = std::thread::Builder::new()
            .name("timer-wake".into())
            .stack_size(WAKER_STACK)
            .spawn(move || {
                std::thread::sleep(wait);
                pending.wake();
            });

        if let Err(e) = spawned {
            // Wake now; the timer re-registers on its next poll.
            warn!("time: wake thread spawn failed: {}", e);
            waker.wake_by_ref();
        }
    }
}
