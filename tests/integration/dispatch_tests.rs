//! Request queue → dispatcher → registry, on a local channel.

use crate::mock_hw::Bench;

use athermo::app::actions::SharedController;
use athermo::app::dispatch::{self, ActionRequest};
use athermo::app::registry::ActionRegistry;
use athermo::power::{PeriphPower, PowerCycleRequest};
use edge_executor::LocalExecutor;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embedded_hal::digital::PinState;
use futures_lite::future::block_on;

#[test]
fn drain_plays_queued_requests_in_order() {
    let bench = Bench::new();
    let controller: SharedController<_, _, _> = Mutex::new(bench.controller());
    let registry =
        ActionRegistry::with_power_actions(&controller, PowerCycleRequest::new(50)).unwrap();
    let channel: Channel<NoopRawMutex, ActionRequest, 4> = Channel::new();
    bench.clear_log();

    for name in ["periph_vcc_off", "athermo.periph_vcc_on", "power_cycle"] {
        channel.try_send(ActionRequest::new(name).unwrap()).unwrap();
    }

    let played = block_on(dispatch::drain(&registry, &channel));

    assert_eq!(played, 3);
    let levels: Vec<_> = bench.writes(0).iter().map(|t| t.level).collect();
    assert_eq!(
        levels,
        vec![PinState::High, PinState::Low, PinState::High, PinState::Low]
    );
    assert_eq!(*bench.delays.borrow(), vec![50]);
}

#[test]
fn unknown_names_are_skipped() {
    let bench = Bench::new();
    let controller: SharedController<_, _, _> = Mutex::new(bench.controller());
    let registry =
        ActionRegistry::with_power_actions(&controller, PowerCycleRequest::default()).unwrap();
    let channel: Channel<NoopRawMutex, ActionRequest, 4> = Channel::new();

    channel.try_send(ActionRequest::new("self_destruct").unwrap()).unwrap();
    channel.try_send(ActionRequest::new("periph_vcc_off").unwrap()).unwrap();

    assert_eq!(block_on(dispatch::drain(&registry, &channel)), 2);
    assert_eq!(block_on(controller.lock()).state(), PeriphPower::Off);
}

#[test]
fn run_wakes_on_each_request() {
    let bench = Bench::new();
    let controller: SharedController<_, _, _> = Mutex::new(bench.controller());
    let registry =
        ActionRegistry::with_power_actions(&controller, PowerCycleRequest::default()).unwrap();
    let channel: Channel<NoopRawMutex, ActionRequest, 4> = Channel::new();

    let executor: LocalExecutor<'_, 4> = LocalExecutor::new();
    executor.spawn(dispatch::run(&registry, &channel)).detach();

    while executor.try_tick() {}
    assert_eq!(bench.level(0), Some(PinState::Low));

    channel.try_send(ActionRequest::new("periph_vcc_off").unwrap()).unwrap();
    while executor.try_tick() {}
    assert_eq!(bench.level(0), Some(PinState::High));

    channel.try_send(ActionRequest::new("periph_vcc_on").unwrap()).unwrap();
    while executor.try_tick() {}
    assert_eq!(bench.level(0), Some(PinState::Low));
}
