//! ATHERMO Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  console thread ──ActionRequest──▶ ACTION_CHANNEL            │
//! │                                        │                     │
//! │  ┌─────────────────────────────────────▼──────────────────┐  │
//! │  │ LocalExecutor: dispatcher ──▶ ActionRegistry           │  │
//! │  │                 periph_vcc_on / periph_vcc_off /        │  │
//! │  │                 power_cycle ──▶ PowerController         │  │
//! │  └─────────────────────────────────────────────────────────┘  │
//! │                               PIR_DIS (GPIO15)  PERIPH_VCC (GPIO0)
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use edge_executor::LocalExecutor;
use embassy_sync::mutex::Mutex;
use log::{error, info, warn};

use athermo::adapters::hardware::bind_output;
use athermo::adapters::time::ReactorDelay;
use athermo::app::actions::SharedController;
use athermo::app::console::{ConsolePoll, ConsoleReader};
use athermo::app::dispatch::{self, ACTION_CHANNEL};
use athermo::app::registry::ActionRegistry;
use athermo::config::AthermoConfig;
use athermo::power::PowerController;

/// Board description, embedded at build time.
const BOARD_CONFIG: &str = include_str!("../athermo.json");

// ── Console ───────────────────────────────────────────────────

/// Idle time between console polls when no complete line is pending.
const CONSOLE_IDLE: Duration = Duration::from_millis(50);

/// Read action names from the serial console, one per line.
fn console_loop() {
    let mut console = ConsoleReader::new(std::io::stdin().lock());
    loop {
        match console.poll() {
            ConsolePoll::Command(name) => {
                if let Err(e) = dispatch::submit(&name) {
                    warn!("console: '{}': {}", name, e);
                }
            }
            ConsolePoll::Pending => std::thread::sleep(CONSOLE_IDLE),
            ConsolePoll::Closed => break,
        }
    }
    info!("console: input closed");
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ATHERMO v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = AthermoConfig::from_json(BOARD_CONFIG)
        .inspect_err(|e| error!("Config invalid: {}, halting", e))?;

    // ── 3. Lines + boot levels ────────────────────────────────
    // PIR_DIS must be HIGH before anything else runs.
    let pir_dis = bind_output(config.pir_dis_pin)?;
    let periph_vcc = bind_output(config.periph_vcc_pin)?;
    let controller = PowerController::setup(pir_dis, periph_vcc, ReactorDelay::new());
    controller.dump_config();
    let controller: SharedController<_, _, _> = Mutex::new(controller);

    // ── 4. Actions ────────────────────────────────────────────
    let registry = ActionRegistry::with_power_actions(&controller, config.power_cycle)?;
    for name in registry.names() {
        info!("Action registered: {}", name);
    }
    info!("  power_cycle delay: {} ms", config.power_cycle.delay_ms);

    std::thread::Builder::new()
        .name("console".into())
        .stack_size(4 * 1024)
        .spawn(console_loop)?;

    info!("System ready. Entering executor.");

    // ── 5. Executor ───────────────────────────────────────────
    let executor: LocalExecutor<'_, 4> = LocalExecutor::new();
    executor
        .spawn(dispatch::run(&registry, &ACTION_CHANNEL))
        .detach();

    futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
    Ok(())
}
