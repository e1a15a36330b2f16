//! Adapters: concrete hardware and timer implementations.
//!
//! | Adapter    | Provides                       | Connects to             |
//! |------------|--------------------------------|-------------------------|
//! | `hardware` | `OutputLine` per `PinSpec`     | ESP32 GPIO / sim pins   |
//! | `time`     | `embedded_hal_async` `DelayNs` | async-io-mini reactor   |

pub mod hardware;
pub mod time;
