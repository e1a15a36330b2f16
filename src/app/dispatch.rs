//! Action request queue and dispatcher.
//!
//! Requests can originate on any thread (the console reader, a future
//! automation trigger); they cross into the executor through a bounded
//! `embassy-sync` channel and are played one at a time by [`run`].
//!
//! ```text
//! ┌────────────────┐ ActionRequest ┌───────────────────────────┐
//! │ console reader │─────────────▶│ dispatcher (executor task) │──▶ ActionRegistry
//! └────────────────┘               └───────────────────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::channel::Channel;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use heapless::String;
use log::warn;

use super::registry::ActionRegistry;
use crate::error::{Error, Result};

/// Longest accepted action name, namespace prefix included.
pub const MAX_ACTION_NAME: usize = 32;

/// Pending requests before new ones are dropped.
pub const ACTION_QUEUE_DEPTH: usize = 4;

/// A request to play the action registered under `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    name: String<MAX_ACTION_NAME>,
}

impl ActionRequest {
    /// Build a request from user input, trimming surrounding whitespace.
    ///
    /// Names that cannot fit are rejected as unknown; nothing that long is
    /// ever registered.
    pub fn new(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::UnknownAction);
        }
        let mut buf = String::new();
        buf.push_str(trimmed).map_err(|_| Error::UnknownAction)?;
        Ok(Self { name: buf })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Cross-thread request queue: producers → dispatcher.
pub static ACTION_CHANNEL: Channel<CriticalSectionRawMutex, ActionRequest, ACTION_QUEUE_DEPTH> =
    Channel::new();

/// Queue `name` on [`ACTION_CHANNEL`] without blocking.
pub fn submit(name: &str) -> Result<()> {
    let request = ActionRequest::new(name)?;
    ACTION_CHANNEL.try_send(request).map_err(|_| {
        warn!("dispatch: queue full, dropping '{}'", name.trim());
        Error::QueueFull
    })
}

/// Play one request, logging rather than propagating unknown names.
async fn dispatch_one<P, V, D>(registry: &ActionRegistry<'_, P, V, D>, request: &ActionRequest)
where
    P: OutputPin,
    V: OutputPin,
    D: DelayNs,
{
    if let Err(e) = registry.invoke(request.name()).await {
        warn!("dispatch: '{}': {}", request.name(), e);
    }
}

/// Dispatcher task: receive and play requests forever.
pub async fn run<P, V, D, M, const N: usize>(
    registry: &ActionRegistry<'_, P, V, D>,
    channel: &Channel<M, ActionRequest, N>,
) where
    P: OutputPin,
    V: OutputPin,
    D: DelayNs,
    M: RawMutex,
{
    loop {
        let request = channel.receive().await;
        dispatch_one(registry, &request).await;
    }
}

/// Play every request currently queued, then return how many ran.
pub async fn drain<P, V, D, M, const N: usize>(
    registry: &ActionRegistry<'_, P, V, D>,
    channel: &Channel<M, ActionRequest, N>,
) -> usize
where
    P: OutputPin,
    V: OutputPin,
    D: DelayNs,
    M: RawMutex,
{
    let mut played = 0;
    while let Ok(request) = channel.try_receive() {
        dispatch_one(registry, &request).await;
        played += 1;
    }
    played
}
