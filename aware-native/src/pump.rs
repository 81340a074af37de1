//! Background event pump
//!
//! The HAL binding pushes callbacks into a bounded channel; a single named
//! worker thread drains it into [`AwareEventAdapter::dispatch`] in arrival
//! order. The pump stops when every sender has been dropped.

use std::io;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use aware_hal::HalEvent;

use crate::config::AdapterConfig;
use crate::dispatcher::{AwareEventAdapter, DispatchOutcome};

/// Name of the pump thread
pub const PUMP_THREAD_NAME: &str = "aware-event-pump";

/// Totals reported by a finished pump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub processed: u64,
    pub dropped: u64,
}

impl PumpStats {
    pub fn total(&self) -> u64 {
        self.processed + self.dropped
    }
}

/// Bounded channel sized from `config.event_queue_capacity`
pub fn event_channel(config: &AdapterConfig) -> (SyncSender<HalEvent>, Receiver<HalEvent>) {
    mpsc::sync_channel(config.event_queue_capacity.max(1))
}

/// Spawn the pump thread
///
/// Joining the handle yields the totals once the channel has closed.
pub fn spawn_event_pump(
    adapter: Arc<AwareEventAdapter>,
    events: Receiver<HalEvent>,
) -> io::Result<JoinHandle<PumpStats>> {
    thread::Builder::new()
        .name(PUMP_THREAD_NAME.to_string())
        .spawn(move || {
            tracing::debug!("Event pump started");

            let mut stats = PumpStats::default();
            for event in events {
                match adapter.dispatch(event) {
                    DispatchOutcome::Processed => stats.processed += 1,
                    DispatchOutcome::Dropped => stats.dropped += 1,
                }
            }

            tracing::debug!(
                processed = stats.processed,
                dropped = stats.dropped,
                "Event pump stopped, channel closed"
            );
            stats
        })
}
