//! Trace loading and replay

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use aware_native::aware_hal::HalEvent;
use aware_native::{
    event_channel, spawn_event_pump, AdapterConfig, AwareEventAdapter, DispatchOutcome, PumpStats,
};

/// Parse a JSON array of HAL events
pub fn parse_trace(json: &str) -> Result<Vec<HalEvent>> {
    serde_json::from_str(json).context("Trace is not a JSON array of HAL events")
}

pub fn load_trace(path: &Path) -> Result<Vec<HalEvent>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    parse_trace(&json).with_context(|| format!("Failed to parse trace {}", path.display()))
}

/// Dispatch events on the calling thread
pub fn replay_inline(adapter: &AwareEventAdapter, events: Vec<HalEvent>) -> PumpStats {
    let mut stats = PumpStats::default();
    for event in events {
        match adapter.dispatch(event) {
            DispatchOutcome::Processed => stats.processed += 1,
            DispatchOutcome::Dropped => stats.dropped += 1,
        }
    }
    stats
}

/// Dispatch events through the background pump, the way a HAL binding would
pub fn replay_pumped(
    adapter: Arc<AwareEventAdapter>,
    config: &AdapterConfig,
    events: Vec<HalEvent>,
) -> Result<PumpStats> {
    let (tx, rx) = event_channel(config);
    let handle = spawn_event_pump(adapter, rx).context("Failed to spawn event pump")?;

    for event in events {
        tx.send(event).context("Event pump stopped early")?;
    }
    drop(tx);

    handle
        .join()
        .map_err(|_| anyhow::anyhow!("Event pump panicked"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aware_native::aware_hal::HalRevision;
    use aware_native::RecordingSessionManager;

    const TRACE: &str = r#"[
        {"event": "enable_response", "id": 1, "status": {"status": 0}},
        {"event": "data_path_confirm",
         "indication": {
            "ndp_instance_id": 4,
            "data_path_setup_success": true,
            "peer_ndi_mac_addr": [2, 0, 0, 0, 0, 1],
            "status": {"status": 0}
         },
         "channel_info": {"revision": "1.2", "channels": [
            {"channel_freq": 5745, "channel_bandwidth": 2, "num_spatial_streams": 2}
         ]}},
        {"event": "data_path_terminated", "ndp_instance_id": 9}
    ]"#;

    #[test]
    fn test_parse_trace() {
        let events = parse_trace(TRACE).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].revision(), HalRevision::V1_2);
    }

    #[test]
    fn test_parse_trace_rejects_garbage() {
        assert!(parse_trace(r#"{"event": "enable_response"}"#).is_err());
    }

    #[test]
    fn test_inline_and_pumped_agree() {
        let config = AdapterConfig::new().with_revision(HalRevision::V1_0);

        let inline_manager = Arc::new(RecordingSessionManager::new());
        let inline = AwareEventAdapter::new(&config, inline_manager.clone());
        let inline_stats = replay_inline(&inline, parse_trace(TRACE).unwrap());

        let pumped_manager = Arc::new(RecordingSessionManager::new());
        let pumped = Arc::new(AwareEventAdapter::new(&config, pumped_manager.clone()));
        let pumped_stats = replay_pumped(pumped, &config, parse_trace(TRACE).unwrap()).unwrap();

        // The 1.2 confirm is dropped by a 1.0 adapter
        assert_eq!(inline_stats, PumpStats { processed: 2, dropped: 1 });
        assert_eq!(inline_stats, pumped_stats);
        assert_eq!(inline_manager.notifications(), pumped_manager.notifications());
    }
}
