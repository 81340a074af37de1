//! Internal-consistency anomalies
//!
//! An anomaly is something the HAL should never do but that the adapter
//! tolerates: a callback shape that does not fit the negotiated revision, an
//! unexpected status code. Anomalies go to an [`AnomalySink`] and never abort
//! processing beyond the drop policy of the dispatcher.

use std::fmt;

use aware_hal::{HalRevision, TransactionId};
use parking_lot::Mutex;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// Callback shape newer than the negotiated revision; the event is
    /// dropped unless its kind accepts newer shapes (match)
    RevisionMismatch {
        callback: String,
        shape: HalRevision,
        negotiated: HalRevision,
    },
    /// Legacy callback shape used although a newer one applies; the event is
    /// processed with what the legacy shape carries
    SupersededShape {
        callback: String,
        shape: HalRevision,
        negotiated: HalRevision,
    },
    /// Enable answered with `ALREADY_ENABLED`
    AlreadyEnabled { id: TransactionId },
    /// Cluster event with a type the HAL does not define
    UnknownClusterEvent { event_type: u32 },
}

impl Anomaly {
    /// Short stable label, used as the structured log field
    pub fn label(&self) -> &'static str {
        match self {
            Anomaly::RevisionMismatch { .. } => "revision_mismatch",
            Anomaly::SupersededShape { .. } => "superseded_shape",
            Anomaly::AlreadyEnabled { .. } => "already_enabled",
            Anomaly::UnknownClusterEvent { .. } => "unknown_cluster_event",
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::RevisionMismatch {
                callback,
                shape,
                negotiated,
            } => write!(
                f,
                "{callback} ({shape} shape) should not be called by a {negotiated} HAL"
            ),
            Anomaly::SupersededShape {
                callback,
                shape,
                negotiated,
            } => write!(
                f,
                "{callback} ({shape} shape) should not be called by a {negotiated} HAL, a newer shape applies"
            ),
            Anomaly::AlreadyEnabled { id } => {
                write!(f, "enable response {id} reported ALREADY_ENABLED")
            }
            Anomaly::UnknownClusterEvent { event_type } => {
                write!(f, "unknown cluster event type {event_type}")
            }
        }
    }
}

/// Destination for anomalies
pub trait AnomalySink: Send + Sync {
    fn report(&self, anomaly: &Anomaly);
}

/// Logs every anomaly at error level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnomalySink;

impl AnomalySink for TracingAnomalySink {
    fn report(&self, anomaly: &Anomaly) {
        error!(anomaly = anomaly.label(), "{}", anomaly);
    }
}

/// Keeps every anomaly in memory, and logs it like [`TracingAnomalySink`]
#[derive(Debug, Default)]
pub struct RecordingAnomalySink {
    anomalies: Mutex<Vec<Anomaly>>,
}

impl RecordingAnomalySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.anomalies.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.anomalies.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.anomalies.lock().is_empty()
    }
}

impl AnomalySink for RecordingAnomalySink {
    fn report(&self, anomaly: &Anomaly) {
        TracingAnomalySink.report(anomaly);
        self.anomalies.lock().push(anomaly.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let anomaly = Anomaly::RevisionMismatch {
            callback: "eventMatch_1_6".to_string(),
            shape: HalRevision::V1_6,
            negotiated: HalRevision::V1_2,
        };
        assert_eq!(
            anomaly.to_string(),
            "eventMatch_1_6 (1.6 shape) should not be called by a 1.2 HAL"
        );
        assert_eq!(anomaly.label(), "revision_mismatch");
    }

    #[test]
    fn test_recording_sink() {
        let sink = RecordingAnomalySink::new();
        sink.report(&Anomaly::AlreadyEnabled { id: 4 });
        sink.report(&Anomaly::UnknownClusterEvent { event_type: 9 });

        assert_eq!(
            sink.anomalies(),
            vec![
                Anomaly::AlreadyEnabled { id: 4 },
                Anomaly::UnknownClusterEvent { event_type: 9 },
            ]
        );
    }
}
