//! Per-callback diagnostic counters
//!
//! Counters are bumped on the event delivery path and read (and optionally
//! drained) from the diagnostic path. Both go through the same mutex, so a
//! drain never loses an increment that raced with it.

use std::collections::BTreeMap;
use std::fmt;

use aware_hal::EventKind;
use parking_lot::Mutex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Event kinds that are counted, with their stable diagnostic ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum CallbackKind {
    ClusterEvent = 0,
    Disabled = 1,
    PublishTerminated = 2,
    SubscribeTerminated = 3,
    Match = 4,
    MatchExpired = 5,
    FollowupReceived = 6,
    TransmitFollowup = 7,
    DataPathRequest = 8,
    DataPathConfirm = 9,
    DataPathTerminated = 10,
    DataPathScheduleUpdate = 11,
}

impl CallbackKind {
    pub const ALL: [CallbackKind; 12] = [
        CallbackKind::ClusterEvent,
        CallbackKind::Disabled,
        CallbackKind::PublishTerminated,
        CallbackKind::SubscribeTerminated,
        CallbackKind::Match,
        CallbackKind::MatchExpired,
        CallbackKind::FollowupReceived,
        CallbackKind::TransmitFollowup,
        CallbackKind::DataPathRequest,
        CallbackKind::DataPathConfirm,
        CallbackKind::DataPathTerminated,
        CallbackKind::DataPathScheduleUpdate,
    ];

    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Counter for an event kind; responses are not counted
    pub fn from_event_kind(kind: EventKind) -> Option<Self> {
        let counted = match kind {
            EventKind::ClusterEvent => CallbackKind::ClusterEvent,
            EventKind::Disabled => CallbackKind::Disabled,
            EventKind::PublishTerminated => CallbackKind::PublishTerminated,
            EventKind::SubscribeTerminated => CallbackKind::SubscribeTerminated,
            EventKind::Match => CallbackKind::Match,
            EventKind::MatchExpired => CallbackKind::MatchExpired,
            EventKind::FollowupReceived => CallbackKind::FollowupReceived,
            EventKind::TransmitFollowup => CallbackKind::TransmitFollowup,
            EventKind::DataPathRequest => CallbackKind::DataPathRequest,
            EventKind::DataPathConfirm => CallbackKind::DataPathConfirm,
            EventKind::DataPathTerminated => CallbackKind::DataPathTerminated,
            EventKind::DataPathScheduleUpdate => CallbackKind::DataPathScheduleUpdate,
            _ => return None,
        };
        Some(counted)
    }
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Point-in-time copy of the counter table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    counts: BTreeMap<CallbackKind, u32>,
}

impl CounterSnapshot {
    pub fn get(&self, kind: CallbackKind) -> Option<u32> {
        self.counts.get(&kind).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CallbackKind, u32)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }

}

/// Serializes as `{"<kind id>": count, ...}` in ascending id order
impl Serialize for CounterSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (kind, count) in self.iter() {
            map.serialize_entry(&kind.id(), &count)?;
        }
        map.end()
    }
}

/// Thread-safe counter table
#[derive(Debug, Default)]
pub struct CallbackCounters {
    counts: Mutex<BTreeMap<CallbackKind, u32>>,
}

impl CallbackCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to `kind`, starting at 1 when absent. Wraps at `u32::MAX`.
    pub fn increment(&self, kind: CallbackKind) {
        let mut counts = self.counts.lock();
        let count = counts.entry(kind).or_insert(0);
        *count = count.wrapping_add(1);
    }

    pub fn get(&self, kind: CallbackKind) -> u32 {
        self.counts.lock().get(&kind).copied().unwrap_or(0)
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            counts: self.counts.lock().clone(),
        }
    }

    pub fn clear(&self) {
        self.counts.lock().clear();
    }

    /// Snapshot and clear under a single lock acquisition
    pub fn drain(&self) -> CounterSnapshot {
        CounterSnapshot {
            counts: std::mem::take(&mut *self.counts.lock()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_kind_ids_are_stable() {
        for (index, kind) in CallbackKind::ALL.iter().enumerate() {
            assert_eq!(usize::from(kind.id()), index);
            assert_eq!(CallbackKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(CallbackKind::from_id(12), None);
    }

    #[test]
    fn test_responses_not_counted() {
        assert_eq!(CallbackKind::from_event_kind(EventKind::EnableResponse), None);
        assert_eq!(
            CallbackKind::from_event_kind(EventKind::CapabilitiesResponse),
            None
        );
        assert_eq!(
            CallbackKind::from_event_kind(EventKind::DataPathScheduleUpdate),
            Some(CallbackKind::DataPathScheduleUpdate)
        );
    }

    #[test]
    fn test_increment_creates_entry() {
        let counters = CallbackCounters::new();
        assert_eq!(counters.get(CallbackKind::Match), 0);

        counters.increment(CallbackKind::Match);
        counters.increment(CallbackKind::Match);
        counters.increment(CallbackKind::Disabled);

        let snapshot = counters.snapshot();
        assert_eq!(snapshot.get(CallbackKind::Match), Some(2));
        assert_eq!(snapshot.get(CallbackKind::Disabled), Some(1));
        assert_eq!(snapshot.get(CallbackKind::ClusterEvent), None);
    }

    #[test]
    fn test_clear_then_increment() {
        let counters = CallbackCounters::new();
        counters.increment(CallbackKind::MatchExpired);
        counters.clear();
        assert!(counters.snapshot().is_empty());

        counters.increment(CallbackKind::MatchExpired);
        assert_eq!(counters.snapshot().get(CallbackKind::MatchExpired), Some(1));
    }

    #[test]
    fn test_drain_returns_and_clears() {
        let counters = CallbackCounters::new();
        counters.increment(CallbackKind::DataPathConfirm);

        let drained = counters.drain();
        assert_eq!(drained.get(CallbackKind::DataPathConfirm), Some(1));
        assert!(counters.snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_json() {
        let counters = CallbackCounters::new();
        counters.increment(CallbackKind::DataPathTerminated);
        counters.increment(CallbackKind::ClusterEvent);

        assert_eq!(
            serde_json::to_value(counters.snapshot()).unwrap(),
            serde_json::json!({"0": 1, "10": 1})
        );
    }

    #[test]
    fn test_snapshot_json_keys_in_numeric_order() {
        let counters = CallbackCounters::new();
        counters.increment(CallbackKind::DataPathTerminated);
        counters.increment(CallbackKind::PublishTerminated);
        counters.increment(CallbackKind::ClusterEvent);
        counters.increment(CallbackKind::ClusterEvent);

        assert_eq!(
            serde_json::to_string(&counters.snapshot()).unwrap(),
            r#"{"0":2,"2":1,"10":1}"#
        );
    }

    #[test]
    fn test_drain_concurrent_with_increments() {
        let counters = Arc::new(CallbackCounters::new());
        let writers: Vec<_> = (0..4)
            .map(|_| {
                let counters = Arc::clone(&counters);
                thread::spawn(move || {
                    for _ in 0..5000 {
                        counters.increment(CallbackKind::Match);
                    }
                })
            })
            .collect();

        let mut drained = 0u64;
        while writers.iter().any(|handle| !handle.is_finished()) {
            drained += u64::from(counters.drain().get(CallbackKind::Match).unwrap_or(0));
        }
        for handle in writers {
            handle.join().unwrap();
        }

        drained += u64::from(counters.get(CallbackKind::Match));
        assert_eq!(drained, 20_000);
    }

    #[test]
    fn test_concurrent_increments() {
        let counters = Arc::new(CallbackCounters::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counters = Arc::clone(&counters);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        counters.increment(CallbackKind::FollowupReceived);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counters.get(CallbackKind::FollowupReceived), 8000);
    }
}
