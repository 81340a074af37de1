//! Thread-safe per-data-path channel cache

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::ChannelInfoSnapshot;
use crate::model::ChannelInfo;

/// Channel allocation of every live data path, keyed by NDP instance id
///
/// Written from the event delivery path, read from the diagnostic path.
#[derive(Debug, Default)]
pub struct ChannelInfoCache {
    entries: RwLock<BTreeMap<u32, Vec<ChannelInfo>>>,
}

impl ChannelInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry for `ndp_instance_id`
    pub fn put(&self, ndp_instance_id: u32, channels: Vec<ChannelInfo>) {
        self.entries.write().insert(ndp_instance_id, channels);
    }

    /// Store what the HAL reported; no information drops any stale entry
    pub fn update(&self, ndp_instance_id: u32, channels: Option<&[ChannelInfo]>) {
        match channels {
            Some(channels) => self.put(ndp_instance_id, channels.to_vec()),
            None => self.remove(ndp_instance_id),
        }
    }

    pub fn remove(&self, ndp_instance_id: u32) {
        self.entries.write().remove(&ndp_instance_id);
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn get(&self, ndp_instance_id: u32) -> Option<Vec<ChannelInfo>> {
        self.entries.read().get(&ndp_instance_id).cloned()
    }

    pub fn contains(&self, ndp_instance_id: u32) -> bool {
        self.entries.read().contains_key(&ndp_instance_id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy the cache out for rendering without holding the lock
    pub fn snapshot(&self) -> ChannelInfoSnapshot {
        ChannelInfoSnapshot::from_entries(self.entries.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChannelBandwidth;
    use std::sync::Arc;
    use std::thread;

    fn channel(freq: u32) -> ChannelInfo {
        ChannelInfo::new(freq, ChannelBandwidth::Mhz20, 1)
    }

    #[test]
    fn test_put_replaces() {
        let cache = ChannelInfoCache::new();
        cache.put(5, vec![channel(2437)]);
        cache.put(5, vec![channel(5180), channel(5745)]);

        assert_eq!(cache.get(5), Some(vec![channel(5180), channel(5745)]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let cache = ChannelInfoCache::new();
        cache.put(1, vec![channel(2412)]);
        cache.remove(2);
        assert!(cache.contains(1));
    }

    #[test]
    fn test_update_without_information_removes() {
        let cache = ChannelInfoCache::new();
        cache.put(4, vec![channel(2412)]);
        cache.update(4, None);
        assert!(!cache.contains(4));

        cache.update(4, Some(&[]));
        assert_eq!(cache.get(4), Some(vec![]));
    }

    #[test]
    fn test_clear() {
        let cache = ChannelInfoCache::new();
        cache.put(1, vec![channel(2412)]);
        cache.put(2, vec![channel(2437)]);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.snapshot().is_empty());
    }

    #[test]
    fn test_writes_concurrent_with_rendering() {
        let cache = Arc::new(ChannelInfoCache::new());
        let writers: Vec<_> = (0..4u32)
            .map(|writer| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for ndp_instance_id in writer * 100..writer * 100 + 100 {
                        cache.put(ndp_instance_id, vec![channel(2000 + ndp_instance_id)]);
                        if ndp_instance_id % 2 == 0 {
                            cache.remove(ndp_instance_id);
                        }
                    }
                })
            })
            .collect();

        while writers.iter().any(|handle| !handle.is_finished()) {
            let rendered = serde_json::to_value(cache.snapshot()).unwrap();
            for (key, channels) in rendered.as_object().unwrap() {
                let ndp_instance_id: u32 = key.parse().unwrap();
                assert_eq!(
                    channels[0]["channelFreq"],
                    serde_json::json!(2000 + ndp_instance_id)
                );
            }
        }
        for handle in writers {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 200);
        for ndp_instance_id in 0..400 {
            assert_eq!(cache.contains(ndp_instance_id), ndp_instance_id % 2 == 1);
        }
    }
}
