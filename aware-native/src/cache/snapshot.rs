//! Read-only view of the channel cache

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::model::ChannelInfo;

/// One channel as rendered for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfoEntry {
    pub channel_freq: u32,
    /// Scan-result width constant
    pub channel_bandwidth: i32,
    pub num_spatial_streams: u32,
}

impl From<&ChannelInfo> for ChannelInfoEntry {
    fn from(info: &ChannelInfo) -> Self {
        Self {
            channel_freq: info.channel_freq_mhz,
            channel_bandwidth: info.bandwidth.scan_result_code(),
            num_spatial_streams: info.spatial_stream_count,
        }
    }
}

/// Cache contents at one point in time, ordered by NDP instance id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelInfoSnapshot {
    entries: BTreeMap<u32, Vec<ChannelInfo>>,
}

impl ChannelInfoSnapshot {
    pub(crate) fn from_entries(entries: BTreeMap<u32, Vec<ChannelInfo>>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Serializes as `{"<ndp id>": [{"channelFreq", "channelBandwidth", "numSpatialStreams"}]}`
/// in ascending id order
impl Serialize for ChannelInfoSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (ndp_instance_id, channels) in &self.entries {
            let rendered: Vec<ChannelInfoEntry> =
                channels.iter().map(ChannelInfoEntry::from).collect();
            map.serialize_entry(ndp_instance_id, &rendered)?;
        }
        map.end()
    }
}
