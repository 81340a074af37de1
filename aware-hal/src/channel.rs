//! Per-channel data-path allocation records

use serde::{Deserialize, Serialize};

use crate::revision::HalRevision;

/// HAL channel width codes (`WifiChannelWidthInMhz`)
pub mod channel_width {
    pub const WIDTH_20: i32 = 0;
    pub const WIDTH_40: i32 = 1;
    pub const WIDTH_80: i32 = 2;
    pub const WIDTH_160: i32 = 3;
    pub const WIDTH_80P80: i32 = 4;
    pub const WIDTH_5: i32 = 5;
    pub const WIDTH_10: i32 = 6;
    /// Added in 1.6
    pub const WIDTH_320: i32 = 7;
    pub const WIDTH_INVALID: i32 = -1;
}

/// One channel used by a data path
///
/// The 1.2 and 1.6 records have the same fields; 1.6 widens the set of legal
/// width codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NanDataPathChannelInfo {
    /// Center frequency in MHz
    pub channel_freq: u32,
    /// One of the [`channel_width`] codes
    pub channel_bandwidth: i32,
    pub num_spatial_streams: u32,
}

impl NanDataPathChannelInfo {
    pub fn new(channel_freq: u32, channel_bandwidth: i32, num_spatial_streams: u32) -> Self {
        Self {
            channel_freq,
            channel_bandwidth,
            num_spatial_streams,
        }
    }
}

/// A channel list tagged with the revision of its element shape
///
/// `None` in the list position means the HAL sent no list at all, which is
/// different from an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "revision", content = "channels")]
pub enum RawChannelInfo {
    #[serde(rename = "1.2")]
    V1_2(Option<Vec<NanDataPathChannelInfo>>),
    #[serde(rename = "1.6")]
    V1_6(Option<Vec<NanDataPathChannelInfo>>),
}

impl RawChannelInfo {
    pub fn revision(&self) -> HalRevision {
        match self {
            RawChannelInfo::V1_2(_) => HalRevision::V1_2,
            RawChannelInfo::V1_6(_) => HalRevision::V1_6,
        }
    }

    /// The records, if the HAL sent a list
    pub fn records(&self) -> Option<&[NanDataPathChannelInfo]> {
        match self {
            RawChannelInfo::V1_2(list) | RawChannelInfo::V1_6(list) => list.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_lists_differ() {
        let absent = RawChannelInfo::V1_2(None);
        let empty = RawChannelInfo::V1_2(Some(vec![]));
        assert!(absent.records().is_none());
        assert_eq!(empty.records(), Some(&[][..]));
    }

    #[test]
    fn test_revision() {
        assert_eq!(RawChannelInfo::V1_6(None).revision(), HalRevision::V1_6);
    }
}
