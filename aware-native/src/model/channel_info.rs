//! Canonical data-path channel allocation

use std::fmt;

use serde::{Deserialize, Serialize};

/// Channel bandwidth class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelBandwidth {
    #[default]
    Mhz20,
    Mhz40,
    Mhz80,
    Mhz160,
    Mhz80Plus80,
    Mhz320,
}

impl ChannelBandwidth {
    /// Framework scan-result width constant (`CHANNEL_WIDTH_*`)
    pub fn scan_result_code(&self) -> i32 {
        match self {
            ChannelBandwidth::Mhz20 => 0,
            ChannelBandwidth::Mhz40 => 1,
            ChannelBandwidth::Mhz80 => 2,
            ChannelBandwidth::Mhz160 => 3,
            ChannelBandwidth::Mhz80Plus80 => 4,
            ChannelBandwidth::Mhz320 => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChannelBandwidth::Mhz20 => "20MHz",
            ChannelBandwidth::Mhz40 => "40MHz",
            ChannelBandwidth::Mhz80 => "80MHz",
            ChannelBandwidth::Mhz160 => "160MHz",
            ChannelBandwidth::Mhz80Plus80 => "80+80MHz",
            ChannelBandwidth::Mhz320 => "320MHz",
        }
    }
}

impl fmt::Display for ChannelBandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One channel used by a data path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Center frequency in MHz
    pub channel_freq_mhz: u32,
    pub bandwidth: ChannelBandwidth,
    pub spatial_stream_count: u32,
}

impl ChannelInfo {
    pub fn new(channel_freq_mhz: u32, bandwidth: ChannelBandwidth, spatial_stream_count: u32) -> Self {
        Self {
            channel_freq_mhz,
            bandwidth,
            spatial_stream_count,
        }
    }
}

impl fmt::Display for ChannelInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}MHz/{}/{}ss",
            self.channel_freq_mhz, self.bandwidth, self.spatial_stream_count
        )
    }
}
