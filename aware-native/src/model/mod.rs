//! Canonical, revision-independent data model

mod capabilities;
mod channel_info;

pub use capabilities::{Capabilities, CipherSuites};
pub use channel_info::{ChannelBandwidth, ChannelInfo};
