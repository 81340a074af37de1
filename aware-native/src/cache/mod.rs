//! Channel allocation caching

mod channel_cache;
mod snapshot;

pub use channel_cache::ChannelInfoCache;
pub use snapshot::{ChannelInfoEntry, ChannelInfoSnapshot};
