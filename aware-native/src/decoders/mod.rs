//! Decoders from raw HAL shapes to the canonical model
//!
//! Every function here is pure and total: a structurally valid HAL record
//! always decodes, and the odd values vendors send (unknown bandwidth codes,
//! undefined cipher bits, absent payloads) resolve to fixed defaults.

mod capabilities;
mod channel_info;
mod matching;
mod payload;

pub use capabilities::{decode_capabilities, decode_cipher_suites};
pub use channel_info::{decode_bandwidth, decode_channel_info};
pub use matching::{decode_match, RANGING_CM_TO_MM};
pub use payload::decode_payload;
