//! Raw Wi-Fi Aware HAL callback shapes
//!
//! The vendor HAL reports Neighbor Awareness Networking (NAN) state through a
//! callback interface that has grown over several revisions. Each revision
//! adds new callback variants instead of changing the old ones, so the same
//! logical event can arrive in more than one shape.
//!
//! This crate models those shapes exactly as the HAL delivers them. It does no
//! translation; that lives in `aware-native`.
//!
//! # Revisions
//!
//! ```text
//! V1_0 ── base callbacks
//! V1_2 ── data-path channel info, schedule updates
//! V1_5 ── instant communication mode capability flag
//! V1_6 ── expanded cipher suites, ranging in mm, security context id
//! ```
//!
//! Every [`HalEvent`] knows its [`EventKind`] and the [`HalRevision`] its
//! shape belongs to, so a consumer can gate on the negotiated revision with a
//! single match.

pub mod capabilities;
pub mod channel;
pub mod events;
pub mod revision;
pub mod status;

pub use capabilities::{
    cipher_suite_mask, NanCapabilities, NanCapabilitiesV1_5, NanCapabilitiesV1_6, RawCapabilities,
};
pub use channel::{channel_width, NanDataPathChannelInfo, RawChannelInfo};
pub use events::{
    ClusterEventType, EventKind, HalEvent, MacAddress, NanClusterEventInd, NanDataPathConfirmInd,
    NanDataPathRequestInd, NanDataPathScheduleUpdateInd, NanFollowupReceivedInd, NanMatchInd,
    NanMatchIndV1_6, RawMatch, TransactionId,
};
pub use revision::{HalRevision, RevisionParseError};
pub use status::{NanStatus, StatusCode};
