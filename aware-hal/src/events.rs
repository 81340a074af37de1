//! HAL callback events and responses
//!
//! Every callback the HAL can deliver is one [`HalEvent`] variant. Kinds that
//! exist in several revisions carry a revision-tagged payload (for example
//! [`RawMatch`] or [`RawCapabilities`]), so the revision of a delivered shape
//! is always recoverable with [`HalEvent::revision`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capabilities::RawCapabilities;
use crate::channel::RawChannelInfo;
use crate::revision::HalRevision;
use crate::status::NanStatus;

/// Transaction id correlating a response with the request that caused it
pub type TransactionId = u16;

/// A 6-byte IEEE 802 MAC address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    pub fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }
}

/// Cluster event types (`NanClusterEventType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterEventType {
    DiscoveryMacAddressChanged,
    StartedCluster,
    JoinedCluster,
}

impl ClusterEventType {
    /// Decode a raw HAL value; `None` for values the HAL does not define
    pub fn from_raw(value: u32) -> Option<Self> {
        match value {
            0 => Some(ClusterEventType::DiscoveryMacAddressChanged),
            1 => Some(ClusterEventType::StartedCluster),
            2 => Some(ClusterEventType::JoinedCluster),
            _ => None,
        }
    }

    pub fn to_raw(self) -> u32 {
        match self {
            ClusterEventType::DiscoveryMacAddressChanged => 0,
            ClusterEventType::StartedCluster => 1,
            ClusterEventType::JoinedCluster => 2,
        }
    }
}

/// Cluster state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NanClusterEventInd {
    /// Raw `NanClusterEventType`, see [`ClusterEventType::from_raw`]
    pub event_type: u32,
    pub addr: MacAddress,
}

/// Base (1.0) discovery match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NanMatchInd {
    pub discovery_session_id: u8,
    pub peer_id: u32,
    pub addr: MacAddress,
    pub service_specific_info: Option<Vec<u8>>,
    pub match_filter: Option<Vec<u8>>,
    pub match_occured_in_beacon_flag: bool,
    pub out_of_resource_flag: bool,
    pub rssi_value: u8,
    pub peer_requires_ranging: bool,
    pub ranging_indication_type: u32,
    /// Ranging result in centimeters
    pub ranging_measurement_in_cm: u32,
}

/// 1.6 discovery match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NanMatchIndV1_6 {
    pub discovery_session_id: u8,
    pub peer_id: u32,
    pub addr: MacAddress,
    pub service_specific_info: Option<Vec<u8>>,
    pub match_filter: Option<Vec<u8>>,
    pub match_occured_in_beacon_flag: bool,
    pub out_of_resource_flag: bool,
    pub rssi_value: u8,
    /// Bitfield of HAL cipher suite masks
    pub peer_cipher_type: u32,
    pub peer_requires_ranging: bool,
    pub ranging_indication_type: u32,
    /// Ranging result in millimeters
    pub ranging_measurement_in_mm: u32,
    /// Security context identifier
    pub scid: Option<Vec<u8>>,
}

/// A match indication tagged with its revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "revision", content = "record")]
pub enum RawMatch {
    #[serde(rename = "1.0")]
    V1_0(NanMatchInd),
    #[serde(rename = "1.6")]
    V1_6(NanMatchIndV1_6),
}

/// Follow-up message received from a peer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NanFollowupReceivedInd {
    pub discovery_session_id: u8,
    pub peer_id: u32,
    pub addr: MacAddress,
    pub received_in_faw: bool,
    pub service_specific_info: Option<Vec<u8>>,
}

/// A peer asks to set up a data path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NanDataPathRequestInd {
    pub discovery_session_id: u8,
    pub peer_disc_mac_addr: MacAddress,
    pub ndp_instance_id: u32,
    pub security_required: bool,
    pub app_info: Option<Vec<u8>>,
}

/// Data path setup result (the part shared by all revisions)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NanDataPathConfirmInd {
    pub ndp_instance_id: u32,
    pub data_path_setup_success: bool,
    pub peer_ndi_mac_addr: MacAddress,
    #[serde(default)]
    pub app_info: Option<Vec<u8>>,
    pub status: NanStatus,
}

/// Data path schedule change (1.2 and later)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NanDataPathScheduleUpdateInd {
    pub peer_discovery_address: MacAddress,
    pub ndp_instance_ids: Vec<u32>,
}

/// Logical callback kind, shared by all revision variants of a callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    // Responses
    CapabilitiesResponse,
    EnableResponse,
    ConfigResponse,
    DisableResponse,
    StartPublishResponse,
    StopPublishResponse,
    StartSubscribeResponse,
    StopSubscribeResponse,
    TransmitFollowupResponse,
    CreateDataInterfaceResponse,
    DeleteDataInterfaceResponse,
    InitiateDataPathResponse,
    RespondToDataPathIndicationResponse,
    TerminateDataPathResponse,
    // Indications
    ClusterEvent,
    Disabled,
    PublishTerminated,
    SubscribeTerminated,
    Match,
    MatchExpired,
    FollowupReceived,
    TransmitFollowup,
    DataPathRequest,
    DataPathConfirm,
    DataPathTerminated,
    DataPathScheduleUpdate,
}

impl EventKind {
    /// Revisions in which this kind has its own callback shape, lowest first
    pub fn shape_revisions(&self) -> &'static [HalRevision] {
        match self {
            EventKind::CapabilitiesResponse => {
                &[HalRevision::V1_0, HalRevision::V1_5, HalRevision::V1_6]
            }
            EventKind::Match => &[HalRevision::V1_0, HalRevision::V1_6],
            EventKind::DataPathConfirm => {
                &[HalRevision::V1_0, HalRevision::V1_2, HalRevision::V1_6]
            }
            EventKind::DataPathScheduleUpdate => &[HalRevision::V1_2, HalRevision::V1_6],
            _ => &[HalRevision::V1_0],
        }
    }

    /// Whether a shape newer than the negotiated revision is still processed
    ///
    /// The 1.6 match already carries every canonical field. Newer capability,
    /// confirm and schedule-update shapes are rejected.
    pub fn accepts_newer_shape(&self) -> bool {
        matches!(self, EventKind::Match)
    }

    /// Whether this kind answers a request (as opposed to an unsolicited indication)
    pub fn is_response(&self) -> bool {
        matches!(
            self,
            EventKind::CapabilitiesResponse
                | EventKind::EnableResponse
                | EventKind::ConfigResponse
                | EventKind::DisableResponse
                | EventKind::StartPublishResponse
                | EventKind::StopPublishResponse
                | EventKind::StartSubscribeResponse
                | EventKind::StopSubscribeResponse
                | EventKind::TransmitFollowupResponse
                | EventKind::CreateDataInterfaceResponse
                | EventKind::DeleteDataInterfaceResponse
                | EventKind::InitiateDataPathResponse
                | EventKind::RespondToDataPathIndicationResponse
                | EventKind::TerminateDataPathResponse
        )
    }

    /// HAL callback name of the base shape
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::CapabilitiesResponse => "notifyCapabilitiesResponse",
            EventKind::EnableResponse => "notifyEnableResponse",
            EventKind::ConfigResponse => "notifyConfigResponse",
            EventKind::DisableResponse => "notifyDisableResponse",
            EventKind::StartPublishResponse => "notifyStartPublishResponse",
            EventKind::StopPublishResponse => "notifyStopPublishResponse",
            EventKind::StartSubscribeResponse => "notifyStartSubscribeResponse",
            EventKind::StopSubscribeResponse => "notifyStopSubscribeResponse",
            EventKind::TransmitFollowupResponse => "notifyTransmitFollowupResponse",
            EventKind::CreateDataInterfaceResponse => "notifyCreateDataInterfaceResponse",
            EventKind::DeleteDataInterfaceResponse => "notifyDeleteDataInterfaceResponse",
            EventKind::InitiateDataPathResponse => "notifyInitiateDataPathResponse",
            EventKind::RespondToDataPathIndicationResponse => {
                "notifyRespondToDataPathIndicationResponse"
            }
            EventKind::TerminateDataPathResponse => "notifyTerminateDataPathResponse",
            EventKind::ClusterEvent => "eventClusterEvent",
            EventKind::Disabled => "eventDisabled",
            EventKind::PublishTerminated => "eventPublishTerminated",
            EventKind::SubscribeTerminated => "eventSubscribeTerminated",
            EventKind::Match => "eventMatch",
            EventKind::MatchExpired => "eventMatchExpired",
            EventKind::FollowupReceived => "eventFollowupReceived",
            EventKind::TransmitFollowup => "eventTransmitFollowup",
            EventKind::DataPathRequest => "eventDataPathRequest",
            EventKind::DataPathConfirm => "eventDataPathConfirm",
            EventKind::DataPathTerminated => "eventDataPathTerminated",
            EventKind::DataPathScheduleUpdate => "eventDataPathScheduleUpdate",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One callback delivered by the HAL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HalEvent {
    CapabilitiesResponse {
        id: TransactionId,
        status: NanStatus,
        capabilities: RawCapabilities,
    },
    EnableResponse {
        id: TransactionId,
        status: NanStatus,
    },
    ConfigResponse {
        id: TransactionId,
        status: NanStatus,
    },
    DisableResponse {
        id: TransactionId,
        status: NanStatus,
    },
    StartPublishResponse {
        id: TransactionId,
        status: NanStatus,
        publish_id: u8,
    },
    StopPublishResponse {
        id: TransactionId,
        status: NanStatus,
    },
    StartSubscribeResponse {
        id: TransactionId,
        status: NanStatus,
        subscribe_id: u8,
    },
    StopSubscribeResponse {
        id: TransactionId,
        status: NanStatus,
    },
    TransmitFollowupResponse {
        id: TransactionId,
        status: NanStatus,
    },
    CreateDataInterfaceResponse {
        id: TransactionId,
        status: NanStatus,
    },
    DeleteDataInterfaceResponse {
        id: TransactionId,
        status: NanStatus,
    },
    InitiateDataPathResponse {
        id: TransactionId,
        status: NanStatus,
        ndp_instance_id: u32,
    },
    RespondToDataPathIndicationResponse {
        id: TransactionId,
        status: NanStatus,
    },
    TerminateDataPathResponse {
        id: TransactionId,
        status: NanStatus,
    },
    ClusterEvent {
        indication: NanClusterEventInd,
    },
    Disabled {
        status: NanStatus,
    },
    PublishTerminated {
        session_id: u8,
        status: NanStatus,
    },
    SubscribeTerminated {
        session_id: u8,
        status: NanStatus,
    },
    Match {
        indication: RawMatch,
    },
    MatchExpired {
        discovery_session_id: u8,
        peer_id: u32,
    },
    FollowupReceived {
        indication: NanFollowupReceivedInd,
    },
    TransmitFollowup {
        id: TransactionId,
        status: NanStatus,
    },
    DataPathRequest {
        indication: NanDataPathRequestInd,
    },
    /// Data path confirm; `channel_info` is absent in the 1.0 shape
    DataPathConfirm {
        indication: NanDataPathConfirmInd,
        #[serde(default)]
        channel_info: Option<RawChannelInfo>,
    },
    DataPathTerminated {
        ndp_instance_id: u32,
    },
    DataPathScheduleUpdate {
        indication: NanDataPathScheduleUpdateInd,
        channel_info: RawChannelInfo,
    },
}

impl HalEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HalEvent::CapabilitiesResponse { .. } => EventKind::CapabilitiesResponse,
            HalEvent::EnableResponse { .. } => EventKind::EnableResponse,
            HalEvent::ConfigResponse { .. } => EventKind::ConfigResponse,
            HalEvent::DisableResponse { .. } => EventKind::DisableResponse,
            HalEvent::StartPublishResponse { .. } => EventKind::StartPublishResponse,
            HalEvent::StopPublishResponse { .. } => EventKind::StopPublishResponse,
            HalEvent::StartSubscribeResponse { .. } => EventKind::StartSubscribeResponse,
            HalEvent::StopSubscribeResponse { .. } => EventKind::StopSubscribeResponse,
            HalEvent::TransmitFollowupResponse { .. } => EventKind::TransmitFollowupResponse,
            HalEvent::CreateDataInterfaceResponse { .. } => EventKind::CreateDataInterfaceResponse,
            HalEvent::DeleteDataInterfaceResponse { .. } => EventKind::DeleteDataInterfaceResponse,
            HalEvent::InitiateDataPathResponse { .. } => EventKind::InitiateDataPathResponse,
            HalEvent::RespondToDataPathIndicationResponse { .. } => {
                EventKind::RespondToDataPathIndicationResponse
            }
            HalEvent::TerminateDataPathResponse { .. } => EventKind::TerminateDataPathResponse,
            HalEvent::ClusterEvent { .. } => EventKind::ClusterEvent,
            HalEvent::Disabled { .. } => EventKind::Disabled,
            HalEvent::PublishTerminated { .. } => EventKind::PublishTerminated,
            HalEvent::SubscribeTerminated { .. } => EventKind::SubscribeTerminated,
            HalEvent::Match { .. } => EventKind::Match,
            HalEvent::MatchExpired { .. } => EventKind::MatchExpired,
            HalEvent::FollowupReceived { .. } => EventKind::FollowupReceived,
            HalEvent::TransmitFollowup { .. } => EventKind::TransmitFollowup,
            HalEvent::DataPathRequest { .. } => EventKind::DataPathRequest,
            HalEvent::DataPathConfirm { .. } => EventKind::DataPathConfirm,
            HalEvent::DataPathTerminated { .. } => EventKind::DataPathTerminated,
            HalEvent::DataPathScheduleUpdate { .. } => EventKind::DataPathScheduleUpdate,
        }
    }

    /// Revision whose callback shape this event was delivered in
    pub fn revision(&self) -> HalRevision {
        match self {
            HalEvent::CapabilitiesResponse { capabilities, .. } => capabilities.revision(),
            HalEvent::Match { indication } => match indication {
                RawMatch::V1_0(_) => HalRevision::V1_0,
                RawMatch::V1_6(_) => HalRevision::V1_6,
            },
            HalEvent::DataPathConfirm { channel_info, .. } => channel_info
                .as_ref()
                .map(RawChannelInfo::revision)
                .unwrap_or(HalRevision::V1_0),
            HalEvent::DataPathScheduleUpdate { channel_info, .. } => channel_info.revision(),
            _ => HalRevision::V1_0,
        }
    }

    /// Callback name, suffixed with the revision for every shape but the first
    /// (e.g. `eventMatch_1_6`)
    pub fn callback_name(&self) -> String {
        let kind = self.kind();
        let revision = self.revision();
        if revision == kind.shape_revisions()[0] {
            kind.name().to_string()
        } else {
            format!("{}_{}", kind.name(), revision.as_str().replace('.', "_"))
        }
    }
}
