//! The session-management collaborator
//!
//! [`SessionManager`] is the only outbound interface of the adapter. Every
//! processed HAL callback ends in exactly one call here (a schedule update
//! ends in one call per data path it names), already translated into
//! canonical types.

use std::fmt;

use aware_hal::{MacAddress, StatusCode, TransactionId};
use bytes::Bytes;
use parking_lot::Mutex;
use serde::Serialize;

use crate::model::{Capabilities, ChannelInfo, CipherSuites};

/// Discovery session flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Publish,
    Subscribe,
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionType::Publish => f.write_str("publish"),
            SessionType::Subscribe => f.write_str("subscribe"),
        }
    }
}

/// How the device came to be part of a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterChange {
    Started,
    Joined,
}

/// A discovery match in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchNotification {
    pub discovery_session_id: u8,
    pub peer_id: u32,
    pub peer_addr: MacAddress,
    pub service_specific_info: Option<Bytes>,
    pub match_filter: Option<Bytes>,
    /// Ranging was requested and a measurement is attached
    pub ranging_indication: u32,
    pub ranging_measurement_mm: u32,
    /// Security context id; empty when the peer did not send one
    pub scid: Option<Bytes>,
    pub peer_cipher_suites: CipherSuites,
}

/// Outcome of a data-path negotiation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataPathConfirm {
    pub ndp_instance_id: u32,
    pub peer_ndi_mac_addr: MacAddress,
    pub accepted: bool,
    pub reason: StatusCode,
    pub app_info: Option<Bytes>,
    /// `None` when the HAL shape carries no channel information
    pub channel_info: Option<Vec<ChannelInfo>>,
}

/// Receiver of canonical notifications
///
/// Implementations are called synchronously from the event delivery path and
/// must not block for long. Failure codes are passed through untouched so the
/// implementation can classify them.
pub trait SessionManager: Send + Sync {
    fn on_capabilities_update_response(&self, id: TransactionId, capabilities: Capabilities);

    fn on_config_success_response(&self, id: TransactionId);

    fn on_config_failed_response(&self, id: TransactionId, reason: StatusCode);

    fn on_disable_response(&self, id: TransactionId, status: StatusCode);

    fn on_session_config_success_response(
        &self,
        id: TransactionId,
        session_type: SessionType,
        session_id: u8,
    );

    fn on_session_config_fail_response(
        &self,
        id: TransactionId,
        session_type: SessionType,
        reason: StatusCode,
    );

    fn on_message_send_queued_success_response(&self, id: TransactionId);

    fn on_message_send_queued_fail_response(&self, id: TransactionId, reason: StatusCode);

    fn on_create_data_path_interface_response(
        &self,
        id: TransactionId,
        success: bool,
        reason: StatusCode,
    );

    fn on_delete_data_path_interface_response(
        &self,
        id: TransactionId,
        success: bool,
        reason: StatusCode,
    );

    fn on_initiate_data_path_response_success(&self, id: TransactionId, ndp_instance_id: u32);

    fn on_initiate_data_path_response_fail(&self, id: TransactionId, reason: StatusCode);

    fn on_respond_to_data_path_setup_request_response(
        &self,
        id: TransactionId,
        success: bool,
        reason: StatusCode,
    );

    fn on_end_data_path_response(&self, id: TransactionId, success: bool, reason: StatusCode);

    fn on_interface_address_change_notification(&self, addr: MacAddress);

    fn on_cluster_change_notification(&self, change: ClusterChange, cluster_id: MacAddress);

    fn on_aware_down_notification(&self, reason: StatusCode);

    fn on_session_terminated_notification(
        &self,
        session_id: u8,
        reason: StatusCode,
        session_type: SessionType,
    );

    fn on_match_notification(&self, notification: MatchNotification);

    fn on_match_expired_notification(&self, discovery_session_id: u8, peer_id: u32);

    fn on_message_received_notification(
        &self,
        discovery_session_id: u8,
        peer_id: u32,
        peer_addr: MacAddress,
        message: Option<Bytes>,
    );

    fn on_message_send_success_notification(&self, id: TransactionId);

    fn on_message_send_fail_notification(&self, id: TransactionId, reason: StatusCode);

    fn on_data_path_request_notification(
        &self,
        discovery_session_id: u8,
        peer_disc_mac_addr: MacAddress,
        ndp_instance_id: u32,
        app_info: Option<Bytes>,
    );

    fn on_data_path_confirm_notification(&self, confirm: DataPathConfirm);

    fn on_data_path_end_notification(&self, ndp_instance_id: u32);

    fn on_data_path_schedule_update_notification(
        &self,
        peer_addr: MacAddress,
        ndp_instance_id: u32,
        channel_info: Option<Vec<ChannelInfo>>,
    );
}

/// One forwarded call, as captured by [`RecordingSessionManager`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "notification", rename_all = "snake_case")]
pub enum SessionNotification {
    CapabilitiesUpdate {
        id: TransactionId,
        capabilities: Capabilities,
    },
    ConfigSuccess {
        id: TransactionId,
    },
    ConfigFailed {
        id: TransactionId,
        reason: StatusCode,
    },
    DisableResponse {
        id: TransactionId,
        status: StatusCode,
    },
    SessionConfigSuccess {
        id: TransactionId,
        session_type: SessionType,
        session_id: u8,
    },
    SessionConfigFail {
        id: TransactionId,
        session_type: SessionType,
        reason: StatusCode,
    },
    MessageSendQueuedSuccess {
        id: TransactionId,
    },
    MessageSendQueuedFail {
        id: TransactionId,
        reason: StatusCode,
    },
    CreateDataPathInterface {
        id: TransactionId,
        success: bool,
        reason: StatusCode,
    },
    DeleteDataPathInterface {
        id: TransactionId,
        success: bool,
        reason: StatusCode,
    },
    InitiateDataPathSuccess {
        id: TransactionId,
        ndp_instance_id: u32,
    },
    InitiateDataPathFail {
        id: TransactionId,
        reason: StatusCode,
    },
    RespondToDataPathSetupRequest {
        id: TransactionId,
        success: bool,
        reason: StatusCode,
    },
    EndDataPath {
        id: TransactionId,
        success: bool,
        reason: StatusCode,
    },
    InterfaceAddressChange {
        addr: MacAddress,
    },
    ClusterChange {
        change: ClusterChange,
        cluster_id: MacAddress,
    },
    AwareDown {
        reason: StatusCode,
    },
    SessionTerminated {
        session_id: u8,
        reason: StatusCode,
        session_type: SessionType,
    },
    Match(MatchNotification),
    MatchExpired {
        discovery_session_id: u8,
        peer_id: u32,
    },
    MessageReceived {
        discovery_session_id: u8,
        peer_id: u32,
        peer_addr: MacAddress,
        message: Option<Bytes>,
    },
    MessageSendSuccess {
        id: TransactionId,
    },
    MessageSendFail {
        id: TransactionId,
        reason: StatusCode,
    },
    DataPathRequest {
        discovery_session_id: u8,
        peer_disc_mac_addr: MacAddress,
        ndp_instance_id: u32,
        app_info: Option<Bytes>,
    },
    DataPathConfirm(DataPathConfirm),
    DataPathEnd {
        ndp_instance_id: u32,
    },
    DataPathScheduleUpdate {
        peer_addr: MacAddress,
        ndp_instance_id: u32,
        channel_info: Option<Vec<ChannelInfo>>,
    },
}

/// Session manager that records every call in arrival order
///
/// Used by tests and by the replay tool.
#[derive(Debug, Default)]
pub struct RecordingSessionManager {
    notifications: Mutex<Vec<SessionNotification>>,
}

impl RecordingSessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn notifications(&self) -> Vec<SessionNotification> {
        self.notifications.lock().clone()
    }

    /// Take everything recorded so far, leaving the log empty
    pub fn take(&self) -> Vec<SessionNotification> {
        std::mem::take(&mut *self.notifications.lock())
    }

    pub fn len(&self) -> usize {
        self.notifications.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.lock().is_empty()
    }

    fn record(&self, notification: SessionNotification) {
        self.notifications.lock().push(notification);
    }
}

impl SessionManager for RecordingSessionManager {
    fn on_capabilities_update_response(&self, id: TransactionId, capabilities: Capabilities) {
        self.record(SessionNotification::CapabilitiesUpdate { id, capabilities });
    }

    fn on_config_success_response(&self, id: TransactionId) {
        self.record(SessionNotification::ConfigSuccess { id });
    }

    fn on_config_failed_response(&self, id: TransactionId, reason: StatusCode) {
        self.record(SessionNotification::ConfigFailed { id, reason });
    }

    fn on_disable_response(&self, id: TransactionId, status: StatusCode) {
        self.record(SessionNotification::DisableResponse { id, status });
    }

    fn on_session_config_success_response(
        &self,
        id: TransactionId,
        session_type: SessionType,
        session_id: u8,
    ) {
        self.record(SessionNotification::SessionConfigSuccess {
            id,
            session_type,
            session_id,
        });
    }

    fn on_session_config_fail_response(
        &self,
        id: TransactionId,
        session_type: SessionType,
        reason: StatusCode,
    ) {
        self.record(SessionNotification::SessionConfigFail {
            id,
            session_type,
            reason,
        });
    }

    fn on_message_send_queued_success_response(&self, id: TransactionId) {
        self.record(SessionNotification::MessageSendQueuedSuccess { id });
    }

    fn on_message_send_queued_fail_response(&self, id: TransactionId, reason: StatusCode) {
        self.record(SessionNotification::MessageSendQueuedFail { id, reason });
    }

    fn on_create_data_path_interface_response(
        &self,
        id: TransactionId,
        success: bool,
        reason: StatusCode,
    ) {
        self.record(SessionNotification::CreateDataPathInterface {
            id,
            success,
            reason,
        });
    }

    fn on_delete_data_path_interface_response(
        &self,
        id: TransactionId,
        success: bool,
        reason: StatusCode,
    ) {
        self.record(SessionNotification::DeleteDataPathInterface {
            id,
            success,
            reason,
        });
    }

    fn on_initiate_data_path_response_success(&self, id: TransactionId, ndp_instance_id: u32) {
        self.record(SessionNotification::InitiateDataPathSuccess {
            id,
            ndp_instance_id,
        });
    }

    fn on_initiate_data_path_response_fail(&self, id: TransactionId, reason: StatusCode) {
        self.record(SessionNotification::InitiateDataPathFail { id, reason });
    }

    fn on_respond_to_data_path_setup_request_response(
        &self,
        id: TransactionId,
        success: bool,
        reason: StatusCode,
    ) {
        self.record(SessionNotification::RespondToDataPathSetupRequest {
            id,
            success,
            reason,
        });
    }

    fn on_end_data_path_response(&self, id: TransactionId, success: bool, reason: StatusCode) {
        self.record(SessionNotification::EndDataPath {
            id,
            success,
            reason,
        });
    }

    fn on_interface_address_change_notification(&self, addr: MacAddress) {
        self.record(SessionNotification::InterfaceAddressChange { addr });
    }

    fn on_cluster_change_notification(&self, change: ClusterChange, cluster_id: MacAddress) {
        self.record(SessionNotification::ClusterChange { change, cluster_id });
    }

    fn on_aware_down_notification(&self, reason: StatusCode) {
        self.record(SessionNotification::AwareDown { reason });
    }

    fn on_session_terminated_notification(
        &self,
        session_id: u8,
        reason: StatusCode,
        session_type: SessionType,
    ) {
        self.record(SessionNotification::SessionTerminated {
            session_id,
            reason,
            session_type,
        });
    }

    fn on_match_notification(&self, notification: MatchNotification) {
        self.record(SessionNotification::Match(notification));
    }

    fn on_match_expired_notification(&self, discovery_session_id: u8, peer_id: u32) {
        self.record(SessionNotification::MatchExpired {
            discovery_session_id,
            peer_id,
        });
    }

    fn on_message_received_notification(
        &self,
        discovery_session_id: u8,
        peer_id: u32,
        peer_addr: MacAddress,
        message: Option<Bytes>,
    ) {
        self.record(SessionNotification::MessageReceived {
            discovery_session_id,
            peer_id,
            peer_addr,
            message,
        });
    }

    fn on_message_send_success_notification(&self, id: TransactionId) {
        self.record(SessionNotification::MessageSendSuccess { id });
    }

    fn on_message_send_fail_notification(&self, id: TransactionId, reason: StatusCode) {
        self.record(SessionNotification::MessageSendFail { id, reason });
    }

    fn on_data_path_request_notification(
        &self,
        discovery_session_id: u8,
        peer_disc_mac_addr: MacAddress,
        ndp_instance_id: u32,
        app_info: Option<Bytes>,
    ) {
        self.record(SessionNotification::DataPathRequest {
            discovery_session_id,
            peer_disc_mac_addr,
            ndp_instance_id,
            app_info,
        });
    }

    fn on_data_path_confirm_notification(&self, confirm: DataPathConfirm) {
        self.record(SessionNotification::DataPathConfirm(confirm));
    }

    fn on_data_path_end_notification(&self, ndp_instance_id: u32) {
        self.record(SessionNotification::DataPathEnd { ndp_instance_id });
    }

    fn on_data_path_schedule_update_notification(
        &self,
        peer_addr: MacAddress,
        ndp_instance_id: u32,
        channel_info: Option<Vec<ChannelInfo>>,
    ) {
        self.record(SessionNotification::DataPathScheduleUpdate {
            peer_addr,
            ndp_instance_id,
            channel_info,
        });
    }
}
