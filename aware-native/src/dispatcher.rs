//! Revision-gated event dispatch
//!
//! [`AwareEventAdapter::dispatch`] is the single entry point for every HAL
//! callback. Each event is checked against the negotiated revision, counted,
//! translated into canonical form, applied to the channel cache and finally
//! forwarded to the [`SessionManager`].

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use aware_hal::{
    ClusterEventType, HalEvent, HalRevision, MacAddress, NanClusterEventInd,
    NanDataPathConfirmInd, NanDataPathScheduleUpdateInd, NanStatus, RawCapabilities,
    RawChannelInfo, StatusCode, TransactionId,
};
use tracing::{debug, error, warn};

use crate::anomaly::{Anomaly, AnomalySink, TracingAnomalySink};
use crate::cache::ChannelInfoCache;
use crate::config::AdapterConfig;
use crate::counters::{CallbackCounters, CallbackKind};
use crate::decoders::{decode_capabilities, decode_channel_info, decode_match, decode_payload};
use crate::diagnostics::DiagnosticCommandHandler;
use crate::session::{ClusterChange, DataPathConfirm, SessionManager, SessionType};

/// What happened to a dispatched event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Counted (if an indication) and forwarded
    Processed,
    /// Rejected by the revision check; nothing was counted, cached or forwarded
    Dropped,
}

/// Adapter between HAL callbacks and a [`SessionManager`]
///
/// The adapter is `Send + Sync`. Events are expected from a single delivery
/// stream; diagnostics may be served concurrently from any thread.
pub struct AwareEventAdapter {
    session_manager: Arc<dyn SessionManager>,
    anomaly_sink: Arc<dyn AnomalySink>,
    revision: AtomicU8,
    verbose: AtomicBool,
    counters: CallbackCounters,
    channel_cache: ChannelInfoCache,
}

impl AwareEventAdapter {
    pub fn new(config: &AdapterConfig, session_manager: Arc<dyn SessionManager>) -> Self {
        Self {
            session_manager,
            anomaly_sink: Arc::new(TracingAnomalySink),
            revision: AtomicU8::new(config.revision.to_u8()),
            verbose: AtomicBool::new(config.verbose_logging),
            counters: CallbackCounters::new(),
            channel_cache: ChannelInfoCache::new(),
        }
    }

    /// Replace the default tracing sink
    pub fn with_anomaly_sink(mut self, sink: Arc<dyn AnomalySink>) -> Self {
        self.anomaly_sink = sink;
        self
    }

    /// Currently negotiated revision
    pub fn revision(&self) -> HalRevision {
        HalRevision::from_u8(self.revision.load(Ordering::Acquire)).unwrap_or_default()
    }

    /// Raise the negotiated revision; lower values are ignored
    pub fn upgrade_revision(&self, revision: HalRevision) -> HalRevision {
        let previous = self.revision.fetch_max(revision.to_u8(), Ordering::AcqRel);
        let current = self.revision();
        if revision.to_u8() < previous {
            debug!(
                requested = %revision,
                current = %current,
                "Ignoring HAL revision downgrade"
            );
        }
        current
    }

    pub fn enable_verbose_logging(&self, enabled: bool) {
        self.verbose.store(enabled, Ordering::Relaxed);
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    pub fn counters(&self) -> &CallbackCounters {
        &self.counters
    }

    pub fn channel_cache(&self) -> &ChannelInfoCache {
        &self.channel_cache
    }

    /// Handler for the `native_cb` diagnostic commands
    pub fn diagnostics(&self) -> DiagnosticCommandHandler<'_> {
        DiagnosticCommandHandler::new(&self.counters, &self.channel_cache)
    }

    /// Forget every cached channel allocation
    ///
    /// Called when the Aware interface is torn down as a whole.
    pub fn reset_channel_info(&self) {
        self.channel_cache.clear();
    }

    /// Write the adapter state for an operator dump
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "AwareEventAdapter:")?;
        writeln!(out, "  revision: {}", self.revision())?;
        writeln!(out, "  verbose: {}", self.is_verbose())?;
        let counts = serde_json::to_string(&self.counters.snapshot())?;
        let channels = serde_json::to_string(&self.channel_cache.snapshot())?;
        writeln!(out, "  callback counts: {counts}")?;
        writeln!(out, "  channel info: {channels}")?;
        Ok(())
    }

    /// Process one HAL callback
    pub fn dispatch(&self, event: HalEvent) -> DispatchOutcome {
        if self.is_verbose() {
            debug!(callback = %event.callback_name(), ?event, "HAL callback");
        }

        if !self.check_applicable(&event) {
            return DispatchOutcome::Dropped;
        }

        if let Some(kind) = CallbackKind::from_event_kind(event.kind()) {
            self.counters.increment(kind);
        }

        match event {
            HalEvent::CapabilitiesResponse {
                id,
                status,
                capabilities,
            } => self.handle_capabilities_response(id, status, &capabilities),
            HalEvent::EnableResponse { id, status } => self.handle_enable_response(id, status),
            HalEvent::ConfigResponse { id, status } => {
                if status.is_success() {
                    self.session_manager.on_config_success_response(id);
                } else {
                    warn!(id, status = %status, "Config request failed");
                    self.session_manager.on_config_failed_response(id, status.status);
                }
            }
            HalEvent::DisableResponse { id, status } => {
                if !status.is_success() {
                    warn!(id, status = %status, "Disable request failed");
                }
                self.session_manager.on_disable_response(id, status.status);
            }
            HalEvent::StartPublishResponse {
                id,
                status,
                publish_id,
            } => self.handle_session_config_response(id, status, SessionType::Publish, publish_id),
            HalEvent::StartSubscribeResponse {
                id,
                status,
                subscribe_id,
            } => self.handle_session_config_response(
                id,
                status,
                SessionType::Subscribe,
                subscribe_id,
            ),
            HalEvent::StopPublishResponse { id, status } => {
                if !status.is_success() {
                    error!(id, status = %status, "Stop publish failed");
                }
            }
            HalEvent::StopSubscribeResponse { id, status } => {
                if !status.is_success() {
                    error!(id, status = %status, "Stop subscribe failed");
                }
            }
            HalEvent::TransmitFollowupResponse { id, status } => {
                if status.is_success() {
                    self.session_manager.on_message_send_queued_success_response(id);
                } else {
                    warn!(id, status = %status, "Follow-up could not be queued");
                    self.session_manager
                        .on_message_send_queued_fail_response(id, status.status);
                }
            }
            HalEvent::CreateDataInterfaceResponse { id, status } => {
                log_failure(id, &status, "Create data interface");
                self.session_manager.on_create_data_path_interface_response(
                    id,
                    status.is_success(),
                    status.status,
                );
            }
            HalEvent::DeleteDataInterfaceResponse { id, status } => {
                log_failure(id, &status, "Delete data interface");
                self.session_manager.on_delete_data_path_interface_response(
                    id,
                    status.is_success(),
                    status.status,
                );
            }
            HalEvent::InitiateDataPathResponse {
                id,
                status,
                ndp_instance_id,
            } => {
                if status.is_success() {
                    self.session_manager
                        .on_initiate_data_path_response_success(id, ndp_instance_id);
                } else {
                    warn!(id, status = %status, "Initiate data path failed");
                    self.session_manager
                        .on_initiate_data_path_response_fail(id, status.status);
                }
            }
            HalEvent::RespondToDataPathIndicationResponse { id, status } => {
                log_failure(id, &status, "Respond to data path indication");
                self.session_manager.on_respond_to_data_path_setup_request_response(
                    id,
                    status.is_success(),
                    status.status,
                );
            }
            HalEvent::TerminateDataPathResponse { id, status } => {
                log_failure(id, &status, "Terminate data path");
                self.session_manager
                    .on_end_data_path_response(id, status.is_success(), status.status);
            }
            HalEvent::ClusterEvent { indication } => self.handle_cluster_event(&indication),
            HalEvent::Disabled { status } => {
                self.channel_cache.clear();
                self.session_manager.on_aware_down_notification(status.status);
            }
            HalEvent::PublishTerminated { session_id, status } => self
                .session_manager
                .on_session_terminated_notification(session_id, status.status, SessionType::Publish),
            HalEvent::SubscribeTerminated { session_id, status } => {
                self.session_manager.on_session_terminated_notification(
                    session_id,
                    status.status,
                    SessionType::Subscribe,
                )
            }
            HalEvent::Match { indication } => {
                self.session_manager
                    .on_match_notification(decode_match(&indication));
            }
            HalEvent::MatchExpired {
                discovery_session_id,
                peer_id,
            } => self
                .session_manager
                .on_match_expired_notification(discovery_session_id, peer_id),
            HalEvent::FollowupReceived { indication } => {
                self.session_manager.on_message_received_notification(
                    indication.discovery_session_id,
                    indication.peer_id,
                    indication.addr,
                    decode_payload(indication.service_specific_info.as_deref()),
                );
            }
            HalEvent::TransmitFollowup { id, status } => {
                if status.is_success() {
                    self.session_manager.on_message_send_success_notification(id);
                } else {
                    self.session_manager
                        .on_message_send_fail_notification(id, status.status);
                }
            }
            HalEvent::DataPathRequest { indication } => {
                self.session_manager.on_data_path_request_notification(
                    indication.discovery_session_id,
                    indication.peer_disc_mac_addr,
                    indication.ndp_instance_id,
                    decode_payload(indication.app_info.as_deref()),
                );
            }
            HalEvent::DataPathConfirm {
                indication,
                channel_info,
            } => self.handle_data_path_confirm(indication, channel_info.as_ref()),
            HalEvent::DataPathTerminated { ndp_instance_id } => {
                self.channel_cache.remove(ndp_instance_id);
                self.session_manager
                    .on_data_path_end_notification(ndp_instance_id);
            }
            HalEvent::DataPathScheduleUpdate {
                indication,
                channel_info,
            } => self.handle_schedule_update(&indication, &channel_info),
        }

        DispatchOutcome::Processed
    }

    // Returns false when the event must be dropped
    fn check_applicable(&self, event: &HalEvent) -> bool {
        let shape = event.revision();
        let negotiated = self.revision();

        if shape > negotiated {
            self.anomaly_sink.report(&Anomaly::RevisionMismatch {
                callback: event.callback_name(),
                shape,
                negotiated,
            });
            return event.kind().accepts_newer_shape();
        }

        let superseded = event
            .kind()
            .shape_revisions()
            .iter()
            .any(|newer| *newer > shape && *newer <= negotiated);
        if superseded {
            self.anomaly_sink.report(&Anomaly::SupersededShape {
                callback: event.callback_name(),
                shape,
                negotiated,
            });
        }

        true
    }

    fn handle_capabilities_response(
        &self,
        id: TransactionId,
        status: NanStatus,
        capabilities: &RawCapabilities,
    ) {
        if status.is_success() {
            self.session_manager
                .on_capabilities_update_response(id, decode_capabilities(capabilities));
        } else {
            error!(id, status = %status, "Capabilities request failed");
        }
    }

    fn handle_enable_response(&self, id: TransactionId, status: NanStatus) {
        if status.status == StatusCode::ALREADY_ENABLED {
            self.anomaly_sink.report(&Anomaly::AlreadyEnabled { id });
            self.session_manager.on_config_success_response(id);
        } else if status.is_success() {
            self.session_manager.on_config_success_response(id);
        } else {
            warn!(id, status = %status, "Enable request failed");
            self.session_manager.on_config_failed_response(id, status.status);
        }
    }

    fn handle_session_config_response(
        &self,
        id: TransactionId,
        status: NanStatus,
        session_type: SessionType,
        session_id: u8,
    ) {
        if status.is_success() {
            self.session_manager
                .on_session_config_success_response(id, session_type, session_id);
        } else {
            warn!(id, status = %status, %session_type, "Start session failed");
            self.session_manager
                .on_session_config_fail_response(id, session_type, status.status);
        }
    }

    fn handle_cluster_event(&self, indication: &NanClusterEventInd) {
        match ClusterEventType::from_raw(indication.event_type) {
            Some(ClusterEventType::DiscoveryMacAddressChanged) => self
                .session_manager
                .on_interface_address_change_notification(indication.addr),
            Some(ClusterEventType::StartedCluster) => self
                .session_manager
                .on_cluster_change_notification(ClusterChange::Started, indication.addr),
            Some(ClusterEventType::JoinedCluster) => self
                .session_manager
                .on_cluster_change_notification(ClusterChange::Joined, indication.addr),
            None => self.anomaly_sink.report(&Anomaly::UnknownClusterEvent {
                event_type: indication.event_type,
            }),
        }
    }

    fn handle_data_path_confirm(
        &self,
        indication: NanDataPathConfirmInd,
        channel_info: Option<&RawChannelInfo>,
    ) {
        let channels = channel_info.and_then(decode_channel_info);
        if channel_info.is_some() {
            self.channel_cache
                .update(indication.ndp_instance_id, channels.as_deref());
        }

        self.session_manager
            .on_data_path_confirm_notification(DataPathConfirm {
                ndp_instance_id: indication.ndp_instance_id,
                peer_ndi_mac_addr: indication.peer_ndi_mac_addr,
                accepted: indication.data_path_setup_success,
                reason: indication.status.status,
                app_info: decode_payload(indication.app_info.as_deref()),
                channel_info: channels,
            });
    }

    // Cache every id first so the manager never observes a half-applied update
    fn handle_schedule_update(
        &self,
        indication: &NanDataPathScheduleUpdateInd,
        channel_info: &RawChannelInfo,
    ) {
        if indication.ndp_instance_ids.is_empty() {
            warn!(
                peer = %indication.peer_discovery_address,
                "Schedule update names no data paths"
            );
            return;
        }

        let channels = decode_channel_info(channel_info);
        for ndp_instance_id in &indication.ndp_instance_ids {
            self.channel_cache.update(*ndp_instance_id, channels.as_deref());
        }

        let peer: MacAddress = indication.peer_discovery_address;
        for ndp_instance_id in &indication.ndp_instance_ids {
            self.session_manager.on_data_path_schedule_update_notification(
                peer,
                *ndp_instance_id,
                channels.clone(),
            );
        }
    }
}

fn log_failure(id: TransactionId, status: &NanStatus, request: &str) {
    if !status.is_success() {
        warn!(id, status = %status, "{} failed", request);
    }
}
