//! Wi-Fi Aware HAL callback adapter
//!
//! Sits between the vendor HAL's callback interface and the session manager
//! that owns discovery and data-path state. Every callback is checked against
//! the negotiated HAL revision, translated into one canonical shape and
//! forwarded exactly once.
//!
//! # Architecture
//!
//! ```text
//! HAL binding → [event pump] → AwareEventAdapter::dispatch → SessionManager
//!                                   │
//!                                   ├─ CallbackCounters   ┐
//!                                   └─ ChannelInfoCache   ┴─ native_cb diagnostics
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aware_native::{AdapterConfig, AwareEventAdapter, RecordingSessionManager};
//!
//! let config = AdapterConfig::from_env()?;
//! let manager = Arc::new(RecordingSessionManager::new());
//! let adapter = AwareEventAdapter::new(&config, manager.clone());
//!
//! adapter.dispatch(event);
//!
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = adapter.diagnostics().on_command(&["get_cb_count"], &mut out, &mut err);
//! ```

pub mod anomaly;
pub mod cache;
pub mod config;
pub mod counters;
pub mod decoders;
pub mod diagnostics;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod model;
pub mod pump;
pub mod session;

pub use anomaly::{Anomaly, AnomalySink, RecordingAnomalySink, TracingAnomalySink};
pub use cache::{ChannelInfoCache, ChannelInfoEntry, ChannelInfoSnapshot};
pub use config::AdapterConfig;
pub use counters::{CallbackCounters, CallbackKind, CounterSnapshot};
pub use diagnostics::{DiagnosticCommand, DiagnosticCommandHandler};
pub use dispatcher::{AwareEventAdapter, DispatchOutcome};
pub use error::{ConfigError, DiagnosticError, LoggingError};
pub use logging::{init_logging, init_logging_from_env, LoggingMode};
pub use model::{Capabilities, ChannelBandwidth, ChannelInfo, CipherSuites};
pub use pump::{event_channel, spawn_event_pump, PumpStats};
pub use session::{
    ClusterChange, DataPathConfirm, MatchNotification, RecordingSessionManager, SessionManager,
    SessionNotification, SessionType,
};

/// Raw HAL types, re-exported for callers that build events
pub use aware_hal;
