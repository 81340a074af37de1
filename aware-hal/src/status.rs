//! Status codes carried by HAL responses and events

use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw NAN status code as reported by the HAL
///
/// Kept as the raw number so unknown vendor codes survive translation and can
/// be classified by the session manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const SUCCESS: StatusCode = StatusCode(0);
    pub const INTERNAL_FAILURE: StatusCode = StatusCode(1);
    pub const PROTOCOL_FAILURE: StatusCode = StatusCode(2);
    pub const INVALID_SESSION_ID: StatusCode = StatusCode(3);
    pub const NO_RESOURCES_AVAILABLE: StatusCode = StatusCode(4);
    pub const INVALID_ARGS: StatusCode = StatusCode(5);
    pub const INVALID_PEER_ID: StatusCode = StatusCode(6);
    pub const INVALID_NDP_ID: StatusCode = StatusCode(7);
    pub const NAN_NOT_ALLOWED: StatusCode = StatusCode(8);
    pub const NO_OTA_ACK: StatusCode = StatusCode(9);
    pub const ALREADY_ENABLED: StatusCode = StatusCode(10);
    pub const FOLLOWUP_TX_QUEUE_FULL: StatusCode = StatusCode(11);
    pub const UNSUPPORTED_CONCURRENCY_NAN_DISABLED: StatusCode = StatusCode(12);

    /// The raw numeric value
    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        *self == StatusCode::SUCCESS
    }

    /// Symbolic name for codes defined by the HAL, `None` for vendor codes
    pub fn name(&self) -> Option<&'static str> {
        let name = match self.0 {
            0 => "SUCCESS",
            1 => "INTERNAL_FAILURE",
            2 => "PROTOCOL_FAILURE",
            3 => "INVALID_SESSION_ID",
            4 => "NO_RESOURCES_AVAILABLE",
            5 => "INVALID_ARGS",
            6 => "INVALID_PEER_ID",
            7 => "INVALID_NDP_ID",
            8 => "NAN_NOT_ALLOWED",
            9 => "NO_OTA_ACK",
            10 => "ALREADY_ENABLED",
            11 => "FOLLOWUP_TX_QUEUE_FULL",
            12 => "UNSUPPORTED_CONCURRENCY_NAN_DISABLED",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", self.0, name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<u32> for StatusCode {
    fn from(value: u32) -> Self {
        StatusCode(value)
    }
}

/// Status block attached to responses and some events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NanStatus {
    pub status: StatusCode,
    /// Free-form vendor description, often empty
    #[serde(default)]
    pub description: String,
}

impl NanStatus {
    pub fn new(status: StatusCode, description: impl Into<String>) -> Self {
        Self {
            status,
            description: description.into(),
        }
    }

    pub fn success() -> Self {
        Self::new(StatusCode::SUCCESS, "")
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl From<StatusCode> for NanStatus {
    fn from(status: StatusCode) -> Self {
        Self::new(status, "")
    }
}

impl fmt::Display for NanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.status.0, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        assert!(StatusCode::SUCCESS.is_success());
        assert!(!StatusCode::ALREADY_ENABLED.is_success());
        assert!(NanStatus::success().is_success());
    }

    #[test]
    fn test_display_known_and_vendor_codes() {
        assert_eq!(StatusCode::NO_OTA_ACK.to_string(), "9 (NO_OTA_ACK)");
        assert_eq!(StatusCode(4242).to_string(), "4242");
    }

    #[test]
    fn test_nan_status_display() {
        let status = NanStatus::new(StatusCode::INVALID_ARGS, "bad ttl");
        assert_eq!(status.to_string(), "5 (bad ttl)");
    }

    #[test]
    fn test_status_deserializes_from_number() {
        let status: NanStatus = serde_json::from_str(r#"{"status": 3}"#).unwrap();
        assert_eq!(status.status, StatusCode::INVALID_SESSION_ID);
        assert!(status.description.is_empty());
    }
}
