//! Capability records, one per HAL revision that changed them

use serde::{Deserialize, Serialize};

use crate::revision::HalRevision;

/// HAL cipher suite bit masks (`NanCipherSuiteType`)
///
/// The 1.0 HAL defines only the two shared-key bits; 1.6 adds the public-key
/// bits. Vendors occasionally set undefined bits, which consumers must ignore.
pub mod cipher_suite_mask {
    pub const NONE: u32 = 0;
    pub const SHARED_KEY_128: u32 = 1 << 0;
    pub const SHARED_KEY_256: u32 = 1 << 1;
    pub const PUBLIC_KEY_2WDH_128: u32 = 1 << 2;
    pub const PUBLIC_KEY_2WDH_256: u32 = 1 << 3;
}

/// Base (1.0) capability record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NanCapabilities {
    pub max_concurrent_clusters: u32,
    pub max_publishes: u32,
    pub max_subscribes: u32,
    pub max_service_name_len: u32,
    pub max_match_filter_len: u32,
    pub max_total_match_filter_len: u32,
    pub max_service_specific_info_len: u32,
    pub max_extended_service_specific_info_len: u32,
    pub max_ndi_interfaces: u32,
    pub max_ndp_sessions: u32,
    pub max_app_info_len: u32,
    pub max_queued_transmit_followup_msgs: u32,
    pub max_subscribe_interface_addresses: u32,
    /// Bitfield of [`cipher_suite_mask`] values
    pub supported_cipher_suites: u32,
}

/// 1.5 capability record: the base record plus instant communication mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NanCapabilitiesV1_5 {
    pub v1_0: NanCapabilities,
    pub instant_communication_mode_support_flag: bool,
}

/// 1.6 capability record
///
/// Flattened by the HAL (no nested base record). The cipher suite bitfield
/// uses the expanded 1.6 encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NanCapabilitiesV1_6 {
    pub max_concurrent_clusters: u32,
    pub max_publishes: u32,
    pub max_subscribes: u32,
    pub max_service_name_len: u32,
    pub max_match_filter_len: u32,
    pub max_total_match_filter_len: u32,
    pub max_service_specific_info_len: u32,
    pub max_extended_service_specific_info_len: u32,
    pub max_ndi_interfaces: u32,
    pub max_ndp_sessions: u32,
    pub max_app_info_len: u32,
    pub max_queued_transmit_followup_msgs: u32,
    pub max_subscribe_interface_addresses: u32,
    pub supported_cipher_suites: u32,
    pub instant_communication_mode_support_flag: bool,
}

/// A capability record tagged with the revision that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "revision", content = "record")]
pub enum RawCapabilities {
    #[serde(rename = "1.0")]
    V1_0(NanCapabilities),
    #[serde(rename = "1.5")]
    V1_5(NanCapabilitiesV1_5),
    #[serde(rename = "1.6")]
    V1_6(NanCapabilitiesV1_6),
}

impl RawCapabilities {
    /// Revision of the record's shape
    pub fn revision(&self) -> HalRevision {
        match self {
            RawCapabilities::V1_0(_) => HalRevision::V1_0,
            RawCapabilities::V1_5(_) => HalRevision::V1_5,
            RawCapabilities::V1_6(_) => HalRevision::V1_6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_tags() {
        assert_eq!(
            RawCapabilities::V1_0(NanCapabilities::default()).revision(),
            HalRevision::V1_0
        );
        assert_eq!(
            RawCapabilities::V1_5(NanCapabilitiesV1_5::default()).revision(),
            HalRevision::V1_5
        );
        assert_eq!(
            RawCapabilities::V1_6(NanCapabilitiesV1_6::default()).revision(),
            HalRevision::V1_6
        );
    }

    #[test]
    fn test_partial_json_record() {
        let json = r#"{"revision": "1.6", "record": {"max_publishes": 8, "instant_communication_mode_support_flag": true}}"#;
        let caps: RawCapabilities = serde_json::from_str(json).unwrap();
        match caps {
            RawCapabilities::V1_6(record) => {
                assert_eq!(record.max_publishes, 8);
                assert_eq!(record.max_subscribes, 0);
                assert!(record.instant_communication_mode_support_flag);
            }
            other => panic!("Expected 1.6 record, got {:?}", other),
        }
    }
}
