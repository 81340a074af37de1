//! Capability record decoding

use aware_hal::{cipher_suite_mask, NanCapabilities, NanCapabilitiesV1_6, RawCapabilities};

use crate::model::{Capabilities, CipherSuites};

/// Decode a capability record of any revision
///
/// The base record cannot signal instant communication mode, so it always
/// decodes with that flag cleared.
pub fn decode_capabilities(raw: &RawCapabilities) -> Capabilities {
    match raw {
        RawCapabilities::V1_0(caps) => decode_base(caps, false),
        RawCapabilities::V1_5(caps) => {
            decode_base(&caps.v1_0, caps.instant_communication_mode_support_flag)
        }
        RawCapabilities::V1_6(caps) => decode_v1_6(caps),
    }
}

/// Map a HAL cipher suite bitfield to the canonical set
///
/// Each known HAL bit sets exactly one canonical bit; anything else is
/// dropped.
pub fn decode_cipher_suites(hal_bits: u32) -> CipherSuites {
    let mut suites = CipherSuites::NONE;

    if hal_bits & cipher_suite_mask::SHARED_KEY_128 != 0 {
        suites |= CipherSuites::NCS_SK_128;
    }
    if hal_bits & cipher_suite_mask::SHARED_KEY_256 != 0 {
        suites |= CipherSuites::NCS_SK_256;
    }
    if hal_bits & cipher_suite_mask::PUBLIC_KEY_2WDH_128 != 0 {
        suites |= CipherSuites::NCS_PK_128;
    }
    if hal_bits & cipher_suite_mask::PUBLIC_KEY_2WDH_256 != 0 {
        suites |= CipherSuites::NCS_PK_256;
    }

    suites
}

fn decode_base(caps: &NanCapabilities, instant_mode: bool) -> Capabilities {
    Capabilities {
        max_concurrent_aware_clusters: caps.max_concurrent_clusters,
        max_publishes: caps.max_publishes,
        max_subscribes: caps.max_subscribes,
        max_service_name_len: caps.max_service_name_len,
        max_match_filter_len: caps.max_match_filter_len,
        max_total_match_filter_len: caps.max_total_match_filter_len,
        max_service_specific_info_len: caps.max_service_specific_info_len,
        max_extended_service_specific_info_len: caps.max_extended_service_specific_info_len,
        max_ndi_interfaces: caps.max_ndi_interfaces,
        max_ndp_sessions: caps.max_ndp_sessions,
        max_app_info_len: caps.max_app_info_len,
        max_queued_transmit_messages: caps.max_queued_transmit_followup_msgs,
        max_subscribe_interface_addresses: caps.max_subscribe_interface_addresses,
        supported_cipher_suites: decode_cipher_suites(caps.supported_cipher_suites),
        is_instant_communication_mode_supported: instant_mode,
    }
}

fn decode_v1_6(caps: &NanCapabilitiesV1_6) -> Capabilities {
    Capabilities {
        max_concurrent_aware_clusters: caps.max_concurrent_clusters,
        max_publishes: caps.max_publishes,
        max_subscribes: caps.max_subscribes,
        max_service_name_len: caps.max_service_name_len,
        max_match_filter_len: caps.max_match_filter_len,
        max_total_match_filter_len: caps.max_total_match_filter_len,
        max_service_specific_info_len: caps.max_service_specific_info_len,
        max_extended_service_specific_info_len: caps.max_extended_service_specific_info_len,
        max_ndi_interfaces: caps.max_ndi_interfaces,
        max_ndp_sessions: caps.max_ndp_sessions,
        max_app_info_len: caps.max_app_info_len,
        max_queued_transmit_messages: caps.max_queued_transmit_followup_msgs,
        max_subscribe_interface_addresses: caps.max_subscribe_interface_addresses,
        supported_cipher_suites: decode_cipher_suites(caps.supported_cipher_suites),
        is_instant_communication_mode_supported: caps.instant_communication_mode_support_flag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aware_hal::NanCapabilitiesV1_5;

    fn base_caps() -> NanCapabilities {
        NanCapabilities {
            max_concurrent_clusters: 1,
            max_publishes: 8,
            max_subscribes: 8,
            max_service_name_len: 255,
            max_match_filter_len: 255,
            max_total_match_filter_len: 255,
            max_service_specific_info_len: 255,
            max_extended_service_specific_info_len: 1024,
            max_ndi_interfaces: 2,
            max_ndp_sessions: 4,
            max_app_info_len: 255,
            max_queued_transmit_followup_msgs: 6,
            max_subscribe_interface_addresses: 3,
            supported_cipher_suites: cipher_suite_mask::SHARED_KEY_128
                | cipher_suite_mask::SHARED_KEY_256,
        }
    }

    #[test]
    fn test_decode_base_record() {
        let caps = decode_capabilities(&RawCapabilities::V1_0(base_caps()));

        assert_eq!(caps.max_concurrent_aware_clusters, 1);
        assert_eq!(caps.max_publishes, 8);
        assert_eq!(caps.max_extended_service_specific_info_len, 1024);
        assert_eq!(caps.max_queued_transmit_messages, 6);
        assert_eq!(caps.max_subscribe_interface_addresses, 3);
        assert_eq!(
            caps.supported_cipher_suites,
            CipherSuites::NCS_SK_128 | CipherSuites::NCS_SK_256
        );
        assert!(!caps.is_instant_communication_mode_supported);
    }

    #[test]
    fn test_decode_v1_5_carries_instant_mode() {
        let raw = RawCapabilities::V1_5(NanCapabilitiesV1_5 {
            v1_0: base_caps(),
            instant_communication_mode_support_flag: true,
        });
        let caps = decode_capabilities(&raw);
        assert!(caps.is_instant_communication_mode_supported);
        assert_eq!(caps.max_ndp_sessions, 4);
    }

    #[test]
    fn test_decode_v1_6_expanded_ciphers() {
        let raw = RawCapabilities::V1_6(NanCapabilitiesV1_6 {
            max_publishes: 2,
            supported_cipher_suites: cipher_suite_mask::PUBLIC_KEY_2WDH_128
                | cipher_suite_mask::PUBLIC_KEY_2WDH_256,
            instant_communication_mode_support_flag: true,
            ..Default::default()
        });
        let caps = decode_capabilities(&raw);
        assert_eq!(caps.max_publishes, 2);
        assert_eq!(
            caps.supported_cipher_suites,
            CipherSuites::NCS_PK_128 | CipherSuites::NCS_PK_256
        );
        assert!(caps.is_instant_communication_mode_supported);
    }

    #[test]
    fn test_unknown_cipher_bits_dropped() {
        assert_eq!(decode_cipher_suites(1 << 7), CipherSuites::NONE);
        assert_eq!(
            decode_cipher_suites(cipher_suite_mask::SHARED_KEY_256 | 1 << 12),
            CipherSuites::NCS_SK_256
        );
    }
}
