//! Match indication decoding

use aware_hal::{NanMatchInd, NanMatchIndV1_6, RawMatch};
use bytes::Bytes;

use super::{decode_cipher_suites, decode_payload};
use crate::model::CipherSuites;
use crate::session::MatchNotification;

/// Scale from the 1.0 ranging unit (cm) to the canonical one (mm)
pub const RANGING_CM_TO_MM: u32 = 10;

/// Decode a match indication of either revision
pub fn decode_match(raw: &RawMatch) -> MatchNotification {
    match raw {
        RawMatch::V1_0(ind) => decode_v1_0(ind),
        RawMatch::V1_6(ind) => decode_v1_6(ind),
    }
}

// 1.0 has no security context or peer cipher; both are synthesized empty.
fn decode_v1_0(ind: &NanMatchInd) -> MatchNotification {
    MatchNotification {
        discovery_session_id: ind.discovery_session_id,
        peer_id: ind.peer_id,
        peer_addr: ind.addr,
        service_specific_info: decode_payload(ind.service_specific_info.as_deref()),
        match_filter: decode_payload(ind.match_filter.as_deref()),
        ranging_indication: ind.ranging_indication_type,
        ranging_measurement_mm: ind
            .ranging_measurement_in_cm
            .saturating_mul(RANGING_CM_TO_MM),
        scid: Some(Bytes::new()),
        peer_cipher_suites: CipherSuites::NONE,
    }
}

fn decode_v1_6(ind: &NanMatchIndV1_6) -> MatchNotification {
    MatchNotification {
        discovery_session_id: ind.discovery_session_id,
        peer_id: ind.peer_id,
        peer_addr: ind.addr,
        service_specific_info: decode_payload(ind.service_specific_info.as_deref()),
        match_filter: decode_payload(ind.match_filter.as_deref()),
        ranging_indication: ind.ranging_indication_type,
        ranging_measurement_mm: ind.ranging_measurement_in_mm,
        scid: decode_payload(ind.scid.as_deref()),
        peer_cipher_suites: decode_cipher_suites(ind.peer_cipher_type),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aware_hal::{cipher_suite_mask, MacAddress};

    const PEER: MacAddress = MacAddress([0x02, 0x11, 0x22, 0x33, 0x44, 0x55]);

    #[test]
    fn test_v1_0_scales_centimeters() {
        let raw = RawMatch::V1_0(NanMatchInd {
            discovery_session_id: 3,
            peer_id: 17,
            addr: PEER,
            ranging_measurement_in_cm: 50,
            ..Default::default()
        });

        let notification = decode_match(&raw);
        assert_eq!(notification.ranging_measurement_mm, 500);
        assert_eq!(notification.discovery_session_id, 3);
        assert_eq!(notification.peer_id, 17);
        assert_eq!(notification.peer_addr, PEER);
    }

    #[test]
    fn test_v1_0_synthesizes_security_fields() {
        let notification = decode_match(&RawMatch::V1_0(NanMatchInd::default()));
        assert_eq!(notification.scid, Some(Bytes::new()));
        assert_eq!(notification.peer_cipher_suites, CipherSuites::NONE);
    }

    #[test]
    fn test_v1_0_scaling_saturates() {
        let raw = RawMatch::V1_0(NanMatchInd {
            ranging_measurement_in_cm: u32::MAX,
            ..Default::default()
        });
        assert_eq!(decode_match(&raw).ranging_measurement_mm, u32::MAX);
    }

    #[test]
    fn test_v1_6_keeps_millimeters() {
        let raw = RawMatch::V1_6(NanMatchIndV1_6 {
            ranging_measurement_in_mm: 500,
            peer_cipher_type: cipher_suite_mask::PUBLIC_KEY_2WDH_256,
            scid: Some(vec![0xaa, 0xbb]),
            service_specific_info: Some(vec![]),
            ..Default::default()
        });

        let notification = decode_match(&raw);
        assert_eq!(notification.ranging_measurement_mm, 500);
        assert_eq!(notification.peer_cipher_suites, CipherSuites::NCS_PK_256);
        assert_eq!(notification.scid, Some(Bytes::from_static(&[0xaa, 0xbb])));
        assert_eq!(notification.service_specific_info, Some(Bytes::new()));
        assert_eq!(notification.match_filter, None);
    }
}
