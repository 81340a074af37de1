//! Canonical capability snapshot

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Canonical set of supported cipher suites
///
/// Only the four framework bits can ever be set; construction from an
/// arbitrary value goes through [`CipherSuites::from_bits_truncate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CipherSuites(u32);

impl CipherSuites {
    pub const NONE: CipherSuites = CipherSuites(0);
    /// Shared key, 128-bit
    pub const NCS_SK_128: CipherSuites = CipherSuites(1 << 0);
    /// Shared key, 256-bit
    pub const NCS_SK_256: CipherSuites = CipherSuites(1 << 1);
    /// Public key, 128-bit
    pub const NCS_PK_128: CipherSuites = CipherSuites(1 << 2);
    /// Public key, 256-bit
    pub const NCS_PK_256: CipherSuites = CipherSuites(1 << 3);

    /// Every defined suite, lowest bit first
    pub const ALL: [CipherSuites; 4] = [
        CipherSuites::NCS_SK_128,
        CipherSuites::NCS_SK_256,
        CipherSuites::NCS_PK_128,
        CipherSuites::NCS_PK_256,
    ];

    const MASK: u32 = 0b1111;

    /// Keep only the defined bits of `bits`
    pub fn from_bits_truncate(bits: u32) -> Self {
        CipherSuites(bits & Self::MASK)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, other: CipherSuites) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: CipherSuites) {
        self.0 |= other.0;
    }

    /// Iterate the individual suites that are set
    pub fn iter(&self) -> impl Iterator<Item = CipherSuites> + '_ {
        Self::ALL.into_iter().filter(move |suite| self.contains(*suite))
    }

    fn name(&self) -> &'static str {
        match *self {
            CipherSuites::NCS_SK_128 => "NCS_SK_128",
            CipherSuites::NCS_SK_256 => "NCS_SK_256",
            CipherSuites::NCS_PK_128 => "NCS_PK_128",
            CipherSuites::NCS_PK_256 => "NCS_PK_256",
            _ => "NONE",
        }
    }
}

impl BitOr for CipherSuites {
    type Output = CipherSuites;

    fn bitor(self, rhs: CipherSuites) -> CipherSuites {
        CipherSuites(self.0 | rhs.0)
    }
}

impl BitOrAssign for CipherSuites {
    fn bitor_assign(&mut self, rhs: CipherSuites) {
        self.insert(rhs);
    }
}

impl fmt::Display for CipherSuites {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let names: Vec<&str> = self.iter().map(|suite| suite.name()).collect();
        f.write_str(&names.join("|"))
    }
}

/// Radio and session limits reported by the HAL
///
/// Built once per capability response and handed to the session manager by
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub max_concurrent_aware_clusters: u32,
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
    pub max_queued_transmit_messages: u32,
    pub max_subscribe_interface_addresses: u32,
    pub supported_cipher_suites: CipherSuites,
    pub is_instant_communication_mode_supported: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_drops_undefined_bits() {
        let suites = CipherSuites::from_bits_truncate(0xffff_fff5);
        assert_eq!(suites.bits(), 0b0101);
        assert!(suites.contains(CipherSuites::NCS_SK_128));
        assert!(suites.contains(CipherSuites::NCS_PK_128));
        assert!(!suites.contains(CipherSuites::NCS_SK_256));
    }

    #[test]
    fn test_display() {
        assert_eq!(CipherSuites::NONE.to_string(), "NONE");
        let suites = CipherSuites::NCS_SK_256 | CipherSuites::NCS_PK_256;
        assert_eq!(suites.to_string(), "NCS_SK_256|NCS_PK_256");
    }

    #[test]
    fn test_iter_yields_set_suites() {
        let mut suites = CipherSuites::NONE;
        suites |= CipherSuites::NCS_PK_128;
        suites.insert(CipherSuites::NCS_SK_128);
        let collected: Vec<_> = suites.iter().collect();
        assert_eq!(collected, vec![CipherSuites::NCS_SK_128, CipherSuites::NCS_PK_128]);
    }
}
