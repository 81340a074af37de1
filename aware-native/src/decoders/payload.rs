//! Byte payload decoding

use bytes::Bytes;

/// Flatten an optional HAL byte vector
///
/// `None` (no payload) and `Some(empty)` stay distinct.
pub fn decode_payload(raw: Option<&[u8]>) -> Option<Bytes> {
    raw.map(Bytes::copy_from_slice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_payload() {
        assert_eq!(decode_payload(None), None);
    }

    #[test]
    fn test_empty_payload_is_not_absent() {
        assert_eq!(decode_payload(Some(&[])), Some(Bytes::new()));
    }

    #[test]
    fn test_payload_bytes_copied() {
        let raw = vec![0x01, 0x02, 0xff];
        assert_eq!(
            decode_payload(Some(raw.as_slice())),
            Some(Bytes::from_static(&[0x01, 0x02, 0xff]))
        );
    }
}
