//! Data-path channel info decoding

use aware_hal::{channel_width, NanDataPathChannelInfo, RawChannelInfo};

use crate::model::{ChannelBandwidth, ChannelInfo};

/// Map a HAL width code to a bandwidth class
///
/// Codes without a framework class (5 MHz, 10 MHz, invalid, unknown) fall
/// back to 20 MHz.
pub fn decode_bandwidth(code: i32) -> ChannelBandwidth {
    match code {
        channel_width::WIDTH_40 => ChannelBandwidth::Mhz40,
        channel_width::WIDTH_80 => ChannelBandwidth::Mhz80,
        channel_width::WIDTH_160 => ChannelBandwidth::Mhz160,
        channel_width::WIDTH_80P80 => ChannelBandwidth::Mhz80Plus80,
        channel_width::WIDTH_320 => ChannelBandwidth::Mhz320,
        _ => ChannelBandwidth::Mhz20,
    }
}

/// Decode a channel list, preserving order
///
/// Returns `None` when the HAL sent no list, and an empty vector for an empty
/// list.
pub fn decode_channel_info(raw: &RawChannelInfo) -> Option<Vec<ChannelInfo>> {
    raw.records()
        .map(|records| records.iter().map(decode_record).collect())
}

fn decode_record(record: &NanDataPathChannelInfo) -> ChannelInfo {
    ChannelInfo::new(
        record.channel_freq,
        decode_bandwidth(record.channel_bandwidth),
        record.num_spatial_streams,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(channel_width::WIDTH_20, ChannelBandwidth::Mhz20)]
    #[case(channel_width::WIDTH_40, ChannelBandwidth::Mhz40)]
    #[case(channel_width::WIDTH_80, ChannelBandwidth::Mhz80)]
    #[case(channel_width::WIDTH_160, ChannelBandwidth::Mhz160)]
    #[case(channel_width::WIDTH_80P80, ChannelBandwidth::Mhz80Plus80)]
    #[case(channel_width::WIDTH_320, ChannelBandwidth::Mhz320)]
    #[case(channel_width::WIDTH_5, ChannelBandwidth::Mhz20)]
    #[case(channel_width::WIDTH_10, ChannelBandwidth::Mhz20)]
    #[case(channel_width::WIDTH_INVALID, ChannelBandwidth::Mhz20)]
    #[case(42, ChannelBandwidth::Mhz20)]
    fn test_decode_bandwidth(#[case] code: i32, #[case] expected: ChannelBandwidth) {
        assert_eq!(decode_bandwidth(code), expected);
    }

    #[test]
    fn test_absent_list_is_no_information() {
        assert_eq!(decode_channel_info(&RawChannelInfo::V1_2(None)), None);
        assert_eq!(decode_channel_info(&RawChannelInfo::V1_6(None)), None);
    }

    #[test]
    fn test_empty_list_stays_empty() {
        assert_eq!(
            decode_channel_info(&RawChannelInfo::V1_6(Some(vec![]))),
            Some(vec![])
        );
    }

    #[test]
    fn test_order_preserved() {
        let raw = RawChannelInfo::V1_6(Some(vec![
            NanDataPathChannelInfo::new(5745, channel_width::WIDTH_80, 2),
            NanDataPathChannelInfo::new(2437, channel_width::WIDTH_20, 1),
            NanDataPathChannelInfo::new(6115, channel_width::WIDTH_320, 2),
        ]));

        let decoded = decode_channel_info(&raw).unwrap();
        assert_eq!(
            decoded,
            vec![
                ChannelInfo::new(5745, ChannelBandwidth::Mhz80, 2),
                ChannelInfo::new(2437, ChannelBandwidth::Mhz20, 1),
                ChannelInfo::new(6115, ChannelBandwidth::Mhz320, 2),
            ]
        );
    }
}
