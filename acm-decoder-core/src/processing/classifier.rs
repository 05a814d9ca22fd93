//! Wave-format classification: decides whether a stream is already linear
//! PCM or IEEE float, or has to go through a conversion service.

use crate::models::chunk::SampleFormat;
use crate::models::wave_format::{
    legacy_tag, FormatTag, WaveFormat, KSDATAFORMAT_SUBTYPE_IEEE_FLOAT, KSDATAFORMAT_SUBTYPE_PCM,
    WAVE_FORMAT_IEEE_FLOAT,
};

/// Result of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Samples can be handed to the host as-is.
    pub is_pcm: bool,
    /// Meaningful only when `is_pcm` is set.
    pub sample_format: SampleFormat,
    /// Speaker mask from an extensible descriptor, if any.
    pub channel_mask: Option<u32>,
}

impl Classification {
    fn needs_conversion(channel_mask: Option<u32>) -> Self {
        Self {
            is_pcm: false,
            sample_format: SampleFormat::Integer,
            channel_mask,
        }
    }
}

/// Classify a wave-format descriptor. Never fails: anything not recognized
/// as PCM or float is routed to conversion.
pub fn classify(format: &WaveFormat) -> Classification {
    match format.tag() {
        FormatTag::Pcm => Classification {
            is_pcm: true,
            sample_format: SampleFormat::Integer,
            channel_mask: None,
        },
        FormatTag::IeeeFloat => Classification {
            is_pcm: true,
            sample_format: SampleFormat::Float,
            channel_mask: None,
        },
        FormatTag::Extensible => {
            let Some(ext) = format.extensible else {
                return Classification::needs_conversion(None);
            };
            if ext.sub_format != KSDATAFORMAT_SUBTYPE_PCM
                && ext.sub_format != KSDATAFORMAT_SUBTYPE_IEEE_FLOAT
            {
                return Classification::needs_conversion(Some(ext.channel_mask));
            }
            let sample_format = if legacy_tag(&ext.sub_format) == WAVE_FORMAT_IEEE_FLOAT as u32 {
                SampleFormat::Float
            } else {
                SampleFormat::Integer
            };
            Classification {
                is_pcm: true,
                sample_format,
                channel_mask: Some(ext.channel_mask),
            }
        }
        FormatTag::Other(_) => Classification::needs_conversion(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wave_format::WAVE_FORMAT_EXTENSIBLE;
    use uuid::Uuid;

    // KSDATAFORMAT_SUBTYPE_MPEG
    const SUBTYPE_MPEG: Uuid = Uuid::from_u128(0x00000050_0000_0010_8000_00aa00389b71);

    #[test]
    fn plain_pcm_and_float_pass_through() {
        let pcm = classify(&WaveFormat::pcm(2, 44100, 16).unwrap());
        assert!(pcm.is_pcm);
        assert_eq!(pcm.sample_format, SampleFormat::Integer);
        assert_eq!(pcm.channel_mask, None);

        let float = classify(&WaveFormat::ieee_float(2, 48000).unwrap());
        assert!(float.is_pcm);
        assert_eq!(float.sample_format, SampleFormat::Float);
        assert_eq!(float.channel_mask, None);
    }

    #[test]
    fn extensible_preserves_mask_exactly() {
        for mask in [0x3u32, 0x3F, 0x60F, 0x1 | 0x800, 0] {
            let pcm = classify(
                &WaveFormat::extensible(2, 48000, 24, mask, KSDATAFORMAT_SUBTYPE_PCM).unwrap(),
            );
            assert!(pcm.is_pcm);
            assert_eq!(pcm.sample_format, SampleFormat::Integer);
            assert_eq!(pcm.channel_mask, Some(mask));

            let float = classify(
                &WaveFormat::extensible(2, 48000, 32, mask, KSDATAFORMAT_SUBTYPE_IEEE_FLOAT)
                    .unwrap(),
            );
            assert!(float.is_pcm);
            assert_eq!(float.sample_format, SampleFormat::Float);
            assert_eq!(float.channel_mask, Some(mask));
        }
    }

    #[test]
    fn unknown_subformat_needs_conversion() {
        let c = classify(&WaveFormat::extensible(2, 48000, 16, 0x3, SUBTYPE_MPEG).unwrap());
        assert!(!c.is_pcm);
        assert_eq!(c.channel_mask, Some(0x3));
    }

    #[test]
    fn extensible_without_extension_needs_conversion() {
        let mut format = WaveFormat::pcm(2, 48000, 16).unwrap();
        format.format_tag = WAVE_FORMAT_EXTENSIBLE;
        let c = classify(&format);
        assert!(!c.is_pcm);
        assert_eq!(c.channel_mask, None);
    }

    #[test]
    fn vendor_tags_need_conversion() {
        for tag in [0x0002u16, 0x0006, 0x0011, 0x0031, 0x0055, 0x0161] {
            let mut format = WaveFormat::pcm(2, 44100, 16).unwrap();
            format.format_tag = tag;
            assert!(!classify(&format).is_pcm, "tag 0x{:04X}", tag);
        }
    }
}
