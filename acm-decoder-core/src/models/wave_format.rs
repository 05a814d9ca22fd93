//! Windows wave-format descriptors (`WAVEFORMATEX` / `WAVEFORMATEXTENSIBLE`).
//!
//! Wire layout, little-endian:
//! ```text
//! [0-1]    wFormatTag
//! [2-3]    nChannels
//! [4-7]    nSamplesPerSec
//! [8-11]   nAvgBytesPerSec
//! [12-13]  nBlockAlign
//! [14-15]  wBitsPerSample
//! [16-17]  cbSize (absent in the 16-byte legacy WAVEFORMAT)
//! [18-..]  cbSize bytes of extension
//!
//! Extension when wFormatTag = 0xFFFE and cbSize >= 22:
//! [18-19]  wValidBitsPerSample
//! [20-23]  dwChannelMask
//! [24-39]  SubFormat GUID
//! ```

use uuid::Uuid;

use super::error::DecoderError;

/// Size of a `WAVEFORMATEX` without its extension bytes.
pub const WAVE_FORMAT_EX_SIZE: usize = 18;

/// Size of the legacy `WAVEFORMAT`/`PCMWAVEFORMAT` (no `cbSize` field).
pub const WAVE_FORMAT_LEGACY_SIZE: usize = 16;

/// Extension size carried by `WAVEFORMATEXTENSIBLE`.
pub const EXTENSIBLE_EXTENSION_SIZE: usize = 22;

pub const WAVE_FORMAT_PCM: u16 = 0x0001;
pub const WAVE_FORMAT_IEEE_FLOAT: u16 = 0x0003;
pub const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// `KSDATAFORMAT_SUBTYPE_PCM`.
pub const KSDATAFORMAT_SUBTYPE_PCM: Uuid = Uuid::from_u128(0x00000001_0000_0010_8000_00aa00389b71);

/// `KSDATAFORMAT_SUBTYPE_IEEE_FLOAT`.
pub const KSDATAFORMAT_SUBTYPE_IEEE_FLOAT: Uuid =
    Uuid::from_u128(0x00000003_0000_0010_8000_00aa00389b71);

/// Legacy format tag stored in the first 4 bytes (`Data1`) of a sub-format GUID.
pub fn legacy_tag(sub_format: &Uuid) -> u32 {
    sub_format.as_fields().0
}

/// Codec identity from `wFormatTag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatTag {
    Pcm,
    IeeeFloat,
    Extensible,
    Other(u16),
}

impl From<u16> for FormatTag {
    fn from(tag: u16) -> Self {
        match tag {
            WAVE_FORMAT_PCM => FormatTag::Pcm,
            WAVE_FORMAT_IEEE_FLOAT => FormatTag::IeeeFloat,
            WAVE_FORMAT_EXTENSIBLE => FormatTag::Extensible,
            other => FormatTag::Other(other),
        }
    }
}

impl From<FormatTag> for u16 {
    fn from(tag: FormatTag) -> Self {
        match tag {
            FormatTag::Pcm => WAVE_FORMAT_PCM,
            FormatTag::IeeeFloat => WAVE_FORMAT_IEEE_FLOAT,
            FormatTag::Extensible => WAVE_FORMAT_EXTENSIBLE,
            FormatTag::Other(tag) => tag,
        }
    }
}

/// The `WAVEFORMATEXTENSIBLE` tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtensibleFormat {
    pub valid_bits_per_sample: u16,
    pub channel_mask: u32,
    pub sub_format: Uuid,
}

/// A parsed wave-format descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveFormat {
    pub format_tag: u16,
    pub channels: u16,
    pub samples_per_sec: u32,
    pub avg_bytes_per_sec: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    /// Present only when `format_tag` is EXTENSIBLE and the extension is complete.
    pub extensible: Option<ExtensibleFormat>,
    /// Codec-specific bytes following the (optional) extensible block.
    pub extra: Vec<u8>,
}

impl WaveFormat {
    /// Integer PCM with derived block alignment and byte rate.
    ///
    /// Fails when the derived block alignment or byte rate does not fit the
    /// descriptor's fields.
    pub fn pcm(
        channels: u16,
        samples_per_sec: u32,
        bits_per_sample: u16,
    ) -> Result<Self, DecoderError> {
        Self::uncompressed(WAVE_FORMAT_PCM, channels, samples_per_sec, bits_per_sample)
    }

    /// 32-bit IEEE float.
    pub fn ieee_float(channels: u16, samples_per_sec: u32) -> Result<Self, DecoderError> {
        Self::uncompressed(WAVE_FORMAT_IEEE_FLOAT, channels, samples_per_sec, 32)
    }

    /// `WAVEFORMATEXTENSIBLE` with the given sub-format and channel mask.
    pub fn extensible(
        channels: u16,
        samples_per_sec: u32,
        bits_per_sample: u16,
        channel_mask: u32,
        sub_format: Uuid,
    ) -> Result<Self, DecoderError> {
        let mut format =
            Self::uncompressed(WAVE_FORMAT_EXTENSIBLE, channels, samples_per_sec, bits_per_sample)?;
        format.extensible = Some(ExtensibleFormat {
            valid_bits_per_sample: bits_per_sample,
            channel_mask,
            sub_format,
        });
        Ok(format)
    }

    fn uncompressed(
        format_tag: u16,
        channels: u16,
        samples_per_sec: u32,
        bits_per_sample: u16,
    ) -> Result<Self, DecoderError> {
        let frame_bytes = channels as u32 * bits_per_sample as u32 / 8;
        let block_align = u16::try_from(frame_bytes).map_err(|_| {
            DecoderError::InvalidFormat(format!(
                "block alignment overflows: {} channels of {} bit",
                channels, bits_per_sample
            ))
        })?;
        let avg_bytes_per_sec = samples_per_sec.checked_mul(block_align as u32).ok_or_else(|| {
            DecoderError::InvalidFormat(format!(
                "byte rate overflows: {} Hz with {} byte frames",
                samples_per_sec, block_align
            ))
        })?;

        Ok(Self {
            format_tag,
            channels,
            samples_per_sec,
            avg_bytes_per_sec,
            block_align,
            bits_per_sample,
            extensible: None,
            extra: Vec::new(),
        })
    }

    pub fn tag(&self) -> FormatTag {
        FormatTag::from(self.format_tag)
    }

    /// Parse a little-endian `WAVEFORMATEX`, its extensible variant, or a
    /// 16-byte legacy `WAVEFORMAT`.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecoderError> {
        if bytes.len() < WAVE_FORMAT_LEGACY_SIZE {
            return Err(DecoderError::InvalidFormat(format!(
                "descriptor too short: {} bytes",
                bytes.len()
            )));
        }

        let format_tag = read_u16(bytes, 0);
        // cbSize is undefined for plain PCM
        let cb_size = if format_tag != WAVE_FORMAT_PCM && bytes.len() >= WAVE_FORMAT_EX_SIZE {
            read_u16(bytes, 16) as usize
        } else {
            0
        };

        let extension_end = WAVE_FORMAT_EX_SIZE + cb_size;
        if cb_size > 0 && bytes.len() < extension_end {
            return Err(DecoderError::InvalidFormat(format!(
                "extension truncated: cbSize {} but only {} bytes follow",
                cb_size,
                bytes.len() - WAVE_FORMAT_EX_SIZE
            )));
        }
        let extension = if cb_size > 0 {
            &bytes[WAVE_FORMAT_EX_SIZE..extension_end]
        } else {
            &[][..]
        };

        let (extensible, extra) =
            if format_tag == WAVE_FORMAT_EXTENSIBLE && extension.len() >= EXTENSIBLE_EXTENSION_SIZE {
                let mut guid = [0u8; 16];
                guid.copy_from_slice(&extension[6..22]);
                let ext = ExtensibleFormat {
                    valid_bits_per_sample: read_u16(extension, 0),
                    channel_mask: read_u32(extension, 2),
                    sub_format: Uuid::from_bytes_le(guid),
                };
                (Some(ext), extension[EXTENSIBLE_EXTENSION_SIZE..].to_vec())
            } else {
                (None, extension.to_vec())
            };

        Ok(Self {
            format_tag,
            channels: read_u16(bytes, 2),
            samples_per_sec: read_u32(bytes, 4),
            avg_bytes_per_sec: read_u32(bytes, 8),
            block_align: read_u16(bytes, 12),
            bits_per_sample: read_u16(bytes, 14),
            extensible,
            extra,
        })
    }

    /// Serialize back to a contiguous `WAVEFORMATEX` (with extension).
    pub fn to_bytes(&self) -> Vec<u8> {
        let ext_len = if self.extensible.is_some() {
            EXTENSIBLE_EXTENSION_SIZE
        } else {
            0
        };
        let cb_size = ext_len + self.extra.len();

        let mut out = Vec::with_capacity(WAVE_FORMAT_EX_SIZE + cb_size);
        out.extend_from_slice(&self.format_tag.to_le_bytes());
        out.extend_from_slice(&self.channels.to_le_bytes());
        out.extend_from_slice(&self.samples_per_sec.to_le_bytes());
        out.extend_from_slice(&self.avg_bytes_per_sec.to_le_bytes());
        out.extend_from_slice(&self.block_align.to_le_bytes());
        out.extend_from_slice(&self.bits_per_sample.to_le_bytes());
        out.extend_from_slice(&(cb_size as u16).to_le_bytes());

        if let Some(ext) = &self.extensible {
            out.extend_from_slice(&ext.valid_bits_per_sample.to_le_bytes());
            out.extend_from_slice(&ext.channel_mask.to_le_bytes());
            out.extend_from_slice(&ext.sub_format.to_bytes_le());
        }
        out.extend_from_slice(&self.extra);
        out
    }
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
