//! Host setup-blob probe for Matroska `A_MS/ACM` audio tracks.
//!
//! The host hands every packet decoder an opaque setup structure and asks
//! whether it is applicable. Only Matroska tracks whose codec ID starts with
//! `A_MS/ACM` carry a native `WAVEFORMATEX` in their codec-private data.

use uuid::Uuid;

use crate::models::error::DecoderError;
use crate::models::wave_format::WaveFormat;

/// Codec ID prefix of Matroska tracks wrapping a `WAVEFORMATEX`.
pub const ACM_CODEC_ID: &[u8; 8] = b"A_MS/ACM";

/// Layout mirror of the host's setup structure, used only for its size.
#[allow(dead_code)]
#[repr(C)]
struct RawMatroskaSetup {
    codec_id: *const u8,
    sample_rate: u32,
    sample_rate_output: u32,
    channels: u32,
    codec_private_size: usize,
    codec_private: *const u8,
}

/// Size the host reports for a Matroska setup blob.
pub const MATROSKA_SETUP_SIZE: usize = std::mem::size_of::<RawMatroskaSetup>();

/// Container that produced the packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerOwner {
    Matroska,
    Other(Uuid),
}

/// Borrowed view of a Matroska setup blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatroskaSetup<'a> {
    pub codec_id: &'a [u8],
    pub sample_rate: u32,
    pub sample_rate_output: u32,
    pub channels: u32,
    pub codec_private: &'a [u8],
}

impl MatroskaSetup<'_> {
    /// Parse the embedded wave-format descriptor.
    pub fn wave_format(&self) -> Result<WaveFormat, DecoderError> {
        WaveFormat::parse(self.codec_private)
    }
}

/// Check whether a setup blob belongs to this decoder.
///
/// Returns `MalformedSetup` when it does not; callers treat that as "not
/// applicable", never as a stream failure.
pub fn probe(owner: ContainerOwner, setup: &MatroskaSetup<'_>, setup_size: usize) -> Result<(), DecoderError> {
    if owner != ContainerOwner::Matroska {
        return Err(DecoderError::MalformedSetup(format!("unsupported owner {:?}", owner)));
    }
    if setup_size != MATROSKA_SETUP_SIZE {
        return Err(DecoderError::MalformedSetup(format!(
            "setup size {} (expected {})",
            setup_size, MATROSKA_SETUP_SIZE
        )));
    }
    if !setup.codec_id.starts_with(ACM_CODEC_ID) {
        return Err(DecoderError::MalformedSetup(format!(
            "codec id {:?}",
            String::from_utf8_lossy(setup.codec_id)
        )));
    }
    Ok(())
}

pub fn is_our_setup(owner: ContainerOwner, setup: &MatroskaSetup<'_>, setup_size: usize) -> bool {
    probe(owner, setup, setup_size).is_ok()
}
