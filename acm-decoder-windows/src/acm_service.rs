//! `CodecService` backed by the system's installed ACM codecs.
//!
//! All calls go to the default driver mapper (`had = None`), so any codec
//! registered with msacm32 can be used.

use windows::Win32::Media::Audio::*;

use acm_decoder_core::models::error::ServiceError;
use acm_decoder_core::models::wave_format::{WaveFormat, WAVE_FORMAT_EX_SIZE};
use acm_decoder_core::traits::codec_service::{CodecService, ConversionStream};

use crate::acm_stream::{check, AcmStream};

/// Audio Compression Manager codec service.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcmCodecService;

impl AcmCodecService {
    pub fn new() -> Self {
        Self
    }
}

impl CodecService for AcmCodecService {
    fn suggest_pcm_format(&self, input: &WaveFormat) -> Result<WaveFormat, ServiceError> {
        let mut source = input.to_bytes();

        let template = WaveFormat::pcm(input.channels, input.samples_per_sec, 16).map_err(|e| {
            log::error!("No PCM template for the source format: {}", e);
            // MMSYSERR_INVALPARAM
            ServiceError::new("acmFormatSuggest", 11)
        })?;
        let mut destination = template.to_bytes();
        debug_assert_eq!(destination.len(), WAVE_FORMAT_EX_SIZE);

        // SAFETY: both buffers hold complete WAVEFORMATEX layouts (alignment 1)
        // and outlive the call; the destination size is passed explicitly.
        unsafe {
            check(
                "acmFormatSuggest",
                acmFormatSuggest(
                    None,
                    source.as_mut_ptr() as *mut WAVEFORMATEX,
                    destination.as_mut_ptr() as *mut WAVEFORMATEX,
                    destination.len() as u32,
                    ACM_FORMATSUGGESTF_NCHANNELS
                        | ACM_FORMATSUGGESTF_NSAMPLESPERSEC
                        | ACM_FORMATSUGGESTF_WFORMATTAG,
                ),
            )?;
        }

        WaveFormat::parse(&destination).map_err(|e| {
            log::error!("acmFormatSuggest returned an unreadable format: {}", e);
            ServiceError::new("acmFormatSuggest", 0)
        })
    }

    fn format_tag_name(&self, format_tag: u16) -> Result<Option<String>, ServiceError> {
        let mut details = ACMFORMATTAGDETAILSW {
            cbStruct: std::mem::size_of::<ACMFORMATTAGDETAILSW>() as u32,
            dwFormatTag: format_tag as u32,
            ..Default::default()
        };

        // SAFETY: `details` is initialized with its own size and lives on the stack.
        unsafe {
            check(
                "acmFormatTagDetails",
                acmFormatTagDetailsW(None, &mut details, ACM_FORMATTAGDETAILSF_FORMATTAG),
            )?;
        }

        let name = utf16_until_nul(&details.szFormatTag);
        Ok(if name.is_empty() { None } else { Some(name) })
    }

    fn open_stream(
        &self,
        input: &WaveFormat,
        output: &WaveFormat,
    ) -> Result<Box<dyn ConversionStream>, ServiceError> {
        Ok(Box::new(AcmStream::open(input, output)?))
    }
}

/// Decode a fixed-size, NUL-terminated UTF-16 field.
fn utf16_until_nul(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}
