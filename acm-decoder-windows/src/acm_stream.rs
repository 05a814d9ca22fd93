//! One open ACM conversion stream.

use windows::Win32::Media::Audio::*;

use acm_decoder_core::models::error::ServiceError;
use acm_decoder_core::models::wave_format::WaveFormat;
use acm_decoder_core::traits::codec_service::ConversionStream;

/// Owned `HACMSTREAM`. Closed exactly once, in `Drop`.
pub struct AcmStream {
    handle: HACMSTREAM,
}

// SAFETY: an ACM stream handle is not tied to the thread that opened it, and
// the decoder never uses one from two threads at once (`&mut self` only).
unsafe impl Send for AcmStream {}

impl AcmStream {
    /// Open a non-realtime conversion stream from `input` to `output`.
    pub fn open(input: &WaveFormat, output: &WaveFormat) -> Result<Self, ServiceError> {
        let mut source = input.to_bytes();
        let mut destination = output.to_bytes();
        let mut handle = HACMSTREAM::default();

        // SAFETY: both buffers hold complete WAVEFORMATEX layouts (alignment 1)
        // and ACM copies them during the call.
        unsafe {
            check(
                "acmStreamOpen",
                acmStreamOpen(
                    &mut handle,
                    None,
                    source.as_mut_ptr() as *mut WAVEFORMATEX,
                    destination.as_mut_ptr() as *mut WAVEFORMATEX,
                    None,
                    0,
                    0,
                    0,
                ),
            )?;
        }

        log::debug!(
            "acmStreamOpen: tag 0x{:04X} -> PCM {} bit",
            input.format_tag,
            output.bits_per_sample
        );
        Ok(Self { handle })
    }
}

impl ConversionStream for AcmStream {
    fn output_size(&mut self, input_len: usize) -> Result<usize, ServiceError> {
        let input_len = buffer_len("acmStreamSize", input_len)?;
        let mut output_len: u32 = 0;
        // SAFETY: `handle` is open for the lifetime of `self`.
        unsafe {
            check(
                "acmStreamSize",
                acmStreamSize(self.handle, input_len, &mut output_len, ACM_STREAMSIZEF_SOURCE),
            )?;
        }
        Ok(output_len as usize)
    }

    fn convert(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, ServiceError> {
        let source_len = buffer_len("acmStreamPrepareHeader", input.len())?;
        let destination_len = buffer_len("acmStreamPrepareHeader", output.len())?;
        let mut header = ACMSTREAMHEADER {
            cbStruct: std::mem::size_of::<ACMSTREAMHEADER>() as u32,
            // ACM never writes through pbSrc.
            pbSrc: input.as_ptr() as *mut u8,
            cbSrcLength: source_len,
            pbDst: output.as_mut_ptr(),
            cbDstLength: destination_len,
            ..Default::default()
        };

        // SAFETY: `header` points into `input`/`output`, both borrowed for the
        // whole prepare → convert → unprepare sequence.
        unsafe {
            check(
                "acmStreamPrepareHeader",
                acmStreamPrepareHeader(self.handle, &mut header, 0),
            )?;

            let converted = check(
                "acmStreamConvert",
                acmStreamConvert(self.handle, &mut header, ACM_STREAMCONVERTF_BLOCKALIGN),
            );

            // Unprepare even when the conversion failed.
            let unprepared = check(
                "acmStreamUnprepareHeader",
                acmStreamUnprepareHeader(self.handle, &mut header, 0),
            );

            converted?;
            unprepared?;
        }

        Ok(header.cbDstLengthUsed as usize)
    }
}

impl Drop for AcmStream {
    fn drop(&mut self) {
        // SAFETY: `handle` was returned by acmStreamOpen and is closed only here.
        let result = unsafe { acmStreamClose(self.handle, 0) };
        if result != 0 {
            log::warn!("acmStreamClose failed: {}", result);
        }
    }
}

/// Map an `MMRESULT` to a `ServiceError`.
pub(crate) fn check(operation: &'static str, result: u32) -> Result<(), ServiceError> {
    if result == 0 {
        return Ok(());
    }
    log::error!("{} failed: MMRESULT {}", operation, result);
    Err(ServiceError::new(operation, result))
}

/// ACM buffer lengths are 32-bit.
pub(crate) fn buffer_len(operation: &'static str, len: usize) -> Result<u32, ServiceError> {
    u32::try_from(len).map_err(|_| {
        log::error!("{}: buffer of {} bytes exceeds the 32-bit ACM limit", operation, len);
        // MMSYSERR_INVALPARAM
        ServiceError::new(operation, 11)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn buffer_len_rejects_lengths_above_u32() {
        assert_eq!(buffer_len("acmStreamSize", 4096), Ok(4096));
        assert_eq!(buffer_len("acmStreamSize", u32::MAX as usize), Ok(u32::MAX));

        let err = buffer_len("acmStreamSize", u32::MAX as usize + 1).unwrap_err();
        assert_eq!(err, ServiceError::new("acmStreamSize", 11));
    }
}
