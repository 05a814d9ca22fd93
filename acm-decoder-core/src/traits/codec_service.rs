use crate::models::error::ServiceError;
use crate::models::wave_format::WaveFormat;

/// Native codec conversion service (the Windows Audio Compression Manager
/// or a test double).
///
/// Implemented by:
/// - `AcmCodecService` (Windows)
///
/// A service may be shared by many decoders; each decoder exclusively owns
/// the streams it opens.
pub trait CodecService: Send + Sync {
    /// Suggest an integer PCM format that `input` can be converted to,
    /// keeping its channel count and sample rate.
    fn suggest_pcm_format(&self, input: &WaveFormat) -> Result<WaveFormat, ServiceError>;

    /// Display name registered for `format_tag`, if the service knows one.
    fn format_tag_name(&self, format_tag: u16) -> Result<Option<String>, ServiceError>;

    /// Open a conversion stream from `input` to `output`.
    fn open_stream(
        &self,
        input: &WaveFormat,
        output: &WaveFormat,
    ) -> Result<Box<dyn ConversionStream>, ServiceError>;
}

/// An open native conversion stream.
///
/// Implementations release their native handle in `Drop`; the handle is
/// therefore closed exactly once, when the owning session goes away.
pub trait ConversionStream: Send {
    /// Worst-case output size in bytes for `input_len` source bytes.
    fn output_size(&mut self, input_len: usize) -> Result<usize, ServiceError>;

    /// Convert one block-aligned run of source bytes into `output`.
    ///
    /// Returns the number of output bytes actually produced, which may be
    /// less than [`output_size`](Self::output_size) reported.
    fn convert(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, ServiceError>;
}
