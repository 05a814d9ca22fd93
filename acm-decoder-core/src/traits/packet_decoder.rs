use uuid::Uuid;

use crate::models::chunk::PcmChunk;
use crate::models::error::DecoderError;
use crate::models::info::DecoderInfo;
use crate::models::wave_format::WaveFormat;

/// Host-facing packet decoder interface.
///
/// Calls are serial on one instance: `open` once, then `decode` per packet.
pub trait PacketDecoder: Send {
    /// Choose the decode path for `format`. Transitions: unopened → opened.
    fn open(&mut self, format: &WaveFormat) -> Result<(), DecoderError>;

    /// Decode one packet.
    ///
    /// A failure affects only this packet; the decoder stays usable.
    fn decode<'a>(&'a mut self, packet: &'a [u8]) -> Result<PcmChunk<'a>, DecoderError>;

    /// Stream description for the host's info panel.
    fn get_info(&self) -> Result<DecoderInfo, DecoderError>;

    /// Packets are independently decodable, so there is nothing to flush.
    fn reset_after_seek(&mut self) {}

    /// Number of preceding packets needed to decode a packet after a seek.
    fn max_frame_dependency(&self) -> u32 {
        0
    }

    /// Same as [`max_frame_dependency`](Self::max_frame_dependency), in seconds.
    fn max_frame_dependency_time(&self) -> f64 {
        0.0
    }

    fn analyze_first_frame_supported(&self) -> bool {
        false
    }

    fn analyze_first_frame(&mut self, _packet: &[u8]) {}

    /// Host stream-property hook. Unrecognized properties return 0.
    fn set_stream_property(&mut self, _property: Uuid, _param: usize, _data: &[u8]) -> usize {
        0
    }
}
