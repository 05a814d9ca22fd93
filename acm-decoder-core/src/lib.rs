//! # acm-decoder-core
//!
//! Platform-agnostic packet decoder for audio tagged with a Windows
//! wave-format descriptor.
//!
//! Streams that are already linear PCM or IEEE float (directly or through a
//! `WAVEFORMATEXTENSIBLE` sub-format) are passed through untouched. Any other
//! format is converted by a native codec service implementing
//! `CodecService` (the Windows Audio Compression Manager backend lives in
//! `acm-decoder-windows`).
//!
//! ## Architecture
//!
//! ```text
//! acm-decoder-core (this crate)
//! ├── traits/       ← CodecService, ConversionStream, PacketDecoder, ChunkSink
//! ├── models/       ← WaveFormat, PcmChunk, DecoderInfo, DecoderState, DecoderConfig, DecoderError
//! ├── processing/   ← format classifier, channel layout names, scratch buffer
//! ├── session/      ← ConversionSession, AcmPacketDecoder
//! └── setup/        ← Matroska setup probe, DecoderFactory
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod setup;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types at crate root for convenience.
pub use models::chunk::{ChannelLayout, PcmChunk, SampleFormat};
pub use models::config::DecoderConfig;
pub use models::error::{DecoderError, ServiceError};
pub use models::info::{ChannelsInfo, DecoderInfo, Encoding};
pub use models::state::{DecoderState, PassThroughFormat};
pub use models::wave_format::{ExtensibleFormat, FormatTag, WaveFormat};
pub use processing::channel_layout::{describe as describe_channel_mask, guess_channel_mask};
pub use processing::classifier::{classify, Classification};
pub use processing::scratch_buffer::ScratchBuffer;
pub use session::conversion::ConversionSession;
pub use session::decoder::AcmPacketDecoder;
pub use setup::factory::DecoderFactory;
pub use setup::matroska::{ContainerOwner, MatroskaSetup};
pub use traits::chunk_sink::ChunkSink;
pub use traits::codec_service::{CodecService, ConversionStream};
pub use traits::packet_decoder::PacketDecoder;
