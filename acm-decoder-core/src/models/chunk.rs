use crate::traits::chunk_sink::ChunkSink;

/// Sample representation of decoded PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    Integer,
    Float,
}

/// Channel layout attached to a decoded chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Mask taken from the stream's extensible descriptor.
    Explicit(u32),
    /// Canonical mask guessed from the channel count.
    Guessed(u32),
}

impl ChannelLayout {
    pub fn mask(&self) -> u32 {
        match self {
            Self::Explicit(mask) | Self::Guessed(mask) => *mask,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }
}

/// One block of decoded, interleaved PCM.
///
/// Borrows either the caller's packet (pass-through) or the decoder's
/// scratch buffer (conversion), so it must be consumed before the next
/// `decode` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmChunk<'a> {
    pub data: &'a [u8],
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_format: SampleFormat,
    pub signed: bool,
    pub layout: ChannelLayout,
}

impl PcmChunk<'_> {
    /// Bytes per interleaved frame, or 0 when the format is degenerate.
    pub fn frame_size(&self) -> usize {
        self.channels as usize * (self.bits_per_sample as usize).div_ceil(8)
    }

    /// Whole frames contained in `data`.
    pub fn frames(&self) -> usize {
        match self.frame_size() {
            0 => 0,
            size => self.data.len() / size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Hand the chunk to the host through the call matching its representation.
    pub fn write_to(&self, sink: &mut dyn ChunkSink) {
        match self.sample_format {
            SampleFormat::Integer => sink.set_data_fixedpoint(
                self.data,
                self.sample_rate,
                self.channels,
                self.bits_per_sample,
                self.signed,
                self.layout.mask(),
            ),
            SampleFormat::Float => sink.set_data_floatingpoint(
                self.data,
                self.sample_rate,
                self.channels,
                self.bits_per_sample,
                self.layout.mask(),
            ),
        }
    }
}
