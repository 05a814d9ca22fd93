use super::chunk::{ChannelLayout, SampleFormat};
use crate::processing::channel_layout::guess_channel_mask;
use crate::session::conversion::ConversionSession;

/// Resolved format of a stream that is already PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassThroughFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub sample_format: SampleFormat,
    pub channel_mask: Option<u32>,
}

impl PassThroughFormat {
    pub fn layout(&self) -> ChannelLayout {
        channel_layout(self.channel_mask, self.channels)
    }
}

/// Decoder state machine.
///
/// State transitions:
/// ```text
/// unopened → pass_through
/// unopened → converting
/// ```
/// The path is chosen once at open and never re-evaluated per packet.
#[derive(Debug, Default)]
pub enum DecoderState {
    #[default]
    Unopened,
    PassThrough(PassThroughFormat),
    Converting(ConversionSession),
}

impl DecoderState {
    pub fn is_opened(&self) -> bool {
        !matches!(self, Self::Unopened)
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough(_))
    }

    pub fn is_converting(&self) -> bool {
        matches!(self, Self::Converting(_))
    }
}

/// Explicit mask when present, otherwise the canonical guess for `channels`.
pub(crate) fn channel_layout(mask: Option<u32>, channels: u16) -> ChannelLayout {
    match mask {
        Some(mask) => ChannelLayout::Explicit(mask),
        None => ChannelLayout::Guessed(guess_channel_mask(channels)),
    }
}
