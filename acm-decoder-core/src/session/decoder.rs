use std::sync::Arc;

use crate::models::chunk::{PcmChunk, SampleFormat};
use crate::models::config::DecoderConfig;
use crate::models::error::DecoderError;
use crate::models::info::{ChannelsInfo, DecoderInfo, Encoding};
use crate::models::state::{DecoderState, PassThroughFormat};
use crate::models::wave_format::WaveFormat;
use crate::processing::channel_layout;
use crate::processing::classifier::classify;
use crate::session::conversion::ConversionSession;
use crate::traits::codec_service::CodecService;
use crate::traits::packet_decoder::PacketDecoder;

/// Packet decoder for wave-format tagged audio.
///
/// Streams that are already PCM or IEEE float are handed through untouched;
/// everything else is converted by the native codec service. The path is
/// picked once in `open`:
/// ```text
///                      ┌→ PassThrough ── packet bytes ──────────────→ PcmChunk
/// open → classify(fmt) ┤
///                      └→ Converting ─── ConversionSession::convert → PcmChunk
/// ```
pub struct AcmPacketDecoder {
    service: Arc<dyn CodecService>,
    config: DecoderConfig,
    state: DecoderState,
}

impl AcmPacketDecoder {
    pub fn new(service: Arc<dyn CodecService>) -> Self {
        Self {
            service,
            config: DecoderConfig::default(),
            state: DecoderState::Unopened,
        }
    }

    pub fn with_config(service: Arc<dyn CodecService>, config: DecoderConfig) -> Result<Self, DecoderError> {
        config.validate().map_err(DecoderError::Configuration)?;
        Ok(Self {
            service,
            config,
            state: DecoderState::Unopened,
        })
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// Capacity of the conversion scratch buffer, when converting.
    pub fn scratch_capacity(&self) -> Option<usize> {
        match &self.state {
            DecoderState::Converting(session) => Some(session.scratch_capacity()),
            _ => None,
        }
    }
}

impl PacketDecoder for AcmPacketDecoder {
    /// Classify `format` and set up the matching decode path.
    ///
    /// Any previous state (and its native stream) is released first, so a
    /// failed open leaves the decoder unopened.
    fn open(&mut self, format: &WaveFormat) -> Result<(), DecoderError> {
        self.state = DecoderState::Unopened;

        let classification = classify(format);
        if classification.is_pcm {
            log::info!(
                "PCM pass-through: {} Hz, {} ch, {} bit {:?}",
                format.samples_per_sec,
                format.channels,
                format.bits_per_sample,
                classification.sample_format
            );
            self.state = DecoderState::PassThrough(PassThroughFormat {
                sample_rate: format.samples_per_sec,
                channels: format.channels,
                bits_per_sample: format.bits_per_sample,
                sample_format: classification.sample_format,
                channel_mask: classification.channel_mask,
            });
            return Ok(());
        }

        let session = ConversionSession::open(
            self.service.as_ref(),
            format,
            classification.channel_mask,
            &self.config,
        )
        .inspect_err(|e| log::error!("Open failed for tag 0x{:04X}: {}", format.format_tag, e))?;
        self.state = DecoderState::Converting(session);
        Ok(())
    }

    fn decode<'a>(&'a mut self, packet: &'a [u8]) -> Result<PcmChunk<'a>, DecoderError> {
        match &mut self.state {
            DecoderState::Unopened => Err(DecoderError::NotOpened),
            DecoderState::PassThrough(format) => Ok(PcmChunk {
                data: packet,
                sample_rate: format.sample_rate,
                channels: format.channels,
                bits_per_sample: format.bits_per_sample,
                sample_format: format.sample_format,
                // 8-bit WAVE PCM is offset binary
                signed: format.sample_format == SampleFormat::Float || format.bits_per_sample != 8,
                layout: format.layout(),
            }),
            DecoderState::Converting(session) => {
                let layout = session.layout();
                let output = session.output_format();
                let (sample_rate, channels, bits_per_sample) =
                    (output.samples_per_sec, output.channels, output.bits_per_sample);

                let data = session
                    .convert(packet)
                    .inspect_err(|e| log::warn!("Dropping packet of {} bytes: {}", packet.len(), e))?;

                Ok(PcmChunk {
                    data,
                    sample_rate,
                    channels,
                    bits_per_sample,
                    sample_format: SampleFormat::Integer,
                    signed: true,
                    layout,
                })
            }
        }
    }

    fn get_info(&self) -> Result<DecoderInfo, DecoderError> {
        match &self.state {
            DecoderState::Unopened => Err(DecoderError::NotOpened),
            DecoderState::PassThrough(format) => Ok(DecoderInfo {
                codec: match format.sample_format {
                    SampleFormat::Integer => "PCM".into(),
                    SampleFormat::Float => "PCM (floating point)".into(),
                },
                encoding: Encoding::Lossless,
                sample_rate: format.sample_rate,
                channels: channels_info(format.channel_mask, format.channels),
                bits_per_sample: Some(format.bits_per_sample),
            }),
            DecoderState::Converting(session) => Ok(DecoderInfo {
                codec: session.codec_name().to_string(),
                encoding: Encoding::Lossy,
                sample_rate: session.output_format().samples_per_sec,
                channels: channels_info(session.channel_mask(), session.output_format().channels),
                bits_per_sample: None,
            }),
        }
    }
}

fn channels_info(mask: Option<u32>, channels: u16) -> ChannelsInfo {
    match mask {
        Some(mask) => ChannelsInfo::Layout(channel_layout::describe(mask)),
        None => ChannelsInfo::Count(channels),
    }
}
