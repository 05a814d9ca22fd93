use std::fmt;

use crate::models::chunk::ChannelLayout;
use crate::models::config::DecoderConfig;
use crate::models::error::DecoderError;
use crate::models::state::channel_layout;
use crate::models::wave_format::{FormatTag, WaveFormat};
use crate::processing::scratch_buffer::ScratchBuffer;
use crate::traits::codec_service::{CodecService, ConversionStream};

/// One negotiated native conversion stream plus its reusable output buffer.
///
/// Owns the stream exclusively; dropping the session releases the native
/// handle exactly once.
pub struct ConversionSession {
    stream: Box<dyn ConversionStream>,
    input: WaveFormat,
    output: WaveFormat,
    codec_name: String,
    channel_mask: Option<u32>,
    scratch: ScratchBuffer,
    enforce_block_alignment: bool,
    max_packet_size: Option<usize>,
}

impl ConversionSession {
    /// Negotiate a PCM output format with `service` and open the stream.
    ///
    /// Sequence:
    /// 1. Ask the service for a PCM format with the input's channels and rate
    /// 2. Resolve the codec display name (absence tolerated)
    /// 3. Open the conversion stream input → output
    pub fn open(
        service: &dyn CodecService,
        input: &WaveFormat,
        channel_mask: Option<u32>,
        config: &DecoderConfig,
    ) -> Result<Self, DecoderError> {
        let output = service.suggest_pcm_format(input).map_err(|e| {
            DecoderError::FormatNegotiation(format!(
                "no PCM format for tag 0x{:04X}: {}",
                input.format_tag, e
            ))
        })?;
        check_suggestion(input, &output)?;

        let codec_name = match service.format_tag_name(input.format_tag) {
            Ok(Some(name)) => name,
            Ok(None) => {
                log::warn!("No display name for format tag 0x{:04X}", input.format_tag);
                String::new()
            }
            Err(e) => {
                log::warn!("Format tag lookup for 0x{:04X} failed: {}", input.format_tag, e);
                String::new()
            }
        };

        let stream = service.open_stream(input, &output).map_err(|e| {
            DecoderError::FormatNegotiation(format!("stream open rejected: {}", e))
        })?;

        let channel_mask = channel_mask.filter(|mask| {
            let matches = mask.count_ones() == output.channels as u32;
            if !matches {
                log::warn!(
                    "Ignoring channel mask 0x{:X}: {} channels negotiated",
                    mask,
                    output.channels
                );
            }
            matches
        });

        log::info!(
            "Opened conversion: tag 0x{:04X} ({}) -> PCM {} Hz, {} ch, {} bit",
            input.format_tag,
            codec_name,
            output.samples_per_sec,
            output.channels,
            output.bits_per_sample
        );

        Ok(Self {
            stream,
            input: input.clone(),
            output,
            codec_name,
            channel_mask,
            scratch: ScratchBuffer::with_capacity(config.initial_scratch_capacity),
            enforce_block_alignment: config.enforce_block_alignment,
            max_packet_size: config.max_packet_size,
        })
    }

    /// Convert one packet. Returns the bytes the service actually produced.
    pub fn convert(&mut self, input: &[u8]) -> Result<&[u8], DecoderError> {
        if input.is_empty() {
            return Ok(&[]);
        }
        if let Some(max) = self.max_packet_size {
            if input.len() > max {
                return Err(DecoderError::Conversion(format!(
                    "packet of {} bytes exceeds limit of {}",
                    input.len(),
                    max
                )));
            }
        }

        let block_align = self.input.block_align as usize;
        if self.enforce_block_alignment && block_align > 0 && input.len() % block_align != 0 {
            return Err(DecoderError::Conversion(format!(
                "packet of {} bytes is not a multiple of block align {}",
                input.len(),
                block_align
            )));
        }

        let required = self
            .stream
            .output_size(input.len())
            .map_err(|e| DecoderError::Conversion(e.to_string()))?;

        let output = self.scratch.ensure(required);
        let available = output.len();
        let produced = self
            .stream
            .convert(input, output)
            .map_err(|e| DecoderError::Conversion(e.to_string()))?;
        if produced > available {
            return Err(DecoderError::Conversion(format!(
                "service reported {} bytes written into a {} byte buffer",
                produced, available
            )));
        }

        Ok(self.scratch.filled(produced))
    }

    pub fn input_format(&self) -> &WaveFormat {
        &self.input
    }

    pub fn output_format(&self) -> &WaveFormat {
        &self.output
    }

    /// Display name of the source codec; empty when the service has none.
    pub fn codec_name(&self) -> &str {
        &self.codec_name
    }

    pub fn channel_mask(&self) -> Option<u32> {
        self.channel_mask
    }

    pub fn layout(&self) -> ChannelLayout {
        channel_layout(self.channel_mask, self.output.channels)
    }

    pub fn scratch_capacity(&self) -> usize {
        self.scratch.capacity()
    }
}

impl fmt::Debug for ConversionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionSession")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("codec_name", &self.codec_name)
            .field("channel_mask", &self.channel_mask)
            .field("scratch_capacity", &self.scratch.capacity())
            .finish_non_exhaustive()
    }
}

fn check_suggestion(input: &WaveFormat, output: &WaveFormat) -> Result<(), DecoderError> {
    if output.tag() != FormatTag::Pcm || output.bits_per_sample == 0 {
        return Err(DecoderError::FormatNegotiation(format!(
            "service suggested a non-PCM format (tag 0x{:04X}, {} bit)",
            output.format_tag, output.bits_per_sample
        )));
    }
    if output.channels != input.channels || output.samples_per_sec != input.samples_per_sec {
        return Err(DecoderError::FormatNegotiation(format!(
            "suggested {} Hz / {} ch does not match input {} Hz / {} ch",
            output.samples_per_sec, output.channels, input.samples_per_sec, input.channels
        )));
    }
    Ok(())
}
