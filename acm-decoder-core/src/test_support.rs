//! Scriptable codec service for unit tests.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::error::ServiceError;
use crate::models::wave_format::WaveFormat;
use crate::traits::codec_service::{CodecService, ConversionStream};

pub const WAVE_FORMAT_MPEGLAYER3: u16 = 0x0055;

/// MPEG Layer-3 descriptor as a Matroska `A_MS/ACM` track would carry it.
pub fn mpeg_layer3(channels: u16, samples_per_sec: u32) -> WaveFormat {
    WaveFormat {
        format_tag: WAVE_FORMAT_MPEGLAYER3,
        channels,
        samples_per_sec,
        avg_bytes_per_sec: 16000,
        block_align: 1,
        bits_per_sample: 0,
        extensible: None,
        // MPEGLAYER3WAVEFORMAT tail
        extra: vec![1, 0, 2, 0, 0, 0, 0x0A, 0x01, 1, 0, 0x71, 0x05],
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Calls {
    pub suggested: usize,
    pub named: usize,
    pub opened: usize,
    pub sized: usize,
    pub converted: usize,
    pub closed: usize,
}

#[derive(Clone, Default)]
struct Behavior {
    suggestion: Option<Result<WaveFormat, ServiceError>>,
    name: Option<Option<String>>,
    fail_name_lookup: bool,
    fail_open: bool,
    fail_on_first_byte: Option<u8>,
    overreport: bool,
}

/// Deterministic stand-in for a native codec service.
///
/// Its streams emit two bytes per input byte (`b`, `!b`) and report a
/// worst case of four.
pub struct MockCodecService {
    behavior: Behavior,
    calls: Arc<Mutex<Calls>>,
}

impl MockCodecService {
    pub fn new() -> Self {
        Self {
            behavior: Behavior::default(),
            calls: Arc::new(Mutex::new(Calls::default())),
        }
    }

    pub fn with_suggestion(mut self, suggestion: Result<WaveFormat, ServiceError>) -> Self {
        self.behavior.suggestion = Some(suggestion);
        self
    }

    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.behavior.name = Some(name.map(str::to_string));
        self
    }

    pub fn failing_name_lookup(mut self) -> Self {
        self.behavior.fail_name_lookup = true;
        self
    }

    pub fn failing_open(mut self) -> Self {
        self.behavior.fail_open = true;
        self
    }

    /// Fail any conversion whose first input byte equals `byte`.
    pub fn failing_on(mut self, byte: u8) -> Self {
        self.behavior.fail_on_first_byte = Some(byte);
        self
    }

    pub fn overreporting(mut self) -> Self {
        self.behavior.overreport = true;
        self
    }

    pub fn calls(&self) -> Calls {
        *self.calls.lock()
    }
}

impl CodecService for MockCodecService {
    fn suggest_pcm_format(&self, input: &WaveFormat) -> Result<WaveFormat, ServiceError> {
        self.calls.lock().suggested += 1;
        match &self.behavior.suggestion {
            Some(result) => result.clone(),
            None => WaveFormat::pcm(input.channels, input.samples_per_sec, 16)
                .map_err(|_| ServiceError::new("acmFormatSuggest", 11)),
        }
    }

    fn format_tag_name(&self, format_tag: u16) -> Result<Option<String>, ServiceError> {
        self.calls.lock().named += 1;
        if self.behavior.fail_name_lookup {
            return Err(ServiceError::new("acmFormatTagDetails", 11));
        }
        match &self.behavior.name {
            Some(name) => Ok(name.clone()),
            None if format_tag == WAVE_FORMAT_MPEGLAYER3 => Ok(Some("MPEG Layer-3".into())),
            None => Ok(None),
        }
    }

    fn open_stream(
        &self,
        _input: &WaveFormat,
        _output: &WaveFormat,
    ) -> Result<Box<dyn ConversionStream>, ServiceError> {
        if self.behavior.fail_open {
            return Err(ServiceError::new("acmStreamOpen", 512));
        }
        self.calls.lock().opened += 1;
        Ok(Box::new(MockStream {
            calls: Arc::clone(&self.calls),
            fail_on_first_byte: self.behavior.fail_on_first_byte,
            overreport: self.behavior.overreport,
        }))
    }
}

struct MockStream {
    calls: Arc<Mutex<Calls>>,
    fail_on_first_byte: Option<u8>,
    overreport: bool,
}

impl ConversionStream for MockStream {
    fn output_size(&mut self, input_len: usize) -> Result<usize, ServiceError> {
        self.calls.lock().sized += 1;
        Ok(input_len * 4)
    }

    fn convert(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, ServiceError> {
        self.calls.lock().converted += 1;
        if self.fail_on_first_byte.is_some() && input.first().copied() == self.fail_on_first_byte {
            return Err(ServiceError::new("acmStreamConvert", 512));
        }
        for (i, &b) in input.iter().enumerate() {
            output[i * 2] = b;
            output[i * 2 + 1] = !b;
        }
        if self.overreport {
            return Ok(output.len() + 1);
        }
        Ok(input.len() * 2)
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.calls.lock().closed += 1;
    }
}
