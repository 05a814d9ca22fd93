use std::sync::Arc;

use crate::models::config::DecoderConfig;
use crate::models::error::DecoderError;
use crate::session::decoder::AcmPacketDecoder;
use crate::setup::matroska::{probe, ContainerOwner, MatroskaSetup};
use crate::traits::codec_service::CodecService;
use crate::traits::packet_decoder::PacketDecoder;

/// Creates one decoder per applicable stream.
pub struct DecoderFactory {
    service: Arc<dyn CodecService>,
    config: DecoderConfig,
}

impl DecoderFactory {
    pub fn new(service: Arc<dyn CodecService>) -> Self {
        Self {
            service,
            config: DecoderConfig::default(),
        }
    }

    pub fn with_config(service: Arc<dyn CodecService>, config: DecoderConfig) -> Result<Self, DecoderError> {
        config.validate().map_err(DecoderError::Configuration)?;
        Ok(Self { service, config })
    }

    /// Probe the setup blob and, if it is ours, open a decoder for it.
    ///
    /// Returns `Ok(None)` when the blob is not applicable. Errors are
    /// reserved for applicable streams that cannot be opened.
    pub fn create(
        &self,
        owner: ContainerOwner,
        setup: &MatroskaSetup<'_>,
        setup_size: usize,
    ) -> Result<Option<AcmPacketDecoder>, DecoderError> {
        if let Err(e) = probe(owner, setup, setup_size) {
            log::debug!("Declining setup: {}", e);
            return Ok(None);
        }

        let format = setup.wave_format()?;
        let mut decoder = AcmPacketDecoder::with_config(Arc::clone(&self.service), self.config.clone())?;
        decoder.open(&format)?;
        Ok(Some(decoder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::error::ServiceError;
    use crate::models::wave_format::WaveFormat;
    use crate::setup::matroska::MATROSKA_SETUP_SIZE;
    use crate::test_support::{mpeg_layer3, MockCodecService};

    fn acm_setup(private: &[u8]) -> MatroskaSetup<'_> {
        MatroskaSetup {
            codec_id: b"A_MS/ACM",
            sample_rate: 44100,
            sample_rate_output: 44100,
            channels: 2,
            codec_private: private,
        }
    }

    #[test]
    fn declines_foreign_setups_without_error() {
        let factory = DecoderFactory::new(Arc::new(MockCodecService::new()));
        let private = WaveFormat::pcm(2, 44100, 16).unwrap().to_bytes();
        let mut setup = acm_setup(&private);
        setup.codec_id = b"A_OPUS";

        let created = factory
            .create(ContainerOwner::Matroska, &setup, MATROSKA_SETUP_SIZE)
            .unwrap();
        assert!(created.is_none());
    }

    #[test]
    fn opens_pass_through_decoder() {
        let factory = DecoderFactory::new(Arc::new(MockCodecService::new()));
        let private = WaveFormat::pcm(2, 44100, 16).unwrap().to_bytes();

        let decoder = factory
            .create(ContainerOwner::Matroska, &acm_setup(&private), MATROSKA_SETUP_SIZE)
            .unwrap()
            .expect("applicable setup");
        assert!(decoder.state().is_pass_through());
    }

    #[test]
    fn opens_converting_decoder() {
        let factory = DecoderFactory::new(Arc::new(MockCodecService::new()));
        let private = mpeg_layer3(2, 44100).to_bytes();

        let decoder = factory
            .create(ContainerOwner::Matroska, &acm_setup(&private), MATROSKA_SETUP_SIZE)
            .unwrap()
            .expect("applicable setup");
        assert!(decoder.state().is_converting());
        assert_eq!(decoder.get_info().unwrap().codec, "MPEG Layer-3");
    }

    #[test]
    fn propagates_negotiation_failure() {
        let service =
            MockCodecService::new().with_suggestion(Err(ServiceError::new("acmFormatSuggest", 512)));
        let factory = DecoderFactory::new(Arc::new(service));
        let private = mpeg_layer3(2, 44100).to_bytes();

        let result = factory.create(ContainerOwner::Matroska, &acm_setup(&private), MATROSKA_SETUP_SIZE);
        assert!(matches!(result, Err(DecoderError::FormatNegotiation(_))));
    }

    #[test]
    fn propagates_malformed_descriptor() {
        let factory = DecoderFactory::new(Arc::new(MockCodecService::new()));
        let result = factory.create(ContainerOwner::Matroska, &acm_setup(&[1, 0, 2]), MATROSKA_SETUP_SIZE);
        assert!(matches!(result, Err(DecoderError::InvalidFormat(_))));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = DecoderConfig {
            max_packet_size: Some(0),
            ..Default::default()
        };
        let result = DecoderFactory::with_config(Arc::new(MockCodecService::new()), config);
        assert!(matches!(result, Err(DecoderError::Configuration(_))));
    }

    #[test]
    fn pcm_track_with_stale_cb_size_passes_through() {
        let mut private = WaveFormat::pcm(2, 44100, 16).unwrap().to_bytes();
        private[16..18].copy_from_slice(&2u16.to_le_bytes());

        let factory = DecoderFactory::new(Arc::new(MockCodecService::new()));
        let decoder = factory
            .create(ContainerOwner::Matroska, &acm_setup(&private), MATROSKA_SETUP_SIZE)
            .unwrap()
            .expect("ACM setup accepted");
        assert!(decoder.state().is_pass_through());
    }
}
