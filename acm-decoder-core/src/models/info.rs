use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::DecoderError;

/// Whether the source stream was compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Lossless,
    Lossy,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lossless => "lossless",
            Self::Lossy => "lossy",
        }
    }
}

/// Channel description reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelsInfo {
    /// Bare channel count (no explicit speaker mask).
    Count(u16),
    /// Rendered speaker layout, e.g. "5.1".
    Layout(String),
}

/// Stream information exposed through `get_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderInfo {
    pub codec: String,
    pub encoding: Encoding,
    pub sample_rate: u32,
    pub channels: ChannelsInfo,
    /// Only claimed for PCM pass-through.
    pub bits_per_sample: Option<u16>,
}

impl DecoderInfo {
    /// Render as host `file_info` key/value pairs.
    pub fn to_info_fields(&self) -> BTreeMap<&'static str, String> {
        let mut fields = BTreeMap::new();
        fields.insert("codec", self.codec.clone());
        fields.insert("encoding", self.encoding.as_str().to_string());
        fields.insert("samplerate", self.sample_rate.to_string());
        let channels = match &self.channels {
            ChannelsInfo::Count(n) => n.to_string(),
            ChannelsInfo::Layout(desc) => desc.clone(),
        };
        fields.insert("channels", channels);
        if let Some(bits) = self.bits_per_sample {
            fields.insert("bitspersample", bits.to_string());
        }
        fields
    }

    /// Serialize for diagnostics export.
    pub fn to_json(&self) -> Result<String, DecoderError> {
        serde_json::to_string(self)
            .map_err(|e| DecoderError::Serialization(format!("decoder info: {}", e)))
    }
}
