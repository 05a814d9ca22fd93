use thiserror::Error;

/// Errors surfaced by the packet decoder.
///
/// Negotiation failures are fatal for the stream; conversion failures only
/// fail the packet being decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecoderError {
    #[error("format negotiation failed: {0}")]
    FormatNegotiation(String),

    #[error("conversion failed: {0}")]
    Conversion(String),

    #[error("malformed setup: {0}")]
    MalformedSetup(String),

    #[error("invalid wave format: {0}")]
    InvalidFormat(String),

    #[error("configuration failed: {0}")]
    Configuration(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("decoder not opened")]
    NotOpened,
}

/// Failure reported by a native codec conversion service call.
///
/// `code` carries the raw result (an `MMRESULT` on Windows).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{operation} failed (code {code})")]
pub struct ServiceError {
    pub operation: &'static str,
    pub code: u32,
}

impl ServiceError {
    pub fn new(operation: &'static str, code: u32) -> Self {
        Self { operation, code }
    }
}
