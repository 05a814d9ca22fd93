//! # acm-decoder-windows
//!
//! Windows Audio Compression Manager backend for acm-decoder.
//!
//! Provides:
//! - `AcmCodecService`: format suggestion, tag names, and stream creation via msacm32
//! - `AcmStream`: one open `HACMSTREAM`, closed on drop
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use acm_decoder_core::{AcmPacketDecoder, PacketDecoder, WaveFormat};
//! use acm_decoder_windows::AcmCodecService;
//!
//! let mut decoder = AcmPacketDecoder::new(Arc::new(AcmCodecService::new()));
//! decoder.open(&WaveFormat::parse(&codec_private)?)?;
//! let chunk = decoder.decode(&packet)?;
//! ```

#[cfg(target_os = "windows")]
pub mod acm_service;
#[cfg(target_os = "windows")]
pub mod acm_stream;

#[cfg(target_os = "windows")]
pub use acm_service::AcmCodecService;
#[cfg(target_os = "windows")]
pub use acm_stream::AcmStream;
