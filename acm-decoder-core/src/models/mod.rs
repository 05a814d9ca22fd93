pub mod chunk;
pub mod config;
pub mod error;
pub mod info;
pub mod state;
pub mod wave_format;
