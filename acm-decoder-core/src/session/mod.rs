pub mod conversion;
pub mod decoder;
