pub mod chunk_sink;
pub mod codec_service;
pub mod packet_decoder;
