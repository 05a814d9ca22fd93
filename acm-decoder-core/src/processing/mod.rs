pub mod channel_layout;
pub mod classifier;
pub mod scratch_buffer;
