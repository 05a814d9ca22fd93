/// Host-side receiver of decoded PCM.
///
/// Mirrors the two population calls of a host audio chunk: one for
/// fixed-point data and one for floating-point data. Floating-point
/// samples are always signed.
pub trait ChunkSink {
    fn set_data_fixedpoint(
        &mut self,
        data: &[u8],
        sample_rate: u32,
        channels: u16,
        bits_per_sample: u16,
        signed: bool,
        channel_mask: u32,
    );

    fn set_data_floatingpoint(
        &mut self,
        data: &[u8],
        sample_rate: u32,
        channels: u16,
        bits_per_sample: u16,
        channel_mask: u32,
    );
}
