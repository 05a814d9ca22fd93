/// Upper bound accepted for `initial_scratch_capacity` (64 MiB).
const MAX_INITIAL_SCRATCH_CAPACITY: usize = 64 * 1024 * 1024;

/// Configuration for a packet decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Reject packets that are not a whole number of source blocks before
    /// handing them to the conversion service (default: true).
    pub enforce_block_alignment: bool,

    /// Bytes to preallocate for the conversion scratch buffer (default: 0).
    pub initial_scratch_capacity: usize,

    /// Largest packet accepted on the conversion path (None = unlimited).
    pub max_packet_size: Option<usize>,
}

impl DecoderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_scratch_capacity > MAX_INITIAL_SCRATCH_CAPACITY {
            return Err(format!(
                "initial scratch capacity too large: {} bytes",
                self.initial_scratch_capacity
            ));
        }
        if self.max_packet_size == Some(0) {
            return Err("max packet size must be positive".into());
        }
        Ok(())
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            enforce_block_alignment: true,
            initial_scratch_capacity: 0,
            max_packet_size: None,
        }
    }
}
