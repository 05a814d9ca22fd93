/// Grow-only byte buffer reused across conversion calls.
///
/// Capacity only ever increases, so a stream of similarly-sized packets
/// settles into a single allocation.
#[derive(Debug, Default)]
pub struct ScratchBuffer {
    buffer: Vec<u8>,
}

impl ScratchBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity],
        }
    }

    /// Make at least `len` bytes available and return the whole buffer.
    pub fn ensure(&mut self, len: usize) -> &mut [u8] {
        if self.buffer.len() < len {
            log::debug!("Growing scratch buffer: {} -> {} bytes", self.buffer.len(), len);
            self.buffer.resize(len, 0);
        }
        &mut self.buffer
    }

    /// First `len` bytes of the buffer. `len` must not exceed [`capacity`](Self::capacity).
    pub fn filled(&self, len: usize) -> &[u8] {
        &self.buffer[..len]
    }

    /// Usable size in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}
