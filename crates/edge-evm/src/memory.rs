//! EVM memory implementation

use primitive_types::U256;

/// EVM memory (byte-addressable, grows in 32-byte words, never shrinks)
///
/// Callers expand memory through [`Memory::resize`] before touching a
/// range; the accessors index directly and assume the range is covered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create new empty memory
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Get current memory size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no memory has been touched yet
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current size in 32-byte words
    pub fn words(&self) -> usize {
        self.data.len() / 32
    }

    /// Grow to cover `end` bytes, rounded up to the next word boundary.
    /// Returns the new length; memory never shrinks.
    pub fn resize(&mut self, end: usize) -> usize {
        let aligned = end.div_ceil(32) * 32;
        if aligned > self.data.len() {
            self.data.resize(aligned, 0);
        }
        self.data.len()
    }

    /// Load a 32-byte word from memory
    pub fn load(&self, offset: usize) -> U256 {
        U256::from_big_endian(&self.data[offset..offset + 32])
    }

    /// Store a 32-byte word to memory
    pub fn store(&mut self, offset: usize, value: U256) {
        value.to_big_endian(&mut self.data[offset..offset + 32]);
    }

    /// Store a single byte to memory
    pub fn store8(&mut self, offset: usize, value: u8) {
        self.data[offset] = value;
    }

    /// Borrow a byte range
    pub fn slice(&self, offset: usize, size: usize) -> &[u8] {
        if size == 0 {
            return &[];
        }
        &self.data[offset..offset + size]
    }

    /// Store a byte slice to memory
    pub fn store_slice(&mut self, offset: usize, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.data[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Copy `size` bytes of `source` starting at `source_offset` into memory
    /// at `offset`, zero-filling whatever lies past the end of `source`
    pub fn copy_padded(&mut self, offset: usize, source: &[u8], source_offset: usize, size: usize) {
        if size == 0 {
            return;
        }
        let target = &mut self.data[offset..offset + size];
        let available = source.len().saturating_sub(source_offset).min(size);
        if available > 0 {
            target[..available].copy_from_slice(&source[source_offset..source_offset + available]);
        }
        target[available..].fill(0);
    }

    /// Get raw data slice
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_resize() {
        let mut mem = Memory::new();
        assert_eq!(mem.len(), 0);

        mem.resize(32);
        assert_eq!(mem.len(), 32);

        mem.resize(64);
        assert_eq!(mem.len(), 64);

        // Aligned to 32 bytes
        mem.resize(65);
        assert_eq!(mem.len(), 96);
        assert_eq!(mem.words(), 3);
    }

    #[test]
    fn test_memory_store_load() {
        let mut mem = Memory::new();
        let value = U256::from(0x1234567890ABCDEFu64);

        mem.resize(32);
        mem.store(0, value);
        assert_eq!(mem.load(0), value);
        assert_eq!(mem.data()[31], 0xEF);
    }

    #[test]
    fn test_memory_store8() {
        let mut mem = Memory::new();
        mem.resize(1);
        mem.store8(0, 0x42);
        assert_eq!(mem.data()[0], 0x42);
        assert_eq!(mem.len(), 32);
    }

    #[test]
    fn test_memory_slice() {
        let mut mem = Memory::new();
        mem.resize(5);
        mem.store_slice(0, &[1, 2, 3, 4, 5]);

        assert_eq!(mem.slice(0, 5), &[1, 2, 3, 4, 5]);
        assert_eq!(mem.slice(3, 4), &[4, 5, 0, 0]);
        assert!(mem.slice(1000, 0).is_empty());
    }

    // ==================== Extended Memory Tests ====================

    #[test]
    fn test_memory_no_shrink() {
        let mut mem = Memory::new();
        mem.resize(100);
        let original = mem.len();

        assert_eq!(mem.resize(10), original);
        assert_eq!(mem.len(), original);
    }

    #[test]
    fn test_memory_resize_with_offset() {
        let mut mem = Memory::new();
        // offset=10, size=30 -> needs 40 bytes -> aligns to 64
        mem.resize(10 + 30);
        assert_eq!(mem.len(), 64);
    }

    #[test]
    fn test_memory_copy_padded() {
        let mut mem = Memory::new();
        mem.resize(32);
        mem.store_slice(0, &[0xAA; 8]);

        mem.copy_padded(0, &[1, 2, 3], 1, 6);
        assert_eq!(mem.slice(0, 8), &[2, 3, 0, 0, 0, 0, 0xAA, 0xAA]);
    }

    #[test]
    fn test_memory_copy_padded_source_offset_past_end() {
        let mut mem = Memory::new();
        mem.resize(32);
        mem.store_slice(0, &[0xFF; 4]);

        mem.copy_padded(0, &[1, 2, 3], 100, 4);
        assert_eq!(mem.slice(0, 4), &[0, 0, 0, 0]);
    }
}
