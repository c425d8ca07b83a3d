// Flat 64KB memory for running the CPU without the rest of the console

use super::MemoryMappedDevice;

/// Size of the full CPU address space
const ADDRESS_SPACE: usize = 0x10000;

/// Plain RAM over the whole 16-bit address space
///
/// No mirroring and no registers: every address is an ordinary byte. Used
/// for standalone CPU tests, the 6502 functional test and benchmarks.
#[derive(Clone)]
pub struct FlatMemory {
    bytes: Box<[u8; ADDRESS_SPACE]>,
}

impl FlatMemory {
    /// Create a zero-filled memory
    pub fn new() -> Self {
        FlatMemory {
            bytes: Box::new([0; ADDRESS_SPACE]),
        }
    }

    /// Copy `data` into memory starting at `addr`
    ///
    /// Bytes that would run past $FFFF are dropped.
    pub fn load(&mut self, addr: u16, data: &[u8]) {
        let start = addr as usize;
        let len = data.len().min(ADDRESS_SPACE - start);
        self.bytes[start..start + len].copy_from_slice(&data[..len]);
    }

    /// Borrow the whole address space
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory")
            .field("size", &ADDRESS_SPACE)
            .finish()
    }
}

impl MemoryMappedDevice for FlatMemory {
    #[inline]
    fn read(&mut self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) {
        self.bytes[addr as usize] = data;
    }

    #[inline]
    fn peek(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }
}
