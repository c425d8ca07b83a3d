// Mapper 0 (NROM) - The simplest NES mapper with no bank switching
//
// Memory Layout:
// - CPU $8000-$BFFF: First 16KB of PRG-ROM
// - CPU $C000-$FFFF: Last 16KB of PRG-ROM (or mirror of first 16KB if only 16KB total)
// - PPU $0000-$1FFF: 8KB CHR-ROM or CHR-RAM
//
// Variants:
// - NROM-128: 16KB PRG-ROM (mirrored to fill 32KB space)
// - NROM-256: 32KB PRG-ROM (no mirroring)

use crate::cartridge::Mapper;

/// Mapper 0 implementation (NROM)
///
/// Used by games like Super Mario Bros., Donkey Kong and Balloon Fight.
#[derive(Debug, Clone)]
pub struct Mapper0 {
    prg_banks: u8,
    chr_banks: u8,
}

impl Mapper0 {
    pub fn new(prg_banks: u8, chr_banks: u8) -> Self {
        Mapper0 {
            prg_banks,
            chr_banks,
        }
    }

    /// PRG offset for $8000-$FFFF: 32KB boards use 15 bits, 16KB boards mirror with 14
    fn prg_offset(&self, addr: u16) -> usize {
        let mask = if self.prg_banks > 1 { 0x7FFF } else { 0x3FFF };
        (addr & mask) as usize
    }
}

impl Mapper for Mapper0 {
    fn cpu_map_read(&self, addr: u16) -> Option<usize> {
        (addr >= 0x8000).then(|| self.prg_offset(addr))
    }

    // NROM has no registers; writes land in the PRG image
    fn cpu_map_write(&mut self, addr: u16, _data: u8) -> Option<usize> {
        (addr >= 0x8000).then(|| self.prg_offset(addr))
    }

    fn ppu_map_read(&self, addr: u16) -> Option<usize> {
        (addr <= 0x1FFF).then_some(addr as usize)
    }

    fn ppu_map_write(&mut self, addr: u16) -> Option<usize> {
        (addr <= 0x1FFF && self.chr_banks == 0).then_some(addr as usize)
    }
}
