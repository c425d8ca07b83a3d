// Mapper 3 (CNROM) - Fixed PRG-ROM with switchable 8KB CHR-ROM
//
// Memory Layout:
// - CPU $8000-$FFFF: 16KB or 32KB PRG-ROM, same masking as NROM
// - PPU $0000-$1FFF: 8KB CHR-ROM bank selected by writes to $8000-$FFFF
//
// Games using Mapper 3: Arkanoid, Gradius, Solomon's Key

use crate::cartridge::{Mapper, CHR_BANK_SIZE};

/// Mapper 3 implementation (CNROM)
#[derive(Debug, Clone)]
pub struct Mapper3 {
    prg_banks: u8,
    chr_banks: u8,
    chr_bank: u8,
}

impl Mapper3 {
    pub fn new(prg_banks: u8, chr_banks: u8) -> Self {
        Mapper3 {
            prg_banks,
            chr_banks,
            chr_bank: 0,
        }
    }
}

impl Mapper for Mapper3 {
    fn cpu_map_read(&self, addr: u16) -> Option<usize> {
        let mask = if self.prg_banks > 1 { 0x7FFF } else { 0x3FFF };
        (addr >= 0x8000).then_some((addr & mask) as usize)
    }

    fn cpu_map_write(&mut self, addr: u16, data: u8) -> Option<usize> {
        if addr >= 0x8000 {
            self.chr_bank = (data & 0x03) % self.chr_banks.max(1);
        }
        None
    }

    fn ppu_map_read(&self, addr: u16) -> Option<usize> {
        (addr <= 0x1FFF).then_some(self.chr_bank as usize * CHR_BANK_SIZE + addr as usize)
    }

    /// Only claimed for CHR RAM images
    fn ppu_map_write(&mut self, addr: u16) -> Option<usize> {
        (addr <= 0x1FFF && self.chr_banks == 0).then_some(addr as usize)
    }

    fn reset(&mut self) {
        self.chr_bank = 0;
    }
}
