// Mapper 2 (UxROM) - Switchable PRG-ROM with fixed last bank
//
// Memory Layout:
// - CPU $8000-$BFFF: 16KB switchable PRG-ROM bank
// - CPU $C000-$FFFF: 16KB fixed PRG-ROM bank (last bank)
// - PPU $0000-$1FFF: 8KB CHR (RAM on every known board)
//
// Bank Switching:
// - Any write to $8000-$FFFF selects the PRG-ROM bank for $8000-$BFFF
// - The write itself does not reach PRG-ROM
//
// Games using Mapper 2: Mega Man, Castlevania, Contra, Duck Tales

use crate::cartridge::{Mapper, PRG_BANK_SIZE};

/// Mapper 2 implementation (UxROM)
#[derive(Debug, Clone)]
pub struct Mapper2 {
    prg_banks: u8,
    chr_banks: u8,
    /// Bank visible at $8000-$BFFF
    prg_bank_lo: u8,
}

impl Mapper2 {
    pub fn new(prg_banks: u8, chr_banks: u8) -> Self {
        Mapper2 {
            prg_banks,
            chr_banks,
            prg_bank_lo: 0,
        }
    }

    fn last_bank(&self) -> usize {
        self.prg_banks.saturating_sub(1) as usize
    }
}

impl Mapper for Mapper2 {
    fn cpu_map_read(&self, addr: u16) -> Option<usize> {
        let offset = (addr & 0x3FFF) as usize;
        match addr {
            0x8000..=0xBFFF => Some(self.prg_bank_lo as usize * PRG_BANK_SIZE + offset),
            0xC000..=0xFFFF => Some(self.last_bank() * PRG_BANK_SIZE + offset),
            _ => None,
        }
    }

    fn cpu_map_write(&mut self, addr: u16, data: u8) -> Option<usize> {
        if addr >= 0x8000 {
            // Wrap to the banks actually present on the board
            self.prg_bank_lo = (data & 0x0F) % self.prg_banks.max(1);
        }
        None
    }

    fn ppu_map_read(&self, addr: u16) -> Option<usize> {
        (addr <= 0x1FFF).then_some(addr as usize)
    }

    fn ppu_map_write(&mut self, addr: u16) -> Option<usize> {
        (addr <= 0x1FFF && self.chr_banks == 0).then_some(addr as usize)
    }

    fn reset(&mut self) {
        self.prg_bank_lo = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_on_state() {
        let mapper = Mapper2::new(8, 0);

        assert_eq!(mapper.cpu_map_read(0x8000), Some(0));
        assert_eq!(mapper.cpu_map_read(0xC000), Some(7 * PRG_BANK_SIZE));
    }

    #[test]
    fn test_prg_bank_switching() {
        let mut mapper = Mapper2::new(8, 0);

        assert_eq!(mapper.cpu_map_write(0x8000, 3), None);
        assert_eq!(mapper.cpu_map_read(0x8001), Some(3 * PRG_BANK_SIZE + 1));
        // Fixed bank is unaffected
        assert_eq!(mapper.cpu_map_read(0xFFFF), Some(8 * PRG_BANK_SIZE - 1));
    }

    #[test]
    fn test_bank_wrapping() {
        let mut mapper = Mapper2::new(4, 0);

        mapper.cpu_map_write(0xFFFF, 6);
        assert_eq!(mapper.cpu_map_read(0x8000), Some(2 * PRG_BANK_SIZE));
    }

    #[test]
    fn test_reset_restores_bank_zero() {
        let mut mapper = Mapper2::new(4, 0);

        mapper.cpu_map_write(0x8000, 2);
        mapper.reset();
        assert_eq!(mapper.cpu_map_read(0x8000), Some(0));
    }

    #[test]
    fn test_chr_ram_writes() {
        let mut mapper = Mapper2::new(2, 0);
        assert_eq!(mapper.ppu_map_write(0x1FFF), Some(0x1FFF));
    }

    #[test]
    fn test_writes_below_rom_ignored() {
        let mut mapper = Mapper2::new(4, 0);

        mapper.cpu_map_write(0x7FFF, 3);
        assert_eq!(mapper.cpu_map_read(0x8000), Some(0));
    }
}
