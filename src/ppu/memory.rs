// PPU memory access methods
//
// ```text
// $0000-$1FFF: Pattern tables (cartridge CHR, or internal pattern RAM)
// $2000-$2FFF: Nametables (2KB internal RAM, mirrored per cartridge)
// $3000-$3EFF: Mirror of $2000-$2EFF
// $3F00-$3FFF: Palette RAM (32 bytes, mirrored)
// ```

use super::constants::NAMETABLE_SIZE;
use super::Ppu;
use crate::cartridge::Mirroring;

impl Ppu {
    /// Nametable mirroring of the inserted cartridge (horizontal without one)
    pub(super) fn mirroring(&self) -> Mirroring {
        self.cartridge
            .as_ref()
            .map(|cartridge| cartridge.borrow().mirroring())
            .unwrap_or_default()
    }

    /// Mirror nametable address based on mirroring mode
    ///
    /// The PPU has 2KB of internal VRAM for nametables, but the address space
    /// allows for 4 nametables ($2000-$2FFF).
    ///
    /// Returns an index into the 2KB nametable RAM.
    pub(super) fn mirror_nametable_addr(&self, addr: u16) -> usize {
        let addr = (addr & 0x0FFF) as usize;
        let table = addr / NAMETABLE_SIZE;
        let offset = addr % NAMETABLE_SIZE;

        let physical = match self.mirroring() {
            // $2000=$2400, $2800=$2C00
            Mirroring::Horizontal => table / 2,
            // $2000=$2800, $2400=$2C00
            Mirroring::Vertical => table % 2,
        };

        physical * NAMETABLE_SIZE + offset
    }

    /// Mirror palette address
    ///
    /// $3F10, $3F14, $3F18, $3F1C alias $3F00, $3F04, $3F08, $3F0C: sprite
    /// palette entry 0 is the shared backdrop.
    pub(super) fn mirror_palette_addr(addr: u16) -> usize {
        let addr = (addr & 0x001F) as usize;
        match addr {
            0x10 | 0x14 | 0x18 | 0x1C => addr - 0x10,
            _ => addr,
        }
    }

    /// Read from PPU memory
    ///
    /// The cartridge gets first claim on every address.
    pub(crate) fn ppu_read(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;

        if let Some(data) = self
            .cartridge
            .as_ref()
            .and_then(|cartridge| cartridge.borrow().ppu_read(addr))
        {
            return data;
        }

        match addr {
            0x0000..=0x1FFF => {
                self.pattern_ram[((addr & 0x1000) >> 12) as usize][(addr & 0x0FFF) as usize]
            }
            0x2000..=0x3EFF => self.nametables[self.mirror_nametable_addr(addr)],
            _ => self.palette_ram[Self::mirror_palette_addr(addr)],
        }
    }

    /// Write to PPU memory
    pub(crate) fn ppu_write(&mut self, addr: u16, data: u8) {
        let addr = addr & 0x3FFF;

        if let Some(cartridge) = &self.cartridge {
            if cartridge.borrow_mut().ppu_write(addr, data) {
                return;
            }
        }

        match addr {
            0x0000..=0x1FFF => {
                self.pattern_ram[((addr & 0x1000) >> 12) as usize][(addr & 0x0FFF) as usize] =
                    data
            }
            0x2000..=0x3EFF => {
                let index = self.mirror_nametable_addr(addr);
                self.nametables[index] = data;
            }
            _ => self.palette_ram[Self::mirror_palette_addr(addr)] = data,
        }
    }
}
