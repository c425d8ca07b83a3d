// PPU register handling
//
// Ports are addressed 0-7 ($2000-$2007 after mirroring).

use super::constants::{ctrl, status, PPU_REGISTER_MASK};
use super::Ppu;

impl Ppu {
    /// Read from a PPU register
    ///
    /// # Register Behaviors
    ///
    /// - PPUSTATUS ($2002): Top 3 status bits plus stale buffer bits; clears
    ///   VBlank and the write latch
    /// - OAMDATA ($2004): OAM byte at the current OAM address
    /// - PPUDATA ($2007): Buffered VRAM read (palette reads are immediate)
    /// - Write-only registers: Return 0
    pub fn cpu_read(&mut self, port: u16) -> u8 {
        match port & PPU_REGISTER_MASK {
            2 => {
                let data = (self.status & 0xE0) | (self.data_buffer & 0x1F);
                self.status &= !status::VERTICAL_BLANK;
                self.write_latch = false;
                data
            }
            4 => self.oam[self.oam_addr as usize],
            7 => {
                let addr = self.v & 0x3FFF;
                let data = if addr >= 0x3F00 {
                    // Immediate, but the buffer still picks up the nametable byte underneath
                    self.data_buffer = self.ppu_read(addr & 0x2FFF);
                    self.ppu_read(addr)
                } else {
                    let data = self.data_buffer;
                    self.data_buffer = self.ppu_read(addr);
                    data
                };
                self.increment_vram_addr();
                data
            }
            _ => 0,
        }
    }

    /// What `cpu_read` would return, without its side effects
    pub fn cpu_peek(&self, port: u16) -> u8 {
        match port & PPU_REGISTER_MASK {
            2 => (self.status & 0xE0) | (self.data_buffer & 0x1F),
            4 => self.oam[self.oam_addr as usize],
            7 => {
                let addr = self.v & 0x3FFF;
                if addr >= 0x3F00 {
                    self.ppu_read(addr)
                } else {
                    self.data_buffer
                }
            }
            _ => 0,
        }
    }

    /// Write to a PPU register
    ///
    /// # Register Behaviors
    ///
    /// - PPUCTRL ($2000): Stores control flags and updates nametable select in t
    /// - PPUMASK ($2001): Stores mask flags
    /// - OAMADDR ($2003): Sets OAM address
    /// - OAMDATA ($2004): Writes to OAM and increments address
    /// - PPUSCROLL ($2005): Sets scroll position (2 writes, updates t and fine x)
    /// - PPUADDR ($2006): Sets VRAM address (2 writes, updates t then v)
    /// - PPUDATA ($2007): Writes to PPU memory and increments v
    /// - PPUSTATUS ($2002): Read only, writes ignored
    pub fn cpu_write(&mut self, port: u16, data: u8) {
        match port & PPU_REGISTER_MASK {
            0 => {
                self.control = data;
                // t: ...GH.. ........ <- d: ......GH
                self.t = (self.t & 0xF3FF) | (((data & 0x03) as u16) << 10);
            }
            1 => self.mask = data,
            3 => self.oam_addr = data,
            4 => {
                self.oam[self.oam_addr as usize] = data;
                self.oam_addr = self.oam_addr.wrapping_add(1);
            }
            5 => {
                if !self.write_latch {
                    // t: ....... ...ABCDE <- d: ABCDEFGH
                    // x:              FGH <- d: ABCDEFGH
                    self.fine_x = data & 0x07;
                    self.t = (self.t & !0x001F) | (data >> 3) as u16;
                } else {
                    // t: FGH..AB CDE..... <- d: ABCDEFGH
                    self.t = (self.t & !0x73E0)
                        | (((data & 0x07) as u16) << 12)
                        | (((data >> 3) as u16) << 5);
                }
                self.write_latch = !self.write_latch;
            }
            6 => {
                if !self.write_latch {
                    // t: .CDEFGH ........ <- d: ..CDEFGH, bit 14 cleared
                    self.t = (((data & 0x3F) as u16) << 8) | (self.t & 0x00FF);
                } else {
                    // t: ....... ABCDEFGH <- d: ABCDEFGH, then v = t
                    self.t = (self.t & 0xFF00) | data as u16;
                    self.v = self.t;
                }
                self.write_latch = !self.write_latch;
            }
            7 => {
                self.ppu_write(self.v, data);
                self.increment_vram_addr();
            }
            _ => {}
        }
    }

    /// Advance v by 1 or 32 after a PPUDATA access
    #[inline]
    fn increment_vram_addr(&mut self) {
        let step = if self.control & ctrl::INCREMENT_MODE != 0 {
            32
        } else {
            1
        };
        self.v = self.v.wrapping_add(step) & 0x7FFF;
    }

    // ========================================
    // Loopy register fields
    // ========================================

    #[inline]
    pub(super) fn coarse_x(&self) -> u16 {
        self.v & 0x001F
    }

    #[inline]
    pub(super) fn coarse_y(&self) -> u16 {
        (self.v >> 5) & 0x001F
    }

    #[inline]
    pub(super) fn fine_y(&self) -> u16 {
        (self.v >> 12) & 0x0007
    }
}
