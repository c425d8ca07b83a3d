//! PPU unit tests
//!
//! Organized by functionality: register ports, the PPU memory map,
//! the rendering pipeline and frame timing.

use super::*;
use crate::cartridge::{test_rom, Cartridge};
use std::cell::RefCell;
use std::rc::Rc;

// ========================================
// Test Constants (PPU Register Addresses)
// ========================================

/// PPU Control Register ($2000) - Write only
pub(crate) const PPUCTRL: u16 = 0x2000;
/// PPU Mask Register ($2001) - Write only
pub(crate) const PPUMASK: u16 = 0x2001;
/// PPU Status Register ($2002) - Read only
pub(crate) const PPUSTATUS: u16 = 0x2002;
/// OAM Address Port ($2003) - Write only
pub(crate) const OAMADDR: u16 = 0x2003;
/// OAM Data Port ($2004) - Read/Write
pub(crate) const OAMDATA: u16 = 0x2004;
/// Scroll Position Register ($2005) - Write×2
pub(crate) const PPUSCROLL: u16 = 0x2005;
/// PPU Address Register ($2006) - Write×2
pub(crate) const PPUADDR: u16 = 0x2006;
/// PPU Data Port ($2007) - Read/Write
pub(crate) const PPUDATA: u16 = 0x2007;

// ========================================
// Test Helper Functions
// ========================================

/// PPU connected to an NROM cartridge with 8KB of CHR RAM
///
/// `flags6` bit 0 selects vertical mirroring.
pub(crate) fn ppu_with_chr_ram(flags6: u8) -> Ppu {
    let cartridge = Cartridge::from_bytes(&test_rom::build(1, 0, flags6, 0)).unwrap();
    let mut ppu = Ppu::new();
    ppu.connect_cartridge(Rc::new(RefCell::new(cartridge)));
    ppu
}

/// Point v at `addr` through PPUADDR
pub(crate) fn set_vram_addr(ppu: &mut Ppu, addr: u16) {
    ppu.cpu_write(PPUADDR, (addr >> 8) as u8);
    ppu.cpu_write(PPUADDR, addr as u8);
}

/// Write `bytes` starting at `addr` through PPUDATA
pub(crate) fn write_vram(ppu: &mut Ppu, addr: u16, bytes: &[u8]) {
    set_vram_addr(ppu, addr);
    for &byte in bytes {
        ppu.cpu_write(PPUDATA, byte);
    }
}

/// Tile 1: every pixel is color 1 (low plane set, high plane clear)
pub(crate) fn load_solid_tile(ppu: &mut Ppu) {
    write_vram(ppu, 0x0010, &[0xFF; 8]);
    write_vram(ppu, 0x0018, &[0x00; 8]);
}

/// Move every sprite off screen
pub(crate) fn hide_all_sprites(ppu: &mut Ppu) {
    ppu.oam.fill(0xFF);
}

/// Place sprite `index` in OAM
pub(crate) fn set_sprite(ppu: &mut Ppu, index: usize, y: u8, id: u8, attribute: u8, x: u8) {
    ppu.oam[index * 4..index * 4 + 4].copy_from_slice(&[y, id, attribute, x]);
}

/// Clear the scroll registers after VRAM setup
pub(crate) fn reset_scroll(ppu: &mut Ppu) {
    ppu.cpu_write(PPUCTRL, 0x00);
    set_vram_addr(ppu, 0x0000);
    ppu.cpu_write(PPUSCROLL, 0x00);
    ppu.cpu_write(PPUSCROLL, 0x00);
}

/// Tick until the beam sits at (scanline, cycle), then execute that dot
pub(crate) fn run_through(ppu: &mut Ppu, scanline: i16, cycle: u16) {
    while !(ppu.scanline() == scanline && ppu.cycle() == cycle) {
        ppu.tick();
    }
    ppu.tick();
}

/// Tick until the current frame completes
pub(crate) fn run_frame(ppu: &mut Ppu) {
    while !ppu.take_frame_complete() {
        ppu.tick();
    }
}

/// Output pixel at (x, y) of the last rendered frame
pub(crate) fn pixel(ppu: &Ppu, x: usize, y: usize) -> u32 {
    ppu.rendered_frame()[y * SCREEN_WIDTH + x]
}

// ========================================
// Test Modules
// ========================================
