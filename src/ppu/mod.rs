// PPU module - Picture Processing Unit (2C02)
//
// A per-dot model: one `tick` is one PPU cycle. Background tiles stream
// through 16-bit shift registers fed by the fetch schedule, sprites are
// evaluated per scanline into eight shifters, and the two are multiplexed
// into the output frame as the beam passes.
//
// Scroll position lives in the "loopy" registers `v`/`t`/`fine_x`:
//
// ```text
// yyy NN YYYYY XXXXX
// ||| || ||||| +++++-- coarse X scroll
// ||| || +++++-------- coarse Y scroll
// ||| ++-------------- nametable select
// +++----------------- fine Y scroll
// ```

pub mod constants;
mod memory;
pub mod palette;
mod registers;
mod rendering;

#[cfg(test)]
mod tests;

use std::cell::RefCell;
use std::rc::Rc;

use crate::cartridge::Cartridge;
use constants::*;

/// One 4-byte OAM entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectAttribute {
    /// Y position of the top row minus one
    pub y: u8,
    /// Tile index
    pub id: u8,
    /// Palette, priority and flip bits
    pub attribute: u8,
    /// X position of the left column
    pub x: u8,
}

impl ObjectAttribute {
    /// Unused slot in the per-scanline sprite list
    pub(crate) const EMPTY: ObjectAttribute = ObjectAttribute {
        y: 0xFF,
        id: 0xFF,
        attribute: 0xFF,
        x: 0xFF,
    };

    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        ObjectAttribute {
            y: bytes[0],
            id: bytes[1],
            attribute: bytes[2],
            x: bytes[3],
        }
    }
}

/// PPU structure representing the Picture Processing Unit state
pub struct Ppu {
    // ========================================
    // CPU-visible registers
    // ========================================
    pub(crate) control: u8,
    pub(crate) mask: u8,
    pub(crate) status: u8,
    pub(crate) oam_addr: u8,

    /// Current VRAM address (loopy v)
    pub(crate) v: u16,
    /// Temporary VRAM address (loopy t)
    pub(crate) t: u16,
    pub(crate) fine_x: u8,
    /// First/second write toggle shared by $2005 and $2006
    pub(crate) write_latch: bool,
    /// Delayed $2007 read value
    pub(crate) data_buffer: u8,

    // ========================================
    // Memory
    // ========================================
    /// 2KB of nametable RAM (two physical tables)
    pub(crate) nametables: [u8; NAMETABLE_SIZE * 2],
    pub(crate) palette_ram: [u8; PALETTE_SIZE],
    /// Pattern memory used when no cartridge claims $0000-$1FFF
    pub(crate) pattern_ram: [[u8; 4096]; 2],
    pub(crate) oam: [u8; OAM_SIZE],

    cartridge: Option<Rc<RefCell<Cartridge>>>,

    // ========================================
    // Timing
    // ========================================
    scanline: i16,
    cycle: u16,
    frame_count: u64,
    frame_complete: bool,
    nmi_request: bool,

    // ========================================
    // Background pipeline
    // ========================================
    bg_next_tile_id: u8,
    bg_next_tile_attrib: u8,
    bg_next_tile_lsb: u8,
    bg_next_tile_msb: u8,
    bg_shifter_pattern_lo: u16,
    bg_shifter_pattern_hi: u16,
    bg_shifter_attrib_lo: u16,
    bg_shifter_attrib_hi: u16,

    // ========================================
    // Sprite pipeline
    // ========================================
    sprite_scanline: [ObjectAttribute; MAX_SPRITES_PER_SCANLINE],
    sprite_count: usize,
    sprite_shifter_pattern_lo: [u8; MAX_SPRITES_PER_SCANLINE],
    sprite_shifter_pattern_hi: [u8; MAX_SPRITES_PER_SCANLINE],
    sprite_zero_hit_possible: bool,
    sprite_zero_being_rendered: bool,

    /// Output picture, 0xRRGGBB per pixel
    frame: Box<[u32]>,
}

impl Ppu {
    /// Create a PPU positioned at the start of the pre-render scanline
    pub fn new() -> Self {
        Ppu {
            control: 0,
            mask: 0,
            status: 0,
            oam_addr: 0,
            v: 0,
            t: 0,
            fine_x: 0,
            write_latch: false,
            data_buffer: 0,
            nametables: [0; NAMETABLE_SIZE * 2],
            palette_ram: [0; PALETTE_SIZE],
            pattern_ram: [[0; 4096]; 2],
            oam: [0; OAM_SIZE],
            cartridge: None,
            scanline: PRERENDER_SCANLINE,
            cycle: 0,
            frame_count: 0,
            frame_complete: false,
            nmi_request: false,
            bg_next_tile_id: 0,
            bg_next_tile_attrib: 0,
            bg_next_tile_lsb: 0,
            bg_next_tile_msb: 0,
            bg_shifter_pattern_lo: 0,
            bg_shifter_pattern_hi: 0,
            bg_shifter_attrib_lo: 0,
            bg_shifter_attrib_hi: 0,
            sprite_scanline: [ObjectAttribute::EMPTY; MAX_SPRITES_PER_SCANLINE],
            sprite_count: 0,
            sprite_shifter_pattern_lo: [0; MAX_SPRITES_PER_SCANLINE],
            sprite_shifter_pattern_hi: [0; MAX_SPRITES_PER_SCANLINE],
            sprite_zero_hit_possible: false,
            sprite_zero_being_rendered: false,
            frame: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT].into_boxed_slice(),
        }
    }

    /// Share the cartridge for pattern fetches and nametable mirroring
    pub fn connect_cartridge(&mut self, cartridge: Rc<RefCell<Cartridge>>) {
        self.cartridge = Some(cartridge);
    }

    /// Returns true once per completed frame, clearing the flag
    pub fn take_frame_complete(&mut self) -> bool {
        std::mem::take(&mut self.frame_complete)
    }

    /// Returns true if an NMI was raised since the last call, clearing it
    pub fn take_nmi_request(&mut self) -> bool {
        std::mem::take(&mut self.nmi_request)
    }

    /// Write one OAM byte directly (OAM DMA path)
    #[inline]
    pub fn write_oam(&mut self, addr: u8, data: u8) {
        self.oam[addr as usize] = data;
    }

    /// Color of `pixel` (0-3) in `palette` (0-3 background, 4-7 sprite)
    ///
    /// Honors the greyscale bit of PPUMASK.
    pub fn get_color(&self, palette: u8, pixel: u8) -> u32 {
        let addr = 0x3F00 + (((palette & 0x07) as u16) << 2) + (pixel & 0x03) as u16;
        let mut index = self.ppu_read(addr) & 0x3F;
        if self.mask & mask::GREYSCALE != 0 {
            index &= 0x30;
        }
        palette::color_for_index(index)
    }

    /// Last rendered picture, row-major, 256x240
    pub fn rendered_frame(&self) -> &[u32] {
        &self.frame
    }

    /// Render pattern table `table` (0 or 1) as a 128x128 picture in `palette`
    ///
    /// Diagnostic only; reads go through the normal PPU memory map.
    pub fn pattern_table_view(&self, table: u8, palette: u8) -> Vec<u32> {
        let base = ((table & 0x01) as u16) << 12;
        let mut view = vec![0; PATTERN_TABLE_SIZE * PATTERN_TABLE_SIZE];

        for tile_y in 0..16u16 {
            for tile_x in 0..16u16 {
                let offset = tile_y * 256 + tile_x * 16;

                for row in 0..8u16 {
                    let mut lsb = self.ppu_read(base + offset + row);
                    let mut msb = self.ppu_read(base + offset + row + 8);

                    for col in 0..8u16 {
                        let pixel = ((msb & 0x01) << 1) | (lsb & 0x01);
                        lsb >>= 1;
                        msb >>= 1;

                        let x = (tile_x * 8 + (7 - col)) as usize;
                        let y = (tile_y * 8 + row) as usize;
                        view[y * PATTERN_TABLE_SIZE + x] = self.get_color(palette, pixel);
                    }
                }
            }
        }
        view
    }

    // ========================================
    // Accessors
    // ========================================

    /// Current scanline (-1 is pre-render)
    pub fn scanline(&self) -> i16 {
        self.scanline
    }

    /// Current dot within the scanline (0-340)
    pub fn cycle(&self) -> u16 {
        self.cycle
    }

    /// Frames completed since power-on
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn oam(&self) -> &[u8; OAM_SIZE] {
        &self.oam
    }

    pub fn control(&self) -> u8 {
        self.control
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn status(&self) -> u8 {
        self.status
    }

    /// Current VRAM address
    pub fn v(&self) -> u16 {
        self.v
    }

    /// Temporary VRAM address
    pub fn t(&self) -> u16 {
        self.t
    }

    pub fn fine_x(&self) -> u8 {
        self.fine_x
    }

    /// Sprites selected for the next scanline
    pub fn active_sprites(&self) -> &[ObjectAttribute] {
        &self.sprite_scanline[..self.sprite_count]
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Ppu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ppu")
            .field("scanline", &self.scanline)
            .field("cycle", &self.cycle)
            .field("control", &format_args!("{:02X}", self.control))
            .field("mask", &format_args!("{:02X}", self.mask))
            .field("status", &format_args!("{:02X}", self.status))
            .field("v", &format_args!("{:04X}", self.v))
            .field("t", &format_args!("{:04X}", self.t))
            .finish_non_exhaustive()
    }
}
