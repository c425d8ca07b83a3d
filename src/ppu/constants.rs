// PPU constants

/// PPU register address mask for mirroring
///
/// PPU registers are 8 bytes ($2000-$2007) but mirrored throughout $2000-$3FFF.
pub const PPU_REGISTER_MASK: u16 = 0x0007;

/// Size of one nametable in bytes (1KB)
pub(super) const NAMETABLE_SIZE: usize = 1024;

/// Size of palette RAM in bytes
pub(super) const PALETTE_SIZE: usize = 32;

/// Size of object attribute memory
pub const OAM_SIZE: usize = 256;

/// Most sprites drawn on one scanline
pub(super) const MAX_SPRITES_PER_SCANLINE: usize = 8;

/// Screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// Screen height in pixels
pub const SCREEN_HEIGHT: usize = 240;

/// Width and height of a pattern table view (16x16 tiles of 8x8)
pub const PATTERN_TABLE_SIZE: usize = 128;

// ========================================
// PPU Timing Constants (NTSC)
// ========================================

/// Number of PPU cycles per scanline
pub const CYCLES_PER_SCANLINE: u16 = 341;

/// Number of scanlines per frame (NTSC)
pub const SCANLINES_PER_FRAME: u16 = 262;

/// Total PPU cycles per frame (NTSC)
/// 341 cycles/scanline × 262 scanlines = 89,342 cycles
pub const CYCLES_PER_FRAME: u32 = (CYCLES_PER_SCANLINE as u32) * (SCANLINES_PER_FRAME as u32);

/// Pre-render scanline number
pub const PRERENDER_SCANLINE: i16 = -1;

/// Post-render scanline
pub const POSTRENDER_SCANLINE: i16 = 240;

/// First VBlank scanline
pub const FIRST_VBLANK_SCANLINE: i16 = 241;

/// Last scanline before wrapping back to pre-render
pub const LAST_SCANLINE: i16 = 260;

// ========================================
// Register Bits
// ========================================

/// PPUCTRL ($2000) bits
pub mod ctrl {
    pub const NAMETABLE_X: u8 = 0x01;
    pub const NAMETABLE_Y: u8 = 0x02;
    /// VRAM address increment per $2007 access: 0 = 1, 1 = 32
    pub const INCREMENT_MODE: u8 = 0x04;
    /// Sprite pattern table for 8x8 sprites
    pub const SPRITE_TABLE: u8 = 0x08;
    pub const BACKGROUND_TABLE: u8 = 0x10;
    /// 0 = 8x8 sprites, 1 = 8x16
    pub const SPRITE_SIZE: u8 = 0x20;
    pub const SLAVE_MODE: u8 = 0x40;
    pub const ENABLE_NMI: u8 = 0x80;
}

/// PPUMASK ($2001) bits
pub mod mask {
    pub const GREYSCALE: u8 = 0x01;
    pub const SHOW_BACKGROUND_LEFT: u8 = 0x02;
    pub const SHOW_SPRITES_LEFT: u8 = 0x04;
    pub const SHOW_BACKGROUND: u8 = 0x08;
    pub const SHOW_SPRITES: u8 = 0x10;
    pub const EMPHASIZE_RED: u8 = 0x20;
    pub const EMPHASIZE_GREEN: u8 = 0x40;
    pub const EMPHASIZE_BLUE: u8 = 0x80;
}

/// PPUSTATUS ($2002) bits
pub mod status {
    pub const SPRITE_OVERFLOW: u8 = 0x20;
    pub const SPRITE_ZERO_HIT: u8 = 0x40;
    pub const VERTICAL_BLANK: u8 = 0x80;
}

/// Sprite attribute byte bits
pub mod attr {
    pub const PALETTE: u8 = 0x03;
    /// Set = behind background
    pub const PRIORITY: u8 = 0x20;
    pub const FLIP_HORIZONTAL: u8 = 0x40;
    pub const FLIP_VERTICAL: u8 = 0x80;
}
