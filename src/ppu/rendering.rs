// PPU rendering logic
//
// Dot schedule for the visible and pre-render scanlines:
//
// ```text
// 1        pre-render: clear VBlank, overflow and sprite 0 hit
// 2..257   shift + 8-dot fetch cycle (NT, AT, pattern lo, pattern hi, inc X)
// 256      increment Y
// 257      reload shifters, copy horizontal bits t -> v, evaluate sprites
// 280..304 pre-render: copy vertical bits t -> v
// 321..337 prefetch the first two tiles of the next line
// 338, 340 dummy nametable fetches
// 340      fetch sprite patterns for the next line
// ```

use super::constants::*;
use super::{ObjectAttribute, Ppu};

impl Ppu {
    /// Advance the PPU by one dot
    pub fn tick(&mut self) {
        if self.scanline < POSTRENDER_SCANLINE {
            self.render_dot();
        }

        if self.scanline == FIRST_VBLANK_SCANLINE && self.cycle == 1 {
            self.status |= status::VERTICAL_BLANK;
            if self.control & ctrl::ENABLE_NMI != 0 {
                self.nmi_request = true;
            }
        }

        if (0..POSTRENDER_SCANLINE).contains(&self.scanline) {
            self.compose_pixel();
        }

        self.cycle += 1;
        if self.cycle >= CYCLES_PER_SCANLINE {
            self.cycle = 0;
            self.scanline += 1;
            if self.scanline > LAST_SCANLINE {
                self.scanline = PRERENDER_SCANLINE;
                self.frame_complete = true;
                self.frame_count += 1;
            }
        }
    }

    #[inline]
    fn rendering_enabled(&self) -> bool {
        self.mask & (mask::SHOW_BACKGROUND | mask::SHOW_SPRITES) != 0
    }

    /// Fetch and scroll work for one dot of a visible or pre-render line
    fn render_dot(&mut self) {
        let cycle = self.cycle;

        if self.scanline == PRERENDER_SCANLINE && cycle == 1 {
            self.status &=
                !(status::VERTICAL_BLANK | status::SPRITE_OVERFLOW | status::SPRITE_ZERO_HIT);
            self.sprite_shifter_pattern_lo = [0; MAX_SPRITES_PER_SCANLINE];
            self.sprite_shifter_pattern_hi = [0; MAX_SPRITES_PER_SCANLINE];
            self.sprite_count = 0;
        }

        if (2..258).contains(&cycle) || (321..338).contains(&cycle) {
            self.update_shifters();

            match (cycle - 1) % 8 {
                0 => {
                    self.load_background_shifters();
                    self.bg_next_tile_id = self.ppu_read(0x2000 | (self.v & 0x0FFF));
                }
                2 => {
                    let addr = 0x23C0
                        | (self.v & 0x0C00)
                        | ((self.coarse_y() >> 2) << 3)
                        | (self.coarse_x() >> 2);
                    let mut attrib = self.ppu_read(addr);
                    if self.coarse_y() & 0x02 != 0 {
                        attrib >>= 4;
                    }
                    if self.coarse_x() & 0x02 != 0 {
                        attrib >>= 2;
                    }
                    self.bg_next_tile_attrib = attrib & 0x03;
                }
                4 => self.bg_next_tile_lsb = self.ppu_read(self.background_pattern_addr()),
                6 => self.bg_next_tile_msb = self.ppu_read(self.background_pattern_addr() + 8),
                7 => self.increment_scroll_x(),
                _ => {}
            }
        }

        if cycle == 256 {
            self.increment_scroll_y();
        }

        if cycle == 257 {
            self.load_background_shifters();
            self.transfer_address_x();
        }

        if cycle == 338 || cycle == 340 {
            self.bg_next_tile_id = self.ppu_read(0x2000 | (self.v & 0x0FFF));
        }

        if self.scanline == PRERENDER_SCANLINE && (280..305).contains(&cycle) {
            self.transfer_address_y();
        }

        if cycle == 257 && self.scanline >= 0 && self.rendering_enabled() {
            self.evaluate_sprites();
        }

        if cycle == 340 {
            self.fetch_sprite_patterns();
        }
    }

    /// Low plane address of the latched background tile row
    fn background_pattern_addr(&self) -> u16 {
        let table = ((self.control & ctrl::BACKGROUND_TABLE != 0) as u16) << 12;
        table + ((self.bg_next_tile_id as u16) << 4) + self.fine_y()
    }

    // ========================================
    // Scroll register updates
    // ========================================

    pub(super) fn increment_scroll_x(&mut self) {
        if !self.rendering_enabled() {
            return;
        }
        if self.coarse_x() == 31 {
            self.v &= !0x001F;
            self.v ^= 0x0400;
        } else {
            self.v += 1;
        }
    }

    pub(super) fn increment_scroll_y(&mut self) {
        if !self.rendering_enabled() {
            return;
        }
        if self.fine_y() < 7 {
            self.v += 0x1000;
            return;
        }

        self.v &= !0x7000;
        let mut coarse_y = self.coarse_y();
        if coarse_y == 29 {
            // Rows 30 and 31 hold attributes; wrap into the other nametable
            coarse_y = 0;
            self.v ^= 0x0800;
        } else if coarse_y == 31 {
            coarse_y = 0;
        } else {
            coarse_y += 1;
        }
        self.v = (self.v & !0x03E0) | (coarse_y << 5);
    }

    fn transfer_address_x(&mut self) {
        if self.rendering_enabled() {
            self.v = (self.v & !0x041F) | (self.t & 0x041F);
        }
    }

    fn transfer_address_y(&mut self) {
        if self.rendering_enabled() {
            self.v = (self.v & !0x7BE0) | (self.t & 0x7BE0);
        }
    }

    // ========================================
    // Shift registers
    // ========================================

    /// Move the latched next tile into the low byte of the shifters
    fn load_background_shifters(&mut self) {
        self.bg_shifter_pattern_lo = (self.bg_shifter_pattern_lo & 0xFF00) | self.bg_next_tile_lsb as u16;
        self.bg_shifter_pattern_hi = (self.bg_shifter_pattern_hi & 0xFF00) | self.bg_next_tile_msb as u16;

        // Attribute bits are widened to a full byte so they shift in step with the pattern
        let fill = |bit: u8| if self.bg_next_tile_attrib & bit != 0 { 0x00FF } else { 0x0000 };
        let (attrib_lo, attrib_hi) = (fill(0x01), fill(0x02));
        self.bg_shifter_attrib_lo = (self.bg_shifter_attrib_lo & 0xFF00) | attrib_lo;
        self.bg_shifter_attrib_hi = (self.bg_shifter_attrib_hi & 0xFF00) | attrib_hi;
    }

    fn update_shifters(&mut self) {
        if self.mask & mask::SHOW_BACKGROUND != 0 {
            self.bg_shifter_pattern_lo <<= 1;
            self.bg_shifter_pattern_hi <<= 1;
            self.bg_shifter_attrib_lo <<= 1;
            self.bg_shifter_attrib_hi <<= 1;
        }

        if self.mask & mask::SHOW_SPRITES != 0 && (1..258).contains(&self.cycle) {
            for i in 0..self.sprite_count {
                let sprite = &mut self.sprite_scanline[i];
                if sprite.x > 0 {
                    sprite.x -= 1;
                } else {
                    self.sprite_shifter_pattern_lo[i] <<= 1;
                    self.sprite_shifter_pattern_hi[i] <<= 1;
                }
            }
        }
    }

    // ========================================
    // Sprites
    // ========================================

    #[inline]
    fn sprite_height(&self) -> i16 {
        if self.control & ctrl::SPRITE_SIZE != 0 {
            16
        } else {
            8
        }
    }

    /// Select the sprites that cover the next scanline
    ///
    /// Up to eight entries are kept in OAM order. Overflow is set when more
    /// than eight qualify.
    fn evaluate_sprites(&mut self) {
        self.sprite_scanline = [ObjectAttribute::EMPTY; MAX_SPRITES_PER_SCANLINE];
        self.sprite_count = 0;
        self.sprite_shifter_pattern_lo = [0; MAX_SPRITES_PER_SCANLINE];
        self.sprite_shifter_pattern_hi = [0; MAX_SPRITES_PER_SCANLINE];
        self.sprite_zero_hit_possible = false;

        let height = self.sprite_height();
        let mut qualifying = 0;

        for (index, entry) in self.oam.chunks_exact(4).enumerate() {
            let sprite = ObjectAttribute::from_bytes(entry);
            let diff = self.scanline - sprite.y as i16;
            if !(0..height).contains(&diff) {
                continue;
            }

            qualifying += 1;
            if self.sprite_count < MAX_SPRITES_PER_SCANLINE {
                if index == 0 {
                    self.sprite_zero_hit_possible = true;
                }
                self.sprite_scanline[self.sprite_count] = sprite;
                self.sprite_count += 1;
            }
        }

        if qualifying > MAX_SPRITES_PER_SCANLINE {
            self.status |= status::SPRITE_OVERFLOW;
        }
    }

    /// Pattern table address of the low plane for `sprite` on the current scanline
    pub(super) fn sprite_pattern_addr(&self, sprite: &ObjectAttribute) -> u16 {
        let row = (self.scanline - sprite.y as i16) as u16;
        let flip_vertical = sprite.attribute & attr::FLIP_VERTICAL != 0;

        if self.control & ctrl::SPRITE_SIZE == 0 {
            let table = ((self.control & ctrl::SPRITE_TABLE != 0) as u16) << 12;
            let row = if flip_vertical { 7 - row } else { row };
            return table | ((sprite.id as u16) << 4) | (row & 0x07);
        }

        // 8x16: bit 0 of the tile id picks the table, the pair is id & 0xFE and id | 1
        let table = ((sprite.id & 0x01) as u16) << 12;
        let top = (sprite.id & 0xFE) as u16;
        let top_half = row < 8;
        let tile = if top_half != flip_vertical { top } else { top + 1 };
        let row = if flip_vertical { 7 - (row & 0x07) } else { row & 0x07 };
        table | (tile << 4) | row
    }

    fn fetch_sprite_patterns(&mut self) {
        for i in 0..self.sprite_count {
            let sprite = self.sprite_scanline[i];
            let addr = self.sprite_pattern_addr(&sprite);
            let mut lo = self.ppu_read(addr);
            let mut hi = self.ppu_read(addr + 8);

            if sprite.attribute & attr::FLIP_HORIZONTAL != 0 {
                lo = lo.reverse_bits();
                hi = hi.reverse_bits();
            }

            self.sprite_shifter_pattern_lo[i] = lo;
            self.sprite_shifter_pattern_hi[i] = hi;
        }
    }

    // ========================================
    // Pixel output
    // ========================================

    fn background_pixel(&self) -> (u8, u8) {
        if self.mask & mask::SHOW_BACKGROUND == 0 {
            return (0, 0);
        }
        let mux = 0x8000 >> self.fine_x;
        let bit = |shifter: u16| (shifter & mux != 0) as u8;

        let pixel = (bit(self.bg_shifter_pattern_hi) << 1) | bit(self.bg_shifter_pattern_lo);
        let palette = (bit(self.bg_shifter_attrib_hi) << 1) | bit(self.bg_shifter_attrib_lo);
        (pixel, palette)
    }

    /// First opaque sprite pixel under the beam: (pixel, palette, in front)
    fn sprite_pixel(&mut self) -> (u8, u8, bool) {
        self.sprite_zero_being_rendered = false;
        if self.mask & mask::SHOW_SPRITES == 0 {
            return (0, 0, false);
        }

        for i in 0..self.sprite_count {
            let sprite = &self.sprite_scanline[i];
            if sprite.x != 0 {
                continue;
            }
            let lo = (self.sprite_shifter_pattern_lo[i] & 0x80 != 0) as u8;
            let hi = (self.sprite_shifter_pattern_hi[i] & 0x80 != 0) as u8;
            let pixel = (hi << 1) | lo;
            if pixel == 0 {
                continue;
            }

            if i == 0 {
                self.sprite_zero_being_rendered = true;
            }
            let palette = (sprite.attribute & attr::PALETTE) + 4;
            let in_front = sprite.attribute & attr::PRIORITY == 0;
            return (pixel, palette, in_front);
        }
        (0, 0, false)
    }

    /// Resolve background against sprites and write the output pixel
    fn compose_pixel(&mut self) {
        let (bg_pixel, bg_palette) = self.background_pixel();
        let (fg_pixel, fg_palette, fg_in_front) = self.sprite_pixel();

        let (pixel, palette) = match (bg_pixel, fg_pixel) {
            (0, 0) => (0, 0),
            (0, _) => (fg_pixel, fg_palette),
            (_, 0) => (bg_pixel, bg_palette),
            _ => {
                self.check_sprite_zero_hit();
                if fg_in_front {
                    (fg_pixel, fg_palette)
                } else {
                    (bg_pixel, bg_palette)
                }
            }
        };

        let x = self.cycle as usize;
        if (0..SCREEN_HEIGHT as i16).contains(&self.scanline) && (1..=SCREEN_WIDTH).contains(&x) {
            let index = self.scanline as usize * SCREEN_WIDTH + (x - 1);
            self.frame[index] = self.get_color(palette, pixel);
        }
    }

    /// Both layers are opaque here
    fn check_sprite_zero_hit(&mut self) {
        if !(self.sprite_zero_hit_possible && self.sprite_zero_being_rendered) {
            return;
        }
        let both = mask::SHOW_BACKGROUND | mask::SHOW_SPRITES;
        if self.mask & both != both {
            return;
        }

        let left = mask::SHOW_BACKGROUND_LEFT | mask::SHOW_SPRITES_LEFT;
        let first_cycle = if self.mask & left == left { 1 } else { 9 };
        if (first_cycle..258).contains(&self.cycle) {
            self.status |= status::SPRITE_ZERO_HIT;
        }
    }
}
