// Common test utilities for integration tests
//
// In-memory iNES images, a small 6502 program builder, instruction-level
// stepping through the Bus, and logger setup.

#![allow(dead_code)]

use nes_core::bus::Bus;
use nes_core::cartridge::Cartridge;
use nes_core::emulator::{Emulator, EmulatorConfig};
use std::path::PathBuf;

/// 16KB PRG bank
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// Address of the default NMI/IRQ handler (a lone RTI)
pub const HANDLER_ADDR: u16 = 0x9000;

/// Install a test logger; repeated calls are ignored
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Path to an optional test ROM named by an environment variable
pub fn rom_from_env(var: &str) -> Option<PathBuf> {
    std::env::var_os(var).map(PathBuf::from)
}

// ========================================
// iNES image builder
// ========================================

/// One-bank NROM image
///
/// PRG starts as NOPs with RESET at $8000 and NMI/IRQ at an RTI at $9000.
/// Without explicit CHR data the cartridge gets 8KB of CHR RAM.
pub struct RomImage {
    prg: Vec<u8>,
    chr: Vec<u8>,
    flags6: u8,
}

impl RomImage {
    pub fn new() -> Self {
        let mut prg = vec![0xEA; PRG_BANK_SIZE];
        prg[(HANDLER_ADDR - 0x8000) as usize] = 0x40;
        let mut image = RomImage {
            prg,
            chr: Vec::new(),
            flags6: 0,
        };
        image.set_vector(0xFFFA, HANDLER_ADDR);
        image.set_vector(0xFFFC, 0x8000);
        image.set_vector(0xFFFE, HANDLER_ADDR);
        image
    }

    fn offset(addr: u16) -> usize {
        (addr as usize - 0x8000) % PRG_BANK_SIZE
    }

    fn set_vector(&mut self, vector: u16, target: u16) {
        let offset = Self::offset(vector);
        self.prg[offset..offset + 2].copy_from_slice(&target.to_le_bytes());
    }

    /// Place `code` at CPU address `addr` ($8000-$BFFF, mirrored at $C000)
    pub fn code_at(mut self, addr: u16, code: &[u8]) -> Self {
        let offset = Self::offset(addr);
        self.prg[offset..offset + code.len()].copy_from_slice(code);
        self
    }

    /// Main program at $8000
    pub fn program(self, program: &Program) -> Self {
        self.code_at(0x8000, program.bytes())
    }

    pub fn nmi_handler(self, code: &[u8]) -> Self {
        self.code_at(HANDLER_ADDR, code)
    }

    /// 8KB of CHR ROM
    pub fn chr_rom(mut self, chr: Vec<u8>) -> Self {
        self.chr = chr;
        self
    }

    pub fn vertical_mirroring(mut self) -> Self {
        self.flags6 |= 0x01;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let chr_banks = (self.chr.len() / (8 * 1024)) as u8;
        let mut rom = vec![b'N', b'E', b'S', 0x1A, 1, chr_banks, self.flags6, 0];
        rom.extend_from_slice(&[0; 8]);
        rom.extend_from_slice(&self.prg);
        rom.extend_from_slice(&self.chr);
        rom
    }

    pub fn cartridge(&self) -> Cartridge {
        Cartridge::from_bytes(&self.build()).expect("test image should parse")
    }
}

impl Default for RomImage {
    fn default() -> Self {
        Self::new()
    }
}

// ========================================
// Program builder
// ========================================

/// Straight-line 6502 code assembled at $8000
#[derive(Default)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Address the next emitted byte will occupy
    pub fn here(&self) -> u16 {
        0x8000 + self.bytes.len() as u16
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// LDA #value
    pub fn lda(self, value: u8) -> Self {
        self.raw(&[0xA9, value])
    }

    /// LDX #value
    pub fn ldx(self, value: u8) -> Self {
        self.raw(&[0xA2, value])
    }

    /// LDA addr
    pub fn lda_abs(self, addr: u16) -> Self {
        let [lo, hi] = addr.to_le_bytes();
        self.raw(&[0xAD, lo, hi])
    }

    /// LDX zp (3 cycles)
    pub fn ldx_zp(self, addr: u8) -> Self {
        self.raw(&[0xA6, addr])
    }

    /// STA addr
    pub fn sta(self, addr: u16) -> Self {
        let [lo, hi] = addr.to_le_bytes();
        self.raw(&[0x8D, lo, hi])
    }

    /// Store `value` at `addr`
    pub fn poke(self, addr: u16, value: u8) -> Self {
        self.lda(value).sta(addr)
    }

    /// Point PPUADDR at `addr`
    pub fn ppu_addr(self, addr: u16) -> Self {
        let [lo, hi] = addr.to_le_bytes();
        self.poke(0x2006, hi).poke(0x2006, lo)
    }

    /// Write `data` to PPU memory starting at `addr`
    pub fn ppu_data(self, addr: u16, data: &[u8]) -> Self {
        data.iter()
            .fold(self.ppu_addr(addr), |program, &byte| program.poke(0x2007, byte))
    }

    /// Fill a RAM page with `value` using an X-indexed loop
    pub fn fill_page(self, page: u8, value: u8) -> Self {
        // LDA #value; LDX #0; loop: STA page00,X; INX; BNE loop
        self.raw(&[0xA9, value, 0xA2, 0x00, 0x9D, 0x00, page, 0xE8, 0xD0, 0xFA])
    }

    /// Copy a RAM page to OAM
    pub fn oam_dma(self, page: u8) -> Self {
        self.poke(0x4014, page)
    }

    /// Zero both scroll registers
    pub fn clear_scroll(self) -> Self {
        self.poke(0x2005, 0).poke(0x2005, 0)
    }

    /// JMP to itself
    pub fn halt(self) -> Self {
        let [lo, hi] = self.here().to_le_bytes();
        self.raw(&[0x4C, lo, hi])
    }
}

// ========================================
// Running
// ========================================

/// Bus with `image` inserted and reset
pub fn bus_with(image: &RomImage) -> Bus {
    let mut bus = Bus::new();
    bus.insert_cartridge(image.cartridge());
    bus.reset();
    bus
}

/// Emulator with `image` loaded
pub fn emulator_with(image: &RomImage) -> Emulator {
    init_logger();
    let mut emulator = Emulator::new(EmulatorConfig::default());
    emulator
        .load_rom_bytes(&image.build())
        .expect("test image should load");
    emulator
}

/// True when the next bus tick fetches an opcode
pub fn at_fetch(bus: &Bus) -> bool {
    bus.system_clock() % 3 == 0 && !bus.dma_in_progress() && bus.cpu().is_instruction_complete()
}

/// Tick until the next bus tick fetches an opcode
pub fn advance_to_fetch(bus: &mut Bus) {
    while !at_fetch(bus) {
        bus.tick();
    }
}

/// Execute exactly one instruction, leaving the bus at the next fetch
pub fn step_instruction(bus: &mut Bus) {
    advance_to_fetch(bus);
    bus.tick();
    advance_to_fetch(bus);
}

/// Tick until the PPU reports a completed frame
pub fn run_frame(bus: &mut Bus) -> u64 {
    let mut ticks = 0;
    loop {
        bus.tick();
        ticks += 1;
        if bus.ppu_mut().take_frame_complete() {
            return ticks;
        }
    }
}
