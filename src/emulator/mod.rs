// Emulator module - Stepping facade over the system bus
//
// Front ends (windowed hosts, debuggers, test harnesses) drive the core
// through this type: load a cartridge, then advance by ticks, instructions
// or whole frames and read back the picture.

mod config;

pub use config::{ConfigError, DebugConfig, EmulatorConfig, TraceConfig, PALETTE_COUNT};

use std::collections::BTreeMap;
use std::path::Path;

use log::trace;

use crate::bus::Bus;
use crate::cartridge::{Cartridge, CartridgeError};
use crate::input::Controller;
use crate::ppu::palette;

/// Log target for per-instruction CPU trace lines
pub const CPU_TRACE_TARGET: &str = "nes_core::cpu::trace";

/// Main emulator structure
///
/// Owns the bus (and through it every component) plus the debugging
/// configuration.
pub struct Emulator {
    bus: Bus,
    config: EmulatorConfig,
    /// Palette used for pattern table views
    palette: u8,
}

impl Emulator {
    /// Create an emulator with no cartridge inserted
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::{Emulator, EmulatorConfig};
    ///
    /// let emulator = Emulator::new(EmulatorConfig::default());
    /// assert!(!emulator.has_cartridge());
    /// ```
    pub fn new(config: EmulatorConfig) -> Self {
        let palette = config.debug.palette % PALETTE_COUNT;
        Emulator {
            bus: Bus::new(),
            config,
            palette,
        }
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Insert a cartridge and reset the system
    pub fn load_cartridge(&mut self, cartridge: Cartridge) {
        self.bus.insert_cartridge(cartridge);
        self.reset();
    }

    /// Parse an iNES image, insert it and reset the system
    ///
    /// On error the previous cartridge (if any) stays inserted.
    pub fn load_rom_bytes(&mut self, data: &[u8]) -> Result<(), CartridgeError> {
        let cartridge = Cartridge::from_bytes(data)?;
        self.load_cartridge(cartridge);
        Ok(())
    }

    /// Load an iNES file, insert it and reset the system
    pub fn load_rom_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CartridgeError> {
        let cartridge = Cartridge::from_file(path)?;
        self.load_cartridge(cartridge);
        Ok(())
    }

    pub fn has_cartridge(&self) -> bool {
        self.bus.has_cartridge()
    }

    /// Reset the console (CPU, mapper and system clock)
    pub fn reset(&mut self) {
        self.bus.reset();
    }

    /// Advance by one PPU cycle
    pub fn clock(&mut self) {
        if self.config.trace.cpu && self.at_instruction_fetch() {
            trace!(target: CPU_TRACE_TARGET, "{}", self.bus.trace());
        }
        self.bus.tick();
    }

    /// True when the next bus tick fetches a new opcode
    fn at_instruction_fetch(&self) -> bool {
        self.bus.system_clock() % 3 == 0
            && !self.bus.dma_in_progress()
            && self.bus.cpu().is_instruction_complete()
    }

    /// Run until the current instruction retires and the next one has executed
    ///
    /// Returns the number of PPU cycles taken.
    pub fn step_instruction(&mut self) -> u64 {
        let start = self.bus.system_clock();

        loop {
            self.clock();
            if self.bus.cpu().is_instruction_complete() {
                break;
            }
        }
        loop {
            self.clock();
            if !self.bus.cpu().is_instruction_complete() {
                break;
            }
        }

        self.bus.system_clock() - start
    }

    /// Run until the PPU completes a frame, then finish the in-flight instruction
    pub fn step_frame(&mut self) {
        loop {
            self.clock();
            if self.bus.ppu_mut().take_frame_complete() {
                break;
            }
        }
        while !self.bus.cpu().is_instruction_complete() {
            self.clock();
        }
    }

    /// Run `count` whole frames
    pub fn run_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.step_frame();
        }
    }

    /// Set the button state of controller `port` (0 or 1)
    pub fn set_controller(&mut self, port: usize, controller: &Controller) {
        self.bus.set_controller(port, controller);
    }

    // ========================================
    // Picture
    // ========================================

    /// Last rendered frame, 256x240 0xRRGGBB pixels
    pub fn frame(&self) -> &[u32] {
        self.bus.ppu().rendered_frame()
    }

    /// Last rendered frame as packed RGB bytes
    pub fn frame_rgb(&self) -> Vec<u8> {
        self.frame()
            .iter()
            .flat_map(|&color| palette::rgb_components(color))
            .collect()
    }

    /// Frames completed since power-on
    pub fn frame_count(&self) -> u64 {
        self.bus.ppu().frame_count()
    }

    /// 128x128 view of pattern table `index` (0 or 1) in the selected palette
    pub fn pattern_table(&self, index: u8) -> Vec<u32> {
        self.bus.ppu().pattern_table_view(index, self.palette)
    }

    /// Palette currently used for pattern table views
    pub fn selected_palette(&self) -> u8 {
        self.palette
    }

    /// Select the next palette (wrapping after 7) and return it
    pub fn cycle_palette(&mut self) -> u8 {
        self.palette = (self.palette + 1) % PALETTE_COUNT;
        self.palette
    }

    // ========================================
    // Debugging
    // ========================================

    /// Disassemble `start..=end` without side effects
    pub fn disassemble(&self, start: u16, end: u16) -> BTreeMap<u16, String> {
        self.bus.disassemble(start, end)
    }

    /// Nestest-format line for the instruction at PC
    pub fn trace_line(&self) -> String {
        self.bus.trace()
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new(EmulatorConfig::default())
    }
}
