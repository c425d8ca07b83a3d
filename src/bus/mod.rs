// Bus module - System bus and clock
//
// The Bus owns the CPU and everything the CPU can address. Splitting the
// addressable half out into `MemoryMap` lets the CPU borrow it mutably while
// the Bus drives the clock.
//
// One Bus tick is one PPU cycle. The CPU (or OAM DMA in its place) runs on
// every third tick.

mod dma;
mod flat_memory;
mod memory_map;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use log::debug;

pub use flat_memory::FlatMemory;
pub use memory_map::{MemoryMap, RAM_SIZE};

use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::debug::disassembler;
use crate::input::Controller;
use crate::ppu::Ppu;

/// Trait for memory-mapped components
///
/// This trait defines the interface the CPU uses to reach memory. The system
/// bus implements it for the real console, `FlatMemory` for standalone CPU
/// testing.
pub trait MemoryMappedDevice {
    /// Read a byte from the device
    ///
    /// Some devices have side effects on read (e.g., PPU PPUSTATUS clears flags),
    /// so this method takes &mut self.
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to the device
    fn write(&mut self, addr: u16, data: u8);

    /// Read a byte without side effects, for tracing and disassembly
    fn peek(&self, addr: u16) -> u8;
}

/// PPU ticks per CPU cycle
const PPU_TICKS_PER_CPU_CYCLE: u64 = 3;

/// Main bus structure
///
/// Owns the CPU, the CPU memory map (RAM, PPU, cartridge, controllers, DMA)
/// and the system clock counter.
pub struct Bus {
    cpu: Cpu,
    map: MemoryMap,
    /// PPU ticks since the last reset
    system_clock: u64,
}

impl Bus {
    /// Create a bus with no cartridge inserted
    pub fn new() -> Self {
        Bus {
            cpu: Cpu::new(),
            map: MemoryMap::new(),
            system_clock: 0,
        }
    }

    /// Insert a cartridge, sharing it with the PPU for pattern fetches and mirroring
    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        debug!("Inserting cartridge: {:?}", cartridge);
        let cartridge = Rc::new(RefCell::new(cartridge));
        self.map.ppu.connect_cartridge(Rc::clone(&cartridge));
        self.map.cartridge = Some(cartridge);
    }

    /// Whether a cartridge is inserted
    pub fn has_cartridge(&self) -> bool {
        self.map.cartridge.is_some()
    }

    /// Reset the CPU and mapper and zero the system clock
    pub fn reset(&mut self) {
        debug!("Bus reset");
        if let Some(cartridge) = &self.map.cartridge {
            cartridge.borrow_mut().reset();
        }
        self.cpu.reset(&mut self.map);
        self.system_clock = 0;
    }

    /// Advance the system by one PPU cycle
    ///
    /// Every third call also advances the CPU by one cycle, unless an OAM
    /// DMA transfer is running, in which case DMA takes the CPU's slot. A
    /// pending PPU NMI is delivered after that.
    pub fn tick(&mut self) {
        self.map.ppu.tick();

        if self.system_clock % PPU_TICKS_PER_CPU_CYCLE == 0 {
            if self.map.dma.is_active() {
                self.map.dma_step(self.system_clock);
            } else {
                self.cpu.tick(&mut self.map);
            }
        }

        if self.map.ppu.take_nmi_request() {
            self.cpu.nmi(&mut self.map);
        }

        self.system_clock += 1;
    }

    /// Read through the CPU address decoder
    ///
    /// With `read_only` set, registers with read side effects are only peeked.
    pub fn cpu_read(&mut self, addr: u16, read_only: bool) -> u8 {
        self.map.cpu_read(addr, read_only)
    }

    /// Write through the CPU address decoder
    pub fn cpu_write(&mut self, addr: u16, data: u8) {
        self.map.cpu_write(addr, data);
    }

    /// Set the live button state of controller `port` (0 or 1)
    ///
    /// The game sees it after its next strobe write.
    pub fn set_controller(&mut self, port: usize, controller: &Controller) {
        self.set_controller_state(port, controller.to_byte());
    }

    /// Set the live button byte of controller `port` directly
    pub fn set_controller_state(&mut self, port: usize, buttons: u8) {
        if let Some(slot) = self.map.controller.get_mut(port) {
            *slot = buttons;
        }
    }

    /// Live button byte of controller `port`
    pub fn controller_state(&self, port: usize) -> u8 {
        self.map.controller.get(port).copied().unwrap_or(0)
    }

    /// PPU ticks since the last reset
    pub fn system_clock(&self) -> u64 {
        self.system_clock
    }

    /// Whether an OAM DMA transfer currently holds the CPU
    pub fn dma_in_progress(&self) -> bool {
        self.map.dma.is_active()
    }

    /// nestest-format trace line for the instruction at the CPU's PC
    pub fn trace(&self) -> String {
        self.cpu.trace(&self.map)
    }

    /// Disassemble CPU space `start..=end` without side effects
    pub fn disassemble(&self, start: u16, end: u16) -> BTreeMap<u16, String> {
        disassembler::disassemble_range(&self.map, start, end)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn ppu(&self) -> &Ppu {
        &self.map.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.map.ppu
    }

    /// The CPU memory map
    pub fn memory(&self) -> &MemoryMap {
        &self.map
    }

    /// Internal RAM contents
    pub fn ram(&self) -> &[u8; RAM_SIZE] {
        &self.map.ram
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
