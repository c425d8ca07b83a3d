// NES Emulation Core
//
// Cycle-stepped 6502 CPU, 2C02 PPU, system bus with OAM DMA, and iNES
// cartridges. Windowing, audio output and input polling are left to the
// host; it drives `Emulator` (or `Bus` directly) and reads back frames.

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod debug;
pub mod emulator;
pub mod input;
pub mod ppu;

// Re-export main types for convenience
pub use bus::{Bus, FlatMemory, MemoryMappedDevice};
pub use cartridge::{Cartridge, CartridgeError, INesError, INesHeader, Mirroring};
pub use cpu::Cpu;
pub use debug::{disassemble_range, DisassembledInstruction};
pub use emulator::{ConfigError, Emulator, EmulatorConfig};
pub use input::{Button, Controller};
pub use ppu::Ppu;
