// Debug module - Diagnostic views of emulator state
//
// Everything here reads memory through `MemoryMappedDevice::peek`, so it can
// be used between clocks without changing what the program observes.

pub mod disassembler;

pub use disassembler::{disassemble_instruction, disassemble_range, DisassembledInstruction};
