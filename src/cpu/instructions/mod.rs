// Instructions module for 6502 CPU
// This module organizes CPU instructions by semantic grouping

pub mod arithmetic;
pub mod branch;
pub mod compare;
pub mod flags;
pub mod jump_subroutine;
pub mod load_store;
pub mod logic;
pub mod miscellaneous;
pub mod shift_rotate;
pub mod stack;
pub mod transfer;

use crate::bus::MemoryMappedDevice;
use crate::cpu::addressing::AddressingResult;

impl crate::cpu::Cpu {
    // ========================================
    // Helper Functions
    // ========================================

    /// Read the operand of the instruction in flight
    ///
    /// Immediate and accumulator operands are already in the addressing
    /// result; everything else is read from memory. The byte is kept in the
    /// fetched-operand scratch register.
    #[inline]
    pub(crate) fn read_operand(
        &mut self,
        bus: &mut dyn MemoryMappedDevice,
        addr_result: &AddressingResult,
    ) -> u8 {
        let value = match addr_result.value {
            Some(value) => value,
            None => bus.read(addr_result.address),
        };
        self.fetched = value;
        value
    }

    /// Store the result of a read-modify-write instruction
    ///
    /// Accumulator-mode shifts write back to A, every other mode to memory.
    #[inline]
    pub(crate) fn write_result(
        &mut self,
        bus: &mut dyn MemoryMappedDevice,
        addr_result: &AddressingResult,
        is_accumulator: bool,
        value: u8,
    ) {
        if is_accumulator {
            self.a = value;
        } else {
            bus.write(addr_result.address, value);
        }
    }
}
