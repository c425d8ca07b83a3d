// Jump and subroutine instructions for 6502 CPU

use crate::bus::MemoryMappedDevice;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Jump and Subroutine Instructions
    // ========================================

    /// JMP - Jump
    ///
    /// Sets PC to the effective address. The indirect form's page-wrap quirk
    /// is handled by the addressing mode.
    ///
    /// Cycles: 3 (absolute), 5 (indirect)
    pub fn jmp(&mut self, addr_result: &AddressingResult) {
        self.pc = addr_result.address;
    }

    /// JSR - Jump to Subroutine
    ///
    /// Pushes the address of the last byte of the JSR instruction (return
    /// address minus one), high byte first, then jumps.
    ///
    /// Cycles: 6
    ///
    /// # Example
    /// ```text
    /// $8000: JSR $9000   ; pushes $80, $02
    /// $8003: ...         ; RTS returns here
    /// ```
    pub fn jsr(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        let return_addr = self.pc.wrapping_sub(1);
        self.stack_push_u16(bus, return_addr);
        self.pc = addr_result.address;
    }

    /// RTS - Return from Subroutine
    ///
    /// Pulls the return address and adds one.
    ///
    /// Cycles: 6
    pub fn rts(&mut self, bus: &mut dyn MemoryMappedDevice) {
        self.pc = self.stack_pop_u16(bus).wrapping_add(1);
    }
}
