// Miscellaneous instructions for 6502 CPU
// NOP, BRK and RTI

use crate::bus::MemoryMappedDevice;
use crate::cpu::{flags, Cpu, IRQ_VECTOR};

impl Cpu {
    // ========================================
    // No Operation
    // ========================================

    /// NOP - No Operation
    ///
    /// Also executed for every undocumented opcode, after its addressing
    /// mode has consumed the operand bytes.
    ///
    /// Cycles: 2 (documented form)
    pub fn nop(&mut self) {}

    // ========================================
    // Interrupt Instructions
    // ========================================

    /// BRK - Force Interrupt
    ///
    /// Software interrupt through the IRQ vector. The byte after the opcode
    /// is a padding byte, so the pushed return address is PC + 2.
    ///
    /// Pushes (in order):
    /// 1. PC high byte
    /// 2. PC low byte
    /// 3. Status with B and U set
    ///
    /// Then sets I and loads PC from $FFFE/$FFFF.
    ///
    /// Cycles: 7
    pub fn brk(&mut self, bus: &mut dyn MemoryMappedDevice) {
        self.pc = self.pc.wrapping_add(1);
        self.stack_push_u16(bus, self.pc);
        self.stack_push(bus, self.status | flags::BREAK | flags::UNUSED);
        self.set_interrupt_disable(true);

        let lo = bus.read(IRQ_VECTOR);
        let hi = bus.read(IRQ_VECTOR.wrapping_add(1));
        self.pc = u16::from_le_bytes([lo, hi]);
    }

    /// RTI - Return from Interrupt
    ///
    /// Pulls status (B discarded, U forced on) then PC. Unlike RTS the
    /// pulled address is used as-is.
    ///
    /// Cycles: 6
    pub fn rti(&mut self, bus: &mut dyn MemoryMappedDevice) {
        let status = self.stack_pop(bus);
        self.status = (status & !flags::BREAK) | flags::UNUSED;
        self.pc = self.stack_pop_u16(bus);
    }
}
