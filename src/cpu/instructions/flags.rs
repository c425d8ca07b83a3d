// Flag manipulation instructions for 6502 CPU
// These instructions directly set or clear specific processor status flags.

use crate::cpu::flags;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Carry Flag Instructions
    // ========================================

    /// CLC - Clear Carry Flag
    ///
    /// Operation: C = 0
    ///
    /// Cycles: 2 cycles
    ///
    /// # Example
    /// ```text
    /// CLC         ; Clear carry flag
    /// ADC #$10    ; Add with carry (C=0)
    /// ```
    pub fn clc(&mut self) {
        self.clear_flag(flags::CARRY);
    }

    /// SEC - Set Carry Flag
    ///
    /// Operation: C = 1
    ///
    /// Used before SBC so that no borrow is subtracted.
    pub fn sec(&mut self) {
        self.set_flag(flags::CARRY);
    }

    // ========================================
    // Interrupt Flag Instructions
    // ========================================

    /// CLI - Clear Interrupt Disable
    ///
    /// Operation: I = 0. IRQs are accepted from the next instruction on.
    pub fn cli(&mut self) {
        self.clear_flag(flags::INTERRUPT_DISABLE);
    }

    /// SEI - Set Interrupt Disable
    ///
    /// Operation: I = 1. NMI is not affected.
    pub fn sei(&mut self) {
        self.set_flag(flags::INTERRUPT_DISABLE);
    }

    // ========================================
    // Decimal / Overflow Flag Instructions
    // ========================================

    /// CLD - Clear Decimal Mode
    pub fn cld(&mut self) {
        self.clear_flag(flags::DECIMAL);
    }

    /// SED - Set Decimal Mode
    ///
    /// The flag is stored and pushed normally but arithmetic stays binary.
    pub fn sed(&mut self) {
        self.set_flag(flags::DECIMAL);
    }

    /// CLV - Clear Overflow Flag
    ///
    /// There is no matching "set overflow" instruction.
    pub fn clv(&mut self) {
        self.clear_flag(flags::OVERFLOW);
    }
}
