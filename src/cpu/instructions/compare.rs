// Comparison instructions for 6502 CPU
// These instructions perform subtraction without storing the result,
// only updating the processor status flags.

use crate::bus::MemoryMappedDevice;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Comparison Instructions
    // ========================================

    /// CMP - Compare Accumulator
    ///
    /// Compares the accumulator with a value from memory by performing
    /// subtraction (A - M) without storing the result:
    /// - Carry (C): Set if A >= M (no borrow needed)
    /// - Zero (Z): Set if A == M (result is zero)
    /// - Negative (N): Set if bit 7 of the result is 1
    ///
    /// Flags affected: C, Z, N
    ///
    /// # Example
    /// ```text
    /// A = 0x50, M = 0x30
    /// CMP: A - M = 0x50 - 0x30 = 0x20
    /// Result: C=1 (A >= M), Z=0 (A != M), N=0 (bit 7 is 0)
    /// ```
    pub fn cmp(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.compare(self.a, value);
    }

    /// CPX - Compare X Register
    pub fn cpx(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.compare(self.x, value);
    }

    /// CPY - Compare Y Register
    pub fn cpy(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.compare(self.y, value);
    }

    #[inline]
    fn compare(&mut self, register_value: u8, memory_value: u8) {
        let result = register_value.wrapping_sub(memory_value);

        self.set_carry(register_value >= memory_value);
        self.update_zero_and_negative_flags(result);
    }
}
