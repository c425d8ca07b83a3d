// Logical instructions for 6502 CPU

use crate::bus::MemoryMappedDevice;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Logical Instructions
    // ========================================

    /// AND - Logical AND
    ///
    /// Formula: A = A & M
    ///
    /// Flags affected: Z, N
    pub fn and(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        self.a &= self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.a);
    }

    /// ORA - Logical Inclusive OR
    ///
    /// Formula: A = A | M
    ///
    /// Flags affected: Z, N
    pub fn ora(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        self.a |= self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.a);
    }

    /// EOR - Exclusive OR
    ///
    /// Formula: A = A ^ M
    ///
    /// Flags affected: Z, N
    pub fn eor(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        self.a ^= self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.a);
    }

    /// BIT - Bit Test
    ///
    /// Tests bits in memory against the accumulator without storing a result.
    ///
    /// Flags affected:
    /// - Z: Set if (A & M) == 0
    /// - V: Copied from bit 6 of M
    /// - N: Copied from bit 7 of M
    pub fn bit(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);

        self.set_zero((self.a & value) == 0);
        self.set_overflow((value & 0x40) != 0);
        self.set_negative((value & 0x80) != 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FlatMemory;

    #[test]
    fn test_and_basic() {
        let mut mem = FlatMemory::new();
        let mut cpu = Cpu::new();

        cpu.a = 0b1111_0000;
        cpu.and(&mut mem, &AddressingResult::immediate(0b1010_1010));

        assert_eq!(cpu.a, 0b1010_0000);
        assert!(!cpu.get_zero());
        assert!(cpu.get_negative());
    }

    #[test]
    fn test_ora_zero_result() {
        let mut mem = FlatMemory::new();
        let mut cpu = Cpu::new();

        cpu.a = 0;
        cpu.ora(&mut mem, &AddressingResult::immediate(0));

        assert!(cpu.get_zero());
    }

    #[test]
    fn test_eor_toggles_bits() {
        let mut mem = FlatMemory::new();
        let mut cpu = Cpu::new();

        cpu.a = 0xFF;
        cpu.eor(&mut mem, &AddressingResult::immediate(0x0F));

        assert_eq!(cpu.a, 0xF0);
        assert!(cpu.get_negative());
    }

    #[test]
    fn test_bit_copies_high_bits_from_memory() {
        let mut mem = FlatMemory::new();
        mem.write(0x0010, 0xC0);
        let mut cpu = Cpu::new();
        cpu.a = 0x01;

        cpu.bit(&mut mem, &AddressingResult::new(0x0010));

        assert!(cpu.get_zero());
        assert!(cpu.get_overflow());
        assert!(cpu.get_negative());
        assert_eq!(cpu.a, 0x01);
    }

    #[test]
    fn test_bit_clears_flags() {
        let mut mem = FlatMemory::new();
        mem.write(0x0010, 0x01);
        let mut cpu = Cpu::new();
        cpu.a = 0x01;
        cpu.set_overflow(true);
        cpu.set_negative(true);

        cpu.bit(&mut mem, &AddressingResult::new(0x0010));

        assert!(!cpu.get_zero());
        assert!(!cpu.get_overflow());
        assert!(!cpu.get_negative());
    }
}
