// Arithmetic instructions for 6502 CPU
//
// The 2A03 has no decimal mode: ADC and SBC always operate in binary even
// when the D flag is set.

use crate::bus::MemoryMappedDevice;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Arithmetic Instructions
    // ========================================

    /// ADC - Add with Carry
    ///
    /// Adds the value from memory to the accumulator, plus the carry flag.
    ///
    /// Formula: A = A + M + C
    ///
    /// The Overflow (V) flag is set when the sign of the result is incorrect:
    /// - Adding two positive numbers produces a negative result
    /// - Adding two negative numbers produces a positive result
    ///
    /// Flags affected: C, Z, V, N
    pub fn adc(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.add_to_accumulator(value);
    }

    /// SBC - Subtract with Carry
    ///
    /// Formula: A = A - M - (1 - C)
    /// Equivalent to: A = A + ~M + C (using two's complement)
    ///
    /// Carry set afterwards means no borrow occurred.
    ///
    /// Flags affected: C, Z, V, N
    pub fn sbc(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.add_to_accumulator(!value);
    }

    /// Shared adder behind ADC and SBC
    ///
    /// V = ~(A ^ M) & (A ^ R) & 0x80: both inputs share a sign the result lacks.
    #[inline]
    fn add_to_accumulator(&mut self, value: u8) {
        let sum = self.a as u16 + value as u16 + self.get_carry() as u16;
        let result = sum as u8;

        self.set_carry(sum > 0xFF);
        self.set_overflow((!(self.a ^ value) & (self.a ^ result) & 0x80) != 0);

        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// INC - Increment Memory
    ///
    /// Flags affected: Z, N
    pub fn inc(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        let result = self.read_operand(bus, addr_result).wrapping_add(1);
        bus.write(addr_result.address, result);
        self.update_zero_and_negative_flags(result);
    }

    /// DEC - Decrement Memory
    ///
    /// Flags affected: Z, N
    pub fn dec(&mut self, bus: &mut dyn MemoryMappedDevice, addr_result: &AddressingResult) {
        let result = self.read_operand(bus, addr_result).wrapping_sub(1);
        bus.write(addr_result.address, result);
        self.update_zero_and_negative_flags(result);
    }

    /// INX - Increment X Register
    pub fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// INY - Increment Y Register
    pub fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    /// DEX - Decrement X Register
    pub fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// DEY - Decrement Y Register
    pub fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FlatMemory;

    /// Reference adder computed with signed/unsigned widening
    fn expected_adc(a: u8, m: u8, carry: bool) -> (u8, bool, bool) {
        let unsigned = a as u16 + m as u16 + carry as u16;
        let signed = a as i8 as i16 + m as i8 as i16 + carry as i16;
        (unsigned as u8, unsigned > 0xFF, !(-128..=127).contains(&signed))
    }

    // ========================================
    // ADC Tests
    // ========================================

    #[test]
    fn test_adc_flags_exhaustive() {
        let mut mem = FlatMemory::new();
        let mut cpu = Cpu::new();

        for a in 0..=255u8 {
            for m in 0..=255u8 {
                for carry in [false, true] {
                    cpu.a = a;
                    cpu.set_carry(carry);
                    cpu.adc(&mut mem, &AddressingResult::immediate(m));

                    let (result, c, v) = expected_adc(a, m, carry);
                    assert_eq!(cpu.a, result, "A={a:02X} M={m:02X} C={carry}");
                    assert_eq!(cpu.get_carry(), c, "C for A={a:02X} M={m:02X}");
                    assert_eq!(cpu.get_overflow(), v, "V for A={a:02X} M={m:02X}");
                    assert_eq!(cpu.get_zero(), result == 0);
                    assert_eq!(cpu.get_negative(), result & 0x80 != 0);
                }
            }
        }
    }

    #[test]
    fn test_adc_ignores_decimal_flag() {
        let mut mem = FlatMemory::new();
        let mut cpu = Cpu::new();
        cpu.set_decimal(true);
        cpu.set_carry(false);
        cpu.a = 0x09;

        cpu.adc(&mut mem, &AddressingResult::immediate(0x01));

        assert_eq!(cpu.a, 0x0A);
    }

    #[test]
    fn test_adc_reads_memory_operand() {
        let mut mem = FlatMemory::new();
        mem.write(0x0040, 0x10);
        let mut cpu = Cpu::new();
        cpu.set_carry(false);
        cpu.a = 0x20;

        cpu.adc(&mut mem, &AddressingResult::new(0x0040));

        assert_eq!(cpu.a, 0x30);
        assert_eq!(cpu.fetched(), 0x10);
    }

    // ========================================
    // SBC Tests
    // ========================================

    #[test]
    fn test_sbc_flags_exhaustive() {
        let mut mem = FlatMemory::new();
        let mut cpu = Cpu::new();

        for a in 0..=255u8 {
            for m in 0..=255u8 {
                for carry in [false, true] {
                    cpu.a = a;
                    cpu.set_carry(carry);
                    cpu.sbc(&mut mem, &AddressingResult::immediate(m));

                    let borrow = !carry as i16;
                    let unsigned = a as i16 - m as i16 - borrow;
                    let signed = a as i8 as i16 - m as i8 as i16 - borrow;

                    assert_eq!(cpu.a, unsigned as u8, "A={a:02X} M={m:02X} C={carry}");
                    assert_eq!(cpu.get_carry(), unsigned >= 0, "C for A={a:02X} M={m:02X}");
                    assert_eq!(
                        cpu.get_overflow(),
                        !(-128..=127).contains(&signed),
                        "V for A={a:02X} M={m:02X}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_sbc_simple_borrow() {
        let mut mem = FlatMemory::new();
        let mut cpu = Cpu::new();
        cpu.set_carry(true);
        cpu.a = 0x00;

        cpu.sbc(&mut mem, &AddressingResult::immediate(0x01));

        assert_eq!(cpu.a, 0xFF);
        assert!(!cpu.get_carry());
        assert!(cpu.get_negative());
    }

    // ========================================
    // INC / DEC Tests
    // ========================================

    #[test]
    fn test_inc_wraps_and_sets_zero() {
        let mut mem = FlatMemory::new();
        mem.write(0x0010, 0xFF);
        let mut cpu = Cpu::new();

        cpu.inc(&mut mem, &AddressingResult::new(0x0010));

        assert_eq!(mem.peek(0x0010), 0x00);
        assert!(cpu.get_zero());
    }

    #[test]
    fn test_dec_sets_negative() {
        let mut mem = FlatMemory::new();
        mem.write(0x0010, 0x00);
        let mut cpu = Cpu::new();

        cpu.dec(&mut mem, &AddressingResult::new(0x0010));

        assert_eq!(mem.peek(0x0010), 0xFF);
        assert!(cpu.get_negative());
    }

    #[test]
    fn test_register_increments() {
        let mut cpu = Cpu::new();
        cpu.x = 0xFF;
        cpu.y = 0x7F;

        cpu.inx();
        cpu.iny();

        assert_eq!(cpu.x, 0x00);
        assert_eq!(cpu.y, 0x80);
        assert!(cpu.get_negative());

        cpu.dex();
        cpu.dey();
        assert_eq!(cpu.x, 0xFF);
        assert_eq!(cpu.y, 0x7F);
        assert!(!cpu.get_negative());
    }
}
