// Shift and rotate instructions for 6502 CPU

use crate::bus::MemoryMappedDevice;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Shift Instructions
    // ========================================

    /// ASL - Arithmetic Shift Left
    ///
    /// Formula: C <- [76543210] <- 0
    ///
    /// Flags affected: C, Z, N
    /// - C: Set to the value of bit 7 before the shift
    /// - Z: Set if the result is zero
    /// - N: Set if bit 7 of the result is set
    ///
    /// # Arguments
    /// * `bus` - The memory bus for reading/writing
    /// * `addr_result` - The addressing result containing the address or accumulator value
    /// * `is_accumulator` - True if operating on accumulator, false if operating on memory
    pub fn asl(
        &mut self,
        bus: &mut dyn MemoryMappedDevice,
        addr_result: &AddressingResult,
        is_accumulator: bool,
    ) {
        let value = self.read_operand(bus, addr_result);
        let result = value << 1;

        self.set_carry(value & 0x80 != 0);
        self.update_zero_and_negative_flags(result);
        self.write_result(bus, addr_result, is_accumulator, result);
    }

    /// LSR - Logical Shift Right
    ///
    /// Formula: 0 -> [76543210] -> C
    ///
    /// Flags affected: C, Z, N (N is always cleared)
    pub fn lsr(
        &mut self,
        bus: &mut dyn MemoryMappedDevice,
        addr_result: &AddressingResult,
        is_accumulator: bool,
    ) {
        let value = self.read_operand(bus, addr_result);
        let result = value >> 1;

        self.set_carry(value & 0x01 != 0);
        self.update_zero_and_negative_flags(result);
        self.write_result(bus, addr_result, is_accumulator, result);
    }

    // ========================================
    // Rotate Instructions
    // ========================================

    /// ROL - Rotate Left
    ///
    /// Formula: C <- [76543210] <- C
    ///
    /// Flags affected: C, Z, N
    pub fn rol(
        &mut self,
        bus: &mut dyn MemoryMappedDevice,
        addr_result: &AddressingResult,
        is_accumulator: bool,
    ) {
        let value = self.read_operand(bus, addr_result);
        let result = (value << 1) | self.get_carry() as u8;

        self.set_carry(value & 0x80 != 0);
        self.update_zero_and_negative_flags(result);
        self.write_result(bus, addr_result, is_accumulator, result);
    }

    /// ROR - Rotate Right
    ///
    /// Formula: C -> [76543210] -> C
    ///
    /// Flags affected: C, Z, N
    pub fn ror(
        &mut self,
        bus: &mut dyn MemoryMappedDevice,
        addr_result: &AddressingResult,
        is_accumulator: bool,
    ) {
        let value = self.read_operand(bus, addr_result);
        let result = (value >> 1) | ((self.get_carry() as u8) << 7);

        self.set_carry(value & 0x01 != 0);
        self.update_zero_and_negative_flags(result);
        self.write_result(bus, addr_result, is_accumulator, result);
    }
}
