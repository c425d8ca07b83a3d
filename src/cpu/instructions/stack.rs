// Stack instructions for 6502 CPU
// The stack lives in page one ($0100-$01FF) and grows downward.

use crate::bus::MemoryMappedDevice;
use crate::cpu::{flags, Cpu};

impl Cpu {
    // ========================================
    // Push Instructions
    // ========================================

    /// PHA - Push Accumulator
    ///
    /// Cycles: 3
    pub fn pha(&mut self, bus: &mut dyn MemoryMappedDevice) {
        self.stack_push(bus, self.a);
    }

    /// PHP - Push Processor Status
    ///
    /// The pushed copy always has B and U set; the live register is unchanged.
    ///
    /// Cycles: 3
    pub fn php(&mut self, bus: &mut dyn MemoryMappedDevice) {
        self.stack_push(bus, self.status | flags::BREAK | flags::UNUSED);
    }

    // ========================================
    // Pull Instructions
    // ========================================

    /// PLA - Pull Accumulator
    ///
    /// Flags affected: Z, N
    ///
    /// Cycles: 4
    pub fn pla(&mut self, bus: &mut dyn MemoryMappedDevice) {
        self.a = self.stack_pop(bus);
        self.update_zero_and_negative_flags(self.a);
    }

    /// PLP - Pull Processor Status
    ///
    /// B is not a real register bit and is dropped; U stays set.
    ///
    /// Cycles: 4
    pub fn plp(&mut self, bus: &mut dyn MemoryMappedDevice) {
        let status = self.stack_pop(bus);
        self.status = (status & !flags::BREAK) | flags::UNUSED;
    }
}
