// CPU module - 6502 (2A03) processor, stepped one clock at a time
//
// The whole instruction executes on the first clock of its window; the
// remaining clocks are counted down so that the bus sees the correct cycle
// cost. Decimal mode is stored but never used by the arithmetic (the 2A03
// lacks the BCD circuitry).

pub mod addressing;
pub mod execute;
pub mod instructions;
pub mod opcodes;

use crate::bus::MemoryMappedDevice;

pub use addressing::{AddressingMode, AddressingResult};
pub use opcodes::{Instruction, OpcodeInfo, OPCODE_TABLE};

/// Processor Status Flags (P register)
///
/// Bit layout:
/// ```text
/// 7  6  5  4  3  2  1  0
/// N  V  -  B  D  I  Z  C
/// ```
///
/// - N: Negative flag (bit 7)
/// - V: Overflow flag (bit 6)
/// - -: Unused flag (bit 5, always 1)
/// - B: Break command flag (bit 4, only exists on the stack copy)
/// - D: Decimal mode flag (bit 3, no effect on the NES)
/// - I: Interrupt disable flag (bit 2)
/// - Z: Zero flag (bit 1)
/// - C: Carry flag (bit 0)
pub mod flags {
    pub const CARRY: u8 = 0b0000_0001; // Bit 0: C
    pub const ZERO: u8 = 0b0000_0010; // Bit 1: Z
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100; // Bit 2: I
    pub const DECIMAL: u8 = 0b0000_1000; // Bit 3: D
    pub const BREAK: u8 = 0b0001_0000; // Bit 4: B
    pub const UNUSED: u8 = 0b0010_0000; // Bit 5: - (always 1)
    pub const OVERFLOW: u8 = 0b0100_0000; // Bit 6: V
    pub const NEGATIVE: u8 = 0b1000_0000; // Bit 7: N
}

/// Base of the hardware stack page
pub const STACK_BASE: u16 = 0x0100;

/// Interrupt vectors
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Clock cost of the reset sequence
pub const RESET_CYCLES: u8 = 8;
/// Clock cost of an IRQ entry
pub const IRQ_CYCLES: u8 = 7;
/// Clock cost of an NMI entry
pub const NMI_CYCLES: u8 = 8;

/// CPU structure representing the 6502 processor state
#[derive(Debug, Clone)]
pub struct Cpu {
    // Registers
    pub a: u8,      // Accumulator
    pub x: u8,      // Index Register X
    pub y: u8,      // Index Register Y
    pub sp: u8,     // Stack Pointer
    pub pc: u16,    // Program Counter
    pub status: u8, // Processor Status flags

    // Scratch state of the instruction in flight
    pub(crate) opcode: u8,
    pub(crate) fetched: u8,
    pub(crate) addr_abs: u16,
    pub(crate) addr_rel: u16,

    /// Clocks left before the next opcode fetch
    pub(crate) cycles: u8,
    /// Clocks since construction
    pub(crate) clock_count: u64,
}

impl Cpu {
    /// Create a new CPU instance with power-on register values
    ///
    /// PC stays at 0 until `reset` loads the reset vector.
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: flags::UNUSED | flags::INTERRUPT_DISABLE,
            opcode: 0,
            fetched: 0,
            addr_abs: 0,
            addr_rel: 0,
            cycles: 0,
            clock_count: 0,
        }
    }

    /// Reset the CPU
    ///
    /// Loads PC from $FFFC/$FFFD, clears A/X/Y, sets SP to $FD and leaves
    /// only the unused status bit set. The sequence occupies 8 clocks before
    /// the first instruction is fetched.
    pub fn reset(&mut self, bus: &mut dyn MemoryMappedDevice) {
        self.pc = self.read_word(bus, RESET_VECTOR);

        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = flags::UNUSED;

        self.addr_abs = 0;
        self.addr_rel = 0;
        self.fetched = 0;

        self.cycles = RESET_CYCLES;
    }

    /// Maskable interrupt request
    ///
    /// Ignored while the interrupt disable flag is set.
    pub fn irq(&mut self, bus: &mut dyn MemoryMappedDevice) {
        if self.get_interrupt_disable() {
            return;
        }
        self.interrupt(bus, IRQ_VECTOR);
        self.cycles = IRQ_CYCLES;
    }

    /// Non-maskable interrupt
    pub fn nmi(&mut self, bus: &mut dyn MemoryMappedDevice) {
        self.interrupt(bus, NMI_VECTOR);
        self.cycles = NMI_CYCLES;
    }

    /// Push PC and status (B clear, U set), set I, then jump through `vector`
    fn interrupt(&mut self, bus: &mut dyn MemoryMappedDevice, vector: u16) {
        self.stack_push_u16(bus, self.pc);

        let pushed = (self.status & !flags::BREAK) | flags::UNUSED;
        self.stack_push(bus, pushed);
        self.set_interrupt_disable(true);

        self.pc = self.read_word(bus, vector);
    }

    /// Whether the current instruction (or interrupt/reset sequence) has retired
    #[inline]
    pub fn is_instruction_complete(&self) -> bool {
        self.cycles == 0
    }

    /// Clocks left in the current instruction
    #[inline]
    pub fn remaining_cycles(&self) -> u8 {
        self.cycles
    }

    /// Total clocks this CPU has been ticked
    #[inline]
    pub fn total_cycles(&self) -> u64 {
        self.clock_count
    }

    /// Opcode of the instruction most recently fetched
    #[inline]
    pub fn current_opcode(&self) -> u8 {
        self.opcode
    }

    /// Operand byte most recently fetched by an instruction
    #[inline]
    pub fn fetched(&self) -> u8 {
        self.fetched
    }

    /// Effective (absolute, relative) address of the instruction in flight
    #[inline]
    pub fn scratch_addresses(&self) -> (u16, u16) {
        (self.addr_abs, self.addr_rel)
    }

    #[inline]
    fn read_word(&self, bus: &mut dyn MemoryMappedDevice, addr: u16) -> u16 {
        let lo = bus.read(addr);
        let hi = bus.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    // ========================================
    // Stack Helpers
    // ========================================

    /// Push a byte to $0100+SP, then decrement SP
    #[inline]
    pub(crate) fn stack_push(&mut self, bus: &mut dyn MemoryMappedDevice, value: u8) {
        bus.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Increment SP, then pull the byte at $0100+SP
    #[inline]
    pub(crate) fn stack_pop(&mut self, bus: &mut dyn MemoryMappedDevice) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE | self.sp as u16)
    }

    /// Push a word high byte first
    pub(crate) fn stack_push_u16(&mut self, bus: &mut dyn MemoryMappedDevice, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.stack_push(bus, hi);
        self.stack_push(bus, lo);
    }

    /// Pull a word low byte first
    pub(crate) fn stack_pop_u16(&mut self, bus: &mut dyn MemoryMappedDevice) -> u16 {
        let lo = self.stack_pop(bus);
        let hi = self.stack_pop(bus);
        u16::from_le_bytes([lo, hi])
    }

    // ========================================
    // Status Flag Manipulation Methods
    // ========================================

    /// Get the value of a specific flag
    #[inline]
    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    /// Set a specific flag to 1
    #[inline]
    pub fn set_flag(&mut self, flag: u8) {
        self.status |= flag;
    }

    /// Clear a specific flag (set to 0)
    #[inline]
    pub fn clear_flag(&mut self, flag: u8) {
        self.status &= !flag;
    }

    /// Update a flag based on a condition
    #[inline]
    pub fn update_flag(&mut self, flag: u8, condition: bool) {
        if condition {
            self.set_flag(flag);
        } else {
            self.clear_flag(flag);
        }
    }

    #[inline]
    pub fn get_carry(&self) -> bool {
        self.get_flag(flags::CARRY)
    }

    #[inline]
    pub fn get_zero(&self) -> bool {
        self.get_flag(flags::ZERO)
    }

    #[inline]
    pub fn get_interrupt_disable(&self) -> bool {
        self.get_flag(flags::INTERRUPT_DISABLE)
    }

    #[inline]
    pub fn get_decimal(&self) -> bool {
        self.get_flag(flags::DECIMAL)
    }

    #[inline]
    pub fn get_overflow(&self) -> bool {
        self.get_flag(flags::OVERFLOW)
    }

    #[inline]
    pub fn get_negative(&self) -> bool {
        self.get_flag(flags::NEGATIVE)
    }

    #[inline]
    pub fn set_carry(&mut self, value: bool) {
        self.update_flag(flags::CARRY, value);
    }

    #[inline]
    pub fn set_zero(&mut self, value: bool) {
        self.update_flag(flags::ZERO, value);
    }

    #[inline]
    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.update_flag(flags::INTERRUPT_DISABLE, value);
    }

    #[inline]
    pub fn set_decimal(&mut self, value: bool) {
        self.update_flag(flags::DECIMAL, value);
    }

    #[inline]
    pub fn set_overflow(&mut self, value: bool) {
        self.update_flag(flags::OVERFLOW, value);
    }

    #[inline]
    pub fn set_negative(&mut self, value: bool) {
        self.update_flag(flags::NEGATIVE, value);
    }

    /// Update Zero and Negative flags based on a value
    #[inline]
    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_zero(value == 0);
        self.set_negative((value & 0x80) != 0);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
