// Addressing modes module for 6502 CPU
// Implements all 13 addressing modes used by the 6502 processor

use crate::bus::MemoryMappedDevice;

/// Result of an addressing mode calculation
///
/// Contains information about the effective address, whether a page boundary
/// was crossed (which adds an extra cycle), and the operand value if available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressingResult {
    /// The effective address where the data is located
    pub address: u16,

    /// Whether a page boundary was crossed during address calculation
    /// Some instructions add an extra cycle when this occurs
    pub page_crossed: bool,

    /// The operand value (used for immediate mode and accumulator mode)
    /// None for other modes that read from memory
    pub value: Option<u8>,
}

impl AddressingResult {
    /// Create a new addressing result with an address
    pub fn new(address: u16) -> Self {
        Self {
            address,
            page_crossed: false,
            value: None,
        }
    }

    /// Create a new addressing result with an immediate value
    pub fn immediate(value: u8) -> Self {
        Self {
            address: 0,
            page_crossed: false,
            value: Some(value),
        }
    }

    /// Set the page_crossed flag
    pub fn with_page_cross(mut self, crossed: bool) -> Self {
        self.page_crossed = crossed;
        self
    }
}

/// Addressing modes supported by the 6502
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Implied - No operand (e.g., CLC, NOP)
    Implied,

    /// Accumulator - Operate on accumulator (e.g., LSR A)
    Accumulator,

    /// Immediate - 8-bit constant (e.g., LDA #$01)
    Immediate,

    /// Zero Page - Address in zero page $00-$FF (e.g., LDA $80)
    ZeroPage,

    /// Zero Page,X - Zero page address + X register (e.g., LDA $80,X)
    ZeroPageX,

    /// Zero Page,Y - Zero page address + Y register (e.g., LDX $80,Y)
    ZeroPageY,

    /// Relative - Signed 8-bit offset for branches (e.g., BNE label)
    Relative,

    /// Absolute - 16-bit address (e.g., LDA $8000)
    Absolute,

    /// Absolute,X - 16-bit address + X register (e.g., LDA $8000,X)
    AbsoluteX,

    /// Absolute,Y - 16-bit address + Y register (e.g., LDA $8000,Y)
    AbsoluteY,

    /// Indirect - 16-bit pointer (JMP only) (e.g., JMP ($FFFC))
    Indirect,

    /// Indexed Indirect - Zero page pointer + X (e.g., LDA ($40,X))
    IndexedIndirect,

    /// Indirect Indexed - Zero page pointer + Y (e.g., LDA ($40),Y)
    IndirectIndexed,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode
    pub fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
            _ => 1,
        }
    }

    /// Short tag used in disassembly listings
    pub fn tag(self) -> &'static str {
        match self {
            AddressingMode::Implied => "IMP",
            AddressingMode::Accumulator => "ACC",
            AddressingMode::Immediate => "IMM",
            AddressingMode::ZeroPage => "ZP0",
            AddressingMode::ZeroPageX => "ZPX",
            AddressingMode::ZeroPageY => "ZPY",
            AddressingMode::Relative => "REL",
            AddressingMode::Absolute => "ABS",
            AddressingMode::AbsoluteX => "ABX",
            AddressingMode::AbsoluteY => "ABY",
            AddressingMode::Indirect => "IND",
            AddressingMode::IndexedIndirect => "IZX",
            AddressingMode::IndirectIndexed => "IZY",
        }
    }
}

/// Helper function to check if a page boundary was crossed
///
/// A page boundary is crossed when adding an offset to a base address
/// causes the high byte of the address to change.
#[inline]
fn page_crossed(base: u16, offset: u8) -> bool {
    let addr = base.wrapping_add(offset as u16);
    (base & 0xFF00) != (addr & 0xFF00)
}

impl super::Cpu {
    /// Resolve the operand location for `mode`, consuming operand bytes at PC
    ///
    /// Also records the effective address in the CPU's scratch registers.
    pub fn resolve_address(
        &mut self,
        mode: AddressingMode,
        bus: &mut dyn MemoryMappedDevice,
    ) -> AddressingResult {
        let result = match mode {
            AddressingMode::Implied => self.addr_implied(),
            AddressingMode::Accumulator => self.addr_accumulator(),
            AddressingMode::Immediate => self.addr_immediate(bus),
            AddressingMode::ZeroPage => self.addr_zero_page(bus),
            AddressingMode::ZeroPageX => self.addr_zero_page_x(bus),
            AddressingMode::ZeroPageY => self.addr_zero_page_y(bus),
            AddressingMode::Relative => self.addr_relative(bus),
            AddressingMode::Absolute => self.addr_absolute(bus),
            AddressingMode::AbsoluteX => self.addr_absolute_x(bus),
            AddressingMode::AbsoluteY => self.addr_absolute_y(bus),
            AddressingMode::Indirect => self.addr_indirect(bus),
            AddressingMode::IndexedIndirect => self.addr_indexed_indirect(bus),
            AddressingMode::IndirectIndexed => self.addr_indirect_indexed(bus),
        };

        if mode == AddressingMode::Relative {
            self.addr_rel = result.address;
        } else {
            self.addr_abs = result.address;
        }
        result
    }

    #[inline]
    fn fetch_pc_byte(&mut self, bus: &mut dyn MemoryMappedDevice) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    #[inline]
    fn fetch_pc_word(&mut self, bus: &mut dyn MemoryMappedDevice) -> u16 {
        let lo = self.fetch_pc_byte(bus);
        let hi = self.fetch_pc_byte(bus);
        u16::from_le_bytes([lo, hi])
    }

    // ========================================
    // Implied / Accumulator / Immediate
    // ========================================

    /// Implied addressing mode - No operand needed
    pub fn addr_implied(&self) -> AddressingResult {
        AddressingResult::new(0)
    }

    /// Accumulator addressing mode - Operate on the accumulator register
    pub fn addr_accumulator(&self) -> AddressingResult {
        AddressingResult::immediate(self.a)
    }

    /// Immediate addressing mode - 8-bit constant operand
    ///
    /// Format: LDA #$01
    /// The address is recorded as well so the trace can show it.
    pub fn addr_immediate(&mut self, bus: &mut dyn MemoryMappedDevice) -> AddressingResult {
        let address = self.pc;
        let value = self.fetch_pc_byte(bus);
        AddressingResult {
            address,
            page_crossed: false,
            value: Some(value),
        }
    }

    // ========================================
    // Zero Page Modes
    // ========================================

    /// Zero Page addressing mode - Address in page 0 ($00-$FF)
    pub fn addr_zero_page(&mut self, bus: &mut dyn MemoryMappedDevice) -> AddressingResult {
        let addr = self.fetch_pc_byte(bus) as u16;
        AddressingResult::new(addr)
    }

    /// Zero Page,X addressing mode - Zero page address + X register
    ///
    /// Wraps within zero page: $FF + 2 = $01 (not $0101).
    pub fn addr_zero_page_x(&mut self, bus: &mut dyn MemoryMappedDevice) -> AddressingResult {
        let base = self.fetch_pc_byte(bus);
        AddressingResult::new(base.wrapping_add(self.x) as u16)
    }

    /// Zero Page,Y addressing mode - Zero page address + Y register
    ///
    /// Wraps within zero page: $FF + 2 = $01 (not $0101).
    pub fn addr_zero_page_y(&mut self, bus: &mut dyn MemoryMappedDevice) -> AddressingResult {
        let base = self.fetch_pc_byte(bus);
        AddressingResult::new(base.wrapping_add(self.y) as u16)
    }

    // ========================================
    // Relative Mode
    // ========================================

    /// Relative addressing mode - Signed 8-bit offset for branch instructions
    ///
    /// The offset is sign-extended and added to the PC of the next
    /// instruction. `page_crossed` reports whether the target lies on a
    /// different page, which costs a taken branch one more cycle.
    pub fn addr_relative(&mut self, bus: &mut dyn MemoryMappedDevice) -> AddressingResult {
        let offset = self.fetch_pc_byte(bus) as i8;
        let target = self.pc.wrapping_add(offset as i16 as u16);
        let crossed = (self.pc & 0xFF00) != (target & 0xFF00);

        AddressingResult::new(target).with_page_cross(crossed)
    }

    // ========================================
    // Absolute Modes
    // ========================================

    /// Absolute addressing mode - 16-bit little-endian address
    pub fn addr_absolute(&mut self, bus: &mut dyn MemoryMappedDevice) -> AddressingResult {
        let addr = self.fetch_pc_word(bus);
        AddressingResult::new(addr)
    }

    /// Absolute,X addressing mode - 16-bit address + X register
    pub fn addr_absolute_x(&mut self, bus: &mut dyn MemoryMappedDevice) -> AddressingResult {
        let base = self.fetch_pc_word(bus);
        let addr = base.wrapping_add(self.x as u16);
        AddressingResult::new(addr).with_page_cross(page_crossed(base, self.x))
    }

    /// Absolute,Y addressing mode - 16-bit address + Y register
    pub fn addr_absolute_y(&mut self, bus: &mut dyn MemoryMappedDevice) -> AddressingResult {
        let base = self.fetch_pc_word(bus);
        let addr = base.wrapping_add(self.y as u16);
        AddressingResult::new(addr).with_page_cross(page_crossed(base, self.y))
    }

    // ========================================
    // Indirect Modes
    // ========================================

    /// Indirect addressing mode - 16-bit pointer (JMP only)
    ///
    /// IMPORTANT BUG: If the pointer is at $xxFF, the high byte is read from
    /// $xx00 instead of $(xx+1)00. JMP ($02FF) reads $02FF and $0200.
    pub fn addr_indirect(&mut self, bus: &mut dyn MemoryMappedDevice) -> AddressingResult {
        let ptr = self.fetch_pc_word(bus);

        let lo = bus.read(ptr);
        let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
        let hi = bus.read(hi_addr);

        AddressingResult::new(u16::from_le_bytes([lo, hi]))
    }

    /// Indexed Indirect addressing mode - ($nn,X)
    ///
    /// Steps:
    /// 1. Add X to zero page address (with wrapping)
    /// 2. Read 16-bit pointer from that location (wrapping in page 0)
    /// 3. Use pointer as the effective address
    pub fn addr_indexed_indirect(&mut self, bus: &mut dyn MemoryMappedDevice) -> AddressingResult {
        let base = self.fetch_pc_byte(bus);
        let ptr = base.wrapping_add(self.x);

        let lo = bus.read(ptr as u16);
        let hi = bus.read(ptr.wrapping_add(1) as u16);

        AddressingResult::new(u16::from_le_bytes([lo, hi]))
    }

    /// Indirect Indexed addressing mode - ($nn),Y
    ///
    /// Steps:
    /// 1. Read 16-bit pointer from zero page address (wrapping in page 0)
    /// 2. Add Y register to the pointer value
    /// 3. Use result as the effective address
    pub fn addr_indirect_indexed(&mut self, bus: &mut dyn MemoryMappedDevice) -> AddressingResult {
        let ptr = self.fetch_pc_byte(bus);

        let lo = bus.read(ptr as u16);
        let hi = bus.read(ptr.wrapping_add(1) as u16);

        let base = u16::from_le_bytes([lo, hi]);
        let addr = base.wrapping_add(self.y as u16);

        AddressingResult::new(addr).with_page_cross(page_crossed(base, self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::FlatMemory;
    use crate::cpu::Cpu;

    /// Helper function to create a memory image with data
    fn create_test_memory(data: &[(u16, u8)]) -> FlatMemory {
        let mut mem = FlatMemory::new();
        for &(addr, value) in data {
            mem.write(addr, value);
        }
        mem
    }

    fn cpu_at(pc: u16) -> Cpu {
        let mut cpu = Cpu::new();
        cpu.pc = pc;
        cpu
    }

    // ========================================
    // Implied / Accumulator / Immediate Tests
    // ========================================

    #[test]
    fn test_addr_accumulator() {
        let mut cpu = Cpu::new();
        cpu.a = 0x42;

        let result = cpu.addr_accumulator();

        assert_eq!(result.value, Some(0x42));
        assert!(!result.page_crossed);
    }

    #[test]
    fn test_addr_immediate() {
        let mut cpu = cpu_at(0x0100);
        let mut mem = create_test_memory(&[(0x0100, 0x42)]);

        let result = cpu.addr_immediate(&mut mem);

        assert_eq!(result.value, Some(0x42));
        assert_eq!(result.address, 0x0100);
        assert_eq!(cpu.pc, 0x0101);
    }

    // ========================================
    // Zero Page Tests
    // ========================================

    #[test]
    fn test_addr_zero_page_x_wrapping() {
        let mut cpu = cpu_at(0x0100);
        cpu.x = 0x10;

        // $FF + $10 = $0F (wraps within zero page)
        let mut mem = create_test_memory(&[(0x0100, 0xFF)]);
        let result = cpu.addr_zero_page_x(&mut mem);

        assert_eq!(result.address, 0x000F);
        assert_eq!(cpu.pc, 0x0101);
    }

    #[test]
    fn test_addr_zero_page_y_wrapping() {
        let mut cpu = cpu_at(0x0100);
        cpu.y = 0x02;

        let mut mem = create_test_memory(&[(0x0100, 0xFF)]);
        let result = cpu.addr_zero_page_y(&mut mem);

        assert_eq!(result.address, 0x0001);
    }

    // ========================================
    // Relative Tests
    // ========================================

    #[test]
    fn test_addr_relative_forward_and_backward() {
        let mut cpu = cpu_at(0x0200);
        let mut mem = create_test_memory(&[(0x0200, 0x10), (0x0201, 0xFE)]);

        let forward = cpu.addr_relative(&mut mem);
        assert_eq!(forward.address, 0x0211);
        assert!(!forward.page_crossed);

        // -2 from $0202 lands on $0200
        let backward = cpu.addr_relative(&mut mem);
        assert_eq!(backward.address, 0x0200);
        assert!(!backward.page_crossed);
    }

    #[test]
    fn test_addr_relative_page_cross() {
        let mut cpu = cpu_at(0x02F0);
        let mut mem = create_test_memory(&[(0x02F0, 0x20)]);

        let result = cpu.addr_relative(&mut mem);

        assert_eq!(result.address, 0x0311);
        assert!(result.page_crossed);
    }

    // ========================================
    // Absolute Tests
    // ========================================

    #[test]
    fn test_addr_absolute_x_page_cross() {
        let mut cpu = cpu_at(0x0100);
        cpu.x = 0x01;

        let mut mem = create_test_memory(&[(0x0100, 0xFF), (0x0101, 0x20)]);
        let result = cpu.addr_absolute_x(&mut mem);

        assert_eq!(result.address, 0x2100);
        assert!(result.page_crossed);
        assert_eq!(cpu.pc, 0x0102);
    }

    #[test]
    fn test_addr_absolute_y_no_page_cross() {
        let mut cpu = cpu_at(0x0100);
        cpu.y = 0x10;

        let mut mem = create_test_memory(&[(0x0100, 0x00), (0x0101, 0x20)]);
        let result = cpu.addr_absolute_y(&mut mem);

        assert_eq!(result.address, 0x2010);
        assert!(!result.page_crossed);
    }

    #[test]
    fn test_addr_absolute_x_wraps_address_space() {
        let mut cpu = cpu_at(0x0100);
        cpu.x = 0x02;

        let mut mem = create_test_memory(&[(0x0100, 0xFF), (0x0101, 0xFF)]);
        let result = cpu.addr_absolute_x(&mut mem);

        assert_eq!(result.address, 0x0001);
        assert!(result.page_crossed);
    }

    // ========================================
    // Indirect Tests
    // ========================================

    #[test]
    fn test_addr_indirect() {
        let mut cpu = cpu_at(0x0100);
        let mut mem = create_test_memory(&[
            (0x0100, 0x20),
            (0x0101, 0x03),
            (0x0320, 0x34),
            (0x0321, 0x12),
        ]);

        let result = cpu.addr_indirect(&mut mem);
        assert_eq!(result.address, 0x1234);
    }

    #[test]
    fn test_addr_indirect_page_boundary_bug() {
        let mut cpu = cpu_at(0x0100);
        let mut mem = create_test_memory(&[
            (0x0100, 0xFF),
            (0x0101, 0x02),
            (0x02FF, 0x34),
            (0x0200, 0x12),
            (0x0300, 0x56),
        ]);

        let result = cpu.addr_indirect(&mut mem);

        // High byte comes from $0200, not $0300
        assert_eq!(result.address, 0x1234);
    }

    #[test]
    fn test_addr_indexed_indirect_wraps_pointer() {
        let mut cpu = cpu_at(0x0100);
        cpu.x = 0x01;

        // ($FE,X) with X=1 reads pointer from $FF and $00
        let mut mem = create_test_memory(&[(0x0100, 0xFE), (0x00FF, 0x78), (0x0000, 0x56)]);
        let result = cpu.addr_indexed_indirect(&mut mem);

        assert_eq!(result.address, 0x5678);
    }

    #[test]
    fn test_addr_indirect_indexed_page_cross() {
        let mut cpu = cpu_at(0x0100);
        cpu.y = 0x10;

        let mut mem = create_test_memory(&[(0x0100, 0x40), (0x0040, 0xF8), (0x0041, 0x12)]);
        let result = cpu.addr_indirect_indexed(&mut mem);

        assert_eq!(result.address, 0x1308);
        assert!(result.page_crossed);
    }

    #[test]
    fn test_resolve_records_scratch_addresses() {
        let mut cpu = cpu_at(0x0100);
        let mut mem = create_test_memory(&[(0x0100, 0x34), (0x0101, 0x12), (0x0102, 0x05)]);

        cpu.resolve_address(AddressingMode::Absolute, &mut mem);
        cpu.resolve_address(AddressingMode::Relative, &mut mem);

        assert_eq!(cpu.scratch_addresses(), (0x1234, 0x0108));
    }

    #[test]
    fn test_operand_bytes() {
        assert_eq!(AddressingMode::Implied.operand_bytes(), 0);
        assert_eq!(AddressingMode::Relative.operand_bytes(), 1);
        assert_eq!(AddressingMode::IndirectIndexed.operand_bytes(), 1);
        assert_eq!(AddressingMode::Indirect.operand_bytes(), 2);
    }
}
