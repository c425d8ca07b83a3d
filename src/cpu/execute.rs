// CPU execution and trace logging module

use std::collections::BTreeMap;

use crate::bus::MemoryMappedDevice;
use crate::cpu::addressing::{AddressingMode, AddressingResult};
use crate::cpu::opcodes::{Instruction, OpcodeInfo, OPCODE_TABLE};
use crate::cpu::{flags, Cpu};
use crate::debug::disassembler;

impl Cpu {
    /// Advance the CPU by one clock
    ///
    /// When no instruction is in flight the next opcode is fetched, decoded
    /// and executed in full on this clock, and its cycle cost (base, page
    /// cross penalty and branch penalty) is loaded into the countdown. Every
    /// clock then decrements the countdown by one.
    pub fn tick(&mut self, bus: &mut dyn MemoryMappedDevice) {
        if self.cycles == 0 {
            self.opcode = bus.read(self.pc);
            self.set_flag(flags::UNUSED);
            self.pc = self.pc.wrapping_add(1);

            let info = &OPCODE_TABLE[self.opcode as usize];
            self.cycles = info.cycles;

            let addr_result = self.resolve_address(info.mode, bus);
            let branch_cycles = self.execute_instruction(info, &addr_result, bus);

            if info.page_cycle && addr_result.page_crossed {
                self.cycles += 1;
            }
            self.cycles += branch_cycles;

            self.set_flag(flags::UNUSED);
        }

        self.clock_count += 1;
        self.cycles -= 1;
    }

    /// Execute a decoded instruction
    /// Returns the number of extra cycles consumed (used by branch instructions)
    fn execute_instruction(
        &mut self,
        info: &OpcodeInfo,
        addr_result: &AddressingResult,
        bus: &mut dyn MemoryMappedDevice,
    ) -> u8 {
        let is_accumulator = info.mode == AddressingMode::Accumulator;

        match info.instruction {
            // Load/Store instructions
            Instruction::Lda => self.lda(bus, addr_result),
            Instruction::Ldx => self.ldx(bus, addr_result),
            Instruction::Ldy => self.ldy(bus, addr_result),
            Instruction::Sta => self.sta(bus, addr_result),
            Instruction::Stx => self.stx(bus, addr_result),
            Instruction::Sty => self.sty(bus, addr_result),

            // Arithmetic instructions
            Instruction::Adc => self.adc(bus, addr_result),
            Instruction::Sbc => self.sbc(bus, addr_result),
            Instruction::Inc => self.inc(bus, addr_result),
            Instruction::Dec => self.dec(bus, addr_result),
            Instruction::Inx => self.inx(),
            Instruction::Iny => self.iny(),
            Instruction::Dex => self.dex(),
            Instruction::Dey => self.dey(),

            // Logical instructions
            Instruction::And => self.and(bus, addr_result),
            Instruction::Ora => self.ora(bus, addr_result),
            Instruction::Eor => self.eor(bus, addr_result),
            Instruction::Bit => self.bit(bus, addr_result),

            // Shift/Rotate instructions
            Instruction::Asl => self.asl(bus, addr_result, is_accumulator),
            Instruction::Lsr => self.lsr(bus, addr_result, is_accumulator),
            Instruction::Rol => self.rol(bus, addr_result, is_accumulator),
            Instruction::Ror => self.ror(bus, addr_result, is_accumulator),

            // Compare instructions
            Instruction::Cmp => self.cmp(bus, addr_result),
            Instruction::Cpx => self.cpx(bus, addr_result),
            Instruction::Cpy => self.cpy(bus, addr_result),

            // Branch instructions (return extra cycles)
            Instruction::Bcc => return self.bcc(addr_result),
            Instruction::Bcs => return self.bcs(addr_result),
            Instruction::Beq => return self.beq(addr_result),
            Instruction::Bmi => return self.bmi(addr_result),
            Instruction::Bne => return self.bne(addr_result),
            Instruction::Bpl => return self.bpl(addr_result),
            Instruction::Bvc => return self.bvc(addr_result),
            Instruction::Bvs => return self.bvs(addr_result),

            // Jump/Subroutine instructions
            Instruction::Jmp => self.jmp(addr_result),
            Instruction::Jsr => self.jsr(bus, addr_result),
            Instruction::Rts => self.rts(bus),

            // Stack instructions
            Instruction::Pha => self.pha(bus),
            Instruction::Pla => self.pla(bus),
            Instruction::Php => self.php(bus),
            Instruction::Plp => self.plp(bus),

            // Transfer instructions
            Instruction::Tax => self.tax(),
            Instruction::Tay => self.tay(),
            Instruction::Txa => self.txa(),
            Instruction::Tya => self.tya(),
            Instruction::Tsx => self.tsx(),
            Instruction::Txs => self.txs(),

            // Flag instructions
            Instruction::Clc => self.clc(),
            Instruction::Cld => self.cld(),
            Instruction::Cli => self.cli(),
            Instruction::Clv => self.clv(),
            Instruction::Sec => self.sec(),
            Instruction::Sed => self.sed(),
            Instruction::Sei => self.sei(),

            // Miscellaneous instructions
            Instruction::Brk => self.brk(bus),
            Instruction::Rti => self.rti(bus),
            Instruction::Nop | Instruction::Illegal => self.nop(),
        }
        0
    }

    /// Generate a trace line for the instruction at PC in nestest format
    ///
    /// Format: PC  OP OP OP  MNEMONIC OPERAND    A:XX X:XX Y:XX P:XX SP:XX CYC:N
    /// Example: C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7
    ///
    /// Memory is only peeked, so tracing never disturbs register side effects.
    pub fn trace(&self, bus: &dyn MemoryMappedDevice) -> String {
        let pc = self.pc;
        let opcode = bus.peek(pc);
        let info = &OPCODE_TABLE[opcode as usize];

        let byte2 = bus.peek(pc.wrapping_add(1));
        let byte3 = bus.peek(pc.wrapping_add(2));

        let hex_bytes = match info.bytes() {
            1 => format!("{:02X}", opcode),
            2 => format!("{:02X} {:02X}", opcode, byte2),
            _ => format!("{:02X} {:02X} {:02X}", opcode, byte2, byte3),
        };

        // Undocumented mnemonics carry a leading '*' that sits in the gutter
        let operands = self.describe_operands(pc, bus, info, byte2, byte3);
        let gutter = if info.is_illegal() { "" } else { " " };

        format!(
            "{:04X}  {:<8} {:<33}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc,
            hex_bytes,
            format!("{gutter}{operands}"),
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp,
            self.clock_count
        )
    }

    /// Disassemble `start..=end` into a listing keyed by instruction address
    pub fn disassemble(
        &self,
        bus: &dyn MemoryMappedDevice,
        start: u16,
        end: u16,
    ) -> BTreeMap<u16, String> {
        disassembler::disassemble_range(bus, start, end)
    }

    /// Render an instruction with resolved operand values, nestest style
    fn describe_operands(
        &self,
        pc: u16,
        bus: &dyn MemoryMappedDevice,
        info: &OpcodeInfo,
        byte2: u8,
        byte3: u8,
    ) -> String {
        let mnemonic = info.mnemonic;

        match info.mode {
            AddressingMode::Implied => mnemonic.to_string(),
            AddressingMode::Accumulator => format!("{} A", mnemonic),
            AddressingMode::Immediate => format!("{} #${:02X}", mnemonic, byte2),
            AddressingMode::ZeroPage => {
                let value = bus.peek(byte2 as u16);
                format!("{} ${:02X} = {:02X}", mnemonic, byte2, value)
            }
            AddressingMode::ZeroPageX => {
                let addr = byte2.wrapping_add(self.x);
                let value = bus.peek(addr as u16);
                format!(
                    "{} ${:02X},X @ {:02X} = {:02X}",
                    mnemonic, byte2, addr, value
                )
            }
            AddressingMode::ZeroPageY => {
                let addr = byte2.wrapping_add(self.y);
                let value = bus.peek(addr as u16);
                format!(
                    "{} ${:02X},Y @ {:02X} = {:02X}",
                    mnemonic, byte2, addr, value
                )
            }
            AddressingMode::Relative => {
                let target = pc.wrapping_add(2).wrapping_add(byte2 as i8 as i16 as u16);
                format!("{} ${:04X}", mnemonic, target)
            }
            AddressingMode::Absolute => {
                let addr = u16::from_le_bytes([byte2, byte3]);
                if matches!(info.instruction, Instruction::Jmp | Instruction::Jsr) {
                    format!("{} ${:04X}", mnemonic, addr)
                } else {
                    let value = bus.peek(addr);
                    format!("{} ${:04X} = {:02X}", mnemonic, addr, value)
                }
            }
            AddressingMode::AbsoluteX => {
                let base = u16::from_le_bytes([byte2, byte3]);
                let addr = base.wrapping_add(self.x as u16);
                let value = bus.peek(addr);
                format!(
                    "{} ${:04X},X @ {:04X} = {:02X}",
                    mnemonic, base, addr, value
                )
            }
            AddressingMode::AbsoluteY => {
                let base = u16::from_le_bytes([byte2, byte3]);
                let addr = base.wrapping_add(self.y as u16);
                let value = bus.peek(addr);
                format!(
                    "{} ${:04X},Y @ {:04X} = {:02X}",
                    mnemonic, base, addr, value
                )
            }
            AddressingMode::Indirect => {
                let ptr = u16::from_le_bytes([byte2, byte3]);
                let lo = bus.peek(ptr);
                let hi = bus.peek((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF));
                let target = u16::from_le_bytes([lo, hi]);
                format!("{} (${:04X}) = {:04X}", mnemonic, ptr, target)
            }
            AddressingMode::IndexedIndirect => {
                let ptr = byte2.wrapping_add(self.x);
                let lo = bus.peek(ptr as u16);
                let hi = bus.peek(ptr.wrapping_add(1) as u16);
                let addr = u16::from_le_bytes([lo, hi]);
                let value = bus.peek(addr);
                format!(
                    "{} (${:02X},X) @ {:02X} = {:04X} = {:02X}",
                    mnemonic, byte2, ptr, addr, value
                )
            }
            AddressingMode::IndirectIndexed => {
                let lo = bus.peek(byte2 as u16);
                let hi = bus.peek(byte2.wrapping_add(1) as u16);
                let base = u16::from_le_bytes([lo, hi]);
                let addr = base.wrapping_add(self.y as u16);
                let value = bus.peek(addr);
                format!(
                    "{} (${:02X}),Y = {:04X} @ {:04X} = {:02X}",
                    mnemonic, byte2, base, addr, value
                )
            }
        }
    }
}
