// Disassembler - 6502 instruction disassembly
//
// Converts raw bytes into human-readable 6502 assembly. Memory is read with
// `peek`, so disassembling never disturbs I/O registers.

use std::collections::BTreeMap;

use crate::bus::MemoryMappedDevice;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::opcodes::OPCODE_TABLE;

/// Disassembled instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisassembledInstruction {
    /// Address where the instruction is located
    pub address: u16,

    /// Opcode byte
    pub opcode: u8,

    /// Mnemonic (e.g., "LDA", "*NOP")
    pub mnemonic: &'static str,

    pub mode: AddressingMode,

    /// Operand bytes
    pub operands: Vec<u8>,
}

impl DisassembledInstruction {
    /// Total instruction length in bytes
    pub fn length(&self) -> u8 {
        1 + self.operands.len() as u8
    }

    fn byte(&self, index: usize) -> u8 {
        self.operands.get(index).copied().unwrap_or(0)
    }

    fn word(&self) -> u16 {
        u16::from_le_bytes([self.byte(0), self.byte(1)])
    }

    /// Format the instruction as assembly code
    ///
    /// A string like "LDA #$42" or "JMP ($FFFC)". Branches show the raw
    /// offset followed by the resolved target.
    pub fn format_assembly(&self) -> String {
        let operand = match self.mode {
            AddressingMode::Implied => String::new(),
            AddressingMode::Accumulator => " A".to_string(),
            AddressingMode::Immediate => format!(" #${:02X}", self.byte(0)),
            AddressingMode::ZeroPage => format!(" ${:02X}", self.byte(0)),
            AddressingMode::ZeroPageX => format!(" ${:02X},X", self.byte(0)),
            AddressingMode::ZeroPageY => format!(" ${:02X},Y", self.byte(0)),
            AddressingMode::Absolute => format!(" ${:04X}", self.word()),
            AddressingMode::AbsoluteX => format!(" ${:04X},X", self.word()),
            AddressingMode::AbsoluteY => format!(" ${:04X},Y", self.word()),
            AddressingMode::Indirect => format!(" (${:04X})", self.word()),
            AddressingMode::IndexedIndirect => format!(" (${:02X},X)", self.byte(0)),
            AddressingMode::IndirectIndexed => format!(" (${:02X}),Y", self.byte(0)),
            AddressingMode::Relative => {
                let offset = self.byte(0);
                let target = self
                    .address
                    .wrapping_add(2)
                    .wrapping_add(offset as i8 as i16 as u16);
                format!(" ${:02X} [${:04X}]", offset, target)
            }
        };

        format!("{}{}", self.mnemonic, operand)
    }

    /// Format the instruction bytes as hex, e.g. "4C 00 80"
    pub fn format_bytes(&self) -> String {
        std::iter::once(self.opcode)
            .chain(self.operands.iter().copied())
            .map(|byte| format!("{:02X}", byte))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for DisassembledInstruction {
    /// Listing line: "$8000: LDA #$01 {IMM}"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "${:04X}: {} {{{}}}",
            self.address,
            self.format_assembly(),
            self.mode.tag()
        )
    }
}

/// Disassemble the instruction at `addr`
pub fn disassemble_instruction(mem: &dyn MemoryMappedDevice, addr: u16) -> DisassembledInstruction {
    let opcode = mem.peek(addr);
    let info = &OPCODE_TABLE[opcode as usize];

    let operands = (1..info.bytes() as u16)
        .map(|offset| mem.peek(addr.wrapping_add(offset)))
        .collect();

    DisassembledInstruction {
        address: addr,
        opcode,
        mnemonic: info.mnemonic,
        mode: info.mode,
        operands,
    }
}

/// Disassemble every instruction starting in `start..=end`
///
/// Decoding is linear from `start`; data bytes are decoded as if they were
/// code. The listing is keyed by instruction address.
pub fn disassemble_range(
    mem: &dyn MemoryMappedDevice,
    start: u16,
    end: u16,
) -> BTreeMap<u16, String> {
    let mut listing = BTreeMap::new();
    let mut addr = start as u32;

    while addr <= end as u32 {
        let instruction = disassemble_instruction(mem, addr as u16);
        addr += instruction.length() as u32;
        listing.insert(instruction.address, instruction.to_string());
    }

    listing
}
