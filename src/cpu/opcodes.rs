// Opcode table for the 6502
//
// One entry per opcode byte. Undocumented opcodes carry their conventional
// mnemonic (prefixed with `*`) and their real addressing mode so instruction
// length and timing stay correct, but they execute as no-ops.

use super::addressing::AddressingMode;
use super::addressing::AddressingMode::*;

/// Operation performed by an opcode
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    /// Undocumented opcode, executed as a no-op
    Illegal,
}

use Instruction::*;

/// Static description of one opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub instruction: Instruction,
    pub mnemonic: &'static str,
    pub mode: AddressingMode,
    /// Base cycle count
    pub cycles: u8,
    /// Whether an indexed access crossing a page costs one more cycle
    pub page_cycle: bool,
}

impl OpcodeInfo {
    /// Instruction length in bytes, opcode included
    pub fn bytes(&self) -> u8 {
        1 + self.mode.operand_bytes()
    }

    pub fn is_illegal(&self) -> bool {
        self.instruction == Illegal
    }
}

const fn op(
    instruction: Instruction,
    mnemonic: &'static str,
    mode: AddressingMode,
    cycles: u8,
    page_cycle: bool,
) -> OpcodeInfo {
    OpcodeInfo {
        instruction,
        mnemonic,
        mode,
        cycles,
        page_cycle,
    }
}

/// Opcode lookup table indexed by opcode byte
#[rustfmt::skip]
pub static OPCODE_TABLE: [OpcodeInfo; 256] = [
    op(Brk, "BRK", Implied, 7, false), // 0x00
    op(Ora, "ORA", IndexedIndirect, 6, false), // 0x01
    op(Illegal, "*KIL", Implied, 2, false), // 0x02
    op(Illegal, "*SLO", IndexedIndirect, 8, false), // 0x03
    op(Illegal, "*NOP", ZeroPage, 3, false), // 0x04
    op(Ora, "ORA", ZeroPage, 3, false), // 0x05
    op(Asl, "ASL", ZeroPage, 5, false), // 0x06
    op(Illegal, "*SLO", ZeroPage, 5, false), // 0x07
    op(Php, "PHP", Implied, 3, false), // 0x08
    op(Ora, "ORA", Immediate, 2, false), // 0x09
    op(Asl, "ASL", Accumulator, 2, false), // 0x0A
    op(Illegal, "*ANC", Immediate, 2, false), // 0x0B
    op(Illegal, "*NOP", Absolute, 4, false), // 0x0C
    op(Ora, "ORA", Absolute, 4, false), // 0x0D
    op(Asl, "ASL", Absolute, 6, false), // 0x0E
    op(Illegal, "*SLO", Absolute, 6, false), // 0x0F
    op(Bpl, "BPL", Relative, 2, false), // 0x10
    op(Ora, "ORA", IndirectIndexed, 5, true), // 0x11
    op(Illegal, "*KIL", Implied, 2, false), // 0x12
    op(Illegal, "*SLO", IndirectIndexed, 8, false), // 0x13
    op(Illegal, "*NOP", ZeroPageX, 4, false), // 0x14
    op(Ora, "ORA", ZeroPageX, 4, false), // 0x15
    op(Asl, "ASL", ZeroPageX, 6, false), // 0x16
    op(Illegal, "*SLO", ZeroPageX, 6, false), // 0x17
    op(Clc, "CLC", Implied, 2, false), // 0x18
    op(Ora, "ORA", AbsoluteY, 4, true), // 0x19
    op(Illegal, "*NOP", Implied, 2, false), // 0x1A
    op(Illegal, "*SLO", AbsoluteY, 7, false), // 0x1B
    op(Illegal, "*NOP", AbsoluteX, 4, true), // 0x1C
    op(Ora, "ORA", AbsoluteX, 4, true), // 0x1D
    op(Asl, "ASL", AbsoluteX, 7, false), // 0x1E
    op(Illegal, "*SLO", AbsoluteX, 7, false), // 0x1F
    op(Jsr, "JSR", Absolute, 6, false), // 0x20
    op(And, "AND", IndexedIndirect, 6, false), // 0x21
    op(Illegal, "*KIL", Implied, 2, false), // 0x22
    op(Illegal, "*RLA", IndexedIndirect, 8, false), // 0x23
    op(Bit, "BIT", ZeroPage, 3, false), // 0x24
    op(And, "AND", ZeroPage, 3, false), // 0x25
    op(Rol, "ROL", ZeroPage, 5, false), // 0x26
    op(Illegal, "*RLA", ZeroPage, 5, false), // 0x27
    op(Plp, "PLP", Implied, 4, false), // 0x28
    op(And, "AND", Immediate, 2, false), // 0x29
    op(Rol, "ROL", Accumulator, 2, false), // 0x2A
    op(Illegal, "*ANC", Immediate, 2, false), // 0x2B
    op(Bit, "BIT", Absolute, 4, false), // 0x2C
    op(And, "AND", Absolute, 4, false), // 0x2D
    op(Rol, "ROL", Absolute, 6, false), // 0x2E
    op(Illegal, "*RLA", Absolute, 6, false), // 0x2F
    op(Bmi, "BMI", Relative, 2, false), // 0x30
    op(And, "AND", IndirectIndexed, 5, true), // 0x31
    op(Illegal, "*KIL", Implied, 2, false), // 0x32
    op(Illegal, "*RLA", IndirectIndexed, 8, false), // 0x33
    op(Illegal, "*NOP", ZeroPageX, 4, false), // 0x34
    op(And, "AND", ZeroPageX, 4, false), // 0x35
    op(Rol, "ROL", ZeroPageX, 6, false), // 0x36
    op(Illegal, "*RLA", ZeroPageX, 6, false), // 0x37
    op(Sec, "SEC", Implied, 2, false), // 0x38
    op(And, "AND", AbsoluteY, 4, true), // 0x39
    op(Illegal, "*NOP", Implied, 2, false), // 0x3A
    op(Illegal, "*RLA", AbsoluteY, 7, false), // 0x3B
    op(Illegal, "*NOP", AbsoluteX, 4, true), // 0x3C
    op(And, "AND", AbsoluteX, 4, true), // 0x3D
    op(Rol, "ROL", AbsoluteX, 7, false), // 0x3E
    op(Illegal, "*RLA", AbsoluteX, 7, false), // 0x3F
    op(Rti, "RTI", Implied, 6, false), // 0x40
    op(Eor, "EOR", IndexedIndirect, 6, false), // 0x41
    op(Illegal, "*KIL", Implied, 2, false), // 0x42
    op(Illegal, "*SRE", IndexedIndirect, 8, false), // 0x43
    op(Illegal, "*NOP", ZeroPage, 3, false), // 0x44
    op(Eor, "EOR", ZeroPage, 3, false), // 0x45
    op(Lsr, "LSR", ZeroPage, 5, false), // 0x46
    op(Illegal, "*SRE", ZeroPage, 5, false), // 0x47
    op(Pha, "PHA", Implied, 3, false), // 0x48
    op(Eor, "EOR", Immediate, 2, false), // 0x49
    op(Lsr, "LSR", Accumulator, 2, false), // 0x4A
    op(Illegal, "*ALR", Immediate, 2, false), // 0x4B
    op(Jmp, "JMP", Absolute, 3, false), // 0x4C
    op(Eor, "EOR", Absolute, 4, false), // 0x4D
    op(Lsr, "LSR", Absolute, 6, false), // 0x4E
    op(Illegal, "*SRE", Absolute, 6, false), // 0x4F
    op(Bvc, "BVC", Relative, 2, false), // 0x50
    op(Eor, "EOR", IndirectIndexed, 5, true), // 0x51
    op(Illegal, "*KIL", Implied, 2, false), // 0x52
    op(Illegal, "*SRE", IndirectIndexed, 8, false), // 0x53
    op(Illegal, "*NOP", ZeroPageX, 4, false), // 0x54
    op(Eor, "EOR", ZeroPageX, 4, false), // 0x55
    op(Lsr, "LSR", ZeroPageX, 6, false), // 0x56
    op(Illegal, "*SRE", ZeroPageX, 6, false), // 0x57
    op(Cli, "CLI", Implied, 2, false), // 0x58
    op(Eor, "EOR", AbsoluteY, 4, true), // 0x59
    op(Illegal, "*NOP", Implied, 2, false), // 0x5A
    op(Illegal, "*SRE", AbsoluteY, 7, false), // 0x5B
    op(Illegal, "*NOP", AbsoluteX, 4, true), // 0x5C
    op(Eor, "EOR", AbsoluteX, 4, true), // 0x5D
    op(Lsr, "LSR", AbsoluteX, 7, false), // 0x5E
    op(Illegal, "*SRE", AbsoluteX, 7, false), // 0x5F
    op(Rts, "RTS", Implied, 6, false), // 0x60
    op(Adc, "ADC", IndexedIndirect, 6, false), // 0x61
    op(Illegal, "*KIL", Implied, 2, false), // 0x62
    op(Illegal, "*RRA", IndexedIndirect, 8, false), // 0x63
    op(Illegal, "*NOP", ZeroPage, 3, false), // 0x64
    op(Adc, "ADC", ZeroPage, 3, false), // 0x65
    op(Ror, "ROR", ZeroPage, 5, false), // 0x66
    op(Illegal, "*RRA", ZeroPage, 5, false), // 0x67
    op(Pla, "PLA", Implied, 4, false), // 0x68
    op(Adc, "ADC", Immediate, 2, false), // 0x69
    op(Ror, "ROR", Accumulator, 2, false), // 0x6A
    op(Illegal, "*ARR", Immediate, 2, false), // 0x6B
    op(Jmp, "JMP", Indirect, 5, false), // 0x6C
    op(Adc, "ADC", Absolute, 4, false), // 0x6D
    op(Ror, "ROR", Absolute, 6, false), // 0x6E
    op(Illegal, "*RRA", Absolute, 6, false), // 0x6F
    op(Bvs, "BVS", Relative, 2, false), // 0x70
    op(Adc, "ADC", IndirectIndexed, 5, true), // 0x71
    op(Illegal, "*KIL", Implied, 2, false), // 0x72
    op(Illegal, "*RRA", IndirectIndexed, 8, false), // 0x73
    op(Illegal, "*NOP", ZeroPageX, 4, false), // 0x74
    op(Adc, "ADC", ZeroPageX, 4, false), // 0x75
    op(Ror, "ROR", ZeroPageX, 6, false), // 0x76
    op(Illegal, "*RRA", ZeroPageX, 6, false), // 0x77
    op(Sei, "SEI", Implied, 2, false), // 0x78
    op(Adc, "ADC", AbsoluteY, 4, true), // 0x79
    op(Illegal, "*NOP", Implied, 2, false), // 0x7A
    op(Illegal, "*RRA", AbsoluteY, 7, false), // 0x7B
    op(Illegal, "*NOP", AbsoluteX, 4, true), // 0x7C
    op(Adc, "ADC", AbsoluteX, 4, true), // 0x7D
    op(Ror, "ROR", AbsoluteX, 7, false), // 0x7E
    op(Illegal, "*RRA", AbsoluteX, 7, false), // 0x7F
    op(Illegal, "*NOP", Immediate, 2, false), // 0x80
    op(Sta, "STA", IndexedIndirect, 6, false), // 0x81
    op(Illegal, "*NOP", Immediate, 2, false), // 0x82
    op(Illegal, "*SAX", IndexedIndirect, 6, false), // 0x83
    op(Sty, "STY", ZeroPage, 3, false), // 0x84
    op(Sta, "STA", ZeroPage, 3, false), // 0x85
    op(Stx, "STX", ZeroPage, 3, false), // 0x86
    op(Illegal, "*SAX", ZeroPage, 3, false), // 0x87
    op(Dey, "DEY", Implied, 2, false), // 0x88
    op(Illegal, "*NOP", Immediate, 2, false), // 0x89
    op(Txa, "TXA", Implied, 2, false), // 0x8A
    op(Illegal, "*XAA", Immediate, 2, false), // 0x8B
    op(Sty, "STY", Absolute, 4, false), // 0x8C
    op(Sta, "STA", Absolute, 4, false), // 0x8D
    op(Stx, "STX", Absolute, 4, false), // 0x8E
    op(Illegal, "*SAX", Absolute, 4, false), // 0x8F
    op(Bcc, "BCC", Relative, 2, false), // 0x90
    op(Sta, "STA", IndirectIndexed, 6, false), // 0x91
    op(Illegal, "*KIL", Implied, 2, false), // 0x92
    op(Illegal, "*AHX", IndirectIndexed, 6, false), // 0x93
    op(Sty, "STY", ZeroPageX, 4, false), // 0x94
    op(Sta, "STA", ZeroPageX, 4, false), // 0x95
    op(Stx, "STX", ZeroPageY, 4, false), // 0x96
    op(Illegal, "*SAX", ZeroPageY, 4, false), // 0x97
    op(Tya, "TYA", Implied, 2, false), // 0x98
    op(Sta, "STA", AbsoluteY, 5, false), // 0x99
    op(Txs, "TXS", Implied, 2, false), // 0x9A
    op(Illegal, "*TAS", AbsoluteY, 5, false), // 0x9B
    op(Illegal, "*SHY", AbsoluteX, 5, false), // 0x9C
    op(Sta, "STA", AbsoluteX, 5, false), // 0x9D
    op(Illegal, "*SHX", AbsoluteY, 5, false), // 0x9E
    op(Illegal, "*AHX", AbsoluteY, 5, false), // 0x9F
    op(Ldy, "LDY", Immediate, 2, false), // 0xA0
    op(Lda, "LDA", IndexedIndirect, 6, false), // 0xA1
    op(Ldx, "LDX", Immediate, 2, false), // 0xA2
    op(Illegal, "*LAX", IndexedIndirect, 6, false), // 0xA3
    op(Ldy, "LDY", ZeroPage, 3, false), // 0xA4
    op(Lda, "LDA", ZeroPage, 3, false), // 0xA5
    op(Ldx, "LDX", ZeroPage, 3, false), // 0xA6
    op(Illegal, "*LAX", ZeroPage, 3, false), // 0xA7
    op(Tay, "TAY", Implied, 2, false), // 0xA8
    op(Lda, "LDA", Immediate, 2, false), // 0xA9
    op(Tax, "TAX", Implied, 2, false), // 0xAA
    op(Illegal, "*LAX", Immediate, 2, false), // 0xAB
    op(Ldy, "LDY", Absolute, 4, false), // 0xAC
    op(Lda, "LDA", Absolute, 4, false), // 0xAD
    op(Ldx, "LDX", Absolute, 4, false), // 0xAE
    op(Illegal, "*LAX", Absolute, 4, false), // 0xAF
    op(Bcs, "BCS", Relative, 2, false), // 0xB0
    op(Lda, "LDA", IndirectIndexed, 5, true), // 0xB1
    op(Illegal, "*KIL", Implied, 2, false), // 0xB2
    op(Illegal, "*LAX", IndirectIndexed, 5, true), // 0xB3
    op(Ldy, "LDY", ZeroPageX, 4, false), // 0xB4
    op(Lda, "LDA", ZeroPageX, 4, false), // 0xB5
    op(Ldx, "LDX", ZeroPageY, 4, false), // 0xB6
    op(Illegal, "*LAX", ZeroPageY, 4, false), // 0xB7
    op(Clv, "CLV", Implied, 2, false), // 0xB8
    op(Lda, "LDA", AbsoluteY, 4, true), // 0xB9
    op(Tsx, "TSX", Implied, 2, false), // 0xBA
    op(Illegal, "*LAS", AbsoluteY, 4, true), // 0xBB
    op(Ldy, "LDY", AbsoluteX, 4, true), // 0xBC
    op(Lda, "LDA", AbsoluteX, 4, true), // 0xBD
    op(Ldx, "LDX", AbsoluteY, 4, true), // 0xBE
    op(Illegal, "*LAX", AbsoluteY, 4, true), // 0xBF
    op(Cpy, "CPY", Immediate, 2, false), // 0xC0
    op(Cmp, "CMP", IndexedIndirect, 6, false), // 0xC1
    op(Illegal, "*NOP", Immediate, 2, false), // 0xC2
    op(Illegal, "*DCP", IndexedIndirect, 8, false), // 0xC3
    op(Cpy, "CPY", ZeroPage, 3, false), // 0xC4
    op(Cmp, "CMP", ZeroPage, 3, false), // 0xC5
    op(Dec, "DEC", ZeroPage, 5, false), // 0xC6
    op(Illegal, "*DCP", ZeroPage, 5, false), // 0xC7
    op(Iny, "INY", Implied, 2, false), // 0xC8
    op(Cmp, "CMP", Immediate, 2, false), // 0xC9
    op(Dex, "DEX", Implied, 2, false), // 0xCA
    op(Illegal, "*AXS", Immediate, 2, false), // 0xCB
    op(Cpy, "CPY", Absolute, 4, false), // 0xCC
    op(Cmp, "CMP", Absolute, 4, false), // 0xCD
    op(Dec, "DEC", Absolute, 6, false), // 0xCE
    op(Illegal, "*DCP", Absolute, 6, false), // 0xCF
    op(Bne, "BNE", Relative, 2, false), // 0xD0
    op(Cmp, "CMP", IndirectIndexed, 5, true), // 0xD1
    op(Illegal, "*KIL", Implied, 2, false), // 0xD2
    op(Illegal, "*DCP", IndirectIndexed, 8, false), // 0xD3
    op(Illegal, "*NOP", ZeroPageX, 4, false), // 0xD4
    op(Cmp, "CMP", ZeroPageX, 4, false), // 0xD5
    op(Dec, "DEC", ZeroPageX, 6, false), // 0xD6
    op(Illegal, "*DCP", ZeroPageX, 6, false), // 0xD7
    op(Cld, "CLD", Implied, 2, false), // 0xD8
    op(Cmp, "CMP", AbsoluteY, 4, true), // 0xD9
    op(Illegal, "*NOP", Implied, 2, false), // 0xDA
    op(Illegal, "*DCP", AbsoluteY, 7, false), // 0xDB
    op(Illegal, "*NOP", AbsoluteX, 4, true), // 0xDC
    op(Cmp, "CMP", AbsoluteX, 4, true), // 0xDD
    op(Dec, "DEC", AbsoluteX, 7, false), // 0xDE
    op(Illegal, "*DCP", AbsoluteX, 7, false), // 0xDF
    op(Cpx, "CPX", Immediate, 2, false), // 0xE0
    op(Sbc, "SBC", IndexedIndirect, 6, false), // 0xE1
    op(Illegal, "*NOP", Immediate, 2, false), // 0xE2
    op(Illegal, "*ISC", IndexedIndirect, 8, false), // 0xE3
    op(Cpx, "CPX", ZeroPage, 3, false), // 0xE4
    op(Sbc, "SBC", ZeroPage, 3, false), // 0xE5
    op(Inc, "INC", ZeroPage, 5, false), // 0xE6
    op(Illegal, "*ISC", ZeroPage, 5, false), // 0xE7
    op(Inx, "INX", Implied, 2, false), // 0xE8
    op(Sbc, "SBC", Immediate, 2, false), // 0xE9
    op(Nop, "NOP", Implied, 2, false), // 0xEA
    op(Illegal, "*SBC", Immediate, 2, false), // 0xEB
    op(Cpx, "CPX", Absolute, 4, false), // 0xEC
    op(Sbc, "SBC", Absolute, 4, false), // 0xED
    op(Inc, "INC", Absolute, 6, false), // 0xEE
    op(Illegal, "*ISC", Absolute, 6, false), // 0xEF
    op(Beq, "BEQ", Relative, 2, false), // 0xF0
    op(Sbc, "SBC", IndirectIndexed, 5, true), // 0xF1
    op(Illegal, "*KIL", Implied, 2, false), // 0xF2
    op(Illegal, "*ISC", IndirectIndexed, 8, false), // 0xF3
    op(Illegal, "*NOP", ZeroPageX, 4, false), // 0xF4
    op(Sbc, "SBC", ZeroPageX, 4, false), // 0xF5
    op(Inc, "INC", ZeroPageX, 6, false), // 0xF6
    op(Illegal, "*ISC", ZeroPageX, 6, false), // 0xF7
    op(Sed, "SED", Implied, 2, false), // 0xF8
    op(Sbc, "SBC", AbsoluteY, 4, true), // 0xF9
    op(Illegal, "*NOP", Implied, 2, false), // 0xFA
    op(Illegal, "*ISC", AbsoluteY, 7, false), // 0xFB
    op(Illegal, "*NOP", AbsoluteX, 4, true), // 0xFC
    op(Sbc, "SBC", AbsoluteX, 4, true), // 0xFD
    op(Inc, "INC", AbsoluteX, 7, false), // 0xFE
    op(Illegal, "*ISC", AbsoluteX, 7, false), // 0xFF
];
