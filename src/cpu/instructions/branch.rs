// Branch instructions for 6502 CPU
// These instructions perform conditional branches based on processor status flags.
// All branch instructions use relative addressing mode and do not modify any flags.

use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    // ========================================
    // Branch Instructions
    // ========================================

    /// BCC - Branch if Carry Clear
    ///
    /// Flags affected: None
    ///
    /// Cycles:
    /// - 2 cycles if branch not taken
    /// - 3 cycles if branch taken
    /// - 4 cycles if branch taken and crosses page boundary
    ///
    /// # Returns
    /// The number of additional cycles used (0, 1, or 2)
    ///
    /// # Example
    /// ```text
    /// CMP #$10    ; Compare A with $10
    /// BCC label   ; Branch if A < $10 (carry clear)
    /// ```
    pub fn bcc(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_carry(), addr_result)
    }

    /// BCS - Branch if Carry Set
    pub fn bcs(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_carry(), addr_result)
    }

    /// BEQ - Branch if Equal (Z set)
    pub fn beq(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_zero(), addr_result)
    }

    /// BNE - Branch if Not Equal (Z clear)
    pub fn bne(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_zero(), addr_result)
    }

    /// BMI - Branch if Minus (N set)
    pub fn bmi(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_negative(), addr_result)
    }

    /// BPL - Branch if Positive (N clear)
    pub fn bpl(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_negative(), addr_result)
    }

    /// BVC - Branch if Overflow Clear
    pub fn bvc(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_overflow(), addr_result)
    }

    /// BVS - Branch if Overflow Set
    pub fn bvs(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_overflow(), addr_result)
    }

    // ========================================
    // Helper Methods
    // ========================================

    /// Internal branch helper method
    ///
    /// Branch timing:
    /// - Base cost: 2 cycles (from the opcode table, not returned here)
    /// - +1 cycle if branch is taken
    /// - +1 more if the target is on a different page
    #[inline]
    fn branch(&mut self, condition: bool, addr_result: &AddressingResult) -> u8 {
        if !condition {
            return 0;
        }

        self.pc = addr_result.address;
        if addr_result.page_crossed {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::test_support::{setup, step};

    #[test]
    fn test_branch_not_taken_costs_two() {
        // SEC; BCC +4
        let (mut cpu, mut mem) = setup(0x8000, &[0x38, 0x90, 0x04]);
        step(&mut cpu, &mut mem);

        assert_eq!(step(&mut cpu, &mut mem), 2);
        assert_eq!(cpu.pc, 0x8003);
    }

    #[test]
    fn test_branch_taken_same_page_costs_three() {
        // CLC; BCC +4
        let (mut cpu, mut mem) = setup(0x8000, &[0x18, 0x90, 0x04]);
        step(&mut cpu, &mut mem);

        assert_eq!(step(&mut cpu, &mut mem), 3);
        assert_eq!(cpu.pc, 0x8007);
    }

    #[test]
    fn test_branch_taken_page_cross_costs_four() {
        // At $80F0: LDA #$00; BEQ +$10 -> $8104
        let (mut cpu, mut mem) = setup(0x80F0, &[0xA9, 0x00, 0xF0, 0x10]);
        step(&mut cpu, &mut mem);

        assert_eq!(step(&mut cpu, &mut mem), 4);
        assert_eq!(cpu.pc, 0x8104);
    }

    #[test]
    fn test_branch_backward() {
        // LDX #$03; loop: DEX; BNE loop
        let (mut cpu, mut mem) = setup(0x8000, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD]);
        step(&mut cpu, &mut mem);

        for _ in 0..3 {
            step(&mut cpu, &mut mem); // DEX
            step(&mut cpu, &mut mem); // BNE
        }

        assert_eq!(cpu.x, 0);
        assert_eq!(cpu.pc, 0x8005);
    }

    #[test]
    fn test_bmi_bpl_follow_negative() {
        // LDA #$80; BPL +2; BMI +2
        let (mut cpu, mut mem) = setup(0x8000, &[0xA9, 0x80, 0x10, 0x02, 0x30, 0x02]);
        step(&mut cpu, &mut mem);

        step(&mut cpu, &mut mem);
        assert_eq!(cpu.pc, 0x8004, "BPL not taken");
        step(&mut cpu, &mut mem);
        assert_eq!(cpu.pc, 0x8008, "BMI taken");
    }

    #[test]
    fn test_bvs_bvc_follow_overflow() {
        // LDA #$7F; ADC #$01 (sets V); BVC +2; BVS +2
        let program = [0xA9, 0x7F, 0x69, 0x01, 0x50, 0x02, 0x70, 0x02];
        let (mut cpu, mut mem) = setup(0x8000, &program);
        step(&mut cpu, &mut mem);
        step(&mut cpu, &mut mem);
        assert!(cpu.get_overflow());

        step(&mut cpu, &mut mem);
        assert_eq!(cpu.pc, 0x8006);
        step(&mut cpu, &mut mem);
        assert_eq!(cpu.pc, 0x800A);
    }
}
