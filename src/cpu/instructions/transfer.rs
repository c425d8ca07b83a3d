// Register transfer instructions for 6502 CPU
// All transfers take 2 cycles. TXS is the only one that leaves flags alone.

use crate::cpu::Cpu;

impl Cpu {
    /// TAX - Transfer Accumulator to X
    pub fn tax(&mut self) {
        self.x = self.a;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TAY - Transfer Accumulator to Y
    pub fn tay(&mut self) {
        self.y = self.a;
        self.update_zero_and_negative_flags(self.y);
    }

    /// TXA - Transfer X to Accumulator
    pub fn txa(&mut self) {
        self.a = self.x;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TYA - Transfer Y to Accumulator
    pub fn tya(&mut self) {
        self.a = self.y;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TSX - Transfer Stack Pointer to X
    pub fn tsx(&mut self) {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TXS - Transfer X to Stack Pointer
    pub fn txs(&mut self) {
        self.sp = self.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_sets_flags() {
        let mut cpu = Cpu::new();
        cpu.a = 0x00;
        cpu.tax();
        assert!(cpu.get_zero());

        cpu.a = 0x90;
        cpu.tay();
        assert_eq!(cpu.y, 0x90);
        assert!(cpu.get_negative());
    }

    #[test]
    fn test_txs_does_not_touch_flags() {
        let mut cpu = Cpu::new();
        let status = cpu.status;
        cpu.x = 0x00;

        cpu.txs();

        assert_eq!(cpu.sp, 0x00);
        assert_eq!(cpu.status, status);
    }

    #[test]
    fn test_tsx_txa_tya() {
        let mut cpu = Cpu::new();
        cpu.tsx();
        assert_eq!(cpu.x, 0xFD);
        assert!(cpu.get_negative());

        cpu.txa();
        assert_eq!(cpu.a, 0xFD);

        cpu.y = 0x01;
        cpu.tya();
        assert_eq!(cpu.a, 0x01);
        assert!(!cpu.get_negative());
    }
}
