// CPU address decoding
//
// ```text
// $0000-$07FF: 2KB Internal RAM
// $0800-$1FFF: Mirrors of RAM (3 times)
// $2000-$2007: PPU Registers
// $2008-$3FFF: Mirrors of PPU Registers (repeating every 8 bytes)
// $4014:       OAM DMA (write)
// $4016-$4017: Controller ports
// $4020-$FFFF: Cartridge space (PRG-ROM, PRG-RAM, and mapper registers)
// ```
//
// The cartridge sees every access first and may claim any address.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::dma::{DmaStep, OamDma};
use super::MemoryMappedDevice;
use crate::cartridge::Cartridge;
use crate::ppu::Ppu;

/// Internal RAM size
pub const RAM_SIZE: usize = 2048;

/// Everything on the CPU side of the bus except the CPU itself
pub struct MemoryMap {
    /// Internal RAM: 2KB, mirrored 3 times at $0800-$1FFF
    pub(crate) ram: [u8; RAM_SIZE],

    /// PPU, registers mapped at $2000-$2007 and mirrored through $3FFF
    pub(crate) ppu: Ppu,

    pub(crate) cartridge: Option<Rc<RefCell<Cartridge>>>,

    /// Live button state per port, written by the host
    pub(crate) controller: [u8; 2],
    /// Serial shift register per port, loaded from `controller` on a strobe write
    pub(crate) controller_state: [u8; 2],

    pub(crate) dma: OamDma,
}

impl MemoryMap {
    pub fn new() -> Self {
        MemoryMap {
            ram: [0; RAM_SIZE],
            ppu: Ppu::new(),
            cartridge: None,
            controller: [0; 2],
            controller_state: [0; 2],
            dma: OamDma::new(),
        }
    }

    /// Decode a CPU read
    ///
    /// With `read_only` set nothing changes state: PPU registers are peeked
    /// and controller shift registers are not advanced.
    pub fn cpu_read(&mut self, addr: u16, read_only: bool) -> u8 {
        if read_only {
            return self.peek(addr);
        }
        if let Some(data) = self.cartridge_read(addr) {
            return data;
        }

        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.cpu_read(addr & 0x0007),
            0x4016..=0x4017 => {
                let port = (addr & 0x0001) as usize;
                let data = (self.controller_state[port] & 0x80) >> 7;
                self.controller_state[port] <<= 1;
                data
            }
            _ => 0,
        }
    }

    /// Decode a CPU write
    pub fn cpu_write(&mut self, addr: u16, data: u8) {
        if let Some(cartridge) = &self.cartridge {
            if cartridge.borrow_mut().cpu_write(addr, data) {
                return;
            }
        }

        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = data,
            0x2000..=0x3FFF => self.ppu.cpu_write(addr & 0x0007, data),
            0x4014 => {
                debug!("OAM DMA from page ${:02X}", data);
                self.dma.start(data);
            }
            // The strobe line is shared, so $4016 latches both pads
            0x4016 => self.controller_state = self.controller,
            0x4017 => self.controller_state[1] = self.controller[1],
            _ => {}
        }
    }

    fn cartridge_read(&self, addr: u16) -> Option<u8> {
        self.cartridge
            .as_ref()
            .and_then(|cartridge| cartridge.borrow().cpu_read(addr))
    }

    /// Run one DMA slot for the bus clock `clock`
    pub(crate) fn dma_step(&mut self, clock: u64) {
        match self.dma.next_step(clock) {
            DmaStep::Wait => {}
            DmaStep::Read(addr) => {
                let data = self.cpu_read(addr, false);
                self.dma.latch(data);
            }
            DmaStep::Write { oam_addr, data } => {
                self.ppu.write_oam(oam_addr, data);
                self.dma.advance();
            }
        }
    }
}

impl Default for MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMappedDevice for MemoryMap {
    #[inline]
    fn read(&mut self, addr: u16) -> u8 {
        self.cpu_read(addr, false)
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) {
        self.cpu_write(addr, data);
    }

    /// Side-effect-free read
    fn peek(&self, addr: u16) -> u8 {
        if let Some(data) = self.cartridge_read(addr) {
            return data;
        }

        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => self.ppu.cpu_peek(addr & 0x0007),
            0x4016..=0x4017 => (self.controller_state[(addr & 0x0001) as usize] & 0x80) >> 7,
            _ => 0,
        }
    }
}
