// OAM DMA state machine
//
// A write to $4014 copies a 256-byte CPU page into OAM while the CPU is
// suspended. The transfer first waits for an odd clock, then alternates a
// read on even clocks with an OAM write on odd clocks. Counting the wait,
// the CPU loses 513 or 514 cycles.

/// DMA progress tracked by the memory map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OamDma {
    /// Source page (high byte of the CPU address)
    page: u8,
    /// Next byte within the page, also the OAM destination
    addr: u8,
    /// Byte read on the last even clock
    data: u8,
    /// Still waiting for the alignment clock
    dummy: bool,
    /// A transfer is in progress
    transfer: bool,
}

impl OamDma {
    pub(crate) fn new() -> Self {
        OamDma {
            page: 0,
            addr: 0,
            data: 0,
            dummy: true,
            transfer: false,
        }
    }

    /// Begin copying page `page` to OAM from offset 0
    pub(crate) fn start(&mut self, page: u8) {
        self.page = page;
        self.addr = 0;
        self.transfer = true;
    }

    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.transfer
    }

    /// What a DMA slot on `clock` has to do
    ///
    /// Clears the alignment wait when it ends; the caller performs the
    /// returned read or write.
    pub(crate) fn next_step(&mut self, clock: u64) -> DmaStep {
        if self.dummy {
            if clock % 2 == 1 {
                self.dummy = false;
            }
            DmaStep::Wait
        } else if clock % 2 == 0 {
            DmaStep::Read(u16::from_be_bytes([self.page, self.addr]))
        } else {
            DmaStep::Write {
                oam_addr: self.addr,
                data: self.data,
            }
        }
    }

    /// Record the byte fetched by a [`DmaStep::Read`]
    pub(crate) fn latch(&mut self, data: u8) {
        self.data = data;
    }

    /// Advance past a [`DmaStep::Write`], ending the transfer after byte 255
    pub(crate) fn advance(&mut self) {
        self.addr = self.addr.wrapping_add(1);
        if self.addr == 0 {
            self.transfer = false;
            self.dummy = true;
        }
    }
}

impl Default for OamDma {
    fn default() -> Self {
        Self::new()
    }
}

/// Work for one DMA clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DmaStep {
    Wait,
    Read(u16),
    Write { oam_addr: u8, data: u8 },
}
