// Cartridge module - iNES image parsing and mapper-backed PRG/CHR access
//
// A cartridge owns the raw PRG and CHR images and one mapper. The mapper only
// translates addresses; the cartridge performs the actual byte access so that
// every mapper shares the same bounds handling.

pub mod mappers;

use std::fs;
use std::path::Path;

use log::{info, warn};
use thiserror::Error;

pub use mappers::{create_mapper, MapperError};

/// iNES magic number: "NES" followed by MS-DOS end-of-file
pub const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

/// iNES header size in bytes
pub const HEADER_SIZE: usize = 16;

/// Trainer size in bytes (present when flags 6 bit 2 is set)
pub const TRAINER_SIZE: usize = 512;

/// PRG-ROM bank size (16KB)
pub const PRG_BANK_SIZE: usize = 16 * 1024;

/// CHR-ROM bank size (8KB)
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// Nametable mirroring arrangement, fixed by the cartridge header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mirroring {
    /// $2000 = $2400, $2800 = $2C00 (vertical scrolling games)
    #[default]
    Horizontal,
    /// $2000 = $2800, $2400 = $2C00 (horizontal scrolling games)
    Vertical,
}

/// Errors for images that are not well-formed iNES containers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum INesError {
    #[error("invalid iNES magic number: {0:02X?}")]
    InvalidMagic([u8; 4]),

    #[error("truncated iNES image: {section} needs {expected} bytes, {actual} available")]
    Truncated {
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("iNES header declares no PRG-ROM banks")]
    NoProgramRom,
}

/// Errors surfaced while constructing a cartridge
#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error(transparent)]
    Format(#[from] INesError),

    #[error(transparent)]
    Mapper(#[from] MapperError),

    #[error("failed to read ROM file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parsed 16-byte iNES header
///
/// ```text
/// 0-3   magic "NES\x1A"
/// 4     PRG-ROM size in 16KB units
/// 5     CHR-ROM size in 8KB units (0 = CHR-RAM)
/// 6     flags 6: mapper low nibble, trainer, battery, mirroring
/// 7     flags 7: mapper high nibble
/// 8     PRG-RAM size
/// 9-10  TV system
/// 11-15 padding
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct INesHeader {
    pub prg_rom_banks: u8,
    pub chr_rom_banks: u8,
    pub flags6: u8,
    pub flags7: u8,
    pub prg_ram_size: u8,
    pub tv_system: [u8; 2],
}

impl INesHeader {
    /// Parse the header from the start of an image
    pub fn parse(data: &[u8]) -> Result<Self, INesError> {
        if data.len() < HEADER_SIZE {
            return Err(INesError::Truncated {
                section: "header",
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let magic = [data[0], data[1], data[2], data[3]];
        if magic != INES_MAGIC {
            return Err(INesError::InvalidMagic(magic));
        }

        Ok(INesHeader {
            prg_rom_banks: data[4],
            chr_rom_banks: data[5],
            flags6: data[6],
            flags7: data[7],
            prg_ram_size: data[8],
            tv_system: [data[9], data[10]],
        })
    }

    /// Mapper number assembled from the two header nibbles
    pub fn mapper_id(&self) -> u8 {
        (self.flags7 & 0xF0) | (self.flags6 >> 4)
    }

    pub fn mirroring(&self) -> Mirroring {
        if self.flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }

    pub fn has_trainer(&self) -> bool {
        self.flags6 & 0x04 != 0
    }

    pub fn has_battery(&self) -> bool {
        self.flags6 & 0x02 != 0
    }

    pub fn prg_rom_size(&self) -> usize {
        self.prg_rom_banks as usize * PRG_BANK_SIZE
    }

    pub fn chr_rom_size(&self) -> usize {
        self.chr_rom_banks as usize * CHR_BANK_SIZE
    }
}

/// Address translation strategy for a cartridge board
///
/// Each method maps a bus address to an offset into the cartridge's PRG or
/// CHR image. `None` means the cartridge does not claim the access and the
/// bus falls through to its own decoding.
pub trait Mapper {
    /// Translate a CPU read
    fn cpu_map_read(&self, addr: u16) -> Option<usize>;

    /// Translate a CPU write; bank-switching mappers latch `data` here
    fn cpu_map_write(&mut self, addr: u16, data: u8) -> Option<usize>;

    /// Translate a PPU read in pattern space
    fn ppu_map_read(&self, addr: u16) -> Option<usize>;

    /// Translate a PPU write in pattern space (only CHR-RAM boards claim)
    fn ppu_map_write(&mut self, addr: u16) -> Option<usize>;

    /// Return bank registers to their power-on values
    fn reset(&mut self) {}
}

/// A constructed cartridge: PRG/CHR images plus the mapper that owns them
pub struct Cartridge {
    header: INesHeader,
    prg_memory: Vec<u8>,
    chr_memory: Vec<u8>,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    /// Build a cartridge from an in-memory iNES image
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        let header = INesHeader::parse(data).inspect_err(|e| warn!("rejecting ROM image: {e}"))?;

        if header.prg_rom_banks == 0 {
            warn!("rejecting ROM image: no PRG-ROM");
            return Err(INesError::NoProgramRom.into());
        }

        let mut offset = HEADER_SIZE;
        if header.has_trainer() {
            offset += TRAINER_SIZE;
        }

        let prg_memory = take_section(data, offset, header.prg_rom_size(), "PRG-ROM")?.to_vec();
        offset += header.prg_rom_size();

        // Zero CHR banks means the board carries 8KB of CHR-RAM instead
        let chr_memory = if header.chr_rom_banks == 0 {
            vec![0; CHR_BANK_SIZE]
        } else {
            take_section(data, offset, header.chr_rom_size(), "CHR-ROM")?.to_vec()
        };

        let mapper = create_mapper(header.mapper_id(), header.prg_rom_banks, header.chr_rom_banks)
            .inspect_err(|e| warn!("rejecting ROM image: {e}"))?;

        info!(
            "cartridge loaded: mapper {}, {} PRG bank(s), {} CHR bank(s), {:?} mirroring{}",
            header.mapper_id(),
            header.prg_rom_banks,
            header.chr_rom_banks,
            header.mirroring(),
            if header.has_trainer() { ", trainer skipped" } else { "" }
        );

        Ok(Cartridge {
            header,
            prg_memory,
            chr_memory,
            mapper,
        })
    }

    /// Read and parse an iNES file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    // ========================================
    // CPU side
    // ========================================

    /// Read from CPU space, `None` when the mapper does not claim `addr`
    pub fn cpu_read(&self, addr: u16) -> Option<u8> {
        self.mapper
            .cpu_map_read(addr)
            .and_then(|offset| self.prg_memory.get(offset).copied())
    }

    /// Write to CPU space, returns whether the cartridge claimed the access
    pub fn cpu_write(&mut self, addr: u16, data: u8) -> bool {
        match self.mapper.cpu_map_write(addr, data) {
            Some(offset) => match self.prg_memory.get_mut(offset) {
                Some(byte) => {
                    *byte = data;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    // ========================================
    // PPU side
    // ========================================

    /// Read from pattern space, `None` when the mapper does not claim `addr`
    pub fn ppu_read(&self, addr: u16) -> Option<u8> {
        self.mapper
            .ppu_map_read(addr)
            .and_then(|offset| self.chr_memory.get(offset).copied())
    }

    /// Write to pattern space, returns whether the cartridge claimed the access
    pub fn ppu_write(&mut self, addr: u16, data: u8) -> bool {
        match self.mapper.ppu_map_write(addr) {
            Some(offset) => match self.chr_memory.get_mut(offset) {
                Some(byte) => {
                    *byte = data;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.mapper.reset();
    }

    pub fn header(&self) -> &INesHeader {
        &self.header
    }

    pub fn mapper_id(&self) -> u8 {
        self.header.mapper_id()
    }

    pub fn prg_banks(&self) -> u8 {
        self.header.prg_rom_banks
    }

    pub fn chr_banks(&self) -> u8 {
        self.header.chr_rom_banks
    }

    pub fn mirroring(&self) -> Mirroring {
        self.header.mirroring()
    }
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("header", &self.header)
            .field("prg_memory", &self.prg_memory.len())
            .field("chr_memory", &self.chr_memory.len())
            .finish_non_exhaustive()
    }
}

fn take_section<'a>(
    data: &'a [u8],
    offset: usize,
    len: usize,
    section: &'static str,
) -> Result<&'a [u8], INesError> {
    data.get(offset..offset + len).ok_or_else(|| {
        let actual = data.len().saturating_sub(offset);
        warn!("rejecting ROM image: {section} truncated ({actual} of {len} bytes)");
        INesError::Truncated {
            section,
            expected: len,
            actual,
        }
    })
}

#[cfg(test)]
pub(crate) mod test_rom {
    //! In-memory iNES images for unit tests

    use super::{CHR_BANK_SIZE, HEADER_SIZE, INES_MAGIC, PRG_BANK_SIZE};

    /// Build an image with the given bank counts and flag bytes.
    ///
    /// PRG bytes are filled with the low byte of their offset, CHR bytes with
    /// the offset XOR 0xFF, so reads can be checked without extra fixtures.
    pub fn build(prg_banks: u8, chr_banks: u8, flags6: u8, flags7: u8) -> Vec<u8> {
        let mut rom = Vec::with_capacity(
            HEADER_SIZE + prg_banks as usize * PRG_BANK_SIZE + chr_banks as usize * CHR_BANK_SIZE,
        );
        rom.extend_from_slice(&INES_MAGIC);
        rom.extend_from_slice(&[prg_banks, chr_banks, flags6, flags7, 0, 0, 0, 0, 0, 0, 0, 0]);
        if flags6 & 0x04 != 0 {
            rom.extend_from_slice(&[0xEE; 512]);
        }
        rom.extend((0..prg_banks as usize * PRG_BANK_SIZE).map(|i| i as u8));
        rom.extend((0..chr_banks as usize * CHR_BANK_SIZE).map(|i| (i as u8) ^ 0xFF));
        rom
    }

    /// One-bank NROM image with `program` at $8000
    ///
    /// The rest of PRG is NOP. Reset points at $8000; NMI and IRQ point at
    /// an RTI placed at $9000. CHR is 8KB of RAM.
    pub fn with_program(program: &[u8]) -> Vec<u8> {
        let mut rom = Vec::with_capacity(HEADER_SIZE + PRG_BANK_SIZE);
        rom.extend_from_slice(&INES_MAGIC);
        rom.extend_from_slice(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        let mut prg = vec![0xEA; PRG_BANK_SIZE];
        prg[..program.len()].copy_from_slice(program);
        prg[0x1000] = 0x40;
        prg[0x3FFA..].copy_from_slice(&[0x00, 0x90, 0x00, 0x80, 0x00, 0x90]);

        rom.extend_from_slice(&prg);
        rom
    }
}
