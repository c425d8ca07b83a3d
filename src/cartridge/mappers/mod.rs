// Mappers module - Address translation strategies for cartridge boards
//
// Mapper selection is a pure function of the iNES mapper number. Unknown
// numbers are rejected instead of silently falling back to NROM.

mod mapper0;
mod mapper2;
mod mapper3;

pub use mapper0::Mapper0;
pub use mapper2::Mapper2;
pub use mapper3::Mapper3;

use super::Mapper;
use thiserror::Error;

/// Error type for mapper creation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapperError {
    /// The requested mapper number has no registered implementation
    #[error("mapper {0} is not supported")]
    UnsupportedMapper(u8),
}

/// Create the mapper for an iNES mapper number
///
/// # Arguments
/// * `mapper_id` - Mapper number from the header
/// * `prg_banks` - Number of 16KB PRG-ROM banks
/// * `chr_banks` - Number of 8KB CHR-ROM banks (0 = CHR-RAM)
///
/// # Errors
/// Returns `MapperError::UnsupportedMapper` for unregistered numbers
pub fn create_mapper(
    mapper_id: u8,
    prg_banks: u8,
    chr_banks: u8,
) -> Result<Box<dyn Mapper>, MapperError> {
    match mapper_id {
        0 => Ok(Box::new(Mapper0::new(prg_banks, chr_banks))),
        2 => Ok(Box::new(Mapper2::new(prg_banks, chr_banks))),
        3 => Ok(Box::new(Mapper3::new(prg_banks, chr_banks))),
        id => Err(MapperError::UnsupportedMapper(id)),
    }
}
