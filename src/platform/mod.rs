//! Super Famicom cartridge platform: how ROM images are wired onto the
//! 65C816's 24-bit bus.
//!
//! Nintendo shipped two incompatible wiring conventions for plain
//! execute-in-place ROM. LoROM puts 32KB of ROM in the upper half of every
//! bank, HiROM maps a full 64KB per bank in the upper bank ranges. Both mirror
//! the same ROM bytes at more than one CPU address.

mod header;
mod image;
mod sfc;

pub use header::{
    detect_mapping, read_vectors, score_header, InternalHeader, Vector, VectorSlot, VECTOR_TABLE,
};
pub use image::{copier_header_size, RomImage, COPIER_HEADER_SIZE};
pub use sfc::{
    from_rom_offset, to_rom_offset, validate, AddressTranslator, HiRomMapper, LoRomMapper,
    Mapper, RomMapping,
};

#[cfg(test)]
mod tests;

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::{fmt, io, result, str};
use thiserror::Error;

/// Enumeration of the cartridge mapping conventions we understand.
#[derive(Copy, Clone, Serialize, Debug, PartialEq, Eq, Hash)]
pub enum MappingMode {
    #[serde(rename = "LoROM")]
    LoRom,

    #[serde(rename = "HiROM")]
    HiRom,
}

impl MappingMode {
    /// The mapper object that implements this convention.
    pub fn mapper(self) -> &'static dyn Mapper {
        static LOROM: LoRomMapper = LoRomMapper;
        static HIROM: HiRomMapper = HiRomMapper;

        match self {
            MappingMode::LoRom => &LOROM,
            MappingMode::HiRom => &HIROM,
        }
    }

    /// ROM offset of the internal cartridge header for this convention.
    ///
    /// The header always sits at CPU address `$00:FFC0`; this is where that
    /// address lands in the ROM file.
    pub fn header_offset(self) -> usize {
        match self {
            MappingMode::LoRom => 0x7FC0,
            MappingMode::HiRom => 0xFFC0,
        }
    }

    /// Iterate all valid mapping modes.
    pub fn iter() -> impl IntoIterator<Item = MappingMode> {
        vec![Self::LoRom, Self::HiRom]
    }

    /// Yield a name for this mapping mode.
    pub fn friendly_name(self) -> &'static str {
        match self {
            Self::LoRom => "LoROM",
            Self::HiRom => "HiROM",
        }
    }
}

impl Display for MappingMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.friendly_name())
    }
}

impl str::FromStr for MappingMode {
    type Err = ();

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "lorom" => Ok(MappingMode::LoRom),
            "lo" => Ok(MappingMode::LoRom),
            "mode20" => Ok(MappingMode::LoRom),
            "hirom" => Ok(MappingMode::HiRom),
            "hi" => Ok(MappingMode::HiRom),
            "mode21" => Ok(MappingMode::HiRom),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(MappingMode, "valid mapping mode");

/// Error type for loading ROM images.
#[derive(Debug, Error)]
pub enum Error {
    /// The image contains no ROM data, either because the file is empty or
    /// because it holds nothing but a copier header.
    #[error("ROM image contains no data")]
    EmptyImage,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Io(e) => e,
            Error::EmptyImage => io::Error::new(io::ErrorKind::InvalidData, format!("{}", err)),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
