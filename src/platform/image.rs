//! ROM image loading

use crate::memory::SnesAddress;
use crate::platform::{detect_mapping, AddressTranslator, Error, MappingMode, Result, RomMapping};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Size of the header some cartridge copiers prepend to their dumps.
pub const COPIER_HEADER_SIZE: usize = 512;

/// Determine how much copier header precedes the ROM data in a file of the
/// given length.
///
/// Properly dumped images are multiples of 1KB; a file that is half a
/// kilobyte over carries a copier header.
pub fn copier_header_size(file_len: usize) -> usize {
    if file_len % 1024 == COPIER_HEADER_SIZE {
        COPIER_HEADER_SIZE
    } else {
        0
    }
}

/// An immutable, fully loaded ROM dump.
///
/// All offsets accepted and returned by this type are ROM offsets, counted
/// from the end of any copier header.
#[derive(Clone, Debug)]
pub struct RomImage {
    data: Vec<u8>,
    header_size: usize,
    mode: MappingMode,
}

impl RomImage {
    /// Wrap a file's contents.
    ///
    /// If no mapping mode is given, it is detected from the internal
    /// cartridge header.
    pub fn from_bytes(data: Vec<u8>, mode: Option<MappingMode>) -> Result<Self> {
        let header_size = copier_header_size(data.len());

        if data.len() <= header_size {
            return Err(Error::EmptyImage);
        }

        let mode = match mode {
            Some(mode) => mode,
            None => {
                let detected = detect_mapping(&data[header_size..]);
                debug!("Detected {} mapping from internal header", detected);
                detected
            }
        };

        info!(
            rom_size = data.len() - header_size,
            header_size,
            "Loaded {} ROM image",
            mode
        );

        Ok(RomImage {
            data,
            header_size,
            mode,
        })
    }

    /// Read a ROM image from any byte stream.
    pub fn read<F>(file: &mut F, mode: Option<MappingMode>) -> Result<Self>
    where
        F: io::Read,
    {
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        Self::from_bytes(data, mode)
    }

    pub fn open<P>(path: P, mode: Option<MappingMode>) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let mut file = fs::File::open(path)?;

        Self::read(&mut file, mode)
    }

    /// The ROM data with the copier header removed.
    pub fn bytes(&self) -> &[u8] {
        &self.data[self.header_size..]
    }

    /// The file exactly as it was loaded.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Length of the ROM data, excluding any copier header.
    pub fn len(&self) -> usize {
        self.data.len() - self.header_size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn header_size(&self) -> usize {
        self.header_size
    }

    pub fn mapping_mode(&self) -> MappingMode {
        self.mode
    }

    /// Position in the raw file of a given ROM offset.
    pub fn file_offset(&self, rom_offset: usize) -> usize {
        rom_offset + self.header_size
    }

    pub fn translator(&self) -> AddressTranslator {
        AddressTranslator::new(self.mode, self.len())
    }

    pub fn to_rom_offset(&self, addr: SnesAddress) -> RomMapping {
        self.translator().to_rom_offset(addr)
    }

    pub fn from_rom_offset(&self, rom_offset: usize) -> Option<SnesAddress> {
        self.translator().from_rom_offset(rom_offset)
    }

    /// Retrieve `count` bytes starting at a ROM offset.
    pub fn retrieve(&self, rom_offset: usize, count: usize) -> Option<&[u8]> {
        self.bytes().get(rom_offset..rom_offset.checked_add(count)?)
    }

    /// Read a little-endian word at a ROM offset.
    pub fn read_u16(&self, rom_offset: usize) -> Option<u16> {
        let word = self.retrieve(rom_offset, 2)?;

        Some(word[0] as u16 | (word[1] as u16) << 8)
    }

    /// Retrieve the bytes a CPU address reads, up to `count` of them, without
    /// crossing the end of the bank window.
    pub fn read_at(&self, addr: SnesAddress, count: usize) -> Option<&[u8]> {
        let mapping = self.to_rom_offset(addr);
        if !mapping.is_valid() {
            return None;
        }

        self.retrieve(
            mapping.rom_offset(),
            count.min(mapping.available_size()),
        )
    }
}
