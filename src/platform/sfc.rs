//! LoROM and HiROM address decoding.
//!
//! Both conventions alias ROM: LoROM repeats banks `$00-$7F` at `$80-$FF`,
//! HiROM repeats banks `$C0-$FF` at `$40-$7F`. Aliases are kept distinct as
//! CPU addresses and only meet at the ROM offset.

use crate::memory::SnesAddress;
use crate::platform::MappingMode;
use serde::Serialize;
use std::cmp;

/// Most either convention can address without coprocessor banking.
const MAX_MAPPED_ROM: usize = 0x40_0000;

/// Any type which decodes the 65C816 banking scheme into a ROM offset.
pub trait Mapper: Send + Sync {
    fn mapping_type(&self) -> MappingMode;

    /// Compute the ROM offset a CPU address reads from, ignoring how large
    /// the ROM actually is.
    ///
    /// Returns `None` if the address is never wired to ROM.
    fn decode_banked_addr(&self, addr: SnesAddress) -> Option<usize>;

    /// Compute the canonical CPU address for a ROM offset.
    fn encode_banked_addr(&self, rom_offset: usize) -> Option<SnesAddress>;

    /// Determine if a ROM-bearing address is a mirror of the canonical
    /// address for the same ROM offset.
    fn is_mirror(&self, addr: SnesAddress) -> bool;

    /// Number of bytes from `addr` to the end of the ROM window it sits in.
    fn window_end(&self, addr: SnesAddress) -> usize;
}

/// Mode 20 mapping: 32KB of ROM in the upper half of each bank.
pub struct LoRomMapper;

impl Mapper for LoRomMapper {
    fn mapping_type(&self) -> MappingMode {
        MappingMode::LoRom
    }

    fn decode_banked_addr(&self, addr: SnesAddress) -> Option<usize> {
        if addr.offset() < 0x8000 {
            return None;
        }

        let bank_index = (addr.bank() % 0x80) as usize;

        Some(bank_index * 0x8000 + (addr.offset() as usize - 0x8000))
    }

    fn encode_banked_addr(&self, rom_offset: usize) -> Option<SnesAddress> {
        if rom_offset >= MAX_MAPPED_ROM {
            return None;
        }

        let bank = (rom_offset / 0x8000) as u8;
        let offset = (0x8000 + rom_offset % 0x8000) as u16;

        Some(SnesAddress::new(bank, offset))
    }

    fn is_mirror(&self, addr: SnesAddress) -> bool {
        addr.bank() >= 0x80
    }

    fn window_end(&self, addr: SnesAddress) -> usize {
        0x10000 - addr.offset() as usize
    }
}

/// Mode 21 mapping: 64KB of ROM per bank in banks `$40-$7F` and `$C0-$FF`.
///
/// The system banks `$00-$3F` and `$80-$BF` are treated as never holding
/// ROM data, even though real hardware mirrors the upper half of each ROM
/// bank there.
pub struct HiRomMapper;

impl Mapper for HiRomMapper {
    fn mapping_type(&self) -> MappingMode {
        MappingMode::HiRom
    }

    fn decode_banked_addr(&self, addr: SnesAddress) -> Option<usize> {
        let base = match addr.bank() {
            0x40..=0x7F => 0x40,
            0xC0..=0xFF => 0xC0,
            _ => return None,
        };

        Some((addr.bank() - base) as usize * 0x10000 + addr.offset() as usize)
    }

    fn encode_banked_addr(&self, rom_offset: usize) -> Option<SnesAddress> {
        if rom_offset >= MAX_MAPPED_ROM {
            return None;
        }

        let bank = 0xC0 + (rom_offset >> 16) as u8;

        Some(SnesAddress::new(bank, (rom_offset & 0xFFFF) as u16))
    }

    fn is_mirror(&self, addr: SnesAddress) -> bool {
        (0x40..=0x7F).contains(&addr.bank())
    }

    fn window_end(&self, addr: SnesAddress) -> usize {
        0x10000 - addr.offset() as usize
    }
}

/// The result of translating a CPU address into the ROM image.
///
/// An invalid mapping is an ordinary value: most addresses on the bus are not
/// ROM, and scans that probe them simply discard the result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RomMapping {
    rom_offset: usize,
    available_size: usize,
    is_valid: bool,
    mapping_type: MappingMode,
    aliases_of: Option<usize>,
}

impl RomMapping {
    fn unmapped(mapping_type: MappingMode) -> Self {
        RomMapping {
            rom_offset: 0,
            available_size: 0,
            is_valid: false,
            mapping_type,
            aliases_of: None,
        }
    }

    /// Offset into the ROM, not counting any copier header.
    ///
    /// For addresses in a ROM-bearing range this is computed even when the
    /// ROM is too small to contain it.
    pub fn rom_offset(&self) -> usize {
        self.rom_offset
    }

    /// Bytes readable from this location before leaving the bank window or
    /// the image.
    pub fn available_size(&self) -> usize {
        self.available_size
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn mapping_type(&self) -> MappingMode {
        self.mapping_type
    }

    /// The ROM offset this address mirrors, if it is not the canonical
    /// address for that offset.
    pub fn aliases_of(&self) -> Option<usize> {
        self.aliases_of
    }
}

/// Determine if an address is wired to ROM under a given mapping mode.
pub fn validate(addr: SnesAddress, mode: MappingMode) -> bool {
    mode.mapper().decode_banked_addr(addr).is_some()
}

/// Translate a CPU address into a ROM offset for a ROM of `rom_size` bytes.
pub fn to_rom_offset(addr: SnesAddress, mode: MappingMode, rom_size: usize) -> RomMapping {
    let mapper = mode.mapper();

    match mapper.decode_banked_addr(addr) {
        Some(rom_offset) => {
            let is_valid = rom_offset < rom_size;
            let available_size = if is_valid {
                cmp::min(mapper.window_end(addr), rom_size - rom_offset)
            } else {
                0
            };

            RomMapping {
                rom_offset,
                available_size,
                is_valid,
                mapping_type: mode,
                aliases_of: if mapper.is_mirror(addr) {
                    Some(rom_offset)
                } else {
                    None
                },
            }
        }
        None => RomMapping::unmapped(mode),
    }
}

/// Translate a ROM offset back into its canonical CPU address.
pub fn from_rom_offset(rom_offset: usize, mode: MappingMode) -> Option<SnesAddress> {
    mode.mapper().encode_banked_addr(rom_offset)
}

/// Address translation bound to a particular ROM.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AddressTranslator {
    mode: MappingMode,
    rom_size: usize,
}

impl AddressTranslator {
    pub fn new(mode: MappingMode, rom_size: usize) -> Self {
        AddressTranslator { mode, rom_size }
    }

    pub fn mapping_mode(&self) -> MappingMode {
        self.mode
    }

    pub fn rom_size(&self) -> usize {
        self.rom_size
    }

    pub fn validate(&self, addr: SnesAddress) -> bool {
        validate(addr, self.mode)
    }

    pub fn to_rom_offset(&self, addr: SnesAddress) -> RomMapping {
        to_rom_offset(addr, self.mode, self.rom_size)
    }

    /// Translate a ROM offset into its canonical CPU address, provided the
    /// offset lies inside this ROM.
    pub fn from_rom_offset(&self, rom_offset: usize) -> Option<SnesAddress> {
        if rom_offset >= self.rom_size {
            return None;
        }

        from_rom_offset(rom_offset, self.mode)
    }
}
