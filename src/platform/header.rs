//! Internal cartridge header and interrupt vector table.
//!
//! The SNES header is not at a constant file offset. It always lives at CPU
//! address `$00:FFC0`, so where it lands in the file depends on the mapping,
//! and finding a plausible header at one of the candidate offsets is the best
//! evidence we have for which mapping the cartridge uses.

use crate::memory::SnesAddress;
use crate::platform::{MappingMode, RomImage};
use serde::Serialize;
use tracing::debug;

/// Size of the header block scored during detection.
const HEADER_LEN: usize = 0x40;

/// Some dumps carry a copier header that does not follow the 1KB length rule.
const MISALIGNED_COPIER_HEADER: usize = 0x200;

/// Field offsets within the header block.
const TITLE_LEN: usize = 21;
const MAP_MODE: usize = 0x15;
const CART_TYPE: usize = 0x16;
const ROM_SIZE: usize = 0x17;
const COMPLEMENT: usize = 0x1C;
const CHECKSUM: usize = 0x1E;

/// The parsed internal header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InternalHeader {
    title: String,
    map_mode: u8,
    cart_type: u8,
    rom_size: u8,
    complement: u16,
    checksum: u16,
}

fn word_at(bytes: &[u8], at: usize) -> u16 {
    bytes[at] as u16 | (bytes[at + 1] as u16) << 8
}

impl InternalHeader {
    /// Parse a header block, which must be at least 0x20 bytes long.
    pub fn parse(block: &[u8]) -> Option<Self> {
        if block.len() < CHECKSUM + 2 {
            return None;
        }

        let title = block[..TITLE_LEN]
            .iter()
            .map(|&b| if (0x20..=0x7E).contains(&b) { b as char } else { '?' })
            .collect::<String>()
            .trim_end()
            .to_string();

        Some(InternalHeader {
            title,
            map_mode: block[MAP_MODE],
            cart_type: block[CART_TYPE],
            rom_size: block[ROM_SIZE],
            complement: word_at(block, COMPLEMENT),
            checksum: word_at(block, CHECKSUM),
        })
    }

    /// Read the header from where the image's mapping mode says it is.
    pub fn read(image: &RomImage) -> Option<Self> {
        Self::parse(image.retrieve(image.mapping_mode().header_offset(), HEADER_LEN)?)
    }

    pub fn as_title(&self) -> &str {
        &self.title
    }

    pub fn map_mode(&self) -> u8 {
        self.map_mode
    }

    pub fn cart_type(&self) -> u8 {
        self.cart_type
    }

    /// ROM size as declared by the header, as a power-of-two KB exponent.
    pub fn rom_size(&self) -> u8 {
        self.rom_size
    }

    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    pub fn complement(&self) -> u16 {
        self.complement
    }

    /// Determine if the checksum and its complement agree with each other.
    ///
    /// This says nothing about whether the checksum matches the ROM, since
    /// plenty of commercial dumps carry a wrong one.
    pub fn is_checksum_consistent(&self) -> bool {
        self.checksum ^ self.complement == 0xFFFF
    }
}

/// Score how plausible a block of bytes is as an internal header.
pub fn score_header(block: &[u8]) -> u32 {
    if block.len() < HEADER_LEN {
        return 0;
    }

    let mut score = block[..TITLE_LEN]
        .iter()
        .filter(|&&b| (0x20..=0x7E).contains(&b))
        .count() as u32;

    if let 0x20 | 0x21 | 0x30 | 0x31 = block[MAP_MODE] {
        score += 20;
    }

    if (7..=15).contains(&block[ROM_SIZE]) {
        score += 15;
    }

    if word_at(block, CHECKSUM) ^ word_at(block, COMPLEMENT) == 0xFFFF {
        score += 30;
    }

    score
}

fn best_score(bytes: &[u8], header_offset: usize) -> u32 {
    [header_offset, header_offset + MISALIGNED_COPIER_HEADER]
        .iter()
        .filter_map(|&at| bytes.get(at..at + HEADER_LEN))
        .map(score_header)
        .max()
        .unwrap_or(0)
}

/// Guess the mapping mode of a headerless ROM from its internal header.
///
/// LoROM is only chosen when its header candidate scores strictly higher.
pub fn detect_mapping(bytes: &[u8]) -> MappingMode {
    let lorom_score = best_score(bytes, MappingMode::LoRom.header_offset());
    let hirom_score = best_score(bytes, MappingMode::HiRom.header_offset());

    debug!(lorom_score, hirom_score, "Scored internal header candidates");

    if lorom_score > hirom_score {
        MappingMode::LoRom
    } else {
        MappingMode::HiRom
    }
}

/// A slot in the 65C816 interrupt vector table.
pub struct VectorSlot {
    pub name: &'static str,
    pub location: u16,
    pub emulation: bool,
}

/// Every vector the CPU reads, native mode first.
pub static VECTOR_TABLE: [VectorSlot; 12] = [
    VectorSlot { name: "COP", location: 0xFFE4, emulation: false },
    VectorSlot { name: "BRK", location: 0xFFE6, emulation: false },
    VectorSlot { name: "ABORT", location: 0xFFE8, emulation: false },
    VectorSlot { name: "NMI", location: 0xFFEA, emulation: false },
    VectorSlot { name: "UNUSED", location: 0xFFEC, emulation: false },
    VectorSlot { name: "IRQ", location: 0xFFEE, emulation: false },
    VectorSlot { name: "COP", location: 0xFFF4, emulation: true },
    VectorSlot { name: "UNUSED", location: 0xFFF6, emulation: true },
    VectorSlot { name: "ABORT", location: 0xFFF8, emulation: true },
    VectorSlot { name: "NMI", location: 0xFFFA, emulation: true },
    VectorSlot { name: "RESET", location: 0xFFFC, emulation: true },
    VectorSlot { name: "IRQ", location: 0xFFFE, emulation: true },
];

/// A vector as read out of a particular ROM.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Vector {
    name: &'static str,
    emulation: bool,
    location: SnesAddress,
    target: SnesAddress,
    code_address: Option<SnesAddress>,
}

impl Vector {
    pub fn as_name(&self) -> &'static str {
        self.name
    }

    pub fn is_emulation(&self) -> bool {
        self.emulation
    }

    /// Where in bank zero the CPU reads this vector from.
    pub fn as_location(&self) -> SnesAddress {
        self.location
    }

    /// The bank zero address the CPU jumps to.
    pub fn as_target(&self) -> SnesAddress {
        self.target
    }

    /// An address for the handler that the mapper considers ROM.
    ///
    /// HiROM handlers run from the bank zero mirror of bank `$C0`, so they
    /// are analyzed there. Handlers outside ROM have no code address.
    pub fn as_code_address(&self) -> Option<SnesAddress> {
        self.code_address
    }

    /// Vector name qualified with the CPU mode that uses it.
    pub fn describe(&self) -> String {
        format!(
            "{} vector ({})",
            self.name,
            if self.emulation { "emulation" } else { "native" }
        )
    }
}

/// Read the interrupt vector table out of a ROM image.
///
/// Slots that cannot be read because the image is too short are skipped.
pub fn read_vectors(image: &RomImage) -> Vec<Vector> {
    let mode = image.mapping_mode();
    let translator = image.translator();
    let mut vectors = Vec::new();

    for slot in VECTOR_TABLE.iter() {
        let rom_offset = mode.header_offset() + (slot.location as usize - 0xFFC0);
        let pointer = match image.read_u16(rom_offset) {
            Some(pointer) => pointer,
            None => continue,
        };

        let target = SnesAddress::new(0, pointer);
        let candidate = match mode {
            MappingMode::LoRom => target,
            MappingMode::HiRom => target.with_bank(0xC0),
        };

        let code_address = if pointer >= 0x8000 && translator.to_rom_offset(candidate).is_valid() {
            Some(candidate)
        } else {
            None
        };

        vectors.push(Vector {
            name: slot.name,
            emulation: slot.emulation,
            location: SnesAddress::new(0, slot.location),
            target,
            code_address,
        });
    }

    vectors
}
