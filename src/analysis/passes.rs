//! Linear disassembly passes over ROM ranges.

use crate::analysis::{CoverageMap, Error, Result};
use crate::arch::w65c816::{jump_table_base, Decoder, Instruction};
use crate::database::{CrossReference, XrefIndex};
use crate::memory::SnesAddress;
use crate::platform::RomImage;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace, warn};

/// How far a disassembly pass should go.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DisassemblyMode {
    /// Decode every byte of the requested range.
    FullRange,

    /// Stop after the first return instruction.
    SingleSubroutine,
}

impl Default for DisassemblyMode {
    fn default() -> Self {
        DisassemblyMode::FullRange
    }
}

/// Drives the decoder across ROM ranges, accumulating coverage and
/// cross-references from one pass to the next.
pub struct Disassembler<'a> {
    image: &'a RomImage,
    decoder: Decoder,
    coverage: CoverageMap,
    xrefs: XrefIndex,
    tables: BTreeSet<SnesAddress>,
}

impl<'a> Disassembler<'a> {
    pub fn new(image: &'a RomImage, decoder: Decoder) -> Result<Self> {
        if image.is_empty() {
            return Err(Error::EmptyImage);
        }

        Ok(Disassembler {
            image,
            decoder,
            coverage: CoverageMap::new(),
            xrefs: XrefIndex::new(),
            tables: BTreeSet::new(),
        })
    }

    /// Decode `[start, start + length)` of the ROM.
    ///
    /// Every byte of the range not already covered by an earlier pass is
    /// accounted for by exactly one returned instruction. Bytes that do not
    /// decode, or whose instruction would run past the range or into covered
    /// bytes or past the end of its bank, become one-byte data placeholders.
    /// Ranges running past the end of the ROM are shortened to fit.
    pub fn disassemble_range(
        &mut self,
        start: usize,
        length: usize,
        mode: DisassemblyMode,
    ) -> Result<BTreeMap<SnesAddress, Instruction>> {
        let image = self.image;
        let image_len = image.len();
        if start >= image_len {
            return Err(Error::RangeOutsideImage { start, image_len });
        }

        let mut end = start.saturating_add(length);
        if end > image_len {
            warn!(
                "Range {:#X}+{:#X} runs past the end of the ROM, stopping at {:#X}",
                start, length, image_len
            );
            end = image_len;
        }

        let mut instructions = BTreeMap::new();
        if end == start {
            return Ok(instructions);
        }

        // Mappings are monotonic, so if the last byte is addressable all are
        self.address_of(end - 1)?;

        let bytes = &image.bytes()[..end];
        let mut placeholders = 0;
        let mut offset = start;

        while offset < end {
            if let Some(span) = self.coverage.covering_span(offset) {
                offset = span.end;
                continue;
            }

            let address = self.address_of(offset)?;

            // The program counter wraps within its bank, so no instruction
            // reads past the end of the bank's ROM window
            let mapping = image.to_rom_offset(address);
            let window_end = end.min(mapping.rom_offset() + mapping.available_size());

            let instr = match self.decoder.decode(&bytes[..window_end], offset, address) {
                Ok(instr)
                    if !self
                        .coverage
                        .overlaps(offset, offset + instr.size_bytes() as usize) =>
                {
                    instr
                }
                Ok(instr) => {
                    trace!("{} would overlap analyzed code at {}", instr.mnemonic(), address);
                    placeholders += 1;
                    Instruction::data_byte(address, bytes[offset])
                }
                Err(e) => {
                    trace!("Treating {} as data: {}", address, e);
                    placeholders += 1;
                    Instruction::data_byte(address, bytes[offset])
                }
            };

            let size = instr.size_bytes() as usize;
            self.coverage.mark(offset, offset + size);

            if let Some(xref) = CrossReference::from_instruction(&instr) {
                self.xrefs.add(xref);
            }

            if let Some(table) = jump_table_base(&instr, address.bank()) {
                self.tables.insert(table);
            }

            let is_return = instr.is_return();
            instructions.insert(address, instr);
            offset += size;

            if is_return && mode == DisassemblyMode::SingleSubroutine {
                break;
            }
        }

        debug!(
            start,
            end = offset,
            instructions = instructions.len(),
            placeholders,
            "Disassembled ROM range"
        );

        Ok(instructions)
    }

    /// Decode starting from a CPU address.
    pub fn disassemble_from(
        &mut self,
        address: SnesAddress,
        length: usize,
        mode: DisassemblyMode,
    ) -> Result<BTreeMap<SnesAddress, Instruction>> {
        let mapping = self.image.to_rom_offset(address);
        if !mapping.is_valid() {
            return Err(Error::Unmapped(address));
        }

        self.disassemble_range(mapping.rom_offset(), length, mode)
    }

    fn address_of(&self, offset: usize) -> Result<SnesAddress> {
        self.image
            .from_rom_offset(offset)
            .ok_or(Error::Unaddressable(offset))
    }

    pub fn coverage(&self) -> &CoverageMap {
        &self.coverage
    }

    pub fn xrefs(&self) -> &XrefIndex {
        &self.xrefs
    }

    /// Bases of every indexed indirect jump table seen so far.
    pub fn tables(&self) -> &BTreeSet<SnesAddress> {
        &self.tables
    }

    pub fn into_parts(self) -> (XrefIndex, BTreeSet<SnesAddress>) {
        (self.xrefs, self.tables)
    }
}
