//! 65C816 instruction decoding

use crate::arch::w65c816::{lookup, resolve_target, AddressingMode, Instruction, OpcodeInfo};
use crate::memory::SnesAddress;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a byte offset could not be decoded as an instruction.
///
/// Neither condition is fatal; callers are expected to treat the byte as
/// data and move on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    #[error("instruction at offset {offset:#X} needs {needed} bytes but only {available} remain")]
    TruncatedInstruction {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("opcode ${opcode:02X} at offset {offset:#X} is undefined")]
    UnknownOpcode { offset: usize, opcode: u8 },
}

pub type Result<T> = std::result::Result<T, DecodeFailure>;

/// Operand widths to assume for flag-dependent immediates.
///
/// The M and X flags are not tracked; whatever is configured here applies to
/// every instruction, including those following a `REP` or `SEP`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmediateWidths {
    pub accumulator_16: bool,
    pub index_16: bool,
}

impl Default for ImmediateWidths {
    fn default() -> Self {
        ImmediateWidths {
            accumulator_16: true,
            index_16: false,
        }
    }
}

/// A configured instruction decoder.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Decoder {
    widths: ImmediateWidths,
}

impl Decoder {
    pub fn new(widths: ImmediateWidths) -> Self {
        Decoder { widths }
    }

    pub fn widths(&self) -> ImmediateWidths {
        self.widths
    }

    /// Length of an instruction under the configured immediate widths.
    pub fn instruction_size(&self, info: &OpcodeInfo) -> usize {
        let wide = match info.mode {
            AddressingMode::ImmediateM => self.widths.accumulator_16,
            AddressingMode::ImmediateX => self.widths.index_16,
            _ => false,
        };

        info.size_bytes as usize + wide as usize
    }

    /// Decode the instruction at `rom_offset` of `bytes`, which the CPU sees
    /// at `address`.
    ///
    /// Only `bytes` is consulted, so a caller can bound decoding by handing
    /// in a shorter slice. The instruction's target is resolved against its
    /// own bank.
    pub fn decode(&self, bytes: &[u8], rom_offset: usize, address: SnesAddress) -> Result<Instruction> {
        let opcode = *bytes
            .get(rom_offset)
            .ok_or(DecodeFailure::TruncatedInstruction {
                offset: rom_offset,
                needed: 1,
                available: 0,
            })?;

        let info = lookup(opcode).ok_or(DecodeFailure::UnknownOpcode {
            offset: rom_offset,
            opcode,
        })?;

        let size = self.instruction_size(info);
        let available = bytes.len() - rom_offset;
        if available < size {
            return Err(DecodeFailure::TruncatedInstruction {
                offset: rom_offset,
                needed: size,
                available,
            });
        }

        let extra_cycles = (size - info.size_bytes as usize) as u8;
        let instr = Instruction::from_parts(
            address,
            opcode,
            info.mnemonic,
            bytes[rom_offset + 1..rom_offset + size].to_vec(),
            info.mode,
            info.cycles + extra_cycles,
        );
        let target = resolve_target(&instr, address.bank());

        Ok(instr.with_target(target))
    }
}

/// Decode with the default immediate widths.
pub fn decode(bytes: &[u8], rom_offset: usize, address: SnesAddress) -> Result<Instruction> {
    Decoder::default().decode(bytes, rom_offset, address)
}
