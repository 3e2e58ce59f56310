//! 65C816 CPU architecture. Extension of the 6502 to ""16-bit"" operation.
//!
//! Used as the main CPU of the Super Famicom. Instructions run from one to
//! four bytes; the length of immediate operands depends on processor flags
//! that are only known at runtime, so decoding works from a fixed
//! configuration of those widths instead.

mod dis;
mod instr;
mod mode;
mod opcodes;
mod target;

pub use dis::{decode, DecodeFailure, Decoder, ImmediateWidths, Result};
pub use instr::Instruction;
pub use mode::AddressingMode;
pub use opcodes::{lookup, Mnemonic, OpcodeInfo, OPCODE_TABLE};
pub use target::{jump_table_base, resolve_target};
