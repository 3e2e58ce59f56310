//! Static control-flow and data target resolution.
//!
//! Absolute operands are placed in the bank of the instruction that uses
//! them. On hardware, data accesses go through the data bank register, which
//! we do not track; for jumps and calls the program bank is correct.

use crate::arch::w65c816::{AddressingMode, Instruction, Mnemonic};
use crate::memory::SnesAddress;

/// Compute the address an instruction statically refers to.
///
/// `code_bank` is the bank containing the instruction. Indirect, direct
/// page, stack, immediate and block move operands have no static target.
pub fn resolve_target(instr: &Instruction, code_bank: u8) -> Option<SnesAddress> {
    use AddressingMode::*;

    let operand = instr.operand_value()?;
    let here = instr.address().with_bank(code_bank);

    match instr.addressing_mode() {
        Absolute if instr.mnemonic() == Mnemonic::Pea => None,
        Absolute | AbsoluteX | AbsoluteY => Some(SnesAddress::new(code_bank, operand as u16)),
        AbsoluteLong | AbsoluteLongX => Some(SnesAddress::from_u24(operand)),
        Relative => {
            let displacement = operand as u8 as i8;
            Some(here.wrapping_add_offset(instr.size_bytes() as i32 + displacement as i32))
        }
        RelativeLong => {
            let displacement = operand as u16 as i16;
            Some(here.wrapping_add_offset(instr.size_bytes() as i32 + displacement as i32))
        }
        _ => None,
    }
}

/// Locate the pointer table read by an indexed indirect jump or call.
///
/// `JMP ($1234,X)` and `JSR ($1234,X)` read their pointer from the program
/// bank, so unlike other absolute operands the bank here is exact.
pub fn jump_table_base(instr: &Instruction, code_bank: u8) -> Option<SnesAddress> {
    match instr.addressing_mode() {
        AddressingMode::AbsoluteIndexedIndirect => {
            Some(SnesAddress::new(code_bank, instr.operand_value()? as u16))
        }
        _ => None,
    }
}
