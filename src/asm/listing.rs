//! 65C816 assembly syntax

use crate::arch::w65c816::{jump_table_base, AddressingMode, Instruction};
use crate::database::SymbolTable;
use std::io::{Result, Write};

fn hex_operand(operands: &[u8], value: u32) -> String {
    match operands.len() {
        1 => format!("${:02X}", value),
        2 => format!("${:04X}", value),
        _ => format!("${:06X}", value),
    }
}

/// Render an instruction's operand field.
///
/// If `symbols` names the address the operand refers to, the name is printed
/// in place of the number.
pub fn format_operand(instr: &Instruction, symbols: Option<&SymbolTable>) -> String {
    use AddressingMode::*;

    let operands = instr.as_operands();
    let value = instr.operand_value().unwrap_or(0);
    let hex = hex_operand(operands, value);

    let (prefix, number, suffix) = match instr.addressing_mode() {
        Implied => return String::new(),
        Accumulator => return "A".to_string(),
        BlockMove => {
            return format!(
                "${:02X},${:02X}",
                value & 0xFF,
                (value >> 8) & 0xFF
            )
        }
        Immediate | ImmediateM | ImmediateX => ("#", hex, ""),
        Absolute | AbsoluteLong | Direct => ("", hex, ""),
        AbsoluteX | AbsoluteLongX | DirectX => ("", hex, ",X"),
        AbsoluteY | DirectY => ("", hex, ",Y"),
        AbsoluteIndirect | DirectIndirect => ("(", hex, ")"),
        AbsoluteIndexedIndirect | DirectIndexedIndirect => ("(", hex, ",X)"),
        DirectIndirectIndexed => ("(", hex, "),Y"),
        AbsoluteIndirectLong | DirectIndirectLong => ("[", hex, "]"),
        DirectIndirectLongIndexed => ("[", hex, "],Y"),
        StackRelative => ("", hex, ",S"),
        StackRelativeIndirectIndexed => ("(", hex, ",S),Y"),
        Relative => (
            "",
            instr
                .target()
                .map_or(hex, |target| format!("${:04X}", target.offset())),
            "",
        ),
        RelativeLong => (
            "",
            instr
                .target()
                .map_or(hex, |target| format!("${:X}", target)),
            "",
        ),
    };

    let referenced = instr
        .target()
        .or_else(|| jump_table_base(instr, instr.address().bank()));
    let number = referenced
        .and_then(|address| symbols?.name_of(address))
        .map_or(number, str::to_string);

    format!("{}{}{}", prefix, number, suffix)
}

/// Render an instruction as one line of assembly, without its address.
pub fn format_instruction(instr: &Instruction, symbols: Option<&SymbolTable>) -> String {
    if instr.is_placeholder() {
        return format!(".db ${:02X}", instr.opcode());
    }

    let operand = format_operand(instr, symbols);
    if operand.is_empty() {
        instr.mnemonic().to_string()
    } else {
        format!("{} {}", instr.mnemonic(), operand)
    }
}

/// Write a listing of instructions, one per line, preceded by any symbol
/// declared at their address.
pub fn write_listing<'a, I>(
    stream: &mut dyn Write,
    instructions: I,
    symbols: Option<&SymbolTable>,
) -> Result<()>
where
    I: IntoIterator<Item = &'a Instruction>,
{
    for instr in instructions {
        if let Some(symbol) = symbols.and_then(|s| s.get(instr.address())) {
            match symbol.as_comment() {
                Some(comment) => writeln!(stream, "{}: ; {}", symbol.as_name(), comment)?,
                None => writeln!(stream, "{}:", symbol.as_name())?,
            }
        }

        let bytes: Vec<String> = instr.bytes().iter().map(|b| format!("{:02X}", b)).collect();

        writeln!(
            stream,
            "{}  {:<11}  {}",
            instr.address(),
            bytes.join(" "),
            format_instruction(instr, symbols)
        )?;
    }

    Ok(())
}
