use crate::arch::w65c816::{decode, Instruction};
use crate::asm::{format_instruction, format_operand, write_listing, OutputFormat, Report};
use crate::database::{Symbol, SymbolKind, SymbolTable, XrefIndex};
use crate::memory::SnesAddress;
use crate::platform::MappingMode;
use std::str::FromStr;

const ORIGIN: SnesAddress = SnesAddress::new(0x00, 0x8000);

macro_rules! assert_asm {
    ($data: expr, $text: expr) => {
        assert_eq!(
            format_instruction(&decode(&$data, 0, ORIGIN).unwrap(), None),
            $text
        )
    };
}

#[test]
fn operand_syntax() {
    assert_asm!([0xEA], "NOP");
    assert_asm!([0x0A], "ASL A");
    assert_asm!([0xC2, 0x30], "REP #$30");
    assert_asm!([0xA9, 0x34, 0x12], "LDA #$1234");
    assert_asm!([0xA2, 0x12], "LDX #$12");
    assert_asm!([0xAD, 0x34, 0x12], "LDA $1234");
    assert_asm!([0xBD, 0x34, 0x12], "LDA $1234,X");
    assert_asm!([0xB9, 0x34, 0x12], "LDA $1234,Y");
    assert_asm!([0xAF, 0x56, 0x34, 0x12], "LDA $123456");
    assert_asm!([0xBF, 0x56, 0x34, 0x12], "LDA $123456,X");
    assert_asm!([0xA5, 0x12], "LDA $12");
    assert_asm!([0xB5, 0x12], "LDA $12,X");
    assert_asm!([0xB6, 0x12], "LDX $12,Y");
    assert_asm!([0xB2, 0x12], "LDA ($12)");
    assert_asm!([0xA1, 0x12], "LDA ($12,X)");
    assert_asm!([0xB1, 0x12], "LDA ($12),Y");
    assert_asm!([0xA7, 0x12], "LDA [$12]");
    assert_asm!([0xB7, 0x12], "LDA [$12],Y");
    assert_asm!([0x6C, 0x34, 0x12], "JMP ($1234)");
    assert_asm!([0x7C, 0x34, 0x12], "JMP ($1234,X)");
    assert_asm!([0xDC, 0x34, 0x12], "JML [$1234]");
    assert_asm!([0xA3, 0x12], "LDA $12,S");
    assert_asm!([0xB3, 0x12], "LDA ($12,S),Y");
    assert_asm!([0x54, 0x7E, 0x7F], "MVN $7E,$7F");
    assert_asm!([0xF0, 0x02], "BEQ $8004");
    assert_asm!([0x82, 0x00, 0x10], "BRL $009003");
    assert_asm!([0x22, 0x34, 0x12, 0x01], "JSL $011234");
}

#[test]
fn placeholders() {
    let data = Instruction::data_byte(ORIGIN, 0x42);

    assert_eq!(format_instruction(&data, None), ".db $42");
    assert_eq!(format_operand(&data, None), "");
}

#[test]
fn symbols_replace_operands() {
    let mut symbols = SymbolTable::new();
    symbols.insert(Symbol::new(SnesAddress::new(0, 0x9000), SymbolKind::Label, None));
    symbols.insert(Symbol::new(SnesAddress::new(0, 0x2100), SymbolKind::Data, None));
    symbols.insert(Symbol::new(SnesAddress::new(0, 0xA000), SymbolKind::Table, None));

    let render = |bytes: &[u8]| format_instruction(&decode(bytes, 0, ORIGIN).unwrap(), Some(&symbols));

    assert_eq!(render(&[0x20, 0x00, 0x90]), "JSR FUN_009000");
    assert_eq!(render(&[0x9D, 0x00, 0x21]), "STA DAT_002100,X");
    assert_eq!(render(&[0x7C, 0x00, 0xA0]), "JMP (TBL_00A000,X)");
    assert_eq!(render(&[0x20, 0x00, 0x91]), "JSR $9100");
    assert_eq!(render(&[0xA9, 0x00, 0x90]), "LDA #$9000");
}

#[test]
fn listing_lines() {
    let code = [0x20, 0x00, 0x90, 0x60];
    let first = decode(&code, 0, ORIGIN).unwrap();
    let second = decode(&code, 3, SnesAddress::new(0, 0x8003)).unwrap();

    let mut symbols = SymbolTable::new();
    symbols.insert(Symbol::new(
        ORIGIN,
        SymbolKind::Label,
        Some("RESET vector (emulation)".to_string()),
    ));

    let mut out = Vec::new();
    write_listing(&mut out, vec![&first, &second], Some(&symbols)).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "FUN_008000: ; RESET vector (emulation)\n\
         $00:8000  20 00 90     JSR $9000\n\
         $00:8003  60           RTS\n"
    );
}

#[test]
fn json_report() {
    let instr = decode(&[0x20, 0x00, 0x90], 0, ORIGIN).unwrap();
    let xrefs = XrefIndex::new();
    let mut out = Vec::new();

    Report::new(MappingMode::LoRom, vec![&instr], &xrefs, None)
        .write(&mut out)
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["mapping"], "LoROM");
    assert_eq!(value["instructions"][0]["mnemonic"], "JSR");
    assert_eq!(value["instructions"][0]["target"], "$00:9000");
    assert_eq!(value["instructions"][0]["operands"], serde_json::json!([0, 144]));
    assert!(value["symbols"].is_null());
}

#[test]
fn output_formats() {
    assert_eq!(OutputFormat::from_str("ASM"), Ok(OutputFormat::Asm));
    assert_eq!(OutputFormat::from_str("json"), Ok(OutputFormat::Json));
    assert_eq!(OutputFormat::from_str("xml"), Err(()));
    assert_eq!(OutputFormat::default(), OutputFormat::Asm);
}
