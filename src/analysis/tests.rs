use crate::analysis::{
    analyze_function, analyze_functions, disassemble_parallel, CoverageMap, Disassembler,
    DisassemblyMode, Error, FunctionKind, Listing,
};
use crate::arch::w65c816::{Decoder, Mnemonic};
use crate::memory::SnesAddress;
use crate::platform::{MappingMode, RomImage};
use proptest::prelude::*;

const ROM_SIZE: usize = 0x8000;

/// Build a LoROM image starting with `code`, padded out with zeros.
fn image(code: &[u8]) -> RomImage {
    image_in(code, MappingMode::LoRom)
}

fn image_in(code: &[u8], mode: MappingMode) -> RomImage {
    let mut rom = vec![0; ROM_SIZE.max(code.len())];
    rom[..code.len()].copy_from_slice(code);

    RomImage::from_bytes(rom, Some(mode)).unwrap()
}

fn addr(bank: u8, offset: u16) -> SnesAddress {
    SnesAddress::new(bank, offset)
}

#[test]
fn coverage_spans() {
    let mut map = CoverageMap::new();

    map.mark(0x10, 0x13);
    map.mark(0x20, 0x22);
    assert_eq!(map.covering_span(0x11), Some(0x10..0x13));
    assert_eq!(map.covering_span(0x13), None);
    assert!(!map.is_covered(0x0F));
    assert!(map.overlaps(0x0E, 0x11));
    assert!(map.overlaps(0x12, 0x30));
    assert!(!map.overlaps(0x13, 0x20));

    map.mark(0x13, 0x20);
    assert_eq!(map.iter().collect::<Vec<_>>(), vec![0x10..0x22]);
    assert_eq!(map.covered_len(), 0x12);

    map.mark(0x08, 0x40);
    assert_eq!(map.iter().collect::<Vec<_>>(), vec![0x08..0x40]);
}

#[test]
fn linear_disassembly() {
    let rom = image(&[0xA9, 0x34, 0x12, 0x8D, 0x00, 0x21, 0x60, 0xEA]);
    let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();
    let listing = dis
        .disassemble_range(0, 8, DisassemblyMode::FullRange)
        .unwrap();

    let mnemonics: Vec<Mnemonic> = listing.values().map(|i| i.mnemonic()).collect();
    assert_eq!(
        mnemonics,
        vec![Mnemonic::Lda, Mnemonic::Sta, Mnemonic::Rts, Mnemonic::Nop]
    );
    assert!(listing.contains_key(&addr(0, 0x8006)));
}

#[test]
fn single_subroutine_stops_at_return() {
    let rom = image(&[0xEA, 0xEA, 0x60, 0xEA, 0xEA]);
    let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();
    let listing = dis
        .disassemble_range(0, 5, DisassemblyMode::SingleSubroutine)
        .unwrap();

    assert_eq!(listing.len(), 3);
    assert_eq!(listing[&addr(0, 0x8002)].mnemonic(), Mnemonic::Rts);
    assert!(!dis.coverage().is_covered(3));
}

#[test]
fn undefined_opcodes_become_placeholders() {
    let rom = image(&[0x42; 64]);
    let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();
    let listing = dis
        .disassemble_range(0, 64, DisassemblyMode::FullRange)
        .unwrap();

    assert_eq!(listing.len(), 64);
    assert!(listing
        .values()
        .all(|i| i.is_placeholder() && i.size_bytes() == 1 && i.opcode() == 0x42));
}

#[test]
fn range_end_truncates_instructions() {
    let rom = image(&[0x20, 0x00, 0x90]);
    let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();
    let listing = dis
        .disassemble_range(0, 2, DisassemblyMode::FullRange)
        .unwrap();

    assert_eq!(listing.len(), 2);
    assert!(listing.values().all(|i| i.is_placeholder()));
    assert!(dis.xrefs().is_empty());
}

#[test]
fn instructions_stop_at_bank_end() {
    // JSR $9000 at $00:FFFE would need its last operand byte from $01:8000
    let mut code = vec![0; 0x10000];
    code[0x7FFE..0x8001].copy_from_slice(&[0x20, 0x00, 0x90]);
    let rom = image_in(&code, MappingMode::LoRom);
    let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();
    let listing = dis
        .disassemble_range(0x7FFE, 4, DisassemblyMode::FullRange)
        .unwrap();

    assert_eq!(listing.len(), 3);
    assert!(listing[&addr(0x00, 0xFFFE)].is_placeholder());
    assert!(listing[&addr(0x00, 0xFFFF)].is_placeholder());
    assert_eq!(listing[&addr(0x01, 0x8000)].mnemonic(), Mnemonic::Bcc);
    assert!(dis.xrefs().query(addr(0x00, 0x9000)).is_empty());
    assert_eq!(dis.coverage().covered_len(), 4);
}

#[test]
fn second_pass_is_idempotent() {
    let rom = image(&[0x20, 0x00, 0x90, 0x20, 0x00, 0x90, 0x60]);
    let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();

    let first = dis
        .disassemble_range(0, 7, DisassemblyMode::FullRange)
        .unwrap();
    let xrefs = dis.xrefs().len();
    let second = dis
        .disassemble_range(0, 7, DisassemblyMode::FullRange)
        .unwrap();

    assert_eq!(first.len(), 3);
    assert!(second.is_empty());
    assert_eq!(dis.xrefs().len(), xrefs);
    assert_eq!(dis.coverage().covered_len(), 7);
}

#[test]
fn covered_bytes_are_not_redecoded() {
    // LDA $20EA at offset 0 would swallow the JSR decoded by the first pass
    let rom = image(&[0xAD, 0xEA, 0x20, 0x00, 0x90]);
    let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();

    dis.disassemble_range(2, 3, DisassemblyMode::FullRange)
        .unwrap();
    let listing = dis
        .disassemble_range(0, 5, DisassemblyMode::FullRange)
        .unwrap();

    assert_eq!(listing.len(), 2);
    assert!(listing[&addr(0, 0x8000)].is_placeholder());
    assert_eq!(listing[&addr(0, 0x8001)].mnemonic(), Mnemonic::Nop);
    assert_eq!(dis.coverage().covered_len(), 5);
}

#[test]
fn call_fan_in() {
    let rom = image(&[0x20, 0x00, 0x90, 0xEA, 0x20, 0x00, 0x90]);
    let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();
    dis.disassemble_range(0, 7, DisassemblyMode::FullRange)
        .unwrap();

    let found = dis.xrefs().query(addr(0, 0x9000));
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].source(), addr(0, 0x8000));
    assert_eq!(found[1].source(), addr(0, 0x8004));
}

#[test]
fn jump_tables_are_recorded() {
    let rom = image(&[0x7C, 0x00, 0xA0]);
    let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();
    dis.disassemble_range(0, 3, DisassemblyMode::FullRange)
        .unwrap();

    assert!(dis.tables().contains(&addr(0, 0xA000)));
    assert!(dis.xrefs().is_empty());
}

#[test]
fn hirom_passes_use_rom_banks() {
    let rom = image_in(&[0xF0, 0x02, 0x22, 0x00, 0x10, 0xC1], MappingMode::HiRom);
    let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();
    let listing = dis
        .disassemble_range(0, 6, DisassemblyMode::FullRange)
        .unwrap();

    assert_eq!(listing[&addr(0xC0, 0x0000)].target(), Some(addr(0xC0, 0x0004)));
    assert_eq!(listing[&addr(0xC0, 0x0002)].target(), Some(addr(0xC1, 0x1000)));
}

#[test]
fn range_preconditions() {
    let rom = image(&[]);
    let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();

    assert_eq!(
        dis.disassemble_range(ROM_SIZE, 1, DisassemblyMode::FullRange),
        Err(Error::RangeOutsideImage {
            start: ROM_SIZE,
            image_len: ROM_SIZE
        })
    );

    let tail = dis
        .disassemble_range(ROM_SIZE - 4, 100, DisassemblyMode::FullRange)
        .unwrap();
    assert_eq!(tail.len(), 2);

    assert!(dis
        .disassemble_range(0, 0, DisassemblyMode::FullRange)
        .unwrap()
        .is_empty());

    assert_eq!(
        dis.disassemble_from(addr(0x7E, 0x0000), 4, DisassemblyMode::FullRange),
        Err(Error::Unmapped(addr(0x7E, 0x0000)))
    );
}

#[test]
fn parallel_matches_sequential() {
    let code: Vec<u8> = (0..0x300u32).map(|i| (i * 7 + 3) as u8).collect();
    let rom = image(&code);
    let ranges = [(0x200, 0x100), (0, 0x100), (0x100, 0x80)];

    let parallel =
        disassemble_parallel(&rom, Decoder::default(), &ranges, DisassemblyMode::FullRange)
            .unwrap();

    let mut sequential = Listing::default();
    for (start, length) in ranges.iter() {
        sequential.merge(
            Listing::disassemble(
                &rom,
                Decoder::default(),
                *start,
                *length,
                DisassemblyMode::FullRange,
            )
            .unwrap(),
        );
    }

    assert_eq!(parallel.instructions, sequential.instructions);
    assert_eq!(parallel.tables, sequential.tables);
    assert_eq!(parallel.xrefs.len(), sequential.xrefs.len());
    for xref in sequential.xrefs.iter() {
        assert!(parallel.xrefs.query(xref.target()).contains(xref));
    }
}

#[test]
fn parallel_rejects_overlap() {
    let rom = image(&[]);
    let result = disassemble_parallel(
        &rom,
        Decoder::default(),
        &[(0x100, 0x10), (0, 0x101)],
        DisassemblyMode::FullRange,
    );

    assert_eq!(
        result.map(|l| l.instructions.len()),
        Err(Error::OverlappingRanges {
            first: (0, 0x101),
            second: (0x100, 0x10)
        })
    );
}

proptest! {
    #[test]
    fn passes_cover_range_exactly(code in prop::collection::vec(any::<u8>(), 1..512), cut in 0usize..512) {
        let length = cut.min(code.len());
        let rom = image(&code);
        let mut dis = Disassembler::new(&rom, Decoder::default()).unwrap();
        let listing = dis.disassemble_range(0, length, DisassemblyMode::FullRange).unwrap();

        let mut next = 0;
        for (address, instr) in listing.iter() {
            prop_assert_eq!(rom.to_rom_offset(*address).rom_offset(), next);
            prop_assert!(instr.size_bytes() >= 1);
            next += instr.size_bytes() as usize;
        }

        prop_assert_eq!(next, length);
    }
}

#[test]
fn interrupt_handlers() {
    let rom = image(&[0x48, 0x68, 0x40]);
    let func = analyze_function(&rom, Decoder::default(), addr(0, 0x8000)).unwrap();

    assert_eq!(func.kind(), FunctionKind::Interrupt);
    assert_eq!(func.as_instructions().len(), 3);
    assert_eq!(func.end(), addr(0, 0x8002));
}

#[test]
fn data_handlers() {
    let rom = image(&[0xA9, 0x34, 0x12, 0x8D, 0x00, 0x21, 0x60]);
    let func = analyze_function(&rom, Decoder::default(), addr(0, 0x8000)).unwrap();

    assert_eq!(func.kind(), FunctionKind::DataHandler);
    assert!(func.data_references().contains(&addr(0, 0x2100)));
    assert!(func.calls_to().is_empty());
}

#[test]
fn calculations() {
    let rom = image(&[0x69, 0x01, 0x00, 0x0A, 0x18, 0x60]);
    let func = analyze_function(&rom, Decoder::default(), addr(0, 0x8000)).unwrap();

    assert_eq!(func.kind(), FunctionKind::Calculation);
}

#[test]
fn main_loops() {
    let mut code = vec![0xEA; 51];
    code.extend_from_slice(&[0x4C, 0x00, 0x80, 0xEA]);
    let rom = image(&code);
    let func = analyze_function(&rom, Decoder::default(), addr(0, 0x8000)).unwrap();

    assert_eq!(func.kind(), FunctionKind::MainLoop);
    assert_eq!(func.as_instructions().len(), 52);
}

#[test]
fn subroutines_and_calls() {
    let rom = image(&[0x20, 0x00, 0x90, 0xD0, 0x01, 0xEA, 0x60]);
    let func = analyze_function(&rom, Decoder::default(), addr(0, 0x8000)).unwrap();

    assert_eq!(func.kind(), FunctionKind::Subroutine);
    assert_eq!(func.as_instructions().len(), 4);
    assert!(func.calls_to().contains(&addr(0, 0x9000)));
    assert!(func.data_references().is_empty());
}

#[test]
fn tracing_follows_bra() {
    let rom = image(&[0x80, 0x02, 0x42, 0x42, 0x60]);
    let func = analyze_function(&rom, Decoder::default(), addr(0, 0x8000)).unwrap();
    let mnemonics: Vec<Mnemonic> = func.as_instructions().iter().map(|i| i.mnemonic()).collect();

    assert_eq!(mnemonics, vec![Mnemonic::Bra, Mnemonic::Rts]);

    let spin = image(&[0x80, 0xFE]);
    let func = analyze_function(&spin, Decoder::default(), addr(0, 0x8000)).unwrap();
    assert_eq!(func.as_instructions().len(), 1);
}

#[test]
fn unusable_entry_points() {
    let rom = image(&[0x42]);

    assert!(analyze_function(&rom, Decoder::default(), addr(0, 0x8000)).is_none());
    assert!(analyze_function(&rom, Decoder::default(), addr(0x7E, 0x0000)).is_none());

    let found = analyze_functions(
        &rom,
        Decoder::default(),
        &[addr(0, 0x8000), addr(0, 0x8001), addr(0x7E, 0x0000)],
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].entry(), addr(0, 0x8001));
}
