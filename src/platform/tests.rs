use crate::memory::SnesAddress;
use crate::platform::{
    copier_header_size, detect_mapping, from_rom_offset, read_vectors, to_rom_offset, validate,
    AddressTranslator, Error, InternalHeader, MappingMode, RomImage,
};
use proptest::prelude::*;
use std::str::FromStr;

/// Write a plausible internal header into `rom` at `at`.
fn write_header(rom: &mut [u8], at: usize, map_mode: u8) {
    let title = b"SFCDIS TEST CART     ";
    rom[at..at + 21].copy_from_slice(title);
    rom[at + 0x15] = map_mode;
    rom[at + 0x17] = 0x09;
    rom[at + 0x1C] = 0xCB;
    rom[at + 0x1D] = 0xED;
    rom[at + 0x1E] = 0x34;
    rom[at + 0x1F] = 0x12;
}

fn lorom_image() -> Vec<u8> {
    let mut rom = vec![0; 0x10000];
    write_header(&mut rom, 0x7FC0, 0x20);
    rom
}

fn hirom_image() -> Vec<u8> {
    let mut rom = vec![0; 0x10000];
    write_header(&mut rom, 0xFFC0, 0x21);
    rom
}

#[test]
fn lorom_aliasing() {
    let low = to_rom_offset(SnesAddress::new(0x00, 0x8000), MappingMode::LoRom, 0x10000);
    let high = to_rom_offset(SnesAddress::new(0x80, 0x8000), MappingMode::LoRom, 0x10000);

    assert_eq!(low.rom_offset(), 0);
    assert_eq!(high.rom_offset(), 0);
    assert!(low.is_valid());
    assert!(high.is_valid());
    assert_eq!(low.aliases_of(), None);
    assert_eq!(high.aliases_of(), Some(0));
}

#[test]
fn hirom_aliasing() {
    let low = to_rom_offset(SnesAddress::new(0x40, 0x0000), MappingMode::HiRom, 0x10000);
    let high = to_rom_offset(SnesAddress::new(0xC0, 0x0000), MappingMode::HiRom, 0x10000);

    assert_eq!(low.rom_offset(), 0);
    assert_eq!(high.rom_offset(), 0);
    assert!(low.is_valid());
    assert!(high.is_valid());
    assert_eq!(low.aliases_of(), Some(0));
    assert_eq!(high.aliases_of(), None);
}

#[test]
fn lorom_formula() {
    let map = |bank, offset| {
        to_rom_offset(SnesAddress::new(bank, offset), MappingMode::LoRom, 0x40_0000).rom_offset()
    };

    assert_eq!(map(0x01, 0x8000), 0x8000);
    assert_eq!(map(0x01, 0xFFFF), 0xFFFF);
    assert_eq!(map(0x02, 0x9234), 0x11234);
    assert_eq!(map(0x82, 0x9234), 0x11234);
    assert_eq!(map(0x7F, 0xFFFF), 0x3F_FFFF);
}

#[test]
fn hirom_formula() {
    let map = |bank, offset| {
        to_rom_offset(SnesAddress::new(bank, offset), MappingMode::HiRom, 0x40_0000).rom_offset()
    };

    assert_eq!(map(0xC1, 0x0000), 0x01_0000);
    assert_eq!(map(0xC2, 0x0000), 0x02_0000);
    assert_eq!(map(0xFF, 0xFFFF), 0x3F_FFFF);
    assert_eq!(map(0x7F, 0xFFFF), 0x3F_FFFF);
    assert_eq!(map(0x41, 0x1234), 0x01_1234);
}

#[test]
fn unmapped_addresses() {
    assert!(!validate(SnesAddress::new(0x00, 0x7FFF), MappingMode::LoRom));
    assert!(!validate(SnesAddress::new(0x80, 0x0000), MappingMode::LoRom));
    assert!(validate(SnesAddress::new(0x00, 0x8000), MappingMode::LoRom));

    assert!(!validate(SnesAddress::new(0x00, 0x8000), MappingMode::HiRom));
    assert!(!validate(SnesAddress::new(0x3F, 0xFFFF), MappingMode::HiRom));
    assert!(!validate(SnesAddress::new(0x80, 0xFFFF), MappingMode::HiRom));
    assert!(!validate(SnesAddress::new(0xBF, 0x8000), MappingMode::HiRom));
    assert!(validate(SnesAddress::new(0x40, 0x0000), MappingMode::HiRom));

    let map = to_rom_offset(SnesAddress::new(0x00, 0x1234), MappingMode::LoRom, 0x10000);
    assert!(!map.is_valid());
    assert_eq!(map.available_size(), 0);
    assert_eq!(map.mapping_type(), MappingMode::LoRom);
}

#[test]
fn mapping_beyond_image_is_invalid() {
    let map = to_rom_offset(SnesAddress::new(0x02, 0x8000), MappingMode::LoRom, 0x10000);

    assert!(!map.is_valid());
    assert_eq!(map.rom_offset(), 0x10000);
    assert_eq!(map.available_size(), 0);
}

#[test]
fn available_size_stops_at_window_or_image() {
    let lorom = AddressTranslator::new(MappingMode::LoRom, 0x10000);

    assert_eq!(
        lorom.to_rom_offset(SnesAddress::new(0x00, 0xFFF0)).available_size(),
        0x10
    );
    assert_eq!(
        lorom.to_rom_offset(SnesAddress::new(0x01, 0x8000)).available_size(),
        0x8000
    );

    let hirom = AddressTranslator::new(MappingMode::HiRom, 0x18000);
    assert_eq!(
        hirom.to_rom_offset(SnesAddress::new(0xC1, 0x0000)).available_size(),
        0x8000
    );
}

#[test]
fn inverse_is_canonical() {
    assert_eq!(
        from_rom_offset(0x11234, MappingMode::LoRom),
        Some(SnesAddress::new(0x02, 0x9234))
    );
    assert_eq!(
        from_rom_offset(0x11234, MappingMode::HiRom),
        Some(SnesAddress::new(0xC1, 0x1234))
    );
    assert_eq!(from_rom_offset(0x40_0000, MappingMode::LoRom), None);
    assert_eq!(from_rom_offset(0x40_0000, MappingMode::HiRom), None);

    let translator = AddressTranslator::new(MappingMode::LoRom, 0x8000);
    assert_eq!(translator.from_rom_offset(0x7FFF), Some(SnesAddress::new(0, 0xFFFF)));
    assert_eq!(translator.from_rom_offset(0x8000), None);
}

fn mode_strategy() -> impl Strategy<Value = MappingMode> {
    prop_oneof![Just(MappingMode::LoRom), Just(MappingMode::HiRom)]
}

proptest! {
    #[test]
    fn round_trip(mode in mode_strategy(), bank in any::<u8>(), offset in any::<u16>()) {
        let addr = SnesAddress::new(bank, offset);
        prop_assume!(validate(addr, mode));

        let mapping = to_rom_offset(addr, mode, 0x40_0000);
        let back = from_rom_offset(mapping.rom_offset(), mode).unwrap();

        if mapping.aliases_of().is_none() {
            prop_assert_eq!(back, addr);
        } else {
            prop_assert_ne!(back, addr);
            prop_assert_eq!(to_rom_offset(back, mode, 0x40_0000).rom_offset(), mapping.rom_offset());
            prop_assert_eq!(back.offset(), addr.offset());
        }
    }

    #[test]
    fn valid_mappings_stay_inside_image(
        mode in mode_strategy(),
        bank in any::<u8>(),
        offset in any::<u16>(),
        rom_size in 1usize..0x40_0000,
    ) {
        let mapping = to_rom_offset(SnesAddress::new(bank, offset), mode, rom_size);

        if mapping.is_valid() {
            prop_assert!(mapping.rom_offset() < rom_size);
            prop_assert!(mapping.available_size() >= 1);
            prop_assert!(mapping.rom_offset() + mapping.available_size() <= rom_size);
        }
    }
}

#[test]
fn copier_header_rule() {
    assert_eq!(copier_header_size(0x8000), 0);
    assert_eq!(copier_header_size(0x8200), 512);
    assert_eq!(copier_header_size(0x8300), 0);
    assert_eq!(copier_header_size(512), 512);
}

#[test]
fn copier_header_is_stripped() {
    let mut file = vec![0xEE; 512];
    file.extend(lorom_image());

    let image = RomImage::from_bytes(file, None).unwrap();

    assert_eq!(image.header_size(), 512);
    assert_eq!(image.len(), 0x10000);
    assert_eq!(image.raw_bytes().len(), 0x10200);
    assert_eq!(image.bytes()[0], 0x00);
    assert_eq!(image.file_offset(0x7FC0), 0x81C0);
    assert_eq!(image.mapping_mode(), MappingMode::LoRom);
    assert_eq!(
        image.read_at(SnesAddress::new(0x00, 0xFFC0), 6),
        Some(&b"SFCDIS"[..])
    );
}

#[test]
fn empty_images_are_rejected() {
    assert!(matches!(RomImage::from_bytes(Vec::new(), None), Err(Error::EmptyImage)));
    assert!(matches!(
        RomImage::from_bytes(vec![0; 512], Some(MappingMode::LoRom)),
        Err(Error::EmptyImage)
    ));
}

#[test]
fn mapping_detection() {
    assert_eq!(detect_mapping(&lorom_image()), MappingMode::LoRom);
    assert_eq!(detect_mapping(&hirom_image()), MappingMode::HiRom);

    let forced = RomImage::from_bytes(hirom_image(), Some(MappingMode::LoRom)).unwrap();
    assert_eq!(forced.mapping_mode(), MappingMode::LoRom);
}

#[test]
fn internal_header_fields() {
    let image = RomImage::from_bytes(hirom_image(), None).unwrap();
    let header = InternalHeader::read(&image).unwrap();

    assert_eq!(header.as_title(), "SFCDIS TEST CART");
    assert_eq!(header.map_mode(), 0x21);
    assert_eq!(header.rom_size(), 0x09);
    assert_eq!(header.checksum(), 0x1234);
    assert_eq!(header.complement(), 0xEDCB);
    assert!(header.is_checksum_consistent());
}

#[test]
fn vector_table() {
    let mut rom = lorom_image();
    rom[0x7FFC] = 0x00;
    rom[0x7FFD] = 0x80;
    rom[0x7FEA] = 0x10;
    rom[0x7FEB] = 0x80;

    let image = RomImage::from_bytes(rom, None).unwrap();
    let vectors = read_vectors(&image);

    assert_eq!(vectors.len(), 12);

    let reset = vectors.iter().find(|v| v.as_name() == "RESET").unwrap();
    assert!(reset.is_emulation());
    assert_eq!(reset.as_location(), SnesAddress::new(0, 0xFFFC));
    assert_eq!(reset.as_target(), SnesAddress::new(0, 0x8000));
    assert_eq!(reset.as_code_address(), Some(SnesAddress::new(0, 0x8000)));

    let nmi = &vectors[3];
    assert_eq!(nmi.describe(), "NMI vector (native)");
    assert_eq!(nmi.as_code_address(), Some(SnesAddress::new(0, 0x8010)));

    let cop = &vectors[0];
    assert_eq!(cop.as_target(), SnesAddress::new(0, 0x0000));
    assert_eq!(cop.as_code_address(), None);
}

#[test]
fn hirom_vectors_run_from_rom_banks() {
    let mut rom = hirom_image();
    rom[0xFFFC] = 0x00;
    rom[0xFFFD] = 0x80;

    let image = RomImage::from_bytes(rom, None).unwrap();
    let reset = read_vectors(&image)
        .into_iter()
        .find(|v| v.as_name() == "RESET")
        .unwrap();

    assert_eq!(reset.as_target(), SnesAddress::new(0x00, 0x8000));
    assert_eq!(reset.as_code_address(), Some(SnesAddress::new(0xC0, 0x8000)));
}

#[test]
fn mapping_mode_names() {
    assert_eq!(MappingMode::from_str("LoROM"), Ok(MappingMode::LoRom));
    assert_eq!(MappingMode::from_str("hirom"), Ok(MappingMode::HiRom));
    assert_eq!(MappingMode::from_str("exhirom"), Err(()));
    assert_eq!(format!("{}", MappingMode::HiRom), "HiROM");
    assert_eq!(
        serde_json::from_str::<MappingMode>("\"lorom\"").unwrap(),
        MappingMode::LoRom
    );
}
