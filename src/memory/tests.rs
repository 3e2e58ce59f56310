use crate::memory::{parse, ParseError, SnesAddress};
use std::cmp::Ordering;

#[test]
fn address_notations() {
    assert_eq!(parse("$01:8000"), Ok(SnesAddress::new(0x01, 0x8000)));
    assert_eq!(parse("$c0:ffff"), Ok(SnesAddress::new(0xC0, 0xFFFF)));
    assert_eq!(parse("01:8000"), Ok(SnesAddress::new(0x01, 0x8000)));
    assert_eq!(parse("$7E:$0100"), Ok(SnesAddress::new(0x7E, 0x0100)));
    assert_eq!(parse("018000"), Ok(SnesAddress::new(0x01, 0x8000)));
    assert_eq!(parse("C08000"), Ok(SnesAddress::new(0xC0, 0x8000)));
    assert_eq!(parse("0x808000"), Ok(SnesAddress::new(0x80, 0x8000)));
    assert_eq!(parse("8000"), Ok(SnesAddress::new(0x00, 0x8000)));
    assert_eq!(parse("$fffc"), Ok(SnesAddress::new(0x00, 0xFFFC)));
    assert_eq!(parse("  12  "), Ok(SnesAddress::new(0x00, 0x0012)));
}

#[test]
fn address_malformed() {
    assert_eq!(parse(""), Err(ParseError::Empty));
    assert_eq!(parse("   "), Err(ParseError::Empty));
    assert!(matches!(parse("$GG:8000"), Err(ParseError::Malformed(_))));
    assert!(matches!(parse("$100:8000"), Err(ParseError::Malformed(_))));
    assert!(matches!(parse("$00:18000"), Err(ParseError::Malformed(_))));
    assert!(matches!(parse("$00:"), Err(ParseError::Malformed(_))));
    assert!(matches!(parse("18000"), Err(ParseError::Malformed(_))));
    assert!(matches!(parse("1234567"), Err(ParseError::Malformed(_))));
    assert!(matches!(parse("reset"), Err(ParseError::Malformed(_))));
}

#[test]
fn address_formatting() {
    let addr = SnesAddress::new(0x0C, 0x00AB);

    assert_eq!(format!("{}", addr), "$0C:00AB");
    assert_eq!(format!("{:X}", addr), "0C00AB");
    assert_eq!(parse(&format!("{}", addr)), Ok(addr));
    assert_eq!(parse(&format!("{:X}", addr)), Ok(addr));
}

#[test]
fn address_packing() {
    let addr = SnesAddress::from_u24(0x01_1234);

    assert_eq!(addr.bank(), 0x01);
    assert_eq!(addr.offset(), 0x1234);
    assert_eq!(addr.as_u24(), 0x01_1234);
    assert_eq!(SnesAddress::from_u24(0xFF_01_1234), addr);
}

#[test]
fn address_ordering() {
    let low = SnesAddress::new(0x00, 0xFFFF);
    let high = SnesAddress::new(0x01, 0x0000);

    assert_eq!(low.cmp(&high), Ordering::Less);
    assert_eq!(high.cmp(&low), Ordering::Greater);
}

#[test]
fn address_offset_wraps_in_bank() {
    let addr = SnesAddress::new(0x02, 0xFFFE);

    assert_eq!(addr.wrapping_add_offset(4), SnesAddress::new(0x02, 0x0002));
    assert_eq!(
        SnesAddress::new(0x02, 0x0001).wrapping_add_offset(-2),
        SnesAddress::new(0x02, 0xFFFF)
    );
}

#[test]
fn address_serializes_as_text() {
    let addr = SnesAddress::new(0x80, 0x8123);
    let json = serde_json::to_string(&addr).unwrap();

    assert_eq!(json, "\"$80:8123\"");
    assert_eq!(serde_json::from_str::<SnesAddress>(&json).unwrap(), addr);
}
