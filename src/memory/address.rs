//! 24-bit banked addresses as emitted by the 65C816.

use serde::{Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter, UpperHex};
use std::str::FromStr;
use thiserror::Error;

/// Error produced when address text cannot be understood.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("address text is empty")]
    Empty,

    #[error("`{0}` is not a valid address (expected $BB:HHLL, BBHHLL or HHLL)")]
    Malformed(String),
}

/// A logical CPU address, split into its program/data bank and the 16-bit
/// offset within that bank.
///
/// Addresses order by bank first, then offset, which is also their order as
/// 24-bit integers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnesAddress {
    bank: u8,
    offset: u16,
}

impl SnesAddress {
    pub const fn new(bank: u8, offset: u16) -> Self {
        SnesAddress { bank, offset }
    }

    /// Construct an address from a packed 24-bit integer.
    ///
    /// Bits above the 24th are discarded.
    pub const fn from_u24(value: u32) -> Self {
        SnesAddress {
            bank: ((value >> 16) & 0xFF) as u8,
            offset: (value & 0xFFFF) as u16,
        }
    }

    pub fn bank(self) -> u8 {
        self.bank
    }

    pub fn offset(self) -> u16 {
        self.offset
    }

    /// The packed 24-bit value of this address.
    pub fn as_u24(self) -> u32 {
        (self.bank as u32) << 16 | self.offset as u32
    }

    /// The same offset in another bank.
    pub fn with_bank(self, bank: u8) -> Self {
        SnesAddress::new(bank, self.offset)
    }

    /// Move the offset by a signed amount, wrapping inside the current bank.
    ///
    /// This is how the program counter behaves: it never carries into the
    /// bank byte.
    pub fn wrapping_add_offset(self, delta: i32) -> Self {
        let offset = (self.offset as i32).wrapping_add(delta) & 0xFFFF;

        SnesAddress::new(self.bank, offset as u16)
    }
}

impl From<(u8, u16)> for SnesAddress {
    fn from((bank, offset): (u8, u16)) -> Self {
        SnesAddress::new(bank, offset)
    }
}

impl Display for SnesAddress {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "${:02X}:{:04X}", self.bank, self.offset)
    }
}

impl UpperHex for SnesAddress {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:02X}{:04X}", self.bank, self.offset)
    }
}

fn parse_hex(digits: &str, max_len: usize, whole: &str) -> Result<u32, ParseError> {
    if digits.is_empty()
        || digits.len() > max_len
        || !digits.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(ParseError::Malformed(whole.to_string()));
    }

    u32::from_str_radix(digits, 16).map_err(|_| ParseError::Malformed(whole.to_string()))
}

/// Parse an address in any of the accepted notations.
///
/// `$BB:HHLL` names the bank explicitly, six bare digits are read as
/// `BBHHLL`, and four or fewer digits are an offset in bank zero. A leading
/// `$` or `0x` is optional and case does not matter.
pub fn parse(text: &str) -> Result<SnesAddress, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let body = trimmed
        .strip_prefix('$')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if let Some((bank, offset)) = body.split_once(':') {
        let offset = offset.strip_prefix('$').unwrap_or(offset);
        let bank = parse_hex(bank, 2, trimmed)?;
        let offset = parse_hex(offset, 4, trimmed)?;

        return Ok(SnesAddress::new(bank as u8, offset as u16));
    }

    match body.len() {
        6 => Ok(SnesAddress::from_u24(parse_hex(body, 6, trimmed)?)),
        1..=4 => Ok(SnesAddress::new(0, parse_hex(body, 4, trimmed)? as u16)),
        _ => Err(ParseError::Malformed(trimmed.to_string())),
    }
}

impl FromStr for SnesAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl Serialize for SnesAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

derive_deserialize_from_str!(SnesAddress, "valid SNES address");
