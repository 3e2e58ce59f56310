//! The 65C816's view of memory: 24-bit addresses split into bank and offset.
//!
//! Nothing in here knows how a cartridge is wired to the bus; see the
//! `platform` module for that.

mod address;

pub use address::{parse, ParseError, SnesAddress};

#[cfg(test)]
mod tests;
