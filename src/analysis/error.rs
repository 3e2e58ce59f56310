//! Error type for analysis

use crate::memory::SnesAddress;
use std::{io, result};
use thiserror::Error;

/// Error type for analysis.
///
/// Bad or non-code bytes never produce an error; they are turned into data
/// placeholders. Only requests that cannot be satisfied at all fail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// There is no ROM data to analyze.
    #[error("ROM image contains no data")]
    EmptyImage,

    /// The requested range starts at or past the end of the ROM.
    #[error("range starting at ROM offset {start:#X} lies outside the {image_len:#X}-byte image")]
    RangeOutsideImage { start: usize, image_len: usize },

    /// A ROM offset has no CPU address under the active mapping.
    #[error("ROM offset {0:#X} is not visible to the CPU")]
    Unaddressable(usize),

    /// A CPU address does not map onto the ROM image.
    #[error("{0} is not mapped to ROM")]
    Unmapped(SnesAddress),

    /// Two ranges handed to a parallel pass share bytes.
    #[error("ranges {first:X?} and {second:X?} overlap")]
    OverlappingRanges {
        first: (usize, usize),
        second: (usize, usize),
    },
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidInput, format!("{}", err))
    }
}

pub type Result<T> = result::Result<T, Error>;
