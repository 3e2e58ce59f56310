//! Error type for database save/load

use crate::platform::MappingMode;
use std::{io, result};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Underlying cause of error is I/O related
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Underlying cause of error is JSON related
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Read a program of the given name that is not listed in the project
    #[error("Program {0} is missing from project file")]
    UnknownProgram(String),

    /// The database was gathered under a different mapping than the one in
    /// use now, so none of its addresses can be trusted.
    #[error("Database was built for {found} mapping, but the image is {expected}")]
    MappingMismatch {
        expected: MappingMode,
        found: MappingMode,
    },
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Io(e) => e,
            Error::Json(e) => io::Error::new(io::ErrorKind::InvalidData, e),
            _ => io::Error::new(io::ErrorKind::Other, format!("{}", err)),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
