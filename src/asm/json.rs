//! JSON reports

use crate::arch::w65c816::Instruction;
use crate::database::{SymbolTable, XrefIndex};
use crate::platform::MappingMode;
use serde::Serialize;
use std::io;

/// Serialize anything as pretty-printed JSON.
pub fn write_json<T>(stream: &mut dyn io::Write, value: &T) -> io::Result<()>
where
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut *stream, value)?;
    writeln!(stream)
}

/// The results of a disassembly in one serializable bundle.
#[derive(Serialize)]
pub struct Report<'a> {
    mapping: MappingMode,
    instructions: Vec<&'a Instruction>,
    xrefs: &'a XrefIndex,
    symbols: Option<&'a SymbolTable>,
}

impl<'a> Report<'a> {
    pub fn new<I>(
        mapping: MappingMode,
        instructions: I,
        xrefs: &'a XrefIndex,
        symbols: Option<&'a SymbolTable>,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Instruction>,
    {
        Report {
            mapping,
            instructions: instructions.into_iter().collect(),
            xrefs,
            symbols,
        }
    }

    pub fn write(&self, stream: &mut dyn io::Write) -> io::Result<()> {
        write_json(stream, self)
    }
}
