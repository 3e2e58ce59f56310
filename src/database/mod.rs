//! Analysis database - Accumulates program facts as disassembly passes run on
//! the program, and derives symbols from them.

mod db;
mod error;
mod symbols;
mod xref;

pub use db::Database;
pub use error::{Error, Result};
pub use symbols::{symbol_name, Symbol, SymbolGenerator, SymbolKind, SymbolTable};
pub use xref::{CrossReference, ReferenceKind, XrefIndex};
