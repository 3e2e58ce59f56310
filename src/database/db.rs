//! Implementation of core database type

use crate::database::{CrossReference, Error, Result, SymbolTable, XrefIndex};
use crate::memory::SnesAddress;
use crate::platform::MappingMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::{fs, io};
use tracing::{debug, info};

/// A repository of information obtained from the program under analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Database {
    /// The mapping every address in this database was computed under.
    mapping: MappingMode,

    /// A list of all cross-references in the program.
    xrefs: XrefIndex,

    /// Bases of indexed indirect jump tables.
    #[serde(default)]
    tables: BTreeSet<SnesAddress>,

    #[serde(default)]
    symbols: SymbolTable,
}

impl Database {
    pub fn new(mapping: MappingMode) -> Self {
        Database {
            mapping,
            xrefs: XrefIndex::new(),
            tables: BTreeSet::new(),
            symbols: SymbolTable::new(),
        }
    }

    pub fn read<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let db_file = io::BufReader::new(fs::File::open(path)?);
        let db = serde_json::from_reader(db_file)?;

        Ok(db)
    }

    /// Read a database, or start a fresh one if none has been written yet.
    ///
    /// A database gathered under a different mapping is rejected.
    pub fn open_or_new<P>(path: P, mapping: MappingMode) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let db = match Self::read(path.as_ref()) {
            Ok(db) => db,
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No database at {}, starting fresh", path.as_ref().display());
                return Ok(Self::new(mapping));
            }
            Err(e) => return Err(e),
        };

        if db.mapping != mapping {
            return Err(Error::MappingMismatch {
                expected: mapping,
                found: db.mapping,
            });
        }

        Ok(db)
    }

    pub fn write<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let db_file = io::BufWriter::new(fs::File::create(path.as_ref())?);
        serde_json::to_writer_pretty(db_file, self)?;

        info!(
            xrefs = self.xrefs.len(),
            symbols = self.symbols.len(),
            "Wrote database to {}",
            path.as_ref().display()
        );

        Ok(())
    }

    pub fn mapping(&self) -> MappingMode {
        self.mapping
    }

    pub fn insert_crossreference(&mut self, xref: CrossReference) -> bool {
        self.xrefs.add(xref)
    }

    /// Fold the results of a disassembly pass into the database.
    pub fn merge_pass<T>(&mut self, xrefs: XrefIndex, tables: T)
    where
        T: IntoIterator<Item = SnesAddress>,
    {
        self.xrefs.merge(xrefs);
        self.tables.extend(tables);
    }

    pub fn xrefs(&self) -> &XrefIndex {
        &self.xrefs
    }

    pub fn tables(&self) -> &BTreeSet<SnesAddress> {
        &self.tables
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Replace the symbol table with a freshly generated one.
    pub fn set_symbols(&mut self, symbols: SymbolTable) {
        self.symbols = symbols;
    }
}
