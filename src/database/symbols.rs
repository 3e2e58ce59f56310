//! Symbol table and its generator

use crate::database::{ReferenceKind, XrefIndex};
use crate::memory::SnesAddress;
use crate::platform::Vector;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{btree_map, BTreeMap};
use std::fmt::{Display, Formatter, Result};
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Label,
    Data,
    Table,
}

impl SymbolKind {
    /// The name prefix used for generated symbols of this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            SymbolKind::Label => "FUN",
            SymbolKind::Data => "DAT",
            SymbolKind::Table => "TBL",
        }
    }
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            SymbolKind::Label => write!(f, "label"),
            SymbolKind::Data => write!(f, "data"),
            SymbolKind::Table => write!(f, "table"),
        }
    }
}

/// Generate the name for a symbol.
///
/// Names depend only on the address and kind, so they are stable from one
/// run to the next.
pub fn symbol_name(address: SnesAddress, kind: SymbolKind) -> String {
    format!("{}_{:X}", kind.prefix(), address)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    address: SnesAddress,
    name: String,
    kind: SymbolKind,
    comment: Option<String>,
}

impl Symbol {
    pub fn new(address: SnesAddress, kind: SymbolKind, comment: Option<String>) -> Self {
        Symbol {
            address,
            name: symbol_name(address, kind),
            kind,
            comment,
        }
    }

    pub fn address(&self) -> SnesAddress {
        self.address
    }

    pub fn as_name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn as_comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Symbols keyed by address. Each address holds at most one symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: BTreeMap<SnesAddress, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol unless its address is already named.
    ///
    /// Returns true if the symbol was added.
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        match self.symbols.entry(symbol.address) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(slot) => {
                slot.insert(symbol);
                true
            }
        }
    }

    pub fn get(&self, address: SnesAddress) -> Option<&Symbol> {
        self.symbols.get(&address)
    }

    pub fn name_of(&self, address: SnesAddress) -> Option<&str> {
        self.get(address).map(Symbol::as_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Serialize for SymbolTable {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.symbols.values())
    }
}

impl<'de> Deserialize<'de> for SymbolTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut table = SymbolTable::new();

        for symbol in Vec::<Symbol>::deserialize(deserializer)? {
            table.insert(symbol);
        }

        Ok(table)
    }
}

/// Derives a symbol table from the vector table and gathered references.
///
/// Seeds are applied in a fixed order and the first seed to name an address
/// keeps it: vectors, call targets, jump tables, then data pointers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolGenerator {
    include_tables: bool,
    include_data: bool,
}

impl SymbolGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also name the bases of indexed indirect jump tables.
    pub fn with_tables(mut self, include_tables: bool) -> Self {
        self.include_tables = include_tables;
        self
    }

    /// Also name the targets of data pointers.
    pub fn with_data(mut self, include_data: bool) -> Self {
        self.include_data = include_data;
        self
    }

    pub fn generate<'a, T>(&self, vectors: &[Vector], xrefs: &XrefIndex, tables: T) -> SymbolTable
    where
        T: IntoIterator<Item = &'a SnesAddress>,
    {
        let mut table = SymbolTable::new();

        for vector in vectors {
            match vector.as_code_address() {
                Some(address) => {
                    table.insert(Symbol::new(
                        address,
                        SymbolKind::Label,
                        Some(vector.describe()),
                    ));
                }
                None => debug!(
                    "Skipping {} pointing outside ROM at {}",
                    vector.describe(),
                    vector.as_target()
                ),
            }
        }

        for target in xrefs.targets_of_kind(ReferenceKind::Call) {
            table.insert(Symbol::new(target, SymbolKind::Label, None));
        }

        if self.include_tables {
            for base in tables {
                table.insert(Symbol::new(*base, SymbolKind::Table, None));
            }
        }

        if self.include_data {
            for target in xrefs.targets_of_kind(ReferenceKind::DataPointer) {
                table.insert(Symbol::new(target, SymbolKind::Data, None));
            }
        }

        debug!("Generated {} symbols", table.len());

        table
    }
}
