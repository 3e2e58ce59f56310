//! Cross-reference index

use crate::arch::w65c816::Instruction;
use crate::memory::SnesAddress;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::fmt::{Display, Formatter, Result};
use std::iter::FromIterator;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReferenceKind {
    Call,
    Jump,
    Branch,
    DataPointer,
}

impl ReferenceKind {
    /// Classify the reference made by an instruction's resolved target.
    pub fn from_instruction(instr: &Instruction) -> Self {
        if instr.is_call() {
            ReferenceKind::Call
        } else if instr.is_jump() {
            ReferenceKind::Jump
        } else if instr.is_branch() {
            ReferenceKind::Branch
        } else {
            ReferenceKind::DataPointer
        }
    }
}

impl Display for ReferenceKind {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ReferenceKind::Call => write!(f, "call"),
            ReferenceKind::Jump => write!(f, "jump"),
            ReferenceKind::Branch => write!(f, "branch"),
            ReferenceKind::DataPointer => write!(f, "data"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrossReference {
    source: SnesAddress,
    target: SnesAddress,
    kind: ReferenceKind,
}

impl CrossReference {
    pub fn new(source: SnesAddress, target: SnesAddress, kind: ReferenceKind) -> Self {
        CrossReference {
            source,
            target,
            kind,
        }
    }

    /// The reference made by an instruction, if its target was resolved.
    pub fn from_instruction(instr: &Instruction) -> Option<Self> {
        Some(CrossReference::new(
            instr.address(),
            instr.target()?,
            ReferenceKind::from_instruction(instr),
        ))
    }

    pub fn source(&self) -> SnesAddress {
        self.source
    }

    pub fn target(&self) -> SnesAddress {
        self.target
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }
}

/// An append-only collection of cross-references, indexed by both ends.
///
/// Serialized as a flat list; the indexes are rebuilt when it is read back.
#[derive(Clone, Debug, Default)]
pub struct XrefIndex {
    xrefs: Vec<CrossReference>,
    source_index: BTreeMap<SnesAddress, HashSet<usize>>,
    target_index: BTreeMap<SnesAddress, HashSet<usize>>,
}

impl XrefIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reference.
    ///
    /// Returns false if an identical reference was already present, in which
    /// case nothing is stored.
    pub fn add(&mut self, xref: CrossReference) -> bool {
        let id = self.xrefs.len();
        let source_bucket = self
            .source_index
            .entry(xref.source)
            .or_insert_with(HashSet::new);

        for other_id in source_bucket.iter() {
            if self.xrefs.get(*other_id) == Some(&xref) {
                return false;
            }
        }

        source_bucket.insert(id);
        self.target_index
            .entry(xref.target)
            .or_insert_with(HashSet::new)
            .insert(id);

        self.xrefs.push(xref);

        true
    }

    /// All references to `target`, ordered by ascending source address.
    pub fn query(&self, target: SnesAddress) -> Vec<CrossReference> {
        let mut found: Vec<CrossReference> = self
            .target_index
            .get(&target)
            .into_iter()
            .flatten()
            .filter_map(|id| self.xrefs.get(*id))
            .copied()
            .collect();

        found.sort_by_key(|xref| (xref.source, xref.kind));
        found
    }

    /// All references whose source lies in `[start, end)`, ordered by source.
    pub fn find_xrefs_from(&self, start: SnesAddress, end: SnesAddress) -> Vec<CrossReference> {
        if end <= start {
            return Vec::new();
        }

        let mut found: Vec<CrossReference> = self
            .source_index
            .range(start..end)
            .flat_map(|(_, ids)| ids.iter())
            .filter_map(|id| self.xrefs.get(*id))
            .copied()
            .collect();

        found.sort_by_key(|xref| (xref.source, xref.target, xref.kind));
        found
    }

    /// Every distinct target of a given kind of reference.
    pub fn targets_of_kind<'a>(
        &'a self,
        kind: ReferenceKind,
    ) -> impl Iterator<Item = SnesAddress> + 'a {
        self.target_index
            .iter()
            .filter(move |(_, ids)| {
                ids.iter()
                    .any(|id| self.xrefs.get(*id).map(|x| x.kind) == Some(kind))
            })
            .map(|(target, _)| *target)
    }

    /// Take the union of another index into this one.
    pub fn merge(&mut self, other: XrefIndex) {
        for xref in other.xrefs {
            self.add(xref);
        }
    }

    /// References in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &CrossReference> {
        self.xrefs.iter()
    }

    pub fn len(&self) -> usize {
        self.xrefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xrefs.is_empty()
    }
}

impl FromIterator<CrossReference> for XrefIndex {
    fn from_iter<I: IntoIterator<Item = CrossReference>>(iter: I) -> Self {
        let mut index = XrefIndex::new();

        for xref in iter {
            index.add(xref);
        }

        index
    }
}

impl Serialize for XrefIndex {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.xrefs.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for XrefIndex {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Vec::<CrossReference>::deserialize(deserializer)?
            .into_iter()
            .collect())
    }
}
