//! Disassembly of independent ROM ranges on the rayon pool

use crate::analysis::{Disassembler, DisassemblyMode, Error, Result};
use crate::arch::w65c816::{Decoder, Instruction};
use crate::database::XrefIndex;
use crate::memory::SnesAddress;
use crate::platform::RomImage;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Everything one or more disassembly passes produced.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Listing {
    pub instructions: BTreeMap<SnesAddress, Instruction>,
    pub xrefs: XrefIndex,
    pub tables: BTreeSet<SnesAddress>,
}

impl Listing {
    /// Run a single pass and collect its results.
    pub fn disassemble(
        image: &RomImage,
        decoder: Decoder,
        start: usize,
        length: usize,
        mode: DisassemblyMode,
    ) -> Result<Self> {
        let mut dis = Disassembler::new(image, decoder)?;
        let instructions = dis.disassemble_range(start, length, mode)?;
        let (xrefs, tables) = dis.into_parts();

        Ok(Listing {
            instructions,
            xrefs,
            tables,
        })
    }

    /// Take the address-keyed union of another listing.
    pub fn merge(&mut self, other: Listing) {
        self.instructions.extend(other.instructions);
        self.xrefs.merge(other.xrefs);
        self.tables.extend(other.tables);
    }
}

/// Disassemble several disjoint `(start, length)` ranges in parallel.
///
/// Each range gets a private driver; the results are merged afterwards.
/// Ranges that share any byte are rejected before any work starts.
pub fn disassemble_parallel(
    image: &RomImage,
    decoder: Decoder,
    ranges: &[(usize, usize)],
    mode: DisassemblyMode,
) -> Result<Listing> {
    let mut sorted: Vec<(usize, usize)> = ranges
        .iter()
        .copied()
        .filter(|(_, length)| *length > 0)
        .collect();
    sorted.sort_unstable();

    for pair in sorted.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        if first.0.saturating_add(first.1) > second.0 {
            return Err(Error::OverlappingRanges { first, second });
        }
    }

    let shards = sorted
        .par_iter()
        .map(|(start, length)| Listing::disassemble(image, decoder, *start, *length, mode))
        .collect::<Result<Vec<_>>>()?;

    debug!("Merging {} disassembly shards", shards.len());

    let mut listing = Listing::default();
    for shard in shards {
        listing.merge(shard);
    }

    Ok(listing)
}
