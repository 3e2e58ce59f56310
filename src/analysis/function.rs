//! Function tracing and classification

use crate::arch::w65c816::{AddressingMode, Decoder, Instruction, Mnemonic};
use crate::memory::SnesAddress;
use crate::platform::RomImage;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt::{Display, Formatter, Result};
use tracing::trace;

/// Upper bound on instructions followed from one entry point.
pub const MAX_FUNCTION_INSTRUCTIONS: usize = 0x1000;

lazy_static! {
    static ref DATA_MNEMONICS: HashSet<Mnemonic> = {
        use Mnemonic::*;
        [Lda, Sta, Ldx, Stx, Ldy, Sty].iter().copied().collect()
    };
    static ref MATH_MNEMONICS: HashSet<Mnemonic> = {
        use Mnemonic::*;
        [Adc, Sbc, And, Ora, Eor, Asl, Lsr, Rol, Ror]
            .iter()
            .copied()
            .collect()
    };
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    Interrupt,
    MainLoop,
    DataHandler,
    Calculation,
    Subroutine,
}

impl FunctionKind {
    /// Classify a function from the instructions it executes.
    pub fn classify(instructions: &[Instruction]) -> Self {
        let count = instructions.len();

        if instructions.iter().any(|i| i.mnemonic() == Mnemonic::Rti) {
            return FunctionKind::Interrupt;
        }

        if count > 50
            && instructions[count - 5..]
                .iter()
                .any(|i| matches!(i.mnemonic(), Mnemonic::Bra | Mnemonic::Jmp))
        {
            return FunctionKind::MainLoop;
        }

        let data = instructions
            .iter()
            .filter(|i| DATA_MNEMONICS.contains(&i.mnemonic()))
            .count();
        if data * 10 > count * 6 {
            return FunctionKind::DataHandler;
        }

        let math = instructions
            .iter()
            .filter(|i| MATH_MNEMONICS.contains(&i.mnemonic()))
            .count();
        if math * 10 > count * 4 {
            return FunctionKind::Calculation;
        }

        FunctionKind::Subroutine
    }
}

impl Display for FunctionKind {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            FunctionKind::Interrupt => write!(f, "interrupt"),
            FunctionKind::MainLoop => write!(f, "main loop"),
            FunctionKind::DataHandler => write!(f, "data handler"),
            FunctionKind::Calculation => write!(f, "calculation"),
            FunctionKind::Subroutine => write!(f, "subroutine"),
        }
    }
}

/// The code reachable from one entry point without taking a call or a
/// conditional branch.
#[derive(Clone, Debug, Serialize)]
pub struct Function {
    entry: SnesAddress,
    kind: FunctionKind,
    calls_to: BTreeSet<SnesAddress>,
    data_references: BTreeSet<SnesAddress>,

    #[serde(skip)]
    instructions: Vec<Instruction>,
}

impl Function {
    pub fn entry(&self) -> SnesAddress {
        self.entry
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn calls_to(&self) -> &BTreeSet<SnesAddress> {
        &self.calls_to
    }

    pub fn data_references(&self) -> &BTreeSet<SnesAddress> {
        &self.data_references
    }

    /// Instructions in the order they were traced.
    pub fn as_instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Address of the last instruction traced.
    pub fn end(&self) -> SnesAddress {
        self.instructions
            .last()
            .map_or(self.entry, Instruction::address)
    }
}

fn ends_function(instr: &Instruction) -> bool {
    instr.is_return()
        || (instr.is_jump()
            && matches!(
                instr.addressing_mode(),
                AddressingMode::Absolute | AddressingMode::AbsoluteLong
            ))
}

/// Trace a function from its entry point.
///
/// Tracing stops at a return, an unconditional absolute jump, a byte that
/// does not decode, or after `MAX_FUNCTION_INSTRUCTIONS`. `BRA` is followed to
/// its target. Returns `None` if nothing at `entry` decodes.
pub fn analyze_function(
    image: &RomImage,
    decoder: Decoder,
    entry: SnesAddress,
) -> Option<Function> {
    let mut instructions = Vec::new();
    let mut calls_to = BTreeSet::new();
    let mut data_references = BTreeSet::new();
    let mut visited = HashSet::new();
    let mut address = entry;

    while instructions.len() < MAX_FUNCTION_INSTRUCTIONS && visited.insert(address) {
        let mapping = image.to_rom_offset(address);
        if !mapping.is_valid() {
            break;
        }

        let window_end = mapping.rom_offset() + mapping.available_size();
        let instr = match decoder.decode(
            &image.bytes()[..window_end],
            mapping.rom_offset(),
            address,
        ) {
            Ok(instr) => instr,
            Err(e) => {
                trace!("Function at {} ends on undecodable byte: {}", entry, e);
                break;
            }
        };

        if let Some(target) = instr.target() {
            if instr.is_call() {
                calls_to.insert(target);
            } else if !instr.is_branch() && !instr.is_jump() {
                data_references.insert(target);
            }
        }

        let next = match (instr.mnemonic(), instr.target()) {
            (Mnemonic::Bra, Some(target)) => target,
            _ => instr.next_address(),
        };
        let is_final = ends_function(&instr);

        instructions.push(instr);
        if is_final {
            break;
        }

        address = next;
    }

    if instructions.is_empty() {
        return None;
    }

    Some(Function {
        entry,
        kind: FunctionKind::classify(&instructions),
        calls_to,
        data_references,
        instructions,
    })
}

/// Trace many functions in parallel.
///
/// The result is ordered like `entries`, minus entries that did not decode.
pub fn analyze_functions(
    image: &RomImage,
    decoder: Decoder,
    entries: &[SnesAddress],
) -> Vec<Function> {
    entries
        .par_iter()
        .filter_map(|entry| analyze_function(image, decoder, *entry))
        .collect()
}
