//! Tools for analysis of disassembled program code

mod coverage;
mod error;
mod function;
mod parallel;
mod passes;

pub use coverage::CoverageMap;
pub use error::{Error, Result};
pub use function::{
    analyze_function, analyze_functions, Function, FunctionKind, MAX_FUNCTION_INSTRUCTIONS,
};
pub use parallel::{disassemble_parallel, Listing};
pub use passes::{Disassembler, DisassemblyMode};

#[cfg(test)]
mod tests;
