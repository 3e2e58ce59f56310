//! Processor architectures we can decode.
//!
//! Only the WDC 65C816 is implemented. Each architecture lives in a child
//! module that exposes an opcode table, a decoder producing plain-data
//! instructions, and target resolution for those instructions.

pub mod w65c816;
