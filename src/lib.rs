//! Static analysis for Super Famicom ROM images: address translation,
//! 65C816 disassembly, cross-references and symbol generation.

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_plain;

#[macro_use]
extern crate clap;

pub mod analysis;
pub mod arch;
pub mod asm;
pub mod cli;
pub mod database;
pub mod logging;
pub mod memory;
pub mod platform;
pub mod project;
