//! CLI command: info

use crate::cli::common::load_image;
use crate::platform::{read_vectors, InternalHeader};
use crate::project::{Program, Project};
use clap::ArgMatches;
use std::io;
use tracing::warn;

/// Print what the cartridge says about itself.
pub fn info(project: &Project, prog: &Program, _argv: &ArgMatches) -> io::Result<()> {
    let image = load_image(project, prog)?;

    println!("Mapping: {}", image.mapping_mode().friendly_name());
    println!("ROM size: {} bytes (${:X})", image.len(), image.len());
    if image.header_size() > 0 {
        println!("Copier header: {} bytes", image.header_size());
    }

    match InternalHeader::read(&image) {
        Some(header) => {
            println!("Title: {}", header.as_title());
            println!("Map mode: ${:02X}", header.map_mode());
            println!("Cartridge type: ${:02X}", header.cart_type());
            println!("ROM size code: ${:02X}", header.rom_size());
            println!(
                "Checksum: ${:04X} (complement ${:04X}, {})",
                header.checksum(),
                header.complement(),
                if header.is_checksum_consistent() {
                    "consistent"
                } else {
                    "inconsistent"
                }
            );
        }
        None => warn!("Image is too short to hold an internal header"),
    }

    println!("Vectors:");
    for vector in read_vectors(&image) {
        match vector.as_code_address() {
            Some(code) => println!("  {:<24} {} -> {}", vector.describe(), vector.as_target(), code),
            None => println!("  {:<24} {} (not ROM)", vector.describe(), vector.as_target()),
        }
    }

    Ok(())
}
