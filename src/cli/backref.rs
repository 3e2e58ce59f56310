//! Backreference list command for sfcdis

use crate::asm::format_instruction;
use crate::cli::common::{decoder, invalid_input, load_image, open_database, parse_address};
use crate::project::{Program, Project};
use clap::ArgMatches;
use std::io;

/// List everything the database knows to reference an address.
pub fn backref(project: &Project, prog: &Program, argv: &ArgMatches) -> io::Result<()> {
    let spec = argv
        .value_of("target")
        .ok_or_else(|| invalid_input("Did not provide an address"))?;
    let target = parse_address(spec)?;

    let image = load_image(project, prog)?;
    let db = open_database(project, prog, &image)?;
    let decoder = decoder(prog);
    let symbols = Some(db.symbols());

    let xrefs = db.xrefs().query(target);
    if xrefs.is_empty() {
        println!("No references to {}", target);
        return Ok(());
    }

    match db.symbols().name_of(target) {
        Some(name) => println!("References to {} ({}):", target, name),
        None => println!("References to {}:", target),
    }

    for xref in xrefs {
        let source = xref.source();
        let mapping = image.to_rom_offset(source);
        let text = if mapping.is_valid() {
            let window_end = mapping.rom_offset() + mapping.available_size();
            decoder
                .decode(&image.bytes()[..window_end], mapping.rom_offset(), source)
                .map(|instr| format_instruction(&instr, symbols))
                .unwrap_or_else(|e| format!("??? ({})", e))
        } else {
            "??? (not ROM)".to_string()
        };

        println!("  {}: {} ({})", source, text, xref.kind());
    }

    Ok(())
}
