//! CLI command: dis

use crate::analysis::Listing;
use crate::asm::{write_listing, OutputFormat, Report};
use crate::cli::common::{decoder, load_image, open_database, output_format, range_request};
use crate::project::{Program, Project};
use clap::ArgMatches;
use std::io;

/// Disassemble a range and print it.
///
/// Names from the program's database are used when one exists; the database
/// is never written. A database built under another mapping is an error.
pub fn dis(project: &Project, prog: &Program, argv: &ArgMatches) -> io::Result<()> {
    let image = load_image(project, prog)?;
    let request = range_request(&image, argv)?;
    let format = output_format(argv)?;

    let db = open_database(project, prog, &image)?;
    let symbols = Some(db.symbols()).filter(|symbols| !symbols.is_empty());

    let listing = Listing::disassemble(
        &image,
        decoder(prog),
        request.rom_offset,
        request.length,
        request.mode,
    )?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Asm => write_listing(&mut out, listing.instructions.values(), symbols)?,
        OutputFormat::Json => Report::new(
            image.mapping_mode(),
            listing.instructions.values(),
            &listing.xrefs,
            symbols,
        )
        .write(&mut out)?,
    };

    Ok(())
}
