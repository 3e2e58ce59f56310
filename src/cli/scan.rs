//! CLI command: scan

use crate::analysis::{disassemble_parallel, Listing};
use crate::cli::common::{
    decoder, invalid_input, load_image, open_database, parse_count, range_request,
    save_database,
};
use crate::project::{Program, Project};
use clap::ArgMatches;
use std::io;
use tracing::info;

/// Scan a range of the program for code and add the cross-references it
/// makes to the database.
pub fn scan(project: &Project, prog: &Program, argv: &ArgMatches) -> io::Result<()> {
    let image = load_image(project, prog)?;
    let request = range_request(&image, argv)?;
    let decoder = decoder(prog);
    let mut db = open_database(project, prog, &image)?;

    info!(
        "Scanning {} bytes from {} ({:?})",
        request.length, request.start, request.mode
    );

    let listing = match argv.value_of("chunk") {
        Some(chunk) => {
            let chunk = parse_count(chunk)?;
            if chunk == 0 {
                return Err(invalid_input("Chunk size must be nonzero"));
            }

            let end = request.rom_offset.saturating_add(request.length);
            let ranges: Vec<(usize, usize)> = (request.rom_offset..end)
                .step_by(chunk)
                .map(|start| (start, chunk.min(end - start)))
                .collect();

            disassemble_parallel(&image, decoder, &ranges, request.mode)?
        }
        None => Listing::disassemble(
            &image,
            decoder,
            request.rom_offset,
            request.length,
            request.mode,
        )?,
    };

    let found_instructions = listing.instructions.len();
    let found_xrefs = listing.xrefs.len();
    let found_tables = listing.tables.len();

    db.merge_pass(listing.xrefs, listing.tables);

    info!("Scan complete, writing database");
    save_database(project, prog, &db)?;

    println!(
        "Decoded {} instructions with {} references and {} jump tables; database holds {} references",
        found_instructions,
        found_xrefs,
        found_tables,
        db.xrefs().len()
    );

    Ok(())
}
