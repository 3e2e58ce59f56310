//! CLI command: symbols

use crate::asm::{write_json, OutputFormat};
use crate::cli::common::{load_image, open_database, output_format, save_database};
use crate::database::SymbolGenerator;
use crate::platform::read_vectors;
use crate::project::{Program, Project};
use clap::ArgMatches;
use std::io;
use std::io::Write;
use tracing::info;

/// Regenerate the symbol table from the vectors and everything scanned so
/// far, then store it in the database.
pub fn symbols(project: &Project, prog: &Program, argv: &ArgMatches) -> io::Result<()> {
    let image = load_image(project, prog)?;
    let format = output_format(argv)?;
    let mut db = open_database(project, prog, &image)?;

    let vectors = read_vectors(&image);
    let table = SymbolGenerator::new()
        .with_tables(true)
        .with_data(argv.is_present("data"))
        .generate(&vectors, db.xrefs(), db.tables());

    info!("Generated {} symbols", table.len());
    db.set_symbols(table);
    save_database(project, prog, &db)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Asm => {
            for symbol in db.symbols().iter() {
                match symbol.as_comment() {
                    Some(comment) => writeln!(
                        out,
                        "{} = {} ; {}",
                        symbol.as_name(),
                        symbol.address(),
                        comment
                    )?,
                    None => writeln!(out, "{} = {}", symbol.as_name(), symbol.address())?,
                }
            }
        }
        OutputFormat::Json => write_json(&mut out, db.symbols())?,
    }

    Ok(())
}
