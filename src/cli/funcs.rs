//! CLI command: funcs

use crate::analysis::analyze_functions;
use crate::asm::{write_json, OutputFormat};
use crate::cli::common::{decoder, load_image, open_database, output_format};
use crate::database::ReferenceKind;
use crate::platform::read_vectors;
use crate::project::{Program, Project};
use clap::ArgMatches;
use std::collections::BTreeSet;
use std::io;
use std::io::Write;
use tracing::debug;

/// Trace and classify every function entry known so far.
///
/// Entry points are the interrupt vectors plus every call target in the
/// program's database.
pub fn funcs(project: &Project, prog: &Program, argv: &ArgMatches) -> io::Result<()> {
    let image = load_image(project, prog)?;
    let format = output_format(argv)?;
    let db = open_database(project, prog, &image)?;

    let mut entries: BTreeSet<_> = read_vectors(&image)
        .iter()
        .filter_map(|v| v.as_code_address())
        .collect();
    entries.extend(db.xrefs().targets_of_kind(ReferenceKind::Call));
    debug!("Tracing {} function entry points", entries.len());

    let entries: Vec<_> = entries.into_iter().collect();
    let functions = analyze_functions(&image, decoder(prog), &entries);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Asm => {
            for function in functions.iter() {
                let name = db
                    .symbols()
                    .name_of(function.entry())
                    .map(str::to_string)
                    .unwrap_or_else(|| function.entry().to_string());

                writeln!(
                    out,
                    "{} {}..{} {} ({} calls, {} data references)",
                    name,
                    function.entry(),
                    function.end(),
                    function.kind(),
                    function.calls_to().len(),
                    function.data_references().len()
                )?;
            }
        }
        OutputFormat::Json => write_json(&mut out, &functions)?,
    }

    Ok(())
}
