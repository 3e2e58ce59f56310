//! CLI support for non-command bits

use crate::cli::common::{invalid_input, Command};
use crate::project::{Program, Project, DEFAULT_PROJECT_FILE};
use crate::{cli, logging};
use clap::{Arg, ArgSettings};
use std::io;
use std::str::FromStr;

pub fn main() -> io::Result<()> {
    let mut app = app_from_crate!();
    app = app.arg(
        Arg::with_name("program")
            .long("program")
            .value_name("mygame")
            .takes_value(true)
            .help("Which program to analyze")
            .set(ArgSettings::Global),
    );
    app = Program::configure_app(app);
    app = app.arg(
        Arg::with_name("project")
            .long("project")
            .value_name(DEFAULT_PROJECT_FILE)
            .takes_value(true)
            .help("The project file to load")
            .set(ArgSettings::Global),
    );
    app = app.arg(
        Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .multiple(true)
            .help("Log more detail to stderr; repeat for more")
            .set(ArgSettings::Global),
    );

    for cmd in Command::enumerate().iter() {
        app = app.subcommand(cmd.into_clap_subcommand());
    }

    let matches = app.get_matches();

    logging::init(logging::level_for_verbosity(matches.occurrences_of("verbose")));

    let project_filename = matches
        .value_of("project")
        .unwrap_or(DEFAULT_PROJECT_FILE);
    let overrides = Program::from_arg_matches(&matches);

    let (command, submatches) = matches.subcommand();
    let command = Command::from_str(command)
        .map_err(|_| invalid_input("No command given; try --help for a list"))?;
    let submatches = submatches.ok_or_else(|| invalid_input("Missing command arguments"))?;

    let project = Project::read_or_default(project_filename)?;
    let prog = project.resolve_program(matches.value_of("program"), &overrides)?;

    match command {
        Command::Info => cli::info(&project, &prog, submatches)?,
        Command::Scan => cli::scan(&project, &prog, submatches)?,
        Command::Disassemble => cli::dis(&project, &prog, submatches)?,
        Command::Backreference => cli::backref(&project, &prog, submatches)?,
        Command::Symbols => cli::symbols(&project, &prog, submatches)?,
        Command::Functions => cli::funcs(&project, &prog, submatches)?,
    };

    Ok(())
}
