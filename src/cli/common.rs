//! Common utilities for command implementations

use crate::analysis::DisassemblyMode;
use crate::arch::w65c816::Decoder;
use crate::asm::OutputFormat;
use crate::database::Database;
use crate::memory::SnesAddress;
use crate::platform::RomImage;
use crate::project::{Program, Project};
use clap::{App, Arg, ArgMatches, SubCommand};
use std::io;
use std::str::FromStr;

/// Bytes listed by `dis` and `scan` when no end is given.
const DEFAULT_LENGTH: usize = 0x100;

/// Enumeration of all CLI commands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Info,
    Scan,
    Disassemble,
    Backreference,
    Symbols,
    Functions,
}

fn range_args<'a, 'b>(cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.arg(
        Arg::with_name("start")
            .value_name("$BB:HHLL")
            .index(1)
            .required(true)
            .help("The address to start from"),
    )
    .arg(
        Arg::with_name("end")
            .long("end")
            .value_name("$BB:HHLL")
            .takes_value(true)
            .conflicts_with("length")
            .help("Stop before this address"),
    )
    .arg(
        Arg::with_name("length")
            .long("length")
            .value_name("BYTES")
            .takes_value(true)
            .help("How many bytes to cover (decimal, or hex with $ or 0x)"),
    )
    .arg(
        Arg::with_name("subroutine")
            .long("subroutine")
            .help("Stop at the first return instruction"),
    )
}

fn validate_format(value: String) -> Result<(), String> {
    OutputFormat::from_str(&value).map(|_| ()).map_err(|_| {
        let names: Vec<&str> = OutputFormat::iter()
            .into_iter()
            .map(OutputFormat::friendly_name)
            .collect();

        format!("{} is not an output format; expected {}", value, names.join(" or "))
    })
}

fn format_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("format")
        .long("format")
        .value_name("asm|json")
        .takes_value(true)
        .validator(validate_format)
        .help("Output format")
}

impl Command {
    /// Enumerate all commands that sfcdis recognizes.
    pub fn enumerate() -> Vec<Self> {
        use Command::*;

        vec![Info, Scan, Disassemble, Backreference, Symbols, Functions]
    }

    /// Construct the subcommand object for this particular `Command`.
    pub fn into_clap_subcommand<'a, 'b>(self) -> App<'a, 'b> {
        match self {
            Command::Info => SubCommand::with_name("info")
                .about("Show the cartridge header, mapping and interrupt vectors"),
            Command::Scan => range_args(
                SubCommand::with_name("scan")
                    .about("Scan a range for code and record its cross-references"),
            )
            .arg(
                Arg::with_name("chunk")
                    .long("chunk")
                    .value_name("BYTES")
                    .takes_value(true)
                    .conflicts_with("subroutine")
                    .help(
                        "Split the range into chunks scanned in parallel; \
                         instructions crossing a chunk boundary become data bytes",
                    ),
            ),
            Command::Disassemble => range_args(
                SubCommand::with_name("dis").about("Display code for a given address range"),
            )
            .arg(format_arg()),
            Command::Backreference => SubCommand::with_name("backref")
                .about("List backreferences to a given address")
                .arg(
                    Arg::with_name("target")
                        .value_name("$BB:HHLL")
                        .index(1)
                        .required(true)
                        .help("The address to list backreferences for"),
                ),
            Command::Symbols => SubCommand::with_name("symbols")
                .about("Derive the symbol table from scanned references")
                .arg(
                    Arg::with_name("data")
                        .long("data")
                        .help("Also name data pointer targets"),
                )
                .arg(format_arg()),
            Command::Functions => SubCommand::with_name("funcs")
                .about("Trace and classify functions reached from vectors and calls")
                .arg(format_arg()),
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "info" => Ok(Command::Info),
            "scan" => Ok(Command::Scan),
            "dis" => Ok(Command::Disassemble),
            "backref" => Ok(Command::Backreference),
            "backrefs" => Ok(Command::Backreference),
            "symbols" => Ok(Command::Symbols),
            "funcs" => Ok(Command::Functions),
            _ => Err(()),
        }
    }
}

pub fn invalid_input<E>(message: E) -> io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

pub fn parse_address(spec: &str) -> io::Result<SnesAddress> {
    SnesAddress::from_str(spec).map_err(invalid_input)
}

/// Parse a byte count, given in decimal or in hex with a `$` or `0x` prefix.
pub fn parse_count(spec: &str) -> io::Result<usize> {
    let spec = spec.trim();
    let parsed = if let Some(hex) = spec.strip_prefix('$') {
        usize::from_str_radix(hex, 16)
    } else if let Some(hex) = spec
        .strip_prefix("0x")
        .or_else(|| spec.strip_prefix("0X"))
    {
        usize::from_str_radix(hex, 16)
    } else {
        spec.parse()
    };

    parsed.map_err(|_| invalid_input(format!("{} is not a byte count", spec)))
}

pub fn output_format(argv: &ArgMatches) -> io::Result<OutputFormat> {
    match argv.value_of("format") {
        Some(spec) => OutputFormat::from_str(spec)
            .map_err(|_| invalid_input(format!("Unknown output format {}", spec))),
        None => Ok(OutputFormat::default()),
    }
}

/// A ROM range requested on the command line.
#[derive(Copy, Clone, Debug)]
pub struct RangeRequest {
    pub start: SnesAddress,
    pub rom_offset: usize,
    pub length: usize,
    pub mode: DisassemblyMode,
}

/// Work out which ROM bytes a `scan` or `dis` invocation covers.
///
/// With no `--end` or `--length`, a subroutine pass may run to the end of the
/// bank window and a full pass covers a fixed number of bytes.
pub fn range_request(image: &RomImage, argv: &ArgMatches) -> io::Result<RangeRequest> {
    let spec = argv
        .value_of("start")
        .ok_or_else(|| invalid_input("Did not provide a start address"))?;
    let start = parse_address(spec)?;
    let mapping = image.to_rom_offset(start);
    if !mapping.is_valid() {
        return Err(invalid_input(format!("{} is not mapped to ROM", start)));
    }

    let mode = if argv.is_present("subroutine") {
        DisassemblyMode::SingleSubroutine
    } else {
        DisassemblyMode::FullRange
    };

    let length = if let Some(end) = argv.value_of("end") {
        let end = parse_address(end)?;
        let end_mapping = image.to_rom_offset(end);
        if end_mapping.rom_offset() <= mapping.rom_offset() {
            return Err(invalid_input(format!("{} does not lie after {}", end, start)));
        }

        end_mapping.rom_offset() - mapping.rom_offset()
    } else if let Some(length) = argv.value_of("length") {
        parse_count(length)?
    } else if mode == DisassemblyMode::SingleSubroutine {
        mapping.available_size()
    } else {
        DEFAULT_LENGTH.min(mapping.available_size())
    };

    Ok(RangeRequest {
        start,
        rom_offset: mapping.rom_offset(),
        length,
        mode,
    })
}

/// Load the program's ROM image.
pub fn load_image(project: &Project, prog: &Program) -> io::Result<RomImage> {
    let image = prog.as_image().ok_or_else(|| {
        invalid_input("Did not specify an image; pass --image or name one in the project file")
    })?;

    Ok(RomImage::open(project.resolve_path(image), prog.mapping())?)
}

pub fn decoder(prog: &Program) -> Decoder {
    Decoder::new(prog.widths())
}

/// Open the program's database, creating an empty one if it does not exist.
pub fn open_database(project: &Project, prog: &Program, image: &RomImage) -> io::Result<Database> {
    Ok(Database::open_or_new(
        project.database_path(prog),
        image.mapping_mode(),
    )?)
}

pub fn save_database(project: &Project, prog: &Program, db: &Database) -> io::Result<()> {
    Ok(db.write(project.database_path(prog))?)
}
