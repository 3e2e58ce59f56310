//! Program identifier

use crate::arch::w65c816::ImmediateWidths;
use crate::platform::MappingMode;
use clap::{App, Arg, ArgMatches, ArgSettings};
use relative_path::{RelativePath, RelativePathBuf};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::{fmt, str};

/// An on/off command line toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl str::FromStr for Switch {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "on" | "yes" | "true" | "1" => Ok(Switch::On),
            "off" | "no" | "false" | "0" => Ok(Switch::Off),
            _ => Err(()),
        }
    }
}

impl From<Switch> for bool {
    fn from(switch: Switch) -> bool {
        switch == Switch::On
    }
}

impl Display for Switch {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Switch::On => write!(f, "on"),
            Switch::Off => write!(f, "off"),
        }
    }
}

/// Reject `--mapping` values that do not name a mapping mode.
fn validate_mapping(value: String) -> Result<(), String> {
    MappingMode::from_str(&value).map(|_| ()).map_err(|_| {
        let names: Vec<&str> = MappingMode::iter()
            .into_iter()
            .map(MappingMode::friendly_name)
            .collect();

        format!("{} is not a mapping mode; expected {}", value, names.join(" or "))
    })
}

fn validate_switch(value: String) -> Result<(), String> {
    Switch::from_str(&value)
        .map(|_| ())
        .map_err(|_| format!("{} is not on or off", value))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Program {
    #[serde(default)]
    image: Option<String>,

    #[serde(default)]
    mapping: Option<MappingMode>,

    #[serde(default)]
    accumulator_16: Option<bool>,

    #[serde(default)]
    index_16: Option<bool>,

    #[serde(skip)]
    name: Option<String>,

    #[serde(default = "default_db_filename")]
    database_path: RelativePathBuf,
}

fn default_db_filename() -> RelativePathBuf {
    RelativePathBuf::from("sfcdis.db")
}

impl Default for Program {
    fn default() -> Self {
        Program {
            image: None,
            mapping: None,
            accumulator_16: None,
            index_16: None,
            name: None,
            database_path: default_db_filename(),
        }
    }
}

impl Program {
    pub fn configure_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.arg(
            Arg::with_name("image")
                .long("image")
                .value_name("game.sfc")
                .help("The ROM image to analyze.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("mapping")
                .long("mapping")
                .value_name("lorom|hirom")
                .help("How the cartridge maps ROM. Detected from the header if omitted.")
                .takes_value(true)
                .validator(validate_mapping)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("m16")
                .long("m16")
                .value_name("on|off")
                .help("Decode accumulator immediates as 16-bit (default on).")
                .takes_value(true)
                .validator(validate_switch)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("x16")
                .long("x16")
                .value_name("on|off")
                .help("Decode index register immediates as 16-bit (default off).")
                .takes_value(true)
                .validator(validate_switch)
                .set(ArgSettings::Global),
        )
    }

    /// Construct a Program from clap ArgMatches
    pub fn from_arg_matches(args: &ArgMatches) -> Program {
        Program {
            image: args.value_of("image").map(|s| s.to_string()),
            mapping: args
                .value_of("mapping")
                .and_then(|s| MappingMode::from_str(s).ok()),
            accumulator_16: args
                .value_of("m16")
                .and_then(|s| Switch::from_str(s).ok())
                .map(bool::from),
            index_16: args
                .value_of("x16")
                .and_then(|s| Switch::from_str(s).ok())
                .map(bool::from),
            name: None,
            database_path: default_db_filename(),
        }
    }

    pub fn as_image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn set_image(&mut self, path: &str) {
        self.image = Some(path.to_string());
    }

    pub fn mapping(&self) -> Option<MappingMode> {
        self.mapping
    }

    pub fn set_mapping(&mut self, mapping: MappingMode) {
        self.mapping = Some(mapping);
    }

    /// Immediate operand widths to decode with, falling back to the decoder
    /// defaults for anything left unset.
    pub fn widths(&self) -> ImmediateWidths {
        let defaults = ImmediateWidths::default();

        ImmediateWidths {
            accumulator_16: self.accumulator_16.unwrap_or(defaults.accumulator_16),
            index_16: self.index_16.unwrap_or(defaults.index_16),
        }
    }

    pub fn as_database_path(&self) -> &RelativePath {
        self.database_path.as_ref()
    }

    pub fn as_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Layer another program's settings over this one.
    ///
    /// Anything `other` specifies wins. The database path always comes from
    /// this program, since it can only be set in the project file.
    pub fn apply_override(&self, other: &Program) -> Program {
        Program {
            image: other.image.clone().or_else(|| self.image.clone()),
            mapping: other.mapping.or(self.mapping),
            accumulator_16: other.accumulator_16.or(self.accumulator_16),
            index_16: other.index_16.or(self.index_16),
            name: other.name.clone().or_else(|| self.name.clone()),
            database_path: self.database_path.clone(),
        }
    }
}
