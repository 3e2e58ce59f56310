//! Rendering of analysis results as assembly text or JSON

mod json;
mod listing;

pub use json::{write_json, Report};
pub use listing::{format_instruction, format_operand, write_listing};

use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::{fmt, str};

#[derive(Copy, Clone, Serialize, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Asm,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Asm
    }
}

impl str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "asm" | "text" => Ok(OutputFormat::Asm),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

impl OutputFormat {
    pub fn iter() -> impl IntoIterator<Item = Self> {
        vec![Self::Asm, Self::Json]
    }

    pub fn friendly_name(self) -> &'static str {
        match self {
            Self::Asm => "asm",
            Self::Json => "json",
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.friendly_name())
    }
}

derive_deserialize_from_str!(OutputFormat, "valid output format");

#[cfg(test)]
mod tests;
