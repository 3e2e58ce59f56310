//! Project file structures

mod program;
mod repr;

pub use program::{Program, Switch};
pub use repr::{Project, DEFAULT_PROJECT_FILE};
