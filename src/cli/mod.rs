//! CLI commands

mod backref;
mod common;
mod dis;
mod funcs;
mod info;
mod main;
mod scan;
mod symbols;

pub use backref::backref;
pub use common::{parse_address, parse_count, Command};
pub use dis::dis;
pub use funcs::funcs;
pub use info::info;
pub use main::main;
pub use scan::scan;
pub use symbols::symbols;
