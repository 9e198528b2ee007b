pub mod args;
pub mod file;

pub use args::{Args, Command};
pub use file::{Config, UnrecognizedKeys, UnrecognizedValues, parse_config, read_config};
