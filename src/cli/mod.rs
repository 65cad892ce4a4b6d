//! CLI layer: argument parsing, expression parsing and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod parse;

pub use args::{Cli, Commands, ConfigCommands};
pub use error::{CliError, CliResult};
pub use parse::{parse_expression, ParseError};
