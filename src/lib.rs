//! Core library entry for the `tagcheck` CLI.
//!
//! `tagcheck` finds tagged template literals such as `` $item`hair spray` ``
//! in JavaScript and TypeScript sources and checks every enumerated value
//! against reference vocabularies of game entities.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod data;
pub mod fix;
pub mod ports;
pub mod registry;
pub mod segment;
pub mod source;
pub mod tags;
pub mod verify;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
