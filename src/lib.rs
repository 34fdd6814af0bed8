//! Core library entry for the `ckan-repair` CLI.

pub mod adapters;
pub mod cassette;
pub mod chain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod ports;
pub mod repair;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// Environment variables are loaded from `--env-file` when given, and from
/// a `.env` file in the working directory otherwise.
///
/// # Errors
///
/// Returns an error string when argument parsing fails, the env file cannot
/// be loaded, or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .map_err(|e| format!("Failed to load env file {}: {e}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }
    commands::dispatch(&cli.command)
}
