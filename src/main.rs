//! # Chang CLI
//!
//! This is the binary entry point for the `chang` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Running the changelog pipeline with the parsed settings.
//! - Translating failures into user-friendly output and a distinct exit
//!   status (see `chang::exit_codes`).
//!
//! The core application logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library functionality.

mod cli;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let style = cli.output_config();

    let code = match cli.execute() {
        Ok(code) => code,
        Err(err) => cli::report_error(&err, &style),
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
