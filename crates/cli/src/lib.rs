//! Command-line front end for docsn.
//!
//! Parses arguments, installs tracing and dispatches to the command modules.
//! Every command returns a process exit code rather than an error.

#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use clap::{Parser, Subcommand};

pub mod config;
pub mod generate;
pub mod logging;

pub use logging::init_tracing;

#[derive(Parser, Debug)]
#[command(
    name = "docsn",
    version,
    about = "Convert documentation-extractor JSON into per-class site documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert the extractor JSON into class documents and a table of contents
    Generate(generate::GenerateArgs),
}

/// Parse `args` (including the program name) and run the selected command.
///
/// With no subcommand the conversion runs with its default settings.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            init_tracing();
            match cli.command {
                Some(Commands::Generate(args)) => generate::run(&args),
                None => generate::run(&generate::GenerateArgs::default()),
            }
        }
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}
