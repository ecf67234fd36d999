//! CLI module for chatwire.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Streaming a prompt's reply to the terminal
//!
//! # Usage
//!
//! ```ignore
//! use chatwire::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! let code = runtime.block_on(run_cli_command(command))?;
//! std::process::exit(code);
//! ```

pub mod args;
pub mod ask;
pub mod version;

pub use args::{parse_args, AskArgs, CliCommand, USAGE};
pub use ask::{exit_code, handle_ask_command, TerminalSink};
pub use version::{handle_version_command, VERSION};

use color_eyre::Result;

/// Run a parsed CLI command and return the process exit code.
///
/// # Note
///
/// The `Version` command never returns as it calls `std::process::exit(0)`.
pub async fn run_cli_command(command: CliCommand) -> Result<i32> {
    match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(0)
        }
        CliCommand::Invalid(reason) => {
            eprintln!("error: {}\n\n{}", reason, USAGE);
            Ok(2)
        }
        CliCommand::Ask(args) => {
            let outcome = handle_ask_command(args).await?;
            Ok(exit_code(outcome))
        }
    }
}
