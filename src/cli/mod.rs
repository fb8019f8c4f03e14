//! CLI module for docbridge
//!
//! Provides command-line interface for:
//! - init: Write a starter configuration and create the storage root
//! - serve: Boot the gateway and serve HTTP until interrupted

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
