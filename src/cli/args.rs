//! CLI argument definitions using clap
//!
//! Commands:
//! - docbridge init --config <path>
//! - docbridge serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docbridge - session gateway for a collaborative document editor
#[derive(Parser, Debug)]
#[command(name = "docbridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter configuration and create the storage root
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./docbridge.json")]
        config: PathBuf,
    },

    /// Start the gateway server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./docbridge.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
