//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// aicfg — one canonical AI configuration, projected everywhere.
#[derive(Debug, Parser)]
#[command(name = "aicfg", version, about)]
pub struct Cli {
    /// Enable verbose diagnostic output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the extends chain and print the final merged config
    Resolve {
        /// Directory to start discovery from (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Write the resolved config to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Verify that the configuration resolves and validates
    Check {
        /// Directory to start discovery from (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}
