//! Command-line argument definitions for the bpviz CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input blueprint, the output target,
//! configuration file selection and logging verbosity.

use clap::Parser;

/// Input path that reads the blueprint from standard input.
pub const STDIN_PATH: &str = "-";

/// Command-line arguments for the bpviz tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input blueprint (YAML or JSON), or `-` for stdin
    #[arg(
        help = "Path to the input blueprint, or - for stdin",
        required_unless_present = "list_functions"
    )]
    pub input: Option<String>,

    /// Path to the output Mermaid file, stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the supported workflow functions and exit
    #[arg(long)]
    pub list_functions: bool,
}
