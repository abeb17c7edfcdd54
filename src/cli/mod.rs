//! CLI module for TVCompat
//!
//! This module handles command-line argument parsing and command execution.

use clap::Parser;

pub mod args;
pub mod commands;

/// TVCompat
///
/// Checks video files against what the TV can play and prints the ffmpeg
/// commands that would fix the ones it cannot.
#[derive(Parser, Debug)]
#[command(name = "tvcompat")]
#[command(about = "TVCompat - Will my TV play this file?")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level for diagnostics on stderr
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(flatten)]
    pub check: args::CheckArgs,
}
