//! TVCompat
//!
//! Checks whether a TV can play video files and suggests the ffmpeg
//! commands that would fix the ones it cannot.
//!
//! # Usage
//!
//! ```bash
//! tvcompat /media/films --exclude '*/extras' --skip-ok
//! tvcompat "Old Film.avi"
//! tvcompat /media --brief
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tvcompat::cli::{self, Cli};

/// Main entry point for the TVCompat CLI application
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are not failures
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(io::stderr)
        .init();

    debug!("Starting TVCompat");

    match cli::commands::check(cli.check) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("Check failed: {:?}", err);
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
