//! Report rendering module

use std::fmt::Display;

use console::{style, StyledObject};

pub mod writer;

pub use writer::ReportWriter;

/// How per-file results are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportMode {
    /// Per-stream block, verdict and suggested commands
    #[default]
    Verbose,
    /// One line per problematic file
    Brief,
    /// One JSON object per file
    Json,
}

/// Supported / OK
pub fn good<D: Display>(value: D) -> StyledObject<D> {
    style(value).green().force_styling(true)
}

/// Unsupported
pub fn bad<D: Display>(value: D) -> StyledObject<D> {
    style(value).red().force_styling(true)
}

/// Warnings and errors
pub fn warn<D: Display>(value: D) -> StyledObject<D> {
    style(value).yellow().force_styling(true)
}

/// Green or red depending on `supported`
pub fn verdict<D: Display>(value: D, supported: bool) -> StyledObject<D> {
    if supported {
        good(value)
    } else {
        bad(value)
    }
}

/// `OK` / `NOT SUPPORTED`
pub fn status(supported: bool) -> StyledObject<&'static str> {
    verdict(if supported { "OK" } else { "NOT SUPPORTED" }, supported)
}
