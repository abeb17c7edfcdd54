//! Common utilities and helpers

pub mod path;
pub mod shell;

pub use path::PathUtils;
pub use shell::{shell_escape_single, ShellCommand};
