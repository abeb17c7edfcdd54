//! TVCompat Library
//!
//! Probes video files, classifies their container and every stream against a
//! TV's playback support matrix, and synthesizes shell-safe ffmpeg commands
//! for remuxing or transcoding the files that would not play.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod output;
pub mod ports;
pub mod streams;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{FileOutcome, StreamDescriptor, Summary};
pub use error::{CompatError, CompatResult};
