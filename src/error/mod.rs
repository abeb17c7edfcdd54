//! Error handling module for TVCompat

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for TVCompat operations
#[derive(Error, Debug)]
pub enum CompatError {
    /// The file could not be demuxed/opened
    #[error("could not open {}: {message} ({code})", path.display())]
    OpenFailure {
        path: PathBuf,
        code: i32,
        message: String,
    },

    /// The container opened but its stream metadata could not be read
    #[error("could not read stream info for {}: {message} ({code})", path.display())]
    StreamInfoFailure {
        path: PathBuf,
        code: i32,
        message: String,
    },

    /// A directory could not be listed during traversal
    #[error("Could not open directory: {} ({message})", path.display())]
    DirectoryOpenFailure { path: PathBuf, message: String },

    /// A path vanished or became inaccessible before it could be examined
    #[error("Could not stat '{}': {message}", path.display())]
    StatFailure { path: PathBuf, message: String },

    /// The top-level input is neither a regular file nor a directory
    #[error("'{}' is not a regular file or directory.", path.display())]
    InvalidInput { path: PathBuf },

    /// FFmpeg initialization error
    #[error("Failed to initialize FFmpeg: {message}")]
    FFmpegInitError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompatError {
    /// Underlying libav error code, for probe failures
    pub fn code(&self) -> Option<i32> {
        match self {
            CompatError::OpenFailure { code, .. } | CompatError::StreamInfoFailure { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }

    /// Human-readable message without the path prefix
    pub fn detail(&self) -> String {
        match self {
            CompatError::OpenFailure { message, .. }
            | CompatError::StreamInfoFailure { message, .. }
            | CompatError::DirectoryOpenFailure { message, .. }
            | CompatError::StatFailure { message, .. }
            | CompatError::FFmpegInitError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for TVCompat operations
pub type CompatResult<T> = std::result::Result<T, CompatError>;
