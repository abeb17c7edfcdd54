// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An exclusion pattern is empty or not a valid glob
    #[error("Invalid exclude pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
