// Application layer - Use case interactors

pub mod check_interactor;
pub mod scan_interactor;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export interactors
pub use check_interactor::{CheckInteractor, CheckOptions, FileDisposition};
pub use scan_interactor::ScanInteractor;
