// Adapters - External system implementations

pub mod glob_exclude;
pub mod probe_libav;

// Re-export adapters
pub use glob_exclude::GlobExcludeAdapter;
pub use probe_libav::ProbeLibavAdapter;
