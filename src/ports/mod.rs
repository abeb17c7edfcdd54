// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::model::{ContainerInfo, StreamDescriptor};
use crate::error::CompatResult;

/// Port for opening media files
///
/// A handle stays open for as long as it lives; dropping it releases the
/// underlying demuxer on every exit path.
pub trait ProbePort {
    type Handle: MediaHandle;

    /// Open the file and read its container header
    ///
    /// Fails with `CompatError::OpenFailure` when the file cannot be demuxed.
    fn open(&self, path: &Path) -> CompatResult<Self::Handle>;
}

/// An opened media file
pub trait MediaHandle {
    /// Read stream information
    ///
    /// Fails with `CompatError::StreamInfoFailure`.
    fn probe_streams(&mut self) -> CompatResult<()>;

    /// Container format, as named by the prober
    fn container(&self) -> ContainerInfo;

    /// All streams in index order, including non-media ones
    fn streams(&self) -> Vec<StreamDescriptor>;
}

/// Port for deciding which directories a scan skips
pub trait ExcludePort {
    /// `true` when `path` matches an exclusion pattern
    fn is_excluded(&self, path: &Path) -> bool;
}
