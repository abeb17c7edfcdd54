//! Path utilities for reports and suggested output names
//!
//! Everything here works on the raw bytes of a path, so names that are not
//! valid UTF-8 are reported and quoted exactly as stored.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::Path;

/// Extensions worth probing at all. Anything else is skipped without a trace.
pub const MEDIA_EXTENSIONS: &[&str] = &[".mkv", ".mp4", ".mov", ".webm", ".avi"];

/// Raw bytes of an OS string
#[cfg(unix)]
pub fn os_bytes(s: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(s.as_bytes())
}

/// Raw bytes of an OS string (lossy where the platform has no byte view)
#[cfg(not(unix))]
pub fn os_bytes(s: &OsStr) -> Cow<'_, [u8]> {
    match s.to_string_lossy() {
        Cow::Borrowed(text) => Cow::Borrowed(text.as_bytes()),
        Cow::Owned(text) => Cow::Owned(text.into_bytes()),
    }
}

/// Path utilities
pub struct PathUtils;

impl PathUtils {
    /// The whole path
    pub fn bytes(path: &Path) -> Cow<'_, [u8]> {
        os_bytes(path.as_os_str())
    }

    /// Last path component, or the whole path when there is none
    pub fn basename(path: &Path) -> Cow<'_, [u8]> {
        match path.file_name() {
            Some(name) => os_bytes(name),
            None => Self::bytes(path),
        }
    }

    /// Name shown in reports
    pub fn display_name(path: &Path, show_full_path: bool) -> Cow<'_, [u8]> {
        if show_full_path {
            Self::bytes(path)
        } else {
            Self::basename(path)
        }
    }

    /// Case-insensitive check of the text after the last dot of the file name
    pub fn has_media_extension(path: &Path) -> bool {
        let name = Self::basename(path);
        match name.iter().rposition(|&b| b == b'.') {
            Some(dot) => MEDIA_EXTENSIONS
                .iter()
                .any(|ext| name[dot..].eq_ignore_ascii_case(ext.as_bytes())),
            None => false,
        }
    }

    /// `remuxed_<basename>.mkv`, keeping the original extension inside the name
    pub fn remux_output_name(path: &Path) -> Vec<u8> {
        let mut name = b"remuxed_".to_vec();
        name.extend_from_slice(&Self::basename(path));
        name.extend_from_slice(b".mkv");
        name
    }

    /// `fixed_<basename without extension>.mkv`
    pub fn transcode_output_name(path: &Path) -> Vec<u8> {
        let name = Self::basename(path);
        let stem = match name.iter().rposition(|&b| b == b'.') {
            Some(dot) => &name[..dot],
            None => &name[..],
        };
        let mut fixed = b"fixed_".to_vec();
        fixed.extend_from_slice(stem);
        fixed.extend_from_slice(b".mkv");
        fixed
    }
}
