// Probe LibAV adapter - Media file analysis using libav

use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::ptr;

use ffmpeg_next::ffi;
use ffmpeg_next::format::context::Input;
use ffmpeg_next::media;
use tracing::{debug, trace};

use crate::domain::model::*;
use crate::error::{CompatError, CompatResult};
use crate::ports::*;
use crate::utils::PathUtils;

/// libav `FF_PROFILE_UNKNOWN`
const PROFILE_UNKNOWN: i32 = -99;

/// LibAV-based media probing adapter
pub struct ProbeLibavAdapter;

impl ProbeLibavAdapter {
    /// Initialize libav and silence its own logging
    pub fn new() -> CompatResult<Self> {
        ffmpeg_next::init().map_err(|e| CompatError::FFmpegInitError {
            message: e.to_string(),
        })?;
        ffmpeg_next::util::log::set_level(ffmpeg_next::util::log::Level::Quiet);

        Ok(Self)
    }
}

impl ProbePort for ProbeLibavAdapter {
    type Handle = LibavHandle;

    fn open(&self, path: &Path) -> CompatResult<LibavHandle> {
        let c_path = CString::new(PathUtils::bytes(path).into_owned())
            .map_err(|_| Self::open_failure(path, ffmpeg_next::Error::InvalidData))?;

        let mut ctx = ptr::null_mut();
        let ret = unsafe {
            ffi::avformat_open_input(&mut ctx, c_path.as_ptr(), ptr::null_mut(), ptr::null_mut())
        };
        if ret < 0 {
            return Err(Self::open_failure(path, ffmpeg_next::Error::from(ret)));
        }

        debug!("Opened {}", path.display());
        // From here the context is owned by `Input`, which closes it on drop
        let input = unsafe { Input::wrap(ctx) };

        Ok(LibavHandle {
            path: path.to_path_buf(),
            input,
        })
    }
}

impl ProbeLibavAdapter {
    fn open_failure(path: &Path, err: ffmpeg_next::Error) -> CompatError {
        CompatError::OpenFailure {
            path: path.to_path_buf(),
            message: err.to_string(),
            code: err.into(),
        }
    }
}

/// An open libav demuxer context
pub struct LibavHandle {
    path: PathBuf,
    input: Input,
}

impl MediaHandle for LibavHandle {
    fn probe_streams(&mut self) -> CompatResult<()> {
        let ret =
            unsafe { ffi::avformat_find_stream_info(self.input.as_mut_ptr(), ptr::null_mut()) };
        if ret < 0 {
            let err = ffmpeg_next::Error::from(ret);
            return Err(CompatError::StreamInfoFailure {
                path: self.path.clone(),
                message: err.to_string(),
                code: err.into(),
            });
        }
        Ok(())
    }

    fn container(&self) -> ContainerInfo {
        let name = self.input.format().name();
        if name.is_empty() {
            ContainerInfo::unknown()
        } else {
            ContainerInfo::new(name)
        }
    }

    fn streams(&self) -> Vec<StreamDescriptor> {
        self.input
            .streams()
            .map(|stream| {
                let params = stream.parameters();
                let media_type = match params.medium() {
                    media::Type::Video => MediaType::Video,
                    media::Type::Audio => MediaType::Audio,
                    media::Type::Subtitle => MediaType::Subtitle,
                    _ => MediaType::Other,
                };
                let codec = Codec::from_name(params.id().name());
                let (codec_tag, profile) = unsafe {
                    let raw = &*params.as_ptr();
                    (raw.codec_tag, raw.profile)
                };

                let metadata = stream.metadata();
                let mut descriptor = StreamDescriptor::new(stream.index(), media_type, codec)
                    .with_language(metadata.get("language"));

                if media_type == MediaType::Video {
                    if codec_tag != 0 {
                        descriptor = descriptor.with_codec_tag(CodecTag(codec_tag));
                    }
                    if profile != PROFILE_UNKNOWN {
                        descriptor = descriptor.with_profile(profile);
                    }
                }

                trace!(
                    index = descriptor.index,
                    media_type = %descriptor.media_type,
                    codec = %descriptor.codec,
                    "Read stream"
                );
                descriptor
            })
            .collect()
    }
}

impl Drop for LibavHandle {
    fn drop(&mut self) {
        trace!("Closing {}", self.path.display());
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::TempDir;

    use super::*;

    /// AVERROR(ENOENT)
    const NOT_FOUND: i32 = -2;

    fn open(path: &Path) -> CompatResult<()> {
        let adapter = ProbeLibavAdapter::new()?;
        adapter.open(path).map(|_| ())
    }

    #[test]
    fn test_missing_file_is_an_open_failure() {
        let dir = TempDir::new().unwrap();
        let err = open(&dir.path().join("missing.mkv")).unwrap_err();

        assert!(matches!(err, CompatError::OpenFailure { .. }));
        assert_eq!(err.code(), Some(NOT_FOUND));
    }

    #[test]
    fn test_interior_nul_is_an_open_failure() {
        let err = open(Path::new("bad\0name.mkv")).unwrap_err();
        assert!(matches!(err, CompatError::OpenFailure { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_reaches_libav_unchanged() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"Am\xe9lie.mkv"));
        File::create(&path).unwrap();

        // The file exists, so whatever libav makes of it, it must find it
        if let Err(err) = open(&path) {
            assert_ne!(err.code(), Some(NOT_FOUND), "{}", err);
        }
    }
}
