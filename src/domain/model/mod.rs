// Domain models - Core types and data structures

use std::fmt;

use serde::{Serialize, Serializer};

/// Language reported for streams that carry no language metadata
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// Container name reported when the prober cannot name the format
pub const UNKNOWN_CONTAINER: &str = "unknown";

/// libav `FF_PROFILE_MPEG4_SIMPLE_STUDIO`
pub const PROFILE_MPEG4_SIMPLE_STUDIO: i32 = 14;
/// libav `FF_PROFILE_MPEG4_ADVANCED_SIMPLE`
pub const PROFILE_MPEG4_ADVANCED_SIMPLE: i32 = 15;

/// Kind of elementary stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Audio,
    Subtitle,
    Other,
}

impl MediaType {
    /// Whether the checker looks at this stream at all
    pub fn is_media(&self) -> bool {
        !matches!(self, MediaType::Other)
    }

    /// Stream specifier letter used by ffmpeg (`0:v`, `-c:a:1`, ...)
    pub fn specifier(&self) -> Option<char> {
        match self {
            MediaType::Video => Some('v'),
            MediaType::Audio => Some('a'),
            MediaType::Subtitle => Some('s'),
            MediaType::Other => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Audio => "audio",
            MediaType::Subtitle => "subtitle",
            MediaType::Other => "other",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Codec identity as far as the support matrix cares
///
/// Every codec named by the classification rules has its own variant;
/// everything else is carried by name in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Codec {
    // video
    H264,
    Hevc,
    Mpeg2Video,
    Vp9,
    Av1,
    Mjpeg,
    Png,
    Mpeg4,
    // audio
    Aac,
    Ac3,
    Eac3,
    Mp3,
    PcmS16le,
    Flac,
    Vorbis,
    Opus,
    WmaV2,
    // subtitles
    Subrip,
    Ass,
    Ssa,
    WebVtt,
    MovText,
    MicroDvd,
    Text,
    HdmvPgs,
    DvdSubtitle,
    Other(String),
}

impl Codec {
    /// Canonical libav codec name
    pub fn name(&self) -> &str {
        match self {
            Codec::H264 => "h264",
            Codec::Hevc => "hevc",
            Codec::Mpeg2Video => "mpeg2video",
            Codec::Vp9 => "vp9",
            Codec::Av1 => "av1",
            Codec::Mjpeg => "mjpeg",
            Codec::Png => "png",
            Codec::Mpeg4 => "mpeg4",
            Codec::Aac => "aac",
            Codec::Ac3 => "ac3",
            Codec::Eac3 => "eac3",
            Codec::Mp3 => "mp3",
            Codec::PcmS16le => "pcm_s16le",
            Codec::Flac => "flac",
            Codec::Vorbis => "vorbis",
            Codec::Opus => "opus",
            Codec::WmaV2 => "wmav2",
            Codec::Subrip => "subrip",
            Codec::Ass => "ass",
            Codec::Ssa => "ssa",
            Codec::WebVtt => "webvtt",
            Codec::MovText => "mov_text",
            Codec::MicroDvd => "microdvd",
            Codec::Text => "text",
            Codec::HdmvPgs => "hdmv_pgs_subtitle",
            Codec::DvdSubtitle => "dvd_subtitle",
            Codec::Other(name) => name,
        }
    }

    /// Look a codec up by its libav name
    pub fn from_name(name: &str) -> Self {
        match name {
            "h264" => Codec::H264,
            "hevc" => Codec::Hevc,
            "mpeg2video" => Codec::Mpeg2Video,
            "vp9" => Codec::Vp9,
            "av1" => Codec::Av1,
            "mjpeg" => Codec::Mjpeg,
            "png" => Codec::Png,
            "mpeg4" => Codec::Mpeg4,
            "aac" => Codec::Aac,
            "ac3" => Codec::Ac3,
            "eac3" => Codec::Eac3,
            "mp3" => Codec::Mp3,
            "pcm_s16le" => Codec::PcmS16le,
            "flac" => Codec::Flac,
            "vorbis" => Codec::Vorbis,
            "opus" => Codec::Opus,
            "wmav2" => Codec::WmaV2,
            "subrip" => Codec::Subrip,
            "ass" => Codec::Ass,
            "ssa" => Codec::Ssa,
            "webvtt" => Codec::WebVtt,
            "mov_text" => Codec::MovText,
            "microdvd" => Codec::MicroDvd,
            "text" => Codec::Text,
            "hdmv_pgs_subtitle" => Codec::HdmvPgs,
            "dvd_subtitle" => Codec::DvdSubtitle,
            other => Codec::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Codec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Four-character codec tag, laid out the way libav's `MKTAG` packs it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodecTag(pub u32);

impl CodecTag {
    pub const fn from_fourcc(fourcc: [u8; 4]) -> Self {
        Self(
            fourcc[0] as u32
                | (fourcc[1] as u32) << 8
                | (fourcc[2] as u32) << 16
                | (fourcc[3] as u32) << 24,
        )
    }

    pub fn fourcc(&self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Display for CodecTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.fourcc();
        if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            for b in bytes {
                write!(f, "{}", b as char)?;
            }
            Ok(())
        } else {
            write!(f, "0x{:08x}", self.0)
        }
    }
}

impl Serialize for CodecTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One elementary stream as reported by the prober
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamDescriptor {
    pub index: usize,
    pub media_type: MediaType,
    pub codec: Codec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec_tag: Option<CodecTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<i32>,
    pub language: String,
}

impl StreamDescriptor {
    /// Create a stream with no tag, no profile and undetermined language
    pub fn new(index: usize, media_type: MediaType, codec: Codec) -> Self {
        Self {
            index,
            media_type,
            codec,
            codec_tag: None,
            profile: None,
            language: UNDETERMINED_LANGUAGE.to_string(),
        }
    }

    pub fn video(index: usize, codec: Codec) -> Self {
        Self::new(index, MediaType::Video, codec)
    }

    pub fn audio(index: usize, codec: Codec) -> Self {
        Self::new(index, MediaType::Audio, codec)
    }

    pub fn subtitle(index: usize, codec: Codec) -> Self {
        Self::new(index, MediaType::Subtitle, codec)
    }

    pub fn with_codec_tag(mut self, tag: CodecTag) -> Self {
        self.codec_tag = Some(tag);
        self
    }

    pub fn with_profile(mut self, profile: i32) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Set the language; an absent or empty value falls back to `und`
    pub fn with_language(mut self, language: Option<&str>) -> Self {
        self.language = match language {
            Some(lang) if !lang.is_empty() => lang.to_string(),
            _ => UNDETERMINED_LANGUAGE.to_string(),
        };
        self
    }
}

/// Container format as named by the prober
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerInfo {
    /// Possibly a comma-joined alias list, e.g. `mov,mp4,m4a,3gp,3g2,mj2`
    pub format_name: Option<String>,
}

impl ContainerInfo {
    pub fn new(format_name: impl Into<String>) -> Self {
        Self {
            format_name: Some(format_name.into()),
        }
    }

    pub fn unknown() -> Self {
        Self { format_name: None }
    }

    /// Name for display, `unknown` when the prober had none
    pub fn name(&self) -> &str {
        self.format_name.as_deref().unwrap_or(UNKNOWN_CONTAINER)
    }
}

/// Why a stream was classified the way it was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupportReason {
    CodecAllowed,
    CodecNotAllowed,
    CodecTagExcluded,
    ProfileExcluded,
    SubtitleBitmapUnsupported,
    SubtitleTextUnsupported,
}

/// Per-stream classification verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub stream_index: usize,
    pub media_type: MediaType,
    pub supported: bool,
    pub reason: SupportReason,
}

impl ClassificationResult {
    pub fn is_bitmap_subtitle(&self) -> bool {
        self.reason == SupportReason::SubtitleBitmapUnsupported
    }

    /// Unsupported for a reason re-encoding can fix
    pub fn needs_transcode(&self) -> bool {
        !self.supported && !self.is_bitmap_subtitle()
    }
}

/// Everything the checker concluded about a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub container: ContainerInfo,
    pub container_supported: bool,
    /// Media streams only, in original index order
    pub streams: Vec<StreamDescriptor>,
    /// Aligned with `streams`
    pub results: Vec<ClassificationResult>,
    pub all_supported: bool,
    pub can_transcode: bool,
    pub has_unsupported_bitmap_subtitle: bool,
    pub has_video: bool,
    pub has_audio: bool,
}

impl FileOutcome {
    /// Streams paired with their verdicts
    pub fn classified_streams(
        &self,
    ) -> impl Iterator<Item = (&StreamDescriptor, &ClassificationResult)> {
        self.streams.iter().zip(self.results.iter())
    }

    /// Unsupported, nothing to transcode, and a bitmap subtitle is to blame
    pub fn is_unfixable(&self) -> bool {
        !self.all_supported && !self.can_transcode && self.has_unsupported_bitmap_subtitle
    }

    /// Worth offering a remux: something is off and there is audio or video to carry over
    pub fn should_suggest_remux(&self) -> bool {
        !self.all_supported && (self.has_video || self.has_audio)
    }

    pub fn should_suggest_transcode(&self) -> bool {
        self.should_suggest_remux() && self.can_transcode
    }
}

/// Final disposition of a checked file, as counted in the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ok,
    NotSupported,
    Error,
}

/// Run-wide counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: u32,
    pub ok: u32,
    pub not_supported: u32,
    pub errors: u32,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one file. Errors do not add to `total`.
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Ok => {
                self.ok += 1;
                self.total += 1;
            }
            Verdict::NotSupported => {
                self.not_supported += 1;
                self.total += 1;
            }
            Verdict::Error => self.errors += 1,
        }
    }
}
