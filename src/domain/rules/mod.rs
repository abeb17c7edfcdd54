// Domain rules - The TV support matrix and the per-file verdict built from it

use crate::domain::model::*;

/// Video codecs the TV decodes without conditions
const SUPPORTED_VIDEO_CODECS: &[Codec] = &[
    Codec::H264,
    Codec::Hevc,
    Codec::Mpeg2Video,
    Codec::Vp9,
    Codec::Av1,
    Codec::Mjpeg,
    Codec::Png,
];

/// MPEG-4 part 2 encoder tags the TV refuses (DivX/Xvid family). Case-sensitive.
pub const EXCLUDED_MPEG4_TAGS: [CodecTag; 9] = [
    CodecTag::from_fourcc(*b"XVID"),
    CodecTag::from_fourcc(*b"xvid"),
    CodecTag::from_fourcc(*b"DIVX"),
    CodecTag::from_fourcc(*b"divx"),
    CodecTag::from_fourcc(*b"DX50"),
    CodecTag::from_fourcc(*b"MP4V"),
    CodecTag::from_fourcc(*b"mp4v"),
    CodecTag::from_fourcc(*b"FMP4"),
    CodecTag::from_fourcc(*b"fmp4"),
];

const EXCLUDED_MPEG4_PROFILES: &[i32] = &[
    PROFILE_MPEG4_ADVANCED_SIMPLE,
    PROFILE_MPEG4_SIMPLE_STUDIO,
];

const SUPPORTED_AUDIO_CODECS: &[Codec] = &[
    Codec::Aac,
    Codec::Ac3,
    Codec::Eac3,
    Codec::Mp3,
    Codec::PcmS16le,
    Codec::Flac,
    Codec::Vorbis,
    Codec::Opus,
    Codec::WmaV2,
];

const TEXT_SUBTITLE_CODECS: &[Codec] = &[
    Codec::Subrip,
    Codec::Ass,
    Codec::Ssa,
    Codec::WebVtt,
    Codec::MovText,
    Codec::MicroDvd,
    Codec::Text,
];

const BITMAP_SUBTITLE_CODECS: &[Codec] = &[Codec::HdmvPgs, Codec::DvdSubtitle];

/// Substrings of container format names the TV accepts
pub const SUPPORTED_CONTAINERS: &[&str] = &[
    "matroska", "mp4", "mov", "mpegts", "webm", "avi", "asf", "wav", "flac", "mp3", "ogg", "wmv",
];

/// Business rules for individual streams
pub struct StreamClassifier;

impl StreamClassifier {
    /// Check a video stream against the support matrix
    pub fn classify_video(
        codec: &Codec,
        codec_tag: Option<CodecTag>,
        profile: Option<i32>,
    ) -> bool {
        Self::video_reason(codec, codec_tag, profile) == SupportReason::CodecAllowed
    }

    pub fn classify_audio(codec: &Codec) -> bool {
        SUPPORTED_AUDIO_CODECS.contains(codec)
    }

    pub fn classify_subtitle(codec: &Codec) -> bool {
        TEXT_SUBTITLE_CODECS.contains(codec)
    }

    /// Text subtitles can be re-encoded to srt
    pub fn is_text_subtitle(codec: &Codec) -> bool {
        TEXT_SUBTITLE_CODECS.contains(codec)
    }

    /// Bitmap subtitles can only ever be copied
    pub fn is_bitmap_subtitle(codec: &Codec) -> bool {
        BITMAP_SUBTITLE_CODECS.contains(codec)
    }

    /// Classify one stream, whatever its type
    pub fn classify(stream: &StreamDescriptor) -> ClassificationResult {
        let reason = match stream.media_type {
            MediaType::Video => Self::video_reason(&stream.codec, stream.codec_tag, stream.profile),
            MediaType::Audio => {
                if Self::classify_audio(&stream.codec) {
                    SupportReason::CodecAllowed
                } else {
                    SupportReason::CodecNotAllowed
                }
            }
            MediaType::Subtitle => Self::subtitle_reason(&stream.codec),
            MediaType::Other => SupportReason::CodecNotAllowed,
        };

        ClassificationResult {
            stream_index: stream.index,
            media_type: stream.media_type,
            supported: reason == SupportReason::CodecAllowed,
            reason,
        }
    }

    fn video_reason(
        codec: &Codec,
        codec_tag: Option<CodecTag>,
        profile: Option<i32>,
    ) -> SupportReason {
        if SUPPORTED_VIDEO_CODECS.contains(codec) {
            return SupportReason::CodecAllowed;
        }
        if *codec != Codec::Mpeg4 {
            return SupportReason::CodecNotAllowed;
        }

        // Raw MPEG-4 part 2 only plays under tags and profiles the TV knows
        if codec_tag.is_some_and(|tag| EXCLUDED_MPEG4_TAGS.contains(&tag)) {
            SupportReason::CodecTagExcluded
        } else if profile.is_some_and(|p| EXCLUDED_MPEG4_PROFILES.contains(&p)) {
            SupportReason::ProfileExcluded
        } else {
            SupportReason::CodecAllowed
        }
    }

    fn subtitle_reason(codec: &Codec) -> SupportReason {
        if Self::classify_subtitle(codec) {
            SupportReason::CodecAllowed
        } else if Self::is_bitmap_subtitle(codec) {
            SupportReason::SubtitleBitmapUnsupported
        } else {
            SupportReason::SubtitleTextUnsupported
        }
    }
}

/// Business rules for container formats
pub struct ContainerClassifier;

impl ContainerClassifier {
    /// Substring match, since probers report compound names like `mov,mp4,m4a,3gp`
    pub fn classify_container(format_name: Option<&str>) -> bool {
        match format_name {
            Some(name) if !name.is_empty() => {
                SUPPORTED_CONTAINERS.iter().any(|needle| name.contains(needle))
            }
            _ => false,
        }
    }
}

/// Build the verdict for one probed file
///
/// Streams that are neither video, audio nor subtitle are dropped before
/// classification and do not appear in the outcome.
pub fn evaluate_file(container: ContainerInfo, streams: Vec<StreamDescriptor>) -> FileOutcome {
    let container_supported =
        ContainerClassifier::classify_container(container.format_name.as_deref());

    let streams: Vec<StreamDescriptor> = streams
        .into_iter()
        .filter(|s| s.media_type.is_media())
        .collect();
    let results: Vec<ClassificationResult> =
        streams.iter().map(StreamClassifier::classify).collect();

    let all_supported = container_supported && results.iter().all(|r| r.supported);
    let can_transcode = results.iter().any(|r| r.needs_transcode());
    let has_unsupported_bitmap_subtitle = results.iter().any(|r| r.is_bitmap_subtitle());
    let has_video = streams.iter().any(|s| s.media_type == MediaType::Video);
    let has_audio = streams.iter().any(|s| s.media_type == MediaType::Audio);

    FileOutcome {
        container,
        container_supported,
        streams,
        results,
        all_supported,
        can_transcode,
        has_unsupported_bitmap_subtitle,
        has_video,
        has_audio,
    }
}
