//! Stream mapping and remediation command module

use std::fmt;

use serde::Serialize;

use crate::domain::model::MediaType;
use crate::utils::ShellCommand;

pub mod mapper;

pub use mapper::CommandSynthesizer;

/// Tool the suggested commands invoke
pub const FFMPEG_TOOL: &str = "ffmpeg";
/// Re-encode target for unsupported video
pub const DEFAULT_VIDEO_ENCODER: &str = "libx264";
/// Re-encode target for unsupported audio
pub const DEFAULT_AUDIO_ENCODER: &str = "aac";
/// Re-encode target for unsupported text subtitles
pub const TEXT_SUBTITLE_ENCODER: &str = "srt";

/// What happens to one output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecChoice {
    /// Stream copy (lossless)
    Copy,
    /// Re-encode with the named encoder
    Encode(&'static str),
}

impl fmt::Display for CodecChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecChoice::Copy => f.write_str("copy"),
            CodecChoice::Encode(encoder) => f.write_str(encoder),
        }
    }
}

/// Codec flag for one output stream, e.g. `-c:v:0 libx264`
///
/// Only handed out by [`OutputCounters::select`], so it always names a
/// video, audio or subtitle output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecSelection {
    specifier: char,
    output_index: usize,
    choice: CodecChoice,
}

impl CodecSelection {
    /// Stream type letter: `v`, `a` or `s`
    pub fn specifier(&self) -> char {
        self.specifier
    }

    /// Index among output streams of the same type
    pub fn output_index(&self) -> usize {
        self.output_index
    }

    pub fn choice(&self) -> CodecChoice {
        self.choice
    }
}

impl fmt::Display for CodecSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-c:{}:{} {}", self.specifier, self.output_index, self.choice)
    }
}

/// Running output indices, one per stream type, all starting at 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputCounters {
    pub video: usize,
    pub audio: usize,
    pub subtitle: usize,
}

impl OutputCounters {
    /// Take the next output index for `media_type`; `None` for non-media streams
    pub fn select(
        &mut self,
        media_type: MediaType,
        choice: CodecChoice,
    ) -> Option<CodecSelection> {
        let (counter, specifier) = match media_type {
            MediaType::Video => (&mut self.video, 'v'),
            MediaType::Audio => (&mut self.audio, 'a'),
            MediaType::Subtitle => (&mut self.subtitle, 's'),
            MediaType::Other => return None,
        };
        let output_index = *counter;
        *counter += 1;
        Some(CodecSelection {
            specifier,
            output_index,
            choice,
        })
    }
}

/// Stream mapping for a transcode, before it is rendered to a command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscodePlan {
    /// One `-map 0:<type>` per stream type, in first-seen order
    pub maps: Vec<MediaType>,
    pub video: Vec<CodecSelection>,
    pub audio: Vec<CodecSelection>,
    pub subtitles: Vec<CodecSelection>,
}

impl TranscodePlan {
    /// All codec flags, grouped video, then audio, then subtitles
    pub fn selections(&self) -> impl Iterator<Item = &CodecSelection> {
        self.video.iter().chain(self.audio.iter()).chain(self.subtitles.iter())
    }
}

/// Commands offered for one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suggestions {
    pub remux: Option<ShellCommand>,
    pub transcode: Option<ShellCommand>,
}
