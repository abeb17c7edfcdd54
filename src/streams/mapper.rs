//! Remux and transcode command synthesis

use std::path::Path;

use tracing::debug;

use crate::domain::model::{FileOutcome, MediaType};
use crate::domain::rules::StreamClassifier;
use crate::streams::{
    CodecChoice, OutputCounters, Suggestions, TranscodePlan, DEFAULT_AUDIO_ENCODER,
    DEFAULT_VIDEO_ENCODER, FFMPEG_TOOL, TEXT_SUBTITLE_ENCODER,
};
use crate::utils::{PathUtils, ShellCommand};

/// Builds the ffmpeg command lines offered for unsupported files
pub struct CommandSynthesizer;

impl CommandSynthesizer {
    /// Container-only fix: copy every stream into Matroska
    pub fn suggest_remux(path: &Path) -> ShellCommand {
        let mut cmd = ShellCommand::new(FFMPEG_TOOL);
        cmd.word("-i")
            .quoted(&PathUtils::bytes(path))
            .word("-map")
            .word("0")
            .word("-c")
            .word("copy")
            .quoted(&PathUtils::remux_output_name(path));
        cmd
    }

    /// Decide the mapping and per-stream codec for a transcode
    pub fn plan_transcode(outcome: &FileOutcome) -> TranscodePlan {
        let mut plan = TranscodePlan::default();
        let mut counters = OutputCounters::default();

        for (stream, result) in outcome.classified_streams() {
            let choice = match stream.media_type {
                MediaType::Video if !result.supported => {
                    CodecChoice::Encode(DEFAULT_VIDEO_ENCODER)
                }
                MediaType::Audio if !result.supported => {
                    CodecChoice::Encode(DEFAULT_AUDIO_ENCODER)
                }
                // Bitmap subtitles are copied as-is; only text can become srt
                MediaType::Subtitle
                    if !result.supported && StreamClassifier::is_text_subtitle(&stream.codec) =>
                {
                    CodecChoice::Encode(TEXT_SUBTITLE_ENCODER)
                }
                _ => CodecChoice::Copy,
            };
            let Some(selection) = counters.select(stream.media_type, choice) else {
                continue;
            };

            if !plan.maps.contains(&stream.media_type) {
                plan.maps.push(stream.media_type);
            }
            match stream.media_type {
                MediaType::Video => plan.video.push(selection),
                MediaType::Audio => plan.audio.push(selection),
                _ => plan.subtitles.push(selection),
            }
        }

        plan
    }

    /// Re-encode whatever the TV cannot play into `fixed_<name>.mkv`
    pub fn suggest_transcode(path: &Path, outcome: &FileOutcome) -> ShellCommand {
        let plan = Self::plan_transcode(outcome);
        let mut cmd = ShellCommand::new(FFMPEG_TOOL);
        cmd.word("-i").quoted(&PathUtils::bytes(path));

        for media_type in &plan.maps {
            if let Some(letter) = media_type.specifier() {
                cmd.word("-map").word(&format!("0:{}", letter));
            }
        }
        for selection in plan.selections() {
            cmd.word(&selection.to_string());
        }
        cmd.quoted(&PathUtils::transcode_output_name(path));

        cmd
    }

    /// The commands worth showing for this outcome
    pub fn suggestions(path: &Path, outcome: &FileOutcome) -> Suggestions {
        let remux = outcome
            .should_suggest_remux()
            .then(|| Self::suggest_remux(path));
        let transcode = outcome
            .should_suggest_transcode()
            .then(|| Self::suggest_transcode(path, outcome));

        debug!(
            path = %path.display(),
            remux = remux.is_some(),
            transcode = transcode.is_some(),
            "Built remediation suggestions"
        );

        Suggestions { remux, transcode }
    }
}
