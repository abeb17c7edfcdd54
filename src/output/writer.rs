//! Report writing for checked files

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::domain::model::{FileOutcome, StreamDescriptor, Summary, SupportReason};
use crate::error::CompatError;
use crate::output::{bad, good, status, verdict, warn, ReportMode};
use crate::streams::Suggestions;
use crate::utils::{PathUtils, ShellCommand};

const SEPARATOR: &str = "----------------";

/// Writes per-file reports and the final summary to any sink
pub struct ReportWriter<W: Write> {
    out: W,
    mode: ReportMode,
    show_full_path: bool,
}

#[derive(Serialize)]
struct StreamRecord<'a> {
    #[serde(flatten)]
    stream: &'a StreamDescriptor,
    supported: bool,
    reason: SupportReason,
}

#[derive(Serialize)]
struct FileRecord<'a> {
    path: Cow<'a, str>,
    container: &'a str,
    container_supported: bool,
    streams: Vec<StreamRecord<'a>>,
    all_supported: bool,
    can_transcode: bool,
    has_unsupported_bitmap_subtitle: bool,
    remux_command: Option<Cow<'a, str>>,
    transcode_command: Option<Cow<'a, str>>,
}

#[derive(Serialize)]
struct ErrorRecord<'a> {
    path: Cow<'a, str>,
    error: &'static str,
    code: Option<i32>,
    message: String,
}

#[derive(Serialize)]
struct SummaryRecord<'a> {
    summary: &'a Summary,
}

impl<W: Write> ReportWriter<W> {
    /// Create a new report writer
    pub fn new(out: W, mode: ReportMode, show_full_path: bool) -> Self {
        Self {
            out,
            mode,
            show_full_path,
        }
    }

    /// Give back the underlying sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Report one analysed file
    pub fn file_report(
        &mut self,
        path: &Path,
        outcome: &FileOutcome,
        suggestions: &Suggestions,
    ) -> io::Result<()> {
        match self.mode {
            ReportMode::Verbose => self.verbose_report(path, outcome, suggestions),
            ReportMode::Brief => self.brief_report(path, outcome),
            ReportMode::Json => self.json_report(path, outcome, suggestions),
        }
    }

    /// Report a file that could not be probed
    pub fn probe_error(&mut self, path: &Path, err: &CompatError) -> io::Result<()> {
        match self.mode {
            ReportMode::Verbose => {
                self.write_name(path)?;
                writeln!(self.out, ": {}", warn(format!("error: {}", err.detail())))
            }
            ReportMode::Brief => {
                let what = match err {
                    CompatError::StreamInfoFailure { .. } => "could not read stream info",
                    _ => "could not open",
                };
                let code = err.code().unwrap_or_default();
                self.write_name(path)?;
                writeln!(self.out, ": {}", warn(format!("error: {} ({})", what, code)))
            }
            ReportMode::Json => {
                let record = ErrorRecord {
                    path: path.to_string_lossy(),
                    error: match err {
                        CompatError::OpenFailure { .. } => "open-failure",
                        CompatError::StreamInfoFailure { .. } => "stream-info-failure",
                        _ => "error",
                    },
                    code: err.code(),
                    message: err.detail(),
                };
                self.json_line(&record)
            }
        }
    }

    /// Print the run totals; brief mode prints none
    pub fn summary(&mut self, summary: &Summary) -> io::Result<()> {
        match self.mode {
            ReportMode::Brief => Ok(()),
            ReportMode::Json => self.json_line(&SummaryRecord { summary }),
            ReportMode::Verbose => {
                writeln!(self.out, "\n--- Summary ---")?;
                writeln!(self.out, "Total checked: {}", summary.total)?;
                writeln!(self.out, "{}", good(format!("OK: {}", summary.ok)))?;
                let not_supported = format!("NOT SUPPORTED: {}", summary.not_supported);
                writeln!(self.out, "{}", bad(not_supported))?;
                writeln!(self.out, "{}", warn(format!("Errors: {}", summary.errors)))
            }
        }
    }

    fn verbose_report(
        &mut self,
        path: &Path,
        outcome: &FileOutcome,
        suggestions: &Suggestions,
    ) -> io::Result<()> {
        writeln!(self.out, "{}\n", SEPARATOR)?;
        self.write_name(path)?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "  container: {} | {}",
            outcome.container.name(),
            status(outcome.container_supported)
        )?;

        for (stream, result) in outcome.classified_streams() {
            writeln!(
                self.out,
                "    [{}] {} | {} | {} | {}",
                stream.index,
                stream.media_type,
                stream.codec,
                stream.language,
                status(result.supported)
            )?;
            if result.is_bitmap_subtitle() {
                writeln!(
                    self.out,
                    "{}",
                    warn(format!(
                        "  Note: Subtitle stream {} ({}) is bitmap-based and cannot be \
                         converted to srt. It will be copied as-is (may not be supported \
                         on your TV).",
                        stream.index, stream.codec
                    ))
                )?;
            }
        }

        let overall = if outcome.all_supported {
            "ALL TRACKS SUPPORTED"
        } else {
            "SOME TRACKS UNSUPPORTED"
        };
        writeln!(self.out, "  overall: {}", verdict(overall, outcome.all_supported))?;

        if let Some(remux) = &suggestions.remux {
            write!(self.out, "\n  Suggested remuxing command:\n    ")?;
            self.out.write_all(remux.as_bytes())?;
            writeln!(self.out)?;
            writeln!(
                self.out,
                "{}",
                warn(
                    "    (This changes only the container; \
                     streams are copied without re-encoding)"
                )
            )?;
        }
        if let Some(transcode) = &suggestions.transcode {
            write!(self.out, "\n  Suggested ffmpeg command:\n    ")?;
            self.out.write_all(transcode.as_bytes())?;
            writeln!(self.out)?;
        }

        writeln!(self.out)
    }

    fn brief_report(&mut self, path: &Path, outcome: &FileOutcome) -> io::Result<()> {
        if outcome.all_supported {
            return Ok(());
        }

        let mut line = String::new();
        if !outcome.container_supported {
            line.push_str(&bad(format!("[container:{}]", outcome.container.name())).to_string());
        }
        for (stream, result) in outcome.classified_streams() {
            let tag = format!(
                "[{}:{}:{}:{}]",
                stream.index, stream.media_type, stream.codec, stream.language
            );
            line.push_str(&verdict(tag, result.supported).to_string());
        }

        self.write_name(path)?;
        writeln!(self.out, ":{}", line)
    }

    fn json_report(
        &mut self,
        path: &Path,
        outcome: &FileOutcome,
        suggestions: &Suggestions,
    ) -> io::Result<()> {
        let record = FileRecord {
            path: path.to_string_lossy(),
            container: outcome.container.name(),
            container_supported: outcome.container_supported,
            streams: outcome
                .classified_streams()
                .map(|(stream, result)| StreamRecord {
                    stream,
                    supported: result.supported,
                    reason: result.reason,
                })
                .collect(),
            all_supported: outcome.all_supported,
            can_transcode: outcome.can_transcode,
            has_unsupported_bitmap_subtitle: outcome.has_unsupported_bitmap_subtitle,
            remux_command: suggestions.remux.as_ref().map(ShellCommand::to_string_lossy),
            transcode_command: suggestions.transcode.as_ref().map(ShellCommand::to_string_lossy),
        };
        self.json_line(&record)
    }

    /// File name or full path, byte for byte
    fn write_name(&mut self, path: &Path) -> io::Result<()> {
        self.out.write_all(&PathUtils::display_name(path, self.show_full_path))
    }

    fn json_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)
    }
}
