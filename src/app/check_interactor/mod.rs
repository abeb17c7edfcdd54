// Check interactor - Analyses one file and reports its compatibility

use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::domain::model::*;
use crate::domain::rules::evaluate_file;
use crate::error::CompatResult;
use crate::output::{ReportMode, ReportWriter};
use crate::ports::*;
use crate::streams::CommandSynthesizer;
use crate::utils::PathUtils;

/// Options shared by every file of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub mode: ReportMode,
    pub show_full_path: bool,
    /// Say nothing about files that are fully supported
    pub skip_ok: bool,
    /// Say nothing about files only a bitmap subtitle keeps from playing
    pub skip_unfixable: bool,
}

impl CheckOptions {
    /// Report writer configured for these options
    pub fn writer<W: Write>(&self, out: W) -> ReportWriter<W> {
        ReportWriter::new(out, self.mode, self.show_full_path)
    }

    fn suppresses(&self, outcome: &FileOutcome) -> bool {
        // Brief mode has its own filter
        if self.mode == ReportMode::Brief {
            return false;
        }
        (self.skip_ok && outcome.all_supported) || (self.skip_unfixable && outcome.is_unfixable())
    }
}

/// What happened to a file handed to the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDisposition {
    /// Not a media extension; not counted
    Skipped,
    /// Counted, and reported unless `reported` is false
    Checked { verdict: Verdict, reported: bool },
}

/// Interactor for the single-file check use case
pub struct CheckInteractor<P: ProbePort> {
    probe: P,
    options: CheckOptions,
}

impl<P: ProbePort> CheckInteractor<P> {
    /// Create new check interactor with the injected prober
    pub fn new(probe: P, options: CheckOptions) -> Self {
        Self { probe, options }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Open, probe and classify a file
    ///
    /// The handle is released before this returns, whatever the outcome.
    pub fn evaluate(&self, path: &Path) -> CompatResult<FileOutcome> {
        let mut handle = self.probe.open(path)?;
        handle.probe_streams()?;

        let outcome = evaluate_file(handle.container(), handle.streams());
        debug!(
            path = %path.display(),
            container = outcome.container.name(),
            streams = outcome.streams.len(),
            all_supported = outcome.all_supported,
            "Classified file"
        );
        Ok(outcome)
    }

    /// Check one file, report it and count it into `summary`
    ///
    /// Only write failures on the report sink are returned; probe failures
    /// are reported and counted as errors.
    pub fn check_file<W: Write>(
        &self,
        path: &Path,
        summary: &mut Summary,
        writer: &mut ReportWriter<W>,
    ) -> io::Result<FileDisposition> {
        if !PathUtils::has_media_extension(path) {
            debug!("Skipping non-media file {}", path.display());
            return Ok(FileDisposition::Skipped);
        }

        let outcome = match self.evaluate(path) {
            Ok(outcome) => outcome,
            Err(err) => {
                info!("Probe failed for {}: {}", path.display(), err);
                writer.probe_error(path, &err)?;
                summary.record(Verdict::Error);
                return Ok(FileDisposition::Checked {
                    verdict: Verdict::Error,
                    reported: true,
                });
            }
        };

        let verdict = if outcome.all_supported {
            Verdict::Ok
        } else {
            Verdict::NotSupported
        };
        summary.record(verdict);

        if self.options.suppresses(&outcome) {
            debug!("Suppressed report for {}", path.display());
            return Ok(FileDisposition::Checked {
                verdict,
                reported: false,
            });
        }

        let suggestions = CommandSynthesizer::suggestions(path, &outcome);
        writer.file_report(path, &outcome, &suggestions)?;

        Ok(FileDisposition::Checked {
            verdict,
            reported: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{Script, ScriptedProbe};

    fn run(
        probe: ScriptedProbe,
        options: CheckOptions,
        paths: &[&str],
    ) -> (Summary, Vec<FileDisposition>, String) {
        let checker = CheckInteractor::new(probe, options);
        let mut writer = options.writer(Vec::new());
        let mut summary = Summary::new();
        let dispositions = paths
            .iter()
            .map(|p| checker.check_file(Path::new(p), &mut summary, &mut writer).unwrap())
            .collect();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        (summary, dispositions, console::strip_ansi_codes(&text).into_owned())
    }

    #[test]
    fn test_supported_file_counts_ok() {
        let probe = ScriptedProbe::new().with("good.mp4", Script::supported_mp4());
        let (summary, dispositions, text) = run(probe, CheckOptions::default(), &["/v/good.mp4"]);

        assert_eq!(summary, Summary { total: 1, ok: 1, not_supported: 0, errors: 0 });
        assert_eq!(
            dispositions,
            vec![FileDisposition::Checked { verdict: Verdict::Ok, reported: true }]
        );
        assert!(text.contains("overall: ALL TRACKS SUPPORTED"));
    }

    #[test]
    fn test_non_media_extension_is_not_counted() {
        let probe = ScriptedProbe::new();
        let counter = probe.opened();
        let (summary, dispositions, text) =
            run(probe, CheckOptions::default(), &["notes.txt", "archive.mkv.part"]);

        assert_eq!(summary, Summary::new());
        assert_eq!(dispositions, vec![FileDisposition::Skipped; 2]);
        assert!(text.is_empty());
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_open_failure_counts_error_only() {
        let probe = ScriptedProbe::new().with("broken.mkv", Script::OpenFails(-1094995529));
        let (summary, _, text) = run(probe, CheckOptions::default(), &["broken.mkv"]);

        assert_eq!(summary, Summary { total: 0, ok: 0, not_supported: 0, errors: 1 });
        assert!(text.starts_with("broken.mkv: error: "));
    }

    #[test]
    fn test_stream_info_failure_in_brief_mode() {
        let probe = ScriptedProbe::new().with("odd.mkv", Script::StreamInfoFails(-5));
        let options = CheckOptions { mode: ReportMode::Brief, ..Default::default() };
        let (summary, _, text) = run(probe, options, &["odd.mkv"]);

        assert_eq!(summary.errors, 1);
        assert_eq!(text, "odd.mkv: error: could not read stream info (-5)\n");
    }

    #[test]
    fn test_handles_are_released_on_every_path() {
        let probe = ScriptedProbe::new()
            .with("a.mkv", Script::supported_mp4())
            .with("b.mkv", Script::StreamInfoFails(-5));
        let live = probe.live_handles();
        let opened = probe.opened();
        let checker = CheckInteractor::new(probe, CheckOptions::default());

        assert!(checker.evaluate(Path::new("a.mkv")).is_ok());
        assert!(checker.evaluate(Path::new("b.mkv")).is_err());
        assert_eq!(opened.get(), 2);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_batch_continues_after_error() {
        let probe = ScriptedProbe::new()
            .with("a.mp4", Script::supported_mp4())
            .with("b.mkv", Script::OpenFails(-2))
            .with("c.avi", Script::xvid_avi());
        let (summary, _, text) = run(probe, CheckOptions::default(), &["a.mp4", "b.mkv", "c.avi"]);

        assert_eq!(summary, Summary { total: 2, ok: 1, not_supported: 1, errors: 1 });
        assert!(text.contains("b.mkv: error: "));
        assert!(text.contains("-c:v:0 libx264 -c:a:0 copy 'fixed_c.mkv'"));
    }

    #[test]
    fn test_skip_ok_still_counts() {
        let probe = ScriptedProbe::new().with("good.mp4", Script::supported_mp4());
        let options = CheckOptions { skip_ok: true, ..Default::default() };
        let (summary, dispositions, text) = run(probe, options, &["good.mp4"]);

        assert_eq!(summary.ok, 1);
        assert_eq!(
            dispositions,
            vec![FileDisposition::Checked { verdict: Verdict::Ok, reported: false }]
        );
        assert!(text.is_empty());
    }

    #[test]
    fn test_skip_unfixable_pgs_file() {
        let probe = ScriptedProbe::new().with("film.mkv", Script::pgs_mkv());
        let options = CheckOptions { skip_unfixable: true, ..Default::default() };
        let (summary, dispositions, text) = run(probe, options, &["film.mkv"]);

        assert_eq!(summary, Summary { total: 1, ok: 0, not_supported: 1, errors: 0 });
        assert_eq!(
            dispositions,
            vec![FileDisposition::Checked { verdict: Verdict::NotSupported, reported: false }]
        );
        assert!(text.is_empty());
    }

    #[test]
    fn test_skip_unfixable_keeps_transcodable_files() {
        let probe = ScriptedProbe::new().with("old.avi", Script::xvid_avi());
        let options = CheckOptions { skip_unfixable: true, ..Default::default() };
        let (_, _, text) = run(probe, options, &["old.avi"]);

        assert!(text.contains("Suggested ffmpeg command"));
    }

    #[test]
    fn test_brief_mode_ignores_skip_flags() {
        let probe = ScriptedProbe::new().with("film.mkv", Script::pgs_mkv());
        let options = CheckOptions {
            mode: ReportMode::Brief,
            skip_unfixable: true,
            ..Default::default()
        };
        let (_, _, text) = run(probe, options, &["film.mkv"]);

        assert_eq!(text, "film.mkv:[0:video:h264:und][1:subtitle:hdmv_pgs_subtitle:und]\n");
    }
}
