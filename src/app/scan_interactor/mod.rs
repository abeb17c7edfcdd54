// Scan interactor - Checks a single file or every file under a directory

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::app::check_interactor::CheckInteractor;
use crate::domain::model::Summary;
use crate::error::{CompatError, CompatResult};
use crate::output::ReportWriter;
use crate::ports::*;

/// Interactor for the scan use case
pub struct ScanInteractor<P: ProbePort, E: ExcludePort> {
    checker: CheckInteractor<P>,
    exclude: E,
}

impl<P: ProbePort, E: ExcludePort> ScanInteractor<P, E> {
    /// Create new scan interactor
    pub fn new(checker: CheckInteractor<P>, exclude: E) -> Self {
        Self { checker, exclude }
    }

    /// Check `input`, recursing into it when it is a directory
    ///
    /// Fails only when `input` itself cannot be examined, or on write errors.
    pub fn run<W: Write>(
        &self,
        input: &Path,
        writer: &mut ReportWriter<W>,
    ) -> CompatResult<Summary> {
        let metadata = fs::metadata(input).map_err(|e| CompatError::StatFailure {
            path: input.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut summary = Summary::new();
        if metadata.is_file() {
            self.checker.check_file(input, &mut summary, writer)?;
        } else if metadata.is_dir() {
            info!("Scanning directory {}", input.display());
            self.scan_directory(input, &mut summary, writer)?;
        } else {
            return Err(CompatError::InvalidInput {
                path: input.to_path_buf(),
            });
        }

        Ok(summary)
    }

    /// Walk `dir` depth-first in name order, pruning excluded directories
    pub fn scan_directory<W: Write>(
        &self,
        dir: &Path,
        summary: &mut Summary,
        writer: &mut ReportWriter<W>,
    ) -> io::Result<()> {
        let walker = WalkDir::new(dir)
            .follow_links(true)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let excluded = entry.depth() > 0
                    && entry.file_type().is_dir()
                    && self.exclude.is_excluded(entry.path());
                if excluded {
                    debug!("Excluded {}", entry.path().display());
                }
                !excluded
            });

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    self.checker.check_file(entry.path(), summary, writer)?;
                }
                Ok(_) => {}
                Err(err) => Self::report_walk_error(err),
            }
        }

        Ok(())
    }

    fn report_walk_error(err: walkdir::Error) {
        let Some(path) = err.path().map(Path::to_path_buf) else {
            warn!("Traversal error: {}", err);
            return;
        };
        if err.loop_ancestor().is_some() {
            debug!("Skipping symlink loop at {}", path.display());
            return;
        }

        let message = err
            .io_error()
            .map(|e| e.to_string())
            .unwrap_or_else(|| err.to_string());
        if path.is_dir() {
            // Listing failed; keep going with the siblings
            eprintln!("{}", CompatError::DirectoryOpenFailure { path, message });
        } else {
            debug!("{}", CompatError::StatFailure { path, message });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::TempDir;

    use super::*;
    use crate::adapters::GlobExcludeAdapter;
    use crate::app::check_interactor::CheckOptions;
    use crate::app::test_support::{Script, ScriptedProbe};
    use crate::output::ReportMode;

    fn tree(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            File::create(path).unwrap();
        }
        dir
    }

    fn scanner(
        probe: ScriptedProbe,
        patterns: Vec<String>,
    ) -> ScanInteractor<ScriptedProbe, GlobExcludeAdapter> {
        let options = CheckOptions {
            mode: ReportMode::Brief,
            show_full_path: false,
            ..Default::default()
        };
        ScanInteractor::new(
            CheckInteractor::new(probe, options),
            GlobExcludeAdapter::new(patterns).unwrap(),
        )
    }

    fn scan(
        scanner: &ScanInteractor<ScriptedProbe, GlobExcludeAdapter>,
        input: &Path,
    ) -> (Summary, String) {
        let mut writer = scanner.checker.options().writer(Vec::new());
        let summary = scanner.run(input, &mut writer).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        (summary, console::strip_ansi_codes(&text).into_owned())
    }

    #[test]
    fn test_recursive_scan_in_name_order() {
        let dir = tree(&["b/old.avi", "a/film.mkv", "a/good.mp4", "readme.txt"]);
        let probe = ScriptedProbe::new()
            .with("old.avi", Script::xvid_avi())
            .with("film.mkv", Script::pgs_mkv())
            .with("good.mp4", Script::supported_mp4());

        let (summary, text) = scan(&scanner(probe, vec![]), dir.path());

        assert_eq!(summary, Summary { total: 3, ok: 1, not_supported: 2, errors: 0 });
        let film = text.find("film.mkv:").unwrap();
        let old = text.find("old.avi:").unwrap();
        assert!(film < old);
    }

    #[test]
    fn test_excluded_directory_is_pruned() {
        let dir = tree(&["keep/old.avi", "skip/deeper/film.mkv"]);
        let probe = ScriptedProbe::new()
            .with("old.avi", Script::xvid_avi())
            .with("film.mkv", Script::pgs_mkv());
        let pattern = format!("{}/skip", dir.path().display());

        let (summary, text) = scan(&scanner(probe, vec![pattern]), dir.path());

        assert_eq!(summary.total, 1);
        assert!(!text.contains("film.mkv"));
    }

    #[test]
    fn test_star_pattern_prunes_nested_directories() {
        let dir = tree(&["films/old.avi", "films/extras/film.mkv", "extras/good.mp4"]);
        let probe = ScriptedProbe::new()
            .with("old.avi", Script::xvid_avi())
            .with("film.mkv", Script::pgs_mkv())
            .with("good.mp4", Script::supported_mp4());

        let (summary, text) = scan(&scanner(probe, vec!["*/extras".to_string()]), dir.path());

        assert_eq!(summary.total, 1);
        assert!(text.starts_with("old.avi:"));
    }

    #[test]
    fn test_exclusion_does_not_apply_to_files() {
        let dir = tree(&["old.avi"]);
        let probe = ScriptedProbe::new().with("old.avi", Script::xvid_avi());

        let (summary, _) = scan(&scanner(probe, vec!["**/old.avi".to_string()]), dir.path());

        assert_eq!(summary.total, 1);
    }

    #[test]
    fn test_unreadable_file_is_an_error_and_scan_continues() {
        let dir = tree(&["a.mkv", "b.mp4"]);
        let probe = ScriptedProbe::new().with("b.mp4", Script::supported_mp4());

        let (summary, text) = scan(&scanner(probe, vec![]), dir.path());

        assert_eq!(summary, Summary { total: 1, ok: 1, not_supported: 0, errors: 1 });
        assert!(text.starts_with("a.mkv: error: could not open (-1094995529)"));
    }

    #[test]
    fn test_single_file_input() {
        let dir = tree(&["old.avi"]);
        let probe = ScriptedProbe::new().with("old.avi", Script::xvid_avi());

        let (summary, text) = scan(&scanner(probe, vec![]), &dir.path().join("old.avi"));

        assert_eq!(summary.not_supported, 1);
        assert!(text.starts_with("old.avi:"));
    }

    #[test]
    fn test_single_non_media_file_is_skipped() {
        let dir = tree(&["notes.txt"]);
        let scanner = scanner(ScriptedProbe::new(), vec![]);
        let (summary, text) = scan(&scanner, &dir.path().join("notes.txt"));

        assert_eq!(summary, Summary::new());
        assert!(text.is_empty());
    }

    #[test]
    fn test_missing_input_is_a_stat_failure() {
        let dir = tree(&[]);
        let scanner = scanner(ScriptedProbe::new(), vec![]);
        let mut writer = scanner.checker.options().writer(Vec::new());

        let err = scanner.run(&dir.path().join("gone"), &mut writer).unwrap_err();
        assert!(matches!(err, CompatError::StatFailure { .. }));
        assert!(err.to_string().starts_with("Could not stat '"));
    }
}
