//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::app::CheckOptions;
use crate::output::ReportMode;

/// Arguments for a compatibility check
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Media file or directory to check
    pub input: PathBuf,

    /// Skip directories whose full path matches this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Show the full path instead of the file name
    #[arg(long)]
    pub fullpath: bool,

    /// One line per problematic file, no summary
    #[arg(long)]
    pub brief: bool,

    /// One JSON object per file, then the summary
    #[arg(long, conflicts_with = "brief")]
    pub json: bool,

    /// Don't report fully supported files
    #[arg(long)]
    pub skip_ok: bool,

    /// Don't report files only a bitmap subtitle keeps from playing
    #[arg(long)]
    pub skip_unfixable: bool,
}

impl CheckArgs {
    pub fn mode(&self) -> ReportMode {
        if self.brief {
            ReportMode::Brief
        } else if self.json {
            ReportMode::Json
        } else {
            ReportMode::Verbose
        }
    }

    pub fn options(&self) -> CheckOptions {
        CheckOptions {
            mode: self.mode(),
            show_full_path: self.fullpath,
            skip_ok: self.skip_ok,
            skip_unfixable: self.skip_unfixable,
        }
    }
}
