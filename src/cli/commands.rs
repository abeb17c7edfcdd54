//! Command implementations

use std::io;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::{GlobExcludeAdapter, ProbeLibavAdapter};
use crate::app::{CheckInteractor, ScanInteractor};
use crate::cli::args::CheckArgs;
use crate::domain::model::Summary;

/// Execute the check command
pub fn check(args: CheckArgs) -> Result<Summary> {
    info!("Checking {}", args.input.display());

    let options = args.options();
    let exclude = GlobExcludeAdapter::new(args.exclude.iter().cloned())
        .context("Invalid --exclude pattern")?;
    let probe = ProbeLibavAdapter::new()?;
    let scanner = ScanInteractor::new(CheckInteractor::new(probe, options), exclude);

    let stdout = io::stdout();
    let mut writer = options.writer(stdout.lock());
    let summary = scanner.run(&args.input, &mut writer)?;
    writer.summary(&summary)?;

    info!(
        total = summary.total,
        ok = summary.ok,
        not_supported = summary.not_supported,
        errors = summary.errors,
        "Check complete"
    );
    Ok(summary)
}
