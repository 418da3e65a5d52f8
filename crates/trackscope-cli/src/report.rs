//! Report command handlers for the CLI.
//!
//! These are called from `main` after configuration is established. Any
//! fetch failure aborts the run with a single failure message; no partial
//! CSV is ever written.

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use trackscope_core::AppConfig;
use trackscope_report::{ReportCompiler, ReportFolder};

/// Generate the full report and write the CSV next to the configured
/// output directory.
///
/// # Errors
///
/// Returns an error if validation fails, any listing fetch fails, or the
/// CSV file cannot be written.
pub(crate) async fn run_generate(
    config: &AppConfig,
    folders: &[ReportFolder],
    start: NaiveDate,
    end: NaiveDate,
    output_dir: &Path,
) -> anyhow::Result<()> {
    let compiler = ReportCompiler::from_config(config)?;
    let report = compiler
        .generate(folders, start, end)
        .await
        .context("failed to generate report")?;

    let path = output_dir.join(&report.file_name);
    std::fs::write(&path, &report.csv)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!(
        "wrote {} ({} rows, {} matched / {} unmatched, {}% match rate)",
        path.display(),
        report.stats.total,
        report.stats.matched,
        report.stats.unmatched,
        report.stats.percentage()
    );
    Ok(())
}

/// Sample the selected folders and print the projected match rate.
///
/// # Errors
///
/// Returns an error if validation fails or any listing fetch fails.
pub(crate) async fn run_preview(
    config: &AppConfig,
    folders: &[ReportFolder],
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<()> {
    let compiler = ReportCompiler::from_config(config)?;
    let stats = compiler
        .preview(folders, start, end)
        .await
        .context("failed to preview matches")?;

    println!(
        "sampled {} posts: {} matched, {} unmatched ({}% projected match rate)",
        stats.total,
        stats.matched,
        stats.unmatched,
        stats.percentage()
    );
    Ok(())
}
