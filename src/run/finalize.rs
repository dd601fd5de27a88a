//! Run finalization: statistics and saving the updated workbook.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use crate::app::print_dispatch_statistics;
use crate::dispatch::DispatchSummary;
use crate::error_handling::FailureStats;
use crate::sheet::WriteOutcome;

use super::GeocodeReport;

/// Logs the run statistics, saves the sheet and builds the report.
///
/// # Errors
///
/// Returns an error if the output workbook cannot be written. Nothing is
/// reported as a success unless the save completed.
pub(super) fn finalize_run(
    outcome: WriteOutcome,
    summary: DispatchSummary,
    stats: &FailureStats,
    total_rows: usize,
    output_path: &Path,
    start_time: Instant,
) -> Result<GeocodeReport> {
    print_dispatch_statistics(&summary, stats);

    outcome
        .sheet
        .save(output_path)
        .context("Failed to save output workbook")?;

    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    info!(
        "Run statistics: total={}, geocoded={}, failed={}, abandoned={}, written={}",
        total_rows,
        summary.geocoded(),
        summary.failed(),
        summary.abandoned(),
        outcome.rows_written
    );

    Ok(GeocodeReport {
        total_rows,
        geocoded: summary.geocoded(),
        failed: summary.failed(),
        abandoned: summary.abandoned(),
        rows_written: outcome.rows_written,
        output_path: output_path.to_path_buf(),
        elapsed_seconds,
        summary,
    })
}
