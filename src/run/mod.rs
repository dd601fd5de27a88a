//! Run orchestration.
//!
//! Wires the configuration into the workbook, the geocoder, the limiter, the
//! dispatcher and the sheet writer, then saves the result.

mod finalize;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::app::{shutdown_gracefully, spawn_progress_logger};
use crate::config::{Config, LOGGING_INTERVAL};
use crate::dispatch::{DispatchSummary, RowDispatcher};
use crate::error_handling::RunError;
use crate::geocode::Geocoder;
use crate::initialization::{init_geocoder, init_limiter};
use crate::sheet::{column_to_index, load_first_sheet, start_sheet_writer, CoordinateColumns};

use finalize::finalize_run;

/// Results of a geocoding run.
#[derive(Debug, Clone)]
pub struct GeocodeReport {
    /// Rows queued for geocoding (header and blank addresses excluded)
    pub total_rows: usize,
    /// Rows whose lookup succeeded
    pub geocoded: usize,
    /// Rows whose lookup failed
    pub failed: usize,
    /// Rows never attempted because their worker stopped early
    pub abandoned: usize,
    /// Rows where coordinates actually landed in the sheet
    pub rows_written: usize,
    /// Path of the saved workbook
    pub output_path: PathBuf,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
    /// Per-worker detail
    pub summary: DispatchSummary,
}

/// Geocodes the configured workbook against the configured HTTP service.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the workbook cannot be
/// opened or saved, or the address column has nothing to geocode
/// (`RunError::NoData`). Individual lookup failures are not errors here; they
/// are handled by the failure policy and reported in the `GeocodeReport`.
pub async fn run_geocode(config: Config) -> Result<GeocodeReport> {
    let geocoder = init_geocoder(&config)
        .await
        .context("Failed to initialize geocoder")?;
    run_geocode_with(config, Arc::new(geocoder)).await
}

/// Same as [`run_geocode`] but with a caller-supplied geocoder.
pub async fn run_geocode_with<G: Geocoder>(config: Config, geocoder: Arc<G>) -> Result<GeocodeReport> {
    let output_path = config.output_path();
    if same_file(&config.input, &output_path) {
        return Err(RunError::OutputIsInput(output_path).into());
    }
    for label in [
        &config.source_column,
        &config.longitude_column,
        &config.latitude_column,
    ] {
        column_to_index(label).context("Invalid column configuration")?;
    }

    let sheet = load_first_sheet(&config.input).context("Failed to open input workbook")?;
    let rows = sheet
        .address_rows(&config.source_column)
        .context("Failed to read address column")?;
    if rows.is_empty() {
        return Err(RunError::NoData {
            column: config.source_column.clone(),
        }
        .into());
    }
    let total_rows = rows.len();
    info!(
        "Geocoding {} rows from column {} with {} workers (max {} in flight, on failure: {:?})",
        total_rows, config.source_column, config.workers, config.max_concurrency, config.on_failure
    );

    let start_time = Instant::now();
    let limiter = init_limiter(config.max_concurrency);
    let dispatcher = RowDispatcher::new(config.workers, config.on_failure);
    let columns = CoordinateColumns {
        longitude: config.longitude_column.clone(),
        latitude: config.latitude_column.clone(),
    };
    let (writer, writer_task) = start_sheet_writer(sheet, columns);

    let cancel = CancellationToken::new();
    let logging_task = spawn_progress_logger(
        start_time,
        dispatcher.progress(),
        total_rows,
        Duration::from_secs(LOGGING_INTERVAL),
        cancel.clone(),
    );

    // The dispatcher drops every writer clone once the workers are done,
    // which lets the writer task finish.
    let summary = dispatcher
        .run(rows, geocoder, &limiter, Arc::new(writer))
        .await;
    let outcome = writer_task.await.context("Sheet writer task failed")?;

    shutdown_gracefully(cancel, Some(logging_task)).await;

    finalize_run(
        outcome,
        summary,
        &dispatcher.failure_stats(),
        total_rows,
        &output_path,
        start_time,
    )
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
