//! Sheet writer task.
//!
//! The sheet is owned by one Tokio task; workers hand it updates through a
//! channel instead of sharing the grid behind a lock.

use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::grid::{CoordinateColumns, Sheet};
use crate::dispatch::CoordinateSink;
use crate::geocode::Coordinates;

/// A geocoding result on its way back to the sheet.
#[derive(Debug, Clone, Copy)]
pub struct CellUpdate {
    pub row_index: usize,
    pub coordinates: Coordinates,
}

/// What the writer task hands back once every sender is gone.
#[derive(Debug)]
pub struct WriteOutcome {
    /// The sheet with all received updates applied
    pub sheet: Sheet,
    /// Rows where at least one coordinate cell was written
    pub rows_written: usize,
}

/// Sending half of the writer task; this is the production sink.
#[derive(Debug, Clone)]
pub struct SheetWriter {
    tx: mpsc::UnboundedSender<CellUpdate>,
}

impl CoordinateSink for SheetWriter {
    fn write(&self, row_index: usize, coordinates: Coordinates) {
        if self
            .tx
            .send(CellUpdate {
                row_index,
                coordinates,
            })
            .is_err()
        {
            warn!("Sheet writer is gone, dropping result for row {row_index}");
        }
    }
}

/// Starts the task that owns `sheet` and applies coordinate updates to it.
///
/// The task ends when every `SheetWriter` clone has been dropped, returning
/// the updated sheet through the join handle.
pub fn start_sheet_writer(
    mut sheet: Sheet,
    columns: CoordinateColumns,
) -> (SheetWriter, JoinHandle<WriteOutcome>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<CellUpdate>();

    let handle = tokio::spawn(async move {
        let mut rows_written = 0usize;
        while let Some(update) = rx.recv().await {
            if sheet.write_coordinates(update.row_index, update.coordinates, &columns) {
                rows_written += 1;
                debug!("Row {} updated", update.row_index);
            } else {
                warn!(
                    "Row {} has no {}/{} cells, coordinates not written",
                    update.row_index, columns.longitude, columns.latitude
                );
            }
        }
        debug!("Sheet writer channel closed after {rows_written} rows");
        WriteOutcome {
            sheet,
            rows_written,
        }
    });

    (SheetWriter { tx }, handle)
}
