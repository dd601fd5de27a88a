//! Spreadsheet access.
//!
//! This module provides:
//! - Column label conversion (`column_to_index`, `index_to_column`)
//! - The in-memory `Sheet` with column extraction and cell updates
//! - Loading the first worksheet of a workbook and saving a new one
//! - The writer task that owns the sheet while workers are running

mod column;
mod grid;
mod workbook;
mod writer;

// Re-export public API
pub use column::{column_to_index, index_to_column};
pub use grid::{format_coordinate, CellValue, CoordinateColumns, Sheet};
pub use workbook::load_first_sheet;
pub use writer::{start_sheet_writer, CellUpdate, SheetWriter, WriteOutcome};
