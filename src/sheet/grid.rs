//! In-memory worksheet: rows of typed cells addressed by row index and column label.

use std::fmt;

use log::debug;

use super::column::column_to_index;
use crate::config::{COORDINATE_PRECISION, DEFAULT_LATITUDE_COLUMN, DEFAULT_LONGITUDE_COLUMN};
use crate::dispatch::AddressRow;
use crate::error_handling::SheetError;
use crate::geocode::Coordinates;

/// Columns that receive geocoding results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateColumns {
    pub longitude: String,
    pub latitude: String,
}

impl Default for CoordinateColumns {
    fn default() -> Self {
        CoordinateColumns {
            longitude: DEFAULT_LONGITUDE_COLUMN.to_string(),
            latitude: DEFAULT_LATITUDE_COLUMN.to_string(),
        }
    }
}

/// Formats a coordinate the way it is written back: fixed point, 6 decimals.
pub fn format_coordinate(value: f64) -> String {
    format!("{:.*}", COORDINATE_PRECISION, value)
}

/// Value of one cell, keeping the type it was read with.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excel serial date-time
    DateTime(f64),
    /// Excel serial duration, in days
    Duration(f64),
}

impl CellValue {
    /// True for empty cells and empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) | CellValue::DateTime(n) | CellValue::Duration(n) => {
                write!(f, "{n}")
            }
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::from(s.to_string())
    }
}

/// A single worksheet. Row 0 is the header row.
///
/// Rows may have different lengths; a cell beyond the end of its row does not
/// exist and cannot be written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Sheet {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Returns the cell at `row_index` in column `label`, if it exists.
    pub fn cell(&self, row_index: usize, label: &str) -> Option<&CellValue> {
        let column = column_to_index(label).ok()?;
        self.rows.get(row_index).and_then(|row| row.get(column))
    }

    /// Returns the cell at `row_index` in column `label` as displayed text.
    pub fn text(&self, row_index: usize, label: &str) -> Option<String> {
        self.cell(row_index, label).map(CellValue::to_string)
    }

    /// Returns one value per row for column `label`, header included.
    ///
    /// Rows that are too short yield an empty string, so the position of a
    /// value is always its row index.
    pub fn column_values(&self, label: &str) -> Result<Vec<String>, SheetError> {
        let column = column_to_index(label)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(column).map(CellValue::to_string).unwrap_or_default())
            .collect())
    }

    /// Returns the rows to geocode: every non-header row with a non-blank address.
    pub fn address_rows(&self, label: &str) -> Result<Vec<AddressRow>, SheetError> {
        let values = self.column_values(label)?;
        let rows = values
            .into_iter()
            .enumerate()
            .skip(1)
            .filter_map(|(row_index, value)| {
                let address = value.trim();
                if address.is_empty() {
                    debug!("Row {row_index}: no address in column {label}, skipping");
                    None
                } else {
                    Some(AddressRow::new(row_index, address))
                }
            })
            .collect();
        Ok(rows)
    }

    /// Replaces the value of an existing cell with text.
    ///
    /// Does nothing when the row, the label, or the column is out of range for
    /// that row. Returns whether a cell was changed.
    pub fn write_cell(&mut self, row_index: usize, label: &str, value: &str) -> bool {
        let Ok(column) = column_to_index(label) else {
            return false;
        };
        match self.rows.get_mut(row_index).and_then(|row| row.get_mut(column)) {
            Some(cell) => {
                *cell = CellValue::Text(value.to_string());
                true
            }
            None => false,
        }
    }

    /// Writes longitude and latitude into their columns on `row_index`.
    ///
    /// Returns whether at least one of the two cells was written.
    pub fn write_coordinates(
        &mut self,
        row_index: usize,
        coordinates: Coordinates,
        columns: &CoordinateColumns,
    ) -> bool {
        let lng = self.write_cell(
            row_index,
            &columns.longitude,
            &format_coordinate(coordinates.longitude),
        );
        let lat = self.write_cell(
            row_index,
            &columns.latitude,
            &format_coordinate(coordinates.latitude),
        );
        lng || lat
    }
}
