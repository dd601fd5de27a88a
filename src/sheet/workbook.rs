//! Workbook file I/O.
//!
//! Reading goes through `calamine` (xlsx, xls, xlsb, ods); writing always
//! produces a fresh xlsx through `rust_xlsxwriter`. Cell values keep their type
//! (text, number, boolean, date-time); styles, formulas and extra sheets are not
//! carried over.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use log::{debug, info};
use rust_xlsxwriter::{Format, Workbook};

use super::grid::{CellValue, Sheet};
use crate::error_handling::SheetError;

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const DURATION_FORMAT: &str = "[h]:mm:ss";

/// Loads the first worksheet of the workbook at `path`.
///
/// The used range is anchored at A1, so row and column indices match what a
/// spreadsheet application shows.
///
/// # Errors
///
/// Returns `SheetError::Open` if the file cannot be read or parsed, and
/// `SheetError::NoWorksheet` if it has no sheets.
pub fn load_first_sheet(path: &Path) -> Result<Sheet, SheetError> {
    let open_err = |source| SheetError::Open {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(open_err)?;
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SheetError::NoWorksheet(path.to_path_buf()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::NoWorksheet(path.to_path_buf()))?
        .map_err(open_err)?;

    let sheet = sheet_from_range(name, &range);
    info!(
        "Loaded sheet {:?} from {} ({} rows)",
        sheet.name(),
        path.display(),
        sheet.row_count()
    );
    Ok(sheet)
}

fn sheet_from_range(name: String, range: &Range<Data>) -> Sheet {
    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let mut rows = vec![Vec::new(); first_row as usize];
    for cells in range.rows() {
        let mut row = vec![CellValue::Empty; first_col as usize];
        row.extend(cells.iter().map(CellValue::from));
        rows.push(row);
    }
    Sheet::new(name, rows)
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::from(s.clone()),
            Data::Float(n) => CellValue::Number(*n),
            Data::Int(n) => CellValue::Number(*n as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) if dt.is_duration() => CellValue::Duration(dt.as_f64()),
            Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(e.to_string()),
        }
    }
}

impl Sheet {
    /// Writes this sheet as the only worksheet of a new xlsx file at `path`.
    ///
    /// Empty cells are left out. Numbers, booleans and date-times are written
    /// with their own cell type, text as strings.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::OutOfGrid` for a cell the xlsx format cannot hold
    /// and `SheetError::Save` if the workbook cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SheetError> {
        let save_err = |source| SheetError::Save {
            path: path.to_path_buf(),
            source,
        };

        let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);
        let duration_format = Format::new().set_num_format(DURATION_FORMAT);

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        if !self.name().is_empty() {
            worksheet.set_name(self.name()).map_err(save_err)?;
        }

        for (r, row) in self.rows().iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let out_of_grid = || SheetError::OutOfGrid { row: r, column: c };
                let row_num = u32::try_from(r).map_err(|_| out_of_grid())?;
                let col_num = u16::try_from(c).map_err(|_| out_of_grid())?;
                let written = match value {
                    CellValue::Empty => continue,
                    CellValue::Text(s) => worksheet.write_string(row_num, col_num, s),
                    CellValue::Number(n) => worksheet.write_number(row_num, col_num, *n),
                    CellValue::Bool(b) => worksheet.write_boolean(row_num, col_num, *b),
                    CellValue::DateTime(serial) => {
                        worksheet.write_number_with_format(row_num, col_num, *serial, &datetime_format)
                    }
                    CellValue::Duration(serial) => {
                        worksheet.write_number_with_format(row_num, col_num, *serial, &duration_format)
                    }
                };
                written.map_err(save_err)?;
            }
        }

        workbook.save(path).map_err(save_err)?;
        debug!("Saved sheet {:?} to {}", self.name(), path.display());
        Ok(())
    }
}
