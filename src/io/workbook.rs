//! Spreadsheet workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) as grids.
//!
//! One worksheet is materialized into a `CellGrid` addressed from A1, so
//! layouts keep the row/column offsets of the sheet as seen in a spreadsheet
//! application, whatever the used range of the sheet is.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::NaiveDate;
use tracing::info;

use crate::error::AppError;
use crate::series::date_from_serial;
use crate::table::{CellGrid, CellValue, Grid};

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// `true` when `path` names a workbook rather than delimited text.
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| WORKBOOK_EXTENSIONS.iter().any(|w| ext.eq_ignore_ascii_case(w)))
}

/// Classify one workbook cell. Empty and error cells are absent.
pub fn cell_from_data(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty | Data::Error(_) | Data::DurationIso(_) => None,
        Data::Int(v) => Some(CellValue::Number(*v as f64)),
        Data::Float(v) if v.is_finite() => Some(CellValue::Number(*v)),
        Data::Float(_) => None,
        Data::Bool(b) => Some(CellValue::Text(b.to_string())),
        Data::String(s) => CellValue::parse(s),
        Data::DateTime(dt) => date_from_serial(dt.as_f64()).map(CellValue::Date),
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(CellValue::Date),
    }
}

/// Lay out a worksheet range on an A1-anchored grid.
pub fn grid_from_range(range: &Range<Data>) -> CellGrid {
    let Some((start_row, start_col)) = range.start() else {
        return CellGrid::default();
    };
    let (start_row, start_col) = (start_row as usize, start_col as usize);
    let (height, width) = range.get_size();

    let mut rows = vec![vec![None; start_col + width]; start_row + height];
    for (row, col, data) in range.cells() {
        rows[start_row + row][start_col + col] = cell_from_data(data);
    }
    CellGrid::from_rows(rows)
}

/// Load one worksheet. Without a sheet name the first worksheet is used.
pub fn load_workbook_grid(path: &Path, sheet: Option<&str>) -> Result<CellGrid, AppError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::io(format!("Failed to open workbook '{}': {e}", path.display())))?;

    let name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| AppError::io(format!("Workbook '{}' has no sheets", path.display())))?,
    };
    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| AppError::io(format!("Failed to read sheet '{name}' of '{}': {e}", path.display())))?;

    let grid = grid_from_range(&range);
    info!(path = %path.display(), sheet = %name, rows = grid.row_count(), cols = grid.col_count(), "read workbook sheet");
    Ok(grid)
}
