//! File loaders for the three inputs.
//!
//! This module is responsible for turning files on disk into in-memory tables:
//!
//! - long CSV export -> `RecordTable` (header row + one record per series)
//! - workbook sheet, or a sheet exported as delimited text -> `CellGrid`
//! - population JSON -> `PopulationDataset`
//!
//! Sources are materialized whole before any extraction runs. A file that
//! cannot be opened or parsed is an error here; deciding whether that error is
//! fatal is up to the caller.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use crate::error::AppError;
use crate::io::workbook::{is_workbook, load_workbook_grid};
use crate::population::PopulationDataset;
use crate::table::{CellGrid, Grid, RecordTable};

fn open(path: &Path, what: &str) -> Result<File, AppError> {
    File::open(path).map_err(|e| AppError::io(format!("Failed to open {what} '{}': {e}", path.display())))
}

/// Load a long-format CSV export (first row is the header).
pub fn load_record_table(path: &Path) -> Result<RecordTable, AppError> {
    let table = read_record_table(open(path, "CSV")?)
        .map_err(|e| AppError::io(format!("Failed to read CSV '{}': {e}", path.display())))?;
    info!(path = %path.display(), records = table.len(), fields = table.headers().len(), "read record stream");
    Ok(table)
}

/// Parse a header-first CSV stream into records.
pub fn read_record_table<R: Read>(reader: R) -> Result<RecordTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()?
        .iter()
        // Excel writes UTF-8 CSVs with a BOM on the first header.
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut table = RecordTable::new(headers);
    for result in reader.records() {
        let record = result?;
        table.push(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}

/// Load a grid source into a zero-indexed grid.
///
/// Workbooks are read through `calamine` (`sheet` picks the worksheet); any
/// other file is read as delimited text and `sheet` is ignored.
pub fn load_grid(path: &Path, sheet: Option<&str>) -> Result<CellGrid, AppError> {
    if is_workbook(path) {
        return load_workbook_grid(path, sheet);
    }
    let grid = read_grid(open(path, "grid")?)
        .map_err(|e| AppError::io(format!("Failed to read grid '{}': {e}", path.display())))?;
    info!(path = %path.display(), rows = grid.row_count(), cols = grid.col_count(), "read grid");
    Ok(grid)
}

/// Parse delimited text without header handling; every line is a grid row.
pub fn read_grid<R: Read>(reader: R) -> Result<CellGrid, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    Ok(CellGrid::from_text_rows(rows))
}

/// Load the population JSON `{ "<country>": [...], "times": [...] }`.
pub fn load_population_json(path: &Path) -> Result<PopulationDataset, AppError> {
    let file = open(path, "population JSON")?;
    let dataset: PopulationDataset = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::io(format!("Invalid population JSON '{}': {e}", path.display())))?;
    info!(path = %path.display(), countries = dataset.countries.len(), times = dataset.times.len(), "read population");
    Ok(dataset)
}
