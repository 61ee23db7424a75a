//! Zero-indexed grid access over spreadsheet-like sources.
//!
//! A grid is addressed as `(col, row)` starting at `0`, whatever the native
//! convention of the file it came from. Absent and empty cells are both `None`,
//! never `0` or `""`, so null handling downstream does not depend on the source.

use chrono::NaiveDate;

/// Calendar date formats recognized in text cells.
const DATE_FMTS: [&str; 4] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// A non-empty cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl CellValue {
    /// Classify raw cell text: empty is absent, then number, then calendar date,
    /// otherwise text.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().trim_start_matches('\u{feff}');
        if s.is_empty() {
            return None;
        }
        if let Ok(v) = s.parse::<f64>() {
            if v.is_finite() {
                return Some(CellValue::Number(v));
            }
        }
        for fmt in DATE_FMTS {
            if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
                return Some(CellValue::Date(d));
            }
        }
        Some(CellValue::Text(s.to_string()))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading of the cell. Text that does not parse is `None`.
    pub fn as_number(&self) -> Option<f64> {
        let v = match self {
            CellValue::Number(v) => *v,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Date(_) => return None,
        };
        v.is_finite().then_some(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

/// Rectangular, zero-indexed view over a tabular source.
pub trait Grid {
    fn row_count(&self) -> usize;
    fn col_count(&self) -> usize;
    fn cell(&self, col: usize, row: usize) -> Option<&CellValue>;

    fn row(&self, row: usize) -> Vec<Option<&CellValue>> {
        (0..self.col_count()).map(|col| self.cell(col, row)).collect()
    }

    fn column(&self, col: usize) -> Vec<Option<&CellValue>> {
        (0..self.row_count()).map(|row| self.cell(col, row)).collect()
    }
}

/// In-memory grid. Ragged input rows are padded with absent cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellGrid {
    rows: Vec<Vec<Option<CellValue>>>,
    n_cols: usize,
}

impl CellGrid {
    pub fn from_rows(rows: Vec<Vec<Option<CellValue>>>) -> Self {
        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, n_cols }
    }

    /// Build from raw text rows, classifying each cell with [`CellValue::parse`].
    pub fn from_text_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|s| CellValue::parse(s.as_ref())).collect())
            .collect();
        Self::from_rows(rows)
    }
}

impl Grid for CellGrid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn col_count(&self) -> usize {
        self.n_cols
    }

    fn cell(&self, col: usize, row: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(col)?.as_ref()
    }
}

/// Where headers, labels and data sit inside a grid.
///
/// Source variants differ only by these offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Row holding the series headers.
    pub header_row: usize,
    /// First row holding data values.
    pub data_start_row: usize,
    /// Column holding row labels (dates, country names).
    pub label_col: usize,
    /// First column holding data values.
    pub data_start_col: usize,
}

impl GridLayout {
    /// BIS total credit workbook, sheet "Quarterly Series": headers in row 0,
    /// three metadata rows, dates in column 0.
    pub const BIS_QUARTERLY: Self = Self {
        header_row: 0,
        data_start_row: 4,
        label_col: 0,
        data_start_col: 1,
    };

    /// World Bank indicator sheet "Data": years in row 3 from column 4,
    /// country names in column 0.
    pub const WORLD_BANK: Self = Self {
        header_row: 3,
        data_start_row: 4,
        label_col: 0,
        data_start_col: 4,
    };

    /// Header text of every column, in source order.
    pub fn headers<'a, G: Grid + ?Sized>(&self, grid: &'a G) -> Vec<Option<&'a str>> {
        (0..grid.col_count())
            .map(|col| grid.cell(col, self.header_row).and_then(CellValue::as_text))
            .collect()
    }

    /// Cells of `col` from the first data row down.
    pub fn column_values<'a, G: Grid + ?Sized>(&self, grid: &'a G, col: usize) -> Vec<Option<&'a CellValue>> {
        (self.data_start_row..grid.row_count())
            .map(|row| grid.cell(col, row))
            .collect()
    }

    /// Cells of `row` from the first data column rightwards.
    pub fn row_values<'a, G: Grid + ?Sized>(&self, grid: &'a G, row: usize) -> Vec<Option<&'a CellValue>> {
        (self.data_start_col..grid.col_count())
            .map(|col| grid.cell(col, row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_are_absent() {
        let grid = CellGrid::from_text_rows(vec![vec!["a", "", " "], vec!["1.5"]]);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 3);
        assert_eq!(grid.cell(0, 0), Some(&CellValue::Text("a".to_string())));
        assert_eq!(grid.cell(1, 0), None);
        assert_eq!(grid.cell(2, 0), None);
        // Padded and out-of-range cells are absent too.
        assert_eq!(grid.cell(2, 1), None);
        assert_eq!(grid.cell(9, 9), None);
        assert_eq!(grid.cell(0, 1), Some(&CellValue::Number(1.5)));
    }

    #[test]
    fn classifies_dates_and_text() {
        let d = NaiveDate::from_ymd_opt(1999, 3, 31).unwrap();
        assert_eq!(CellValue::parse("1999-03-31"), Some(CellValue::Date(d)));
        assert_eq!(CellValue::parse("31.03.1999"), Some(CellValue::Date(d)));
        assert_eq!(
            CellValue::parse("2020-Q2"),
            Some(CellValue::Text("2020-Q2".to_string()))
        );
        assert_eq!(CellValue::parse("NaN").and_then(|c| c.as_number()), None);
    }

    #[test]
    fn row_and_column_accessors() {
        let grid = CellGrid::from_text_rows(vec![vec!["h0", "h1"], vec!["1", "2"], vec!["3", ""]]);
        let col = grid.column(1);
        assert_eq!(col.len(), 3);
        assert_eq!(col[2], None);
        let row = grid.row(1);
        assert_eq!(row, vec![Some(&CellValue::Number(1.0)), Some(&CellValue::Number(2.0))]);
    }

    #[test]
    fn layout_slices_data_region() {
        let grid = CellGrid::from_text_rows(vec![
            vec!["Period", "A - x"],
            vec!["meta", "meta"],
            vec!["1999-03-31", "10"],
        ]);
        let layout = GridLayout {
            header_row: 0,
            data_start_row: 2,
            label_col: 0,
            data_start_col: 1,
        };
        assert_eq!(layout.headers(&grid), vec![Some("Period"), Some("A - x")]);
        assert_eq!(layout.column_values(&grid, 1), vec![Some(&CellValue::Number(10.0))]);
        assert_eq!(layout.row_values(&grid, 2), vec![Some(&CellValue::Number(10.0))]);
    }
}
