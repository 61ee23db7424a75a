//! Flat, header-keyed records from a delimited export.

use std::sync::Arc;

/// One row of a record stream. Field order follows the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub fn get(&self, name: &str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == name)?;
        self.values.get(idx).map(String::as_str)
    }

    /// Value at header position `idx`.
    pub fn value(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).map(String::as_str)
    }

    /// Non-empty value of `name`.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Header row shared by every record of the stream, whatever this row's length.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

/// Ordered record stream sharing one header row.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    headers: Arc<[String]>,
    records: Vec<Record>,
}

impl RecordTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers: headers.into(),
            records: Vec::new(),
        }
    }

    /// Build from string-like headers and rows; mostly for fixtures.
    pub fn from_rows<H, R, S>(headers: impl IntoIterator<Item = H>, rows: impl IntoIterator<Item = R>) -> Self
    where
        H: Into<String>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(headers.into_iter().map(Into::into).collect());
        for row in rows {
            table.push(row.into_iter().map(Into::into).collect());
        }
        table
    }

    pub fn push(&mut self, values: Vec<String>) {
        self.records.push(Record {
            headers: Arc::clone(&self.headers),
            values,
        });
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
