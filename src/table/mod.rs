//! Tabular source adapters.
//!
//! - zero-indexed grid over spreadsheet-like sources (`grid`)
//! - header-keyed record stream over CSV exports (`records`)

pub mod grid;
pub mod records;

pub use grid::*;
pub use records::*;
