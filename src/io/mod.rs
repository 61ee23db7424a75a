//! Input/output helpers.
//!
//! - CSV/grid/population loaders (`ingest`)
//! - workbook sheets through calamine (`workbook`)
//! - dataset JSON sinks (`export`)

pub mod export;
pub mod ingest;
pub mod workbook;

pub use export::*;
pub use ingest::*;
