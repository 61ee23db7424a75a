//! Raw series extraction.
//!
//! Both source shapes produce the same thing: per country, a pruned
//! `CountryRecord` holding only raw metrics.
//!
//! - header lookup (`header`)
//! - wide, header-addressed grids (`wide`)
//! - long, record-grouped streams (`long`)

pub mod header;
pub mod long;
pub mod wide;

pub use header::{HeaderPattern, find_header};
