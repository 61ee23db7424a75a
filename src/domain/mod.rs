//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - canonical metric names (`Metric`) and the raw (sector, unit) mapping
//! - the per-country output record (`CountryRecord`, `CountryDataset`)
//! - run configuration (`BuildConfig`, `PopulationConfig`)

pub mod types;

pub use types::*;
