//! `debt-series` library crate.
//!
//! The binary (`debt`) is a thin wrapper around this library so that:
//!
//! - extraction and derivation are testable without spawning processes
//! - the per-country dataset can be built from other front-ends

pub mod app;
pub mod cli;
pub mod derived;
pub mod domain;
pub mod error;
pub mod extract;
pub mod io;
pub mod population;
pub mod reconcile;
pub mod report;
pub mod series;
pub mod table;
