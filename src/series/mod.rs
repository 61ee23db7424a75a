//! Time-axis and series primitives.
//!
//! - decimal-year normalization (`time`)
//! - null-propagating arithmetic and interpolation (`ops`)
//! - blank-row pruning (`prune`)

pub mod ops;
pub mod prune;
pub mod time;

pub use ops::*;
pub use prune::*;
pub use time::*;
