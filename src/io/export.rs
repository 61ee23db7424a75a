//! JSON sinks for the debt and population datasets.
//!
//! The debt dataset is the chart-facing contract:
//! `{ "<country>": { "times": [...], "<metric>": [number|null, ...] } }`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::domain::CountryDataset;
use crate::error::AppError;
use crate::population::PopulationDataset;

fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool, what: &str) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create {what} '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    let written = if pretty {
        serde_json::to_writer_pretty(&mut writer, value)
    } else {
        serde_json::to_writer(&mut writer, value)
    };
    written.map_err(|e| AppError::io(format!("Failed to write {what}: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to write {what}: {e}")))?;
    Ok(())
}

/// Write the per-country debt dataset.
pub fn write_dataset_json(path: &Path, dataset: &CountryDataset, pretty: bool) -> Result<(), AppError> {
    write_json(path, dataset, pretty, "dataset JSON")?;
    info!(path = %path.display(), countries = dataset.len(), "wrote dataset");
    Ok(())
}

/// Write population on its native grid, in the shape `load_population_json` reads.
pub fn write_population_json(path: &Path, dataset: &PopulationDataset, pretty: bool) -> Result<(), AppError> {
    write_json(path, dataset, pretty, "population JSON")?;
    info!(path = %path.display(), countries = dataset.countries.len(), "wrote population");
    Ok(())
}
