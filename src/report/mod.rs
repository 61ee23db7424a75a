//! Reporting utilities: dataset coverage summaries.

pub mod format;

pub use format::*;

use crate::domain::{CountryDataset, Metric, SourceFormat};

/// Coverage of one country in the final dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryCoverage {
    pub country: String,
    pub points: usize,
    pub metrics: usize,
    pub first: Option<f64>,
    pub last: Option<f64>,
    pub has_gdp: bool,
    pub has_population: bool,
}

/// Coverage of a whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub format: SourceFormat,
    pub countries: Vec<CountryCoverage>,
}

impl RunSummary {
    pub fn total_series(&self) -> usize {
        self.countries.iter().map(|c| c.metrics).sum()
    }

    pub fn with_population(&self) -> usize {
        self.countries.iter().filter(|c| c.has_population).count()
    }
}

pub fn summarize(format: SourceFormat, dataset: &CountryDataset) -> RunSummary {
    let countries = dataset
        .iter()
        .map(|(country, record)| CountryCoverage {
            country: country.clone(),
            points: record.len(),
            metrics: record.metrics.len(),
            first: record.times.first().copied(),
            last: record.times.last().copied(),
            has_gdp: record.has(Metric::Gdp),
            has_population: record.has(Metric::Population),
        })
        .collect();
    RunSummary { format, countries }
}
