//! Source reconciliation: one output contract from either source shape.
//!
//! Exactly one debt source is used per run. The long record stream wins when it
//! is present and yields at least one country; otherwise the wide grid is used.
//! Data is never merged across the two.

use tracing::{info, warn};

use crate::derived::compute_derived_metrics;
use crate::domain::{CountryDataset, CountryRecord, Metric, SourceFormat};
use crate::error::AppError;
use crate::extract::{long, wide};
use crate::population::{PopulationDataset, join_population};
use crate::table::{Grid, GridLayout, RecordTable};

/// Domestic-currency slots and the USD series that may stand in for them.
const USD_FALLBACKS: [(Metric, Metric); 3] = [
    (Metric::PrivateDebt, Metric::PrivateDebtUsd),
    (Metric::HouseholdDebt, Metric::HouseholdDebtUsd),
    (Metric::PublicDebt, Metric::PublicDebtUsd),
];

/// A wide grid together with its layout.
#[derive(Clone, Copy)]
pub struct WideSource<'a> {
    pub grid: &'a dyn Grid,
    pub layout: GridLayout,
}

/// Debt sources available for a run.
#[derive(Clone, Copy, Default)]
pub struct DebtSources<'a> {
    pub long: Option<&'a RecordTable>,
    pub wide: Option<WideSource<'a>>,
}

/// Population input and its expansion factor onto the debt axis.
#[derive(Debug, Clone, Copy)]
pub struct PopulationSource<'a> {
    pub dataset: &'a PopulationDataset,
    pub steps: usize,
}

/// Final per-country dataset and the source shape it came from.
#[derive(Debug, Clone)]
pub struct ReconciledDataset {
    pub format: SourceFormat,
    pub countries: CountryDataset,
}

/// Copy USD series into missing domestic-currency slots (countries that only
/// report in USD).
pub fn fill_usd_fallbacks(record: &mut CountryRecord) {
    for (domestic, usd) in USD_FALLBACKS {
        if record.has(domestic) {
            continue;
        }
        if let Some(series) = record.get(usd).cloned() {
            record.insert(domestic, series);
        }
    }
}

/// Turn pruned raw records into final records. Countries whose time axis is
/// empty are dropped.
pub fn assemble(extracted: Vec<(String, CountryRecord)>) -> CountryDataset {
    let mut out = CountryDataset::new();
    for (country, mut record) in extracted {
        if record.is_empty() {
            info!(country = %country, "no values, country dropped");
            continue;
        }
        fill_usd_fallbacks(&mut record);
        compute_derived_metrics(&mut record);
        out.insert(country, record);
    }
    out
}

/// Build the per-country debt dataset from whichever source is usable, then
/// enrich it with population when given.
pub fn build_country_dataset(
    sources: &DebtSources<'_>,
    population: Option<PopulationSource<'_>>,
) -> Result<ReconciledDataset, AppError> {
    let mut reconciled = select_source(sources)?;
    if let Some(pop) = population {
        join_population(&mut reconciled.countries, pop.dataset, pop.steps);
    }
    Ok(reconciled)
}

fn select_source(sources: &DebtSources<'_>) -> Result<ReconciledDataset, AppError> {
    if let Some(table) = sources.long {
        let countries = assemble(long::extract_all(table));
        if !countries.is_empty() {
            info!(countries = countries.len(), "using long source");
            return Ok(ReconciledDataset {
                format: SourceFormat::Long,
                countries,
            });
        }
        warn!(records = table.len(), "long source yielded no countries");
    }

    if let Some(source) = sources.wide {
        let countries = assemble(wide::extract_all(source.grid, &source.layout));
        if !countries.is_empty() {
            info!(countries = countries.len(), "using wide source");
            return Ok(ReconciledDataset {
                format: SourceFormat::Wide,
                countries,
            });
        }
        warn!("wide source yielded no countries");
    }

    Err(AppError::source_unavailable(
        "No usable debt source: neither the long nor the wide source produced any country.",
    ))
}
