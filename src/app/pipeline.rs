//! Shared pipeline logic behind the CLI commands.
//!
//! load sources -> reconcile (extract, prune, derive) -> join population -> write JSON
//!
//! Keeping the workflow here lets tests drive whole runs without spawning the
//! binary.

use tracing::{info, warn};

use crate::domain::{BuildConfig, PopulationConfig};
use crate::error::AppError;
use crate::io::{load_grid, load_population_json, load_record_table, write_dataset_json, write_population_json};
use crate::population::PopulationDataset;
use crate::reconcile::{DebtSources, PopulationSource, ReconciledDataset, WideSource, build_country_dataset};
use crate::report::{RunSummary, summarize};

/// All computed outputs of a single `debt build` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: ReconciledDataset,
    pub summary: RunSummary,
}

/// Execute the build pipeline and write the dataset JSON.
pub fn run_build(config: &BuildConfig) -> Result<RunOutput, AppError> {
    // 1) Load the long source and population. A broken long CSV is not fatal
    //    while the wide sheet can still stand in.
    let long = match &config.long_csv {
        Some(path) => match load_record_table(path) {
            Ok(table) => Some(table),
            Err(err) if config.wide_grid.is_some() => {
                warn!(error = %err, "long source unreadable, trying wide source");
                None
            }
            Err(err) => return Err(err),
        },
        None => None,
    };
    let population = config
        .population
        .as_deref()
        .map(load_population_json)
        .transpose()?;
    let population = population.as_ref().map(|dataset| PopulationSource {
        dataset,
        steps: config.population_steps,
    });

    // 2) Reconcile. The wide sheet is only read when the long source gives
    //    nothing.
    let long_only = DebtSources {
        long: long.as_ref(),
        wide: None,
    };
    let dataset = match (build_country_dataset(&long_only, population), &config.wide_grid) {
        (Ok(dataset), _) => dataset,
        (Err(_), Some(path)) => {
            let grid = load_grid(path, config.wide_sheet.as_deref())?;
            let wide_only = DebtSources {
                long: None,
                wide: Some(WideSource {
                    grid: &grid,
                    layout: config.wide_layout,
                }),
            };
            build_country_dataset(&wide_only, population)?
        }
        (Err(err), None) => return Err(err),
    };

    // 3) Persist.
    write_dataset_json(&config.output, &dataset.countries, config.pretty)?;

    let summary = summarize(dataset.format, &dataset.countries);
    info!(
        countries = summary.countries.len(),
        series = summary.total_series(),
        "build finished"
    );
    Ok(RunOutput { dataset, summary })
}

/// Convert a population sheet into the population JSON input.
pub fn run_population(config: &PopulationConfig) -> Result<PopulationDataset, AppError> {
    let grid = load_grid(&config.grid, config.sheet.as_deref())?;
    let dataset = PopulationDataset::from_grid(&grid, &config.layout);
    if dataset.countries.is_empty() {
        return Err(AppError::source_unavailable(format!(
            "No population rows found in '{}'.",
            config.grid.display()
        )));
    }
    write_population_json(&config.output, &dataset, config.pretty)?;
    Ok(dataset)
}
