//! Population enrichment.
//!
//! Population comes on its own, coarser grid (annual). It is expanded to the
//! quarterly debt axis by linear interpolation and joined by exact decimal-year
//! equality; there is no nearest-match, so unmatched times stay `None`.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{CountryDataset, CountryRecord, Metric, Series};
use crate::series::{combine_opt, diff_opt, expand_times, expand_values};
use crate::table::{CellValue, Grid, GridLayout};

/// Population per country on a shared time axis.
///
/// Serialized as `{ "times": [...], "<country>": [...], ... }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationDataset {
    pub times: Vec<f64>,
    #[serde(flatten)]
    pub countries: BTreeMap<String, Series>,
}

/// Leading integer of a year label (`1960`, `"1960"`, `"1960 [YR1960]"`).
fn parse_year(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(v) if v.is_finite() => Some(v.trunc()),
        CellValue::Text(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<i32>().ok().map(f64::from)
        }
        _ => None,
    }
}

impl PopulationDataset {
    /// Read a World Bank style sheet: years along `header_row`, one country
    /// per row from `data_start_row`, names in `label_col`.
    pub fn from_grid<G: Grid + ?Sized>(grid: &G, layout: &GridLayout) -> Self {
        let year_cols: Vec<(usize, f64)> = layout
            .row_values(grid, layout.header_row)
            .into_iter()
            .enumerate()
            .filter_map(|(i, cell)| Some((layout.data_start_col + i, parse_year(cell?)?)))
            .collect();

        let mut countries = BTreeMap::new();
        for row in layout.data_start_row..grid.row_count() {
            let Some(name) = grid.cell(layout.label_col, row).and_then(CellValue::as_text) else {
                continue;
            };
            let values: Series = year_cols
                .iter()
                .map(|&(col, _)| grid.cell(col, row).and_then(CellValue::as_number))
                .collect();
            countries.insert(name.trim().to_string(), values);
        }

        Self {
            times: year_cols.into_iter().map(|(_, t)| t).collect(),
            countries,
        }
    }

    /// Interpolate `n` sub-steps per interval. `n <= 1` returns the data as-is.
    pub fn expanded(&self, n: usize) -> Self {
        if n <= 1 {
            return self.clone();
        }
        Self {
            times: expand_times(&self.times, n),
            countries: self
                .countries
                .iter()
                .map(|(name, values)| (name.clone(), expand_values(values, n)))
                .collect(),
        }
    }

    pub fn series(&self, country: &str) -> Option<&Series> {
        self.countries.get(country)
    }

    /// Population of `country` keyed by the bit pattern of its decimal year.
    fn lookup(&self, country: &str) -> Option<HashMap<u64, Option<f64>>> {
        let values = self.series(country)?;
        if values.len() != self.times.len() {
            debug!(country, values = values.len(), times = self.times.len(), "population series length differs from its axis");
        }
        Some(
            self.times
                .iter()
                .zip(values)
                .map(|(t, v)| (t.to_bits(), *v))
                .collect(),
        )
    }
}

/// Add `population` and the per-capita metrics to one record.
pub fn add_population(record: &mut CountryRecord, by_time: &HashMap<u64, Option<f64>>) {
    let population: Series = record
        .times
        .iter()
        .map(|t| by_time.get(&t.to_bits()).copied().flatten())
        .collect();
    record.insert(Metric::Population, population);

    let per_capita = combine_opt(record.get(Metric::Gdp), record.get(Metric::Population), |a, b| a / b);
    record.insert_opt(Metric::GdpPerCapita, per_capita);

    let change = diff_opt(record.get(Metric::GdpPerCapita));
    record.insert_opt(Metric::GdpChangePerCapita, change);

    let per_capita_usd = combine_opt(record.get(Metric::GdpUsd), record.get(Metric::Population), |a, b| a / b);
    record.insert_opt(Metric::GdpPerCapitaUsd, per_capita_usd);
}

/// Expand `population` by `steps` and join it onto every country it covers.
pub fn join_population(dataset: &mut CountryDataset, population: &PopulationDataset, steps: usize) {
    let population = population.expanded(steps);
    let mut joined = 0usize;
    for (country, record) in dataset.iter_mut() {
        match population.lookup(country) {
            Some(by_time) => {
                add_population(record, &by_time);
                joined += 1;
            }
            None => debug!(country = %country, "no population series"),
        }
    }
    info!(joined, countries = dataset.len(), "joined population");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellGrid;

    fn annual() -> PopulationDataset {
        let mut countries = BTreeMap::new();
        countries.insert("Chile".to_string(), vec![Some(10.0), Some(20.0), Some(30.0)]);
        PopulationDataset {
            times: vec![2000.0, 2001.0, 2002.0],
            countries,
        }
    }

    #[test]
    fn expansion_to_quarters() {
        let q = annual().expanded(4);
        assert_eq!(q.times.len(), 8);
        assert_eq!(q.times[1], 2000.25);
        assert_eq!(q.times[7], 2001.75);
        assert_eq!(q.series("Chile").unwrap()[5], Some(22.5));
        assert_eq!(annual().expanded(1), annual());
    }

    #[test]
    fn joins_by_exact_time_and_computes_per_capita() {
        let mut record = CountryRecord::new(vec![2000.0, 2000.25, 2001.5, 2003.0]);
        record.insert(Metric::Gdp, vec![Some(100.0), Some(125.0), None, Some(1.0)]);
        let mut dataset = CountryDataset::new();
        dataset.insert("Chile".to_string(), record);
        dataset.insert("Peru".to_string(), CountryRecord::new(vec![2000.0]));

        join_population(&mut dataset, &annual(), 4);

        let chile = &dataset["Chile"];
        // 2003.0 lies past the last expanded point and has no population.
        assert_eq!(chile.get(Metric::Population), Some(&vec![Some(10.0), Some(12.5), Some(25.0), None]));
        assert_eq!(chile.get(Metric::GdpPerCapita), Some(&vec![Some(10.0), Some(10.0), None, None]));
        assert_eq!(chile.get(Metric::GdpChangePerCapita), Some(&vec![Some(0.0), Some(0.0), None, None]));
        assert!(!chile.has(Metric::GdpPerCapitaUsd));

        assert!(!dataset["Peru"].has(Metric::Population));
    }

    #[test]
    fn reads_world_bank_layout() {
        let grid = CellGrid::from_text_rows(vec![
            vec!["Data Source", "World Development Indicators", "", "", "", ""],
            vec!["", "", "", "", "", ""],
            vec!["Last Updated Date", "2024-01-01", "", "", "", ""],
            vec!["Country Name", "Country Code", "Indicator Name", "Indicator Code", "1960", "1961"],
            vec!["Chile", "CHL", "Population, total", "SP.POP.TOTL", "7600000", "7800000"],
            vec!["Aruba", "ABW", "Population, total", "SP.POP.TOTL", "54000", ""],
        ]);
        let pop = PopulationDataset::from_grid(&grid, &GridLayout::WORLD_BANK);
        assert_eq!(pop.times, vec![1960.0, 1961.0]);
        assert_eq!(pop.series("Chile"), Some(&vec![Some(7.6e6), Some(7.8e6)]));
        assert_eq!(pop.series("Aruba"), Some(&vec![Some(54000.0), None]));
    }

    #[test]
    fn json_shape_round_trips() {
        let json = r#"{"Chile":[1.0,null],"times":[2000.0,2001.0]}"#;
        let pop: PopulationDataset = serde_json::from_str(json).unwrap();
        assert_eq!(pop.times, vec![2000.0, 2001.0]);
        assert_eq!(pop.series("Chile"), Some(&vec![Some(1.0), None]));
    }
}
