//! Series extraction from wide (one column per series) grids.
//!
//! Each column header encodes country, sector, valuation and unit as a
//! delimited label, e.g.
//! `Australia - Credit to Households - Lending from All sectors at Market value - Domestic currency`.
//! A metric is resolved by matching every label part against the header row.

use tracing::{debug, info};

use crate::domain::{CountryRecord, Metric, RAW_SERIES, Sector, Unit, raw_metric};
use crate::extract::header::{HeaderPattern, find_header};
use crate::series::{decimal_year_from_cell, remove_blank_values};
use crate::table::{CellValue, Grid, GridLayout};

const MARKET_VALUE: &str = "All sectors at Market value";

fn sector_label(sector: Sector) -> &'static str {
    match sector {
        Sector::Private => "Credit to Non financial sector",
        Sector::Public => "Credit to General government",
        Sector::Household => "Credit to Households",
    }
}

fn unit_label(unit: Unit) -> &'static str {
    match unit {
        Unit::PercentOfGdp => "Percentage of GDP",
        Unit::Domestic => "Domestic currency",
        Unit::UsDollar => "US dollar",
    }
}

/// Header pattern selecting one country's (sector, unit) column.
pub fn metric_pattern(country: &str, sector: Sector, unit: Unit) -> HeaderPattern {
    HeaderPattern::new([country, sector_label(sector), MARKET_VALUE, unit_label(unit)])
}

/// Countries named in the data headers: text before the first `-`, trimmed,
/// unique in first-seen order.
pub fn countries<G: Grid + ?Sized>(grid: &G, layout: &GridLayout) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for header in layout.headers(grid).into_iter().skip(layout.data_start_col).flatten() {
        let name = header.split('-').next().unwrap_or_default().trim();
        if !name.is_empty() && !out.iter().any(|c| c == name) {
            out.push(name.to_string());
        }
    }
    out
}

/// Extract and prune the raw series of one country.
///
/// Unresolved headers are logged and the metric is left out. Rows whose time
/// cell cannot be normalized are skipped.
pub fn extract_country<G: Grid + ?Sized>(grid: &G, layout: &GridLayout, country: &str) -> CountryRecord {
    let headers = layout.headers(grid);

    let times: Vec<Option<f64>> = layout
        .column_values(grid, layout.label_col)
        .into_iter()
        .map(|cell| cell.and_then(decimal_year_from_cell))
        .collect();
    let skipped = times.iter().filter(|t| t.is_none()).count();
    if skipped > 0 {
        debug!(country, skipped, "rows without a usable time cell");
    }

    let mut record = CountryRecord::new(times.iter().flatten().copied().collect());
    let mut missing: Vec<Metric> = Vec::new();

    for (sector, unit) in RAW_SERIES {
        let metric = raw_metric(sector, unit);
        let pattern = metric_pattern(country, sector, unit);
        let Some(col) = find_header(headers.iter().copied(), &pattern) else {
            debug!(country, metric = %metric, pattern = %pattern, "header not found");
            missing.push(metric);
            continue;
        };

        let values = layout
            .column_values(grid, col)
            .into_iter()
            .zip(&times)
            .filter(|(_, t)| t.is_some())
            .map(|(cell, _)| cell.and_then(CellValue::as_number).map(|v| v * unit.scale()))
            .collect();
        record.insert(metric, values);
    }
    if !missing.is_empty() {
        info!(country, missing = ?missing, "headers not found");
    }

    remove_blank_values(record)
}

/// Extract every country found in the headers.
pub fn extract_all<G: Grid + ?Sized>(grid: &G, layout: &GridLayout) -> Vec<(String, CountryRecord)> {
    let countries = countries(grid, layout);
    info!(
        countries = countries.len(),
        cols = grid.col_count(),
        rows = grid.row_count(),
        "extracting wide source"
    );
    countries
        .into_iter()
        .map(|country| {
            let record = extract_country(grid, layout, &country);
            (country, record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellGrid;

    fn header(country: &str, sector: Sector, unit: Unit) -> String {
        format!(
            "{country} - {} - Lending from {MARKET_VALUE} - {} - Adjusted for breaks",
            sector_label(sector),
            unit_label(unit)
        )
    }

    fn sample_grid() -> CellGrid {
        let headers = vec![
            "Period".to_string(),
            header("Australia", Sector::Private, Unit::PercentOfGdp),
            header("Australia", Sector::Private, Unit::Domestic),
            header("Austria", Sector::Private, Unit::Domestic),
        ];
        let meta = vec!["meta".to_string(); 4];
        let mut rows = vec![headers, meta.clone(), meta.clone(), meta];
        rows.push(vec!["1999-03-31".into(), "".into(), "".into(), "1".into()]);
        rows.push(vec!["1999-06-30".into(), "100".into(), "50".into(), "".into()]);
        rows.push(vec!["1999-09-30".into(), "120".into(), "60".into(), "2".into()]);
        rows.push(vec!["".into(), "".into(), "".into(), "".into()]);
        CellGrid::from_text_rows(rows)
    }

    #[test]
    fn discovers_countries_in_order() {
        let grid = sample_grid();
        assert_eq!(countries(&grid, &GridLayout::BIS_QUARTERLY), vec!["Australia", "Austria"]);
    }

    #[test]
    fn extracts_scaled_and_pruned_series() {
        let grid = sample_grid();
        let record = extract_country(&grid, &GridLayout::BIS_QUARTERLY, "Australia");

        // 1999-Q1 has no Australian values at all and is pruned.
        assert_eq!(record.times, vec![1999.25, 1999.5]);
        assert_eq!(record.get(Metric::PrivateDebtPercent), Some(&vec![Some(100.0), Some(120.0)]));
        assert_eq!(record.get(Metric::PrivateDebt), Some(&vec![Some(50e9), Some(60e9)]));
        assert!(!record.has(Metric::PublicDebt));
        assert!(!record.has(Metric::PrivateDebtUsd));
    }

    #[test]
    fn out_of_range_serial_time_cell_is_skipped() {
        let grid = CellGrid::from_text_rows(vec![
            vec!["Period".to_string(), header("Chile", Sector::Private, Unit::Domestic)],
            vec!["meta".to_string(), "meta".to_string()],
            vec!["meta".to_string(), "meta".to_string()],
            vec!["meta".to_string(), "meta".to_string()],
            vec!["2020-03-31".to_string(), "1".to_string()],
            vec!["1e15".to_string(), "2".to_string()],
        ]);
        let record = extract_country(&grid, &GridLayout::BIS_QUARTERLY, "Chile");
        assert_eq!(record.times, vec![2020.0]);
        assert_eq!(record.get(Metric::PrivateDebt), Some(&vec![Some(1e9)]));
    }

    #[test]
    fn country_with_only_unmatched_headers_is_empty() {
        let grid = sample_grid();
        let record = extract_country(&grid, &GridLayout::BIS_QUARTERLY, "Belgium");
        assert!(record.is_empty());
        assert!(record.metrics.is_empty());
    }
}
