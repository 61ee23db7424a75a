//! Formatted terminal output.
//!
//! We keep formatting code in one place so the extraction code stays free of
//! presentation, and output changes are localized.

use std::path::Path;

use crate::population::PopulationDataset;
use crate::report::{CountryCoverage, RunSummary};

/// Format the run summary (source, totals, one line per country).
pub fn format_run_summary(summary: &RunSummary, output: &Path) -> String {
    let mut out = String::new();

    out.push_str("=== debt - country debt dataset ===\n");
    out.push_str(&format!("Source: {}\n", summary.format.display_name()));
    out.push_str(&format!(
        "Countries: {} | series: {} | with population: {}\n",
        summary.countries.len(),
        summary.total_series(),
        summary.with_population(),
    ));
    out.push_str(&format!("Output: {}\n", output.display()));

    out.push('\n');
    out.push_str(&format!(
        "{:<32} {:>6} {:>8} {:>10} {:>10}  {}\n",
        "country", "points", "metrics", "first", "last", "flags"
    ));
    for c in &summary.countries {
        out.push_str(&format_country_row(c));
        out.push('\n');
    }

    out
}

fn format_country_row(c: &CountryCoverage) -> String {
    let mut flags = Vec::new();
    if !c.has_gdp {
        flags.push("no-gdp");
    }
    if c.has_population {
        flags.push("pop");
    }
    format!(
        "{:<32} {:>6} {:>8} {:>10} {:>10}  {}",
        truncate(&c.country, 32),
        c.points,
        c.metrics,
        fmt_time(c.first),
        fmt_time(c.last),
        flags.join(",")
    )
}

/// Format the population conversion summary.
pub fn format_population_summary(dataset: &PopulationDataset, output: &Path) -> String {
    let span = match (dataset.times.first(), dataset.times.last()) {
        (Some(first), Some(last)) => format!("{first:.0}..{last:.0}"),
        _ => "-".to_string(),
    };
    format!(
        "=== debt - population ===\nCountries: {} | years: {} ({span})\nOutput: {}\n",
        dataset.countries.len(),
        dataset.times.len(),
        output.display()
    )
}

fn fmt_time(t: Option<f64>) -> String {
    t.map(|t| format!("{t:.2}")).unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
