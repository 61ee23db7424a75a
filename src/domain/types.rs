//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built incrementally while extracting a country
//! - exported to the chart-facing JSON dataset
//! - reloaded later for inspection or comparisons

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::table::GridLayout;

/// One nullable value per time point.
pub type Series = Vec<Option<f64>>;

/// Canonical metric names, as they appear as keys in the output JSON.
///
/// Declaration order is also the key order of a serialized record: raw
/// extracted metrics first, then derived ones, then population enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    PrivateDebt,
    PrivateDebtPercent,
    PrivateDebtUsd,
    PublicDebt,
    PublicDebtPercent,
    PublicDebtUsd,
    HouseholdDebt,
    HouseholdDebtPercent,
    HouseholdDebtUsd,

    CommercialDebt,
    Gdp,
    GdpUsd,
    GdpPercent,
    CommercialDebtPercent,
    GdpChange,
    AllDebtPercent,
    CreditPercent,
    Credit,
    KeenGrowth,
    CommercialDebtUsd,

    Population,
    GdpPerCapita,
    GdpChangePerCapita,
    GdpPerCapitaUsd,
}

impl Metric {
    /// Key used in the output JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::PrivateDebt => "privateDebt",
            Metric::PrivateDebtPercent => "privateDebtPercent",
            Metric::PrivateDebtUsd => "privateDebtUsd",
            Metric::PublicDebt => "publicDebt",
            Metric::PublicDebtPercent => "publicDebtPercent",
            Metric::PublicDebtUsd => "publicDebtUsd",
            Metric::HouseholdDebt => "householdDebt",
            Metric::HouseholdDebtPercent => "householdDebtPercent",
            Metric::HouseholdDebtUsd => "householdDebtUsd",
            Metric::CommercialDebt => "commercialDebt",
            Metric::Gdp => "gdp",
            Metric::GdpUsd => "gdpUsd",
            Metric::GdpPercent => "gdpPercent",
            Metric::CommercialDebtPercent => "commercialDebtPercent",
            Metric::GdpChange => "gdpChange",
            Metric::AllDebtPercent => "allDebtPercent",
            Metric::CreditPercent => "creditPercent",
            Metric::Credit => "credit",
            Metric::KeenGrowth => "keenGrowth",
            Metric::CommercialDebtUsd => "commercialDebtUsd",
            Metric::Population => "population",
            Metric::GdpPerCapita => "gdpPerCapita",
            Metric::GdpChangePerCapita => "gdpChangePerCapita",
            Metric::GdpPerCapitaUsd => "gdpPerCapitaUsd",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowing sector a raw debt metric belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    Private,
    Public,
    Household,
}

/// How a raw debt metric is denominated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Per cent of GDP, kept on the 0-100 scale.
    PercentOfGdp,
    /// Domestic currency, reported in billions.
    Domestic,
    /// US dollars, reported in billions.
    UsDollar,
}

impl Unit {
    /// Multiplier applied to reported values.
    pub fn scale(self) -> f64 {
        match self {
            Unit::PercentOfGdp => 1.0,
            Unit::Domestic | Unit::UsDollar => 1e9,
        }
    }
}

/// Canonical raw metric for a (sector, unit) pair.
pub fn raw_metric(sector: Sector, unit: Unit) -> Metric {
    match (sector, unit) {
        (Sector::Private, Unit::Domestic) => Metric::PrivateDebt,
        (Sector::Private, Unit::PercentOfGdp) => Metric::PrivateDebtPercent,
        (Sector::Private, Unit::UsDollar) => Metric::PrivateDebtUsd,
        (Sector::Public, Unit::Domestic) => Metric::PublicDebt,
        (Sector::Public, Unit::PercentOfGdp) => Metric::PublicDebtPercent,
        (Sector::Public, Unit::UsDollar) => Metric::PublicDebtUsd,
        (Sector::Household, Unit::Domestic) => Metric::HouseholdDebt,
        (Sector::Household, Unit::PercentOfGdp) => Metric::HouseholdDebtPercent,
        (Sector::Household, Unit::UsDollar) => Metric::HouseholdDebtUsd,
    }
}

/// Every raw (sector, unit) series, in extraction order.
pub const RAW_SERIES: [(Sector, Unit); 9] = [
    (Sector::Private, Unit::PercentOfGdp),
    (Sector::Private, Unit::Domestic),
    (Sector::Private, Unit::UsDollar),
    (Sector::Public, Unit::PercentOfGdp),
    (Sector::Public, Unit::Domestic),
    (Sector::Public, Unit::UsDollar),
    (Sector::Household, Unit::PercentOfGdp),
    (Sector::Household, Unit::Domestic),
    (Sector::Household, Unit::UsDollar),
];

/// Per-country time series record.
///
/// Invariant: every series in `metrics` has the same length as `times`, and the
/// same index refers to the same time point across all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Strictly increasing decimal years.
    pub times: Vec<f64>,
    #[serde(flatten)]
    pub metrics: BTreeMap<Metric, Series>,
}

impl CountryRecord {
    pub fn new(times: Vec<f64>) -> Self {
        Self {
            times,
            metrics: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn get(&self, metric: Metric) -> Option<&Series> {
        self.metrics.get(&metric)
    }

    pub fn has(&self, metric: Metric) -> bool {
        self.metrics.contains_key(&metric)
    }

    /// Insert a series aligned to `times`.
    pub fn insert(&mut self, metric: Metric, series: Series) {
        debug_assert_eq!(
            series.len(),
            self.times.len(),
            "series `{metric}` is not aligned to the time axis"
        );
        self.metrics.insert(metric, series);
    }

    /// Insert `series` when it is present; absent inputs leave the record untouched.
    pub fn insert_opt(&mut self, metric: Metric, series: Option<Series>) {
        if let Some(series) = series {
            self.insert(metric, series);
        }
    }
}

/// Output contract: country name to record, ordered by name.
pub type CountryDataset = BTreeMap<String, CountryRecord>;

/// Which debt source shape produced a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// One row per series, time periods as named fields (CSV export).
    Long,
    /// One column per series, addressed via header text (spreadsheet).
    Wide,
}

impl SourceFormat {
    pub fn display_name(self) -> &'static str {
        match self {
            SourceFormat::Long => "long (CSV records)",
            SourceFormat::Wide => "wide (spreadsheet grid)",
        }
    }
}

/// Resolved configuration for a `debt build` run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Long-format CSV export (preferred when it yields data).
    pub long_csv: Option<PathBuf>,
    /// Wide-format workbook, or its sheet exported as delimited text.
    pub wide_grid: Option<PathBuf>,
    /// Worksheet to read when `wide_grid` is a workbook.
    pub wide_sheet: Option<String>,
    pub wide_layout: GridLayout,
    /// Population JSON on its native grid.
    pub population: Option<PathBuf>,
    /// Sub-steps per population interval; `<= 1` joins the series as-is.
    pub population_steps: usize,
    pub output: PathBuf,
    pub pretty: bool,
}

/// Resolved configuration for a `debt population` run.
#[derive(Debug, Clone)]
pub struct PopulationConfig {
    pub grid: PathBuf,
    pub sheet: Option<String>,
    pub layout: GridLayout,
    pub output: PathBuf,
    pub pretty: bool,
}
