//! Series extraction from long (one row per series) record streams.
//!
//! Every record describes one series by its categorical fields (country,
//! sector, valuation, unit, adjustment) and carries the observations as
//! quarter-coded fields (`2023-Q4`). Records are grouped per country, one record
//! per dimension key, and each group is mapped to a canonical metric name.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::domain::{CountryRecord, Metric, RAW_SERIES, Sector, Unit, raw_metric};
use crate::series::{decimal_year_from_quarter, remove_blank_values};
use crate::table::{Record, RecordTable};

pub const COUNTRY_FIELD: &str = "Borrowers' country";
pub const SECTOR_FIELD: &str = "Borrowing sector";
pub const VALUATION_FIELD: &str = "Valuation method";
pub const UNIT_TYPE_FIELD: &str = "Unit type";
pub const MEASURE_FIELD: &str = "Unit of measure";
pub const ADJUSTMENT_FIELD: &str = "Adjustment";

const MARKET_VALUE: &str = "Market value";
const ADJUSTED_FOR_BREAKS: &str = "Adjusted for breaks";

/// Dimensions identifying one series within a country.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey<'a> {
    sector: &'a str,
    valuation: &'a str,
    unit_type: &'a str,
    measure: &'a str,
    adjustment: &'a str,
}

impl<'a> GroupKey<'a> {
    fn of(record: &'a Record) -> Self {
        let field = |name: &str| record.get(name).unwrap_or_default();
        Self {
            sector: field(SECTOR_FIELD),
            valuation: field(VALUATION_FIELD),
            unit_type: field(UNIT_TYPE_FIELD),
            measure: field(MEASURE_FIELD),
            adjustment: field(ADJUSTMENT_FIELD),
        }
    }
}

/// Records of one country, one per dimension key, in first-seen order.
#[derive(Debug, Clone)]
pub struct CountryGroups<'a> {
    pub country: String,
    pub groups: Vec<&'a Record>,
}

/// Group records by country, then by dimension key. The first record of a key
/// wins; records without a country are skipped.
pub fn group_by_country(table: &RecordTable) -> Vec<CountryGroups<'_>> {
    let mut out: Vec<CountryGroups<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut seen: Vec<HashSet<GroupKey<'_>>> = Vec::new();

    for record in table.records() {
        let Some(country) = record.get_non_empty(COUNTRY_FIELD) else {
            continue;
        };
        let slot = *index.entry(country).or_insert_with(|| {
            out.push(CountryGroups {
                country: country.to_string(),
                groups: Vec::new(),
            });
            seen.push(HashSet::new());
            out.len() - 1
        });
        if seen[slot].insert(GroupKey::of(record)) {
            out[slot].groups.push(record);
        }
    }
    out
}

/// Canonical (sector, unit) of a record, if it is one of the tracked series.
fn classify(record: &Record) -> Option<(Sector, Unit)> {
    let key = GroupKey::of(record);
    if key.valuation != MARKET_VALUE || key.adjustment != ADJUSTED_FOR_BREAKS {
        return None;
    }
    let sector = match key.sector {
        "Private non-financial sector" => Sector::Private,
        "General government" => Sector::Public,
        "Households & NPISHs" => Sector::Household,
        _ => return None,
    };
    let unit = match key.measure {
        "" => return None,
        "US dollar" => Unit::UsDollar,
        "Per cent" => Unit::PercentOfGdp,
        _ => Unit::Domestic,
    };
    Some((sector, unit))
}

/// Quarter-coded header fields as `(field index, decimal year)`, in header order.
///
/// Taken from the header row, so a short record cannot shorten the axis.
pub fn quarter_fields(record: &Record) -> Vec<(usize, f64)> {
    record
        .headers()
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| decimal_year_from_quarter(name).map(|t| (idx, t)))
        .collect()
}

/// Empty and malformed values read as missing.
fn parse_value(raw: Option<&str>) -> Option<f64> {
    let v = raw?.trim().parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

/// Build and prune the raw series of one country from its groups.
///
/// The time axis comes from the first group's quarter fields. The first group
/// that maps to a metric wins; later duplicates are ignored.
pub fn extract_country(country: &str, groups: &[&Record]) -> CountryRecord {
    let Some(first) = groups.first() else {
        return CountryRecord::default();
    };
    let columns = quarter_fields(first);
    let mut record = CountryRecord::new(columns.iter().map(|&(_, t)| t).collect());

    for group in groups {
        let Some((sector, unit)) = classify(group) else {
            continue;
        };
        let metric = raw_metric(sector, unit);
        if record.has(metric) {
            debug!(country, metric = %metric, "duplicate group ignored");
            continue;
        }
        let values = columns
            .iter()
            .map(|&(idx, _)| parse_value(group.value(idx)).map(|v| v * unit.scale()))
            .collect();
        record.insert(metric, values);
    }

    let missing: Vec<Metric> = RAW_SERIES
        .iter()
        .map(|&(s, u)| raw_metric(s, u))
        .filter(|m| !record.has(*m))
        .collect();
    if !missing.is_empty() {
        info!(country, missing = ?missing, "no matching record group");
    }

    remove_blank_values(record)
}

/// Extract every country in the stream.
pub fn extract_all(table: &RecordTable) -> Vec<(String, CountryRecord)> {
    let grouped = group_by_country(table);
    info!(records = table.len(), countries = grouped.len(), "extracting long source");
    grouped
        .into_iter()
        .map(|g| {
            let record = extract_country(&g.country, &g.groups);
            (g.country, record)
        })
        .collect()
}

/// Field names of a long-format row; mostly for fixtures.
pub fn dimension_fields() -> [&'static str; 6] {
    [
        COUNTRY_FIELD,
        SECTOR_FIELD,
        VALUATION_FIELD,
        UNIT_TYPE_FIELD,
        MEASURE_FIELD,
        ADJUSTMENT_FIELD,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<&str>>) -> RecordTable {
        let mut headers: Vec<&str> = dimension_fields().to_vec();
        headers.extend(["2000-Q1", "2000-Q2", "2000-Q3"]);
        RecordTable::from_rows(headers, rows)
    }

    fn row<'a>(country: &'a str, sector: &'a str, measure: &'a str, values: [&'a str; 3]) -> Vec<&'a str> {
        let mut r = vec![
            country,
            sector,
            MARKET_VALUE,
            "Domestic currency",
            measure,
            ADJUSTED_FOR_BREAKS,
        ];
        r.extend(values);
        r
    }

    #[test]
    fn groups_by_country_and_dimensions() {
        let t = table(vec![
            row("Chile", "Private non-financial sector", "Chilean peso", ["1", "2", "3"]),
            row("Brazil", "Private non-financial sector", "Brazilian real", ["1", "2", "3"]),
            row("Chile", "Private non-financial sector", "Chilean peso", ["9", "9", "9"]),
            row("", "Private non-financial sector", "Chilean peso", ["9", "9", "9"]),
            row("Chile", "General government", "Per cent", ["1", "2", "3"]),
        ]);
        let grouped = group_by_country(&t);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].country, "Chile");
        assert_eq!(grouped[0].groups.len(), 2);
        assert_eq!(grouped[1].country, "Brazil");
    }

    #[test]
    fn maps_measures_to_metrics_and_scales() {
        let t = table(vec![
            row("Chile", "Private non-financial sector", "Chilean peso", ["1", "2", ""]),
            row("Chile", "Private non-financial sector", "Per cent", ["50", "x", "55"]),
            row("Chile", "Private non-financial sector", "US dollar", ["0.5", "0.6", "0.7"]),
            row("Chile", "Households & NPISHs", "Chilean peso", ["0.25", "0.5", "0.75"]),
            row("Chile", "Financial corporations", "Chilean peso", ["7", "7", "7"]),
        ]);
        let grouped = group_by_country(&t);
        let record = extract_country(&grouped[0].country, &grouped[0].groups);

        assert_eq!(record.times, vec![2000.0, 2000.25, 2000.5]);
        assert_eq!(record.get(Metric::PrivateDebt), Some(&vec![Some(1e9), Some(2e9), None]));
        assert_eq!(record.get(Metric::PrivateDebtPercent), Some(&vec![Some(50.0), None, Some(55.0)]));
        assert_eq!(record.get(Metric::PrivateDebtUsd), Some(&vec![Some(0.5e9), Some(0.6e9), Some(0.7e9)]));
        assert_eq!(record.get(Metric::HouseholdDebt), Some(&vec![Some(0.25e9), Some(0.5e9), Some(0.75e9)]));
        assert_eq!(record.metrics.len(), 4);
    }

    #[test]
    fn first_group_per_metric_wins() {
        let mut unadjusted = row("Chile", "Private non-financial sector", "Chilean peso", ["4", "4", "4"]);
        unadjusted[5] = "Break in series";
        let mut other_unit_type = row("Chile", "Private non-financial sector", "Chilean peso", ["8", "8", "8"]);
        other_unit_type[3] = "Domestic currency (fixed parity)";
        let t = table(vec![
            unadjusted,
            row("Chile", "Private non-financial sector", "Chilean peso", ["1", "2", "3"]),
            other_unit_type,
        ]);
        let grouped = group_by_country(&t);
        assert_eq!(grouped[0].groups.len(), 3);

        let record = extract_country("Chile", &grouped[0].groups);
        assert_eq!(record.get(Metric::PrivateDebt), Some(&vec![Some(1e9), Some(2e9), Some(3e9)]));
    }

    #[test]
    fn quarter_fields_skip_metadata() {
        let t = table(vec![row("Chile", "General government", "Per cent", ["1", "2", "3"])]);
        let cols = quarter_fields(&t.records()[0]);
        assert_eq!(cols, vec![(6, 2000.0), (7, 2000.25), (8, 2000.5)]);
    }

    #[test]
    fn short_first_record_keeps_full_time_axis() {
        let mut short = row("Chile", "Financial corporations", "Chilean peso", ["1", "", ""]);
        short.truncate(7);
        let t = table(vec![
            short,
            row("Chile", "Private non-financial sector", "Chilean peso", ["1", "2", "3"]),
        ]);
        let grouped = group_by_country(&t);
        let record = extract_country("Chile", &grouped[0].groups);

        assert_eq!(record.times, vec![2000.0, 2000.25, 2000.5]);
        assert_eq!(record.get(Metric::PrivateDebt), Some(&vec![Some(1e9), Some(2e9), Some(3e9)]));
    }
}
