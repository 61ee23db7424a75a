//! Row pruning for freshly extracted records.
//!
//! A time point is dropped from every series (and from `times`) when each value
//! series is missing or exactly `0` there. Zeros that survive are rewritten to
//! `None`: sources report "no data" as `0`, so a literal zero is read as missing.

use tracing::debug;

use crate::domain::CountryRecord;

fn is_blank(v: Option<f64>) -> bool {
    v.is_none_or(|x| x == 0.0)
}

/// Drop all-blank rows and null out remaining zeros, keeping series aligned.
///
/// A record without value series loses every row.
pub fn remove_blank_values(record: CountryRecord) -> CountryRecord {
    let CountryRecord { times, metrics } = record;
    let keep: Vec<bool> = (0..times.len())
        .map(|i| !metrics.values().all(|s| is_blank(s.get(i).copied().flatten())))
        .collect();

    let times: Vec<f64> = times
        .into_iter()
        .zip(&keep)
        .filter_map(|(t, &k)| k.then_some(t))
        .collect();

    let metrics = metrics
        .into_iter()
        .map(|(metric, series)| {
            let pruned = series
                .into_iter()
                .zip(&keep)
                .filter(|(_, k)| **k)
                .map(|(v, _)| v.filter(|x| *x != 0.0))
                .collect();
            (metric, pruned)
        })
        .collect();

    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        debug!(dropped, kept = times.len(), "pruned blank rows");
    }

    CountryRecord { times, metrics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Metric;

    #[test]
    fn drops_all_blank_rows_and_nulls_zeros() {
        let mut record = CountryRecord::new(vec![0.0, 1.0, 2.0]);
        record.insert(Metric::PrivateDebt, vec![Some(0.0), Some(1.0), Some(0.0)]);
        record.insert(Metric::PublicDebt, vec![Some(0.0), Some(0.0), Some(2.0)]);

        let out = remove_blank_values(record);
        assert_eq!(out.times, vec![1.0, 2.0]);
        assert_eq!(out.get(Metric::PrivateDebt), Some(&vec![Some(1.0), None]));
        assert_eq!(out.get(Metric::PublicDebt), Some(&vec![None, Some(2.0)]));
    }

    #[test]
    fn keeps_rows_with_any_value() {
        let mut record = CountryRecord::new(vec![2000.0, 2000.25, 2000.5]);
        record.insert(Metric::PrivateDebt, vec![None, Some(5.0), None]);
        record.insert(Metric::PrivateDebtPercent, vec![None, None, Some(50.0)]);

        let out = remove_blank_values(record);
        assert_eq!(out.times, vec![2000.25, 2000.5]);
        assert_eq!(out.get(Metric::PrivateDebt), Some(&vec![Some(5.0), None]));
        assert_eq!(out.get(Metric::PrivateDebtPercent), Some(&vec![None, Some(50.0)]));
    }

    #[test]
    fn record_without_values_becomes_empty() {
        let out = remove_blank_values(CountryRecord::new(vec![2000.0, 2000.25]));
        assert!(out.is_empty());
    }
}
