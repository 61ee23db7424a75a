//! Decimal-year time axis.
//!
//! Two encodings map onto the same axis:
//!
//! - calendar dates: `year + (month0 - 2) / 12`, where `month0` is the
//!   zero-based month. Quarter-end dates therefore land on the quarter start
//!   (March 2020 -> `2020.0`, June 2020 -> `2020.25`).
//! - quarter codes `YYYY-Qn`: `year + (n - 1) / 4`.
//!
//! Both are computed from integer components only, so equal periods give
//! bit-identical floats and can be joined by exact key equality.

use chrono::{Datelike, NaiveDate, TimeDelta};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::table::CellValue;

static QUARTER_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-Q([1-4])$").expect("quarter code regex"));

/// Spreadsheet serial day zero (the 1900 date system, leap-year bug included).
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Text date formats accepted in time cells, beyond what cell classification caught.
const TEXT_DATE_FMTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%d-%m-%Y", "%m/%d/%Y"];

pub fn decimal_year_from_date(date: NaiveDate) -> f64 {
    date.year() as f64 + (date.month0() as f64 - 2.0) / 12.0
}

pub fn decimal_year_from_quarter(code: &str) -> Option<f64> {
    let caps = QUARTER_CODE.captures(code)?;
    let year: i32 = caps[1].parse().ok()?;
    let quarter: u32 = caps[2].parse().ok()?;
    Some(year as f64 + (quarter as f64 - 1.0) / 4.0)
}

/// Convert a spreadsheet serial day number to a date.
///
/// Serials outside the representable date range yield `None`.
pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let (y, m, d) = SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(TimeDelta::try_days(serial.floor() as i64)?)
}

/// Normalize a time cell of any supported encoding.
pub fn decimal_year_from_cell(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Date(d) => Some(decimal_year_from_date(*d)),
        CellValue::Number(serial) => date_from_serial(*serial).map(decimal_year_from_date),
        CellValue::Text(s) => {
            let s = s.trim();
            if let Some(t) = decimal_year_from_quarter(s) {
                return Some(t);
            }
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, TEXT_DATE_FMTS[0]) {
                return Some(decimal_year_from_date(dt.date()));
            }
            TEXT_DATE_FMTS[1..]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(decimal_year_from_date)
        }
    }
}
