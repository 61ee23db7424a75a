//! Null-propagating series arithmetic.
//!
//! A `None` operand always yields `None`; there is no implicit zero-fill.

use crate::domain::Series;

/// First difference. `out[0]` is always `0`; later points are `None` when
/// either neighbour is missing.
pub fn diff(values: &[Option<f64>]) -> Series {
    if values.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len());
    out.push(Some(0.0));
    for pair in values.windows(2) {
        out.push(match (pair[0], pair[1]) {
            (Some(a), Some(b)) => Some(b - a),
            _ => None,
        });
    }
    out
}

/// Elementwise `f(a[i], b[i])`, `None` wherever either side is `None`.
///
/// Both inputs must share one time axis.
pub fn combine(a: &[Option<f64>], b: &[Option<f64>], f: impl Fn(f64, f64) -> f64) -> Series {
    debug_assert_eq!(a.len(), b.len(), "combine() on series of different length");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(f(*x, *y)),
            _ => None,
        })
        .collect()
}

/// [`diff`] over a possibly absent series.
pub fn diff_opt(values: Option<&Series>) -> Option<Series> {
    values.map(|v| diff(v))
}

/// [`combine`] over possibly absent series; absent when either input is.
pub fn combine_opt(a: Option<&Series>, b: Option<&Series>, f: impl Fn(f64, f64) -> f64) -> Option<Series> {
    Some(combine(a?, b?, f))
}

/// Linear interpolation of `n` equal sub-steps between consecutive points.
///
/// Produces `n * (len - 1)` points; the final input point is not emitted. A
/// missing endpoint keeps the known left value on the first sub-step and leaves
/// the interpolated sub-steps missing.
pub fn expand_values(values: &[Option<f64>], n: usize) -> Series {
    let mut out = Vec::with_capacity(n * values.len().saturating_sub(1));
    for pair in values.windows(2) {
        for step in 0..n {
            let frac = step as f64 / n as f64;
            out.push(match (pair[0], pair[1]) {
                (Some(y), Some(next)) => Some(y + (next - y) * frac),
                (Some(y), None) if step == 0 => Some(y),
                _ => None,
            });
        }
    }
    out
}

/// [`expand_values`] for a time axis, which never has gaps.
pub fn expand_times(times: &[f64], n: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(n * times.len().saturating_sub(1));
    for pair in times.windows(2) {
        for step in 0..n {
            out.push(pair[0] + (pair[1] - pair[0]) * (step as f64 / n as f64));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_starts_at_zero_and_propagates_nulls() {
        let out = diff(&[Some(1.0), Some(4.0), None, Some(10.0), Some(11.0)]);
        assert_eq!(out, vec![Some(0.0), Some(3.0), None, None, Some(1.0)]);
        assert!(diff(&[]).is_empty());
        assert_eq!(diff(&[None]), vec![Some(0.0)]);
        assert_eq!(diff_opt(None), None);
    }

    #[test]
    fn combine_propagates_nulls() {
        let a = vec![Some(1.0), None, Some(3.0)];
        let b = vec![Some(10.0), Some(20.0), None];
        assert_eq!(combine(&a, &b, |x, y| x + y), vec![Some(11.0), None, None]);
        assert_eq!(combine_opt(None, Some(&b), |x, y| x + y), None);
        assert_eq!(combine_opt(Some(&a), None, |x, y| x + y), None);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn combine_rejects_length_mismatch() {
        combine(&[Some(1.0)], &[Some(1.0), Some(2.0)], |x, y| x + y);
    }

    #[test]
    fn expand_values_drops_last_point() {
        let out = expand_values(&[Some(10.0), Some(20.0), Some(30.0)], 4);
        let expected = [10.0, 12.5, 15.0, 17.5, 20.0, 22.5, 25.0, 27.5];
        assert_eq!(out.len(), 8);
        for (got, want) in out.iter().zip(expected) {
            assert!((got.unwrap() - want).abs() < 1e-12);
        }
        assert!(expand_values(&[Some(1.0)], 4).is_empty());
    }

    #[test]
    fn expand_values_with_missing_endpoint() {
        let out = expand_values(&[Some(10.0), None, Some(30.0)], 2);
        assert_eq!(out, vec![Some(10.0), None, None, None]);
    }

    #[test]
    fn expanded_years_are_exact_quarters() {
        let out = expand_times(&[2000.0, 2001.0], 4);
        assert_eq!(out, vec![2000.0, 2000.25, 2000.5, 2000.75]);
    }
}
