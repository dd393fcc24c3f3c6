use serde::{Deserialize, Serialize};

use crate::constants::metrics::{MILLION, REVENUE_RAW_UNIT_THRESHOLD};
use crate::data::MovieRecord;

/// Scalar summary of a record set.
///
/// Means fall back to `0.0` when no record contributes a known value, so
/// display code can always render a number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of records in the set.
    pub count: usize,
    /// Mean of known ratings.
    pub mean_rating: f64,
    /// Mean of known revenues, in millions.
    pub mean_revenue_millions: f64,
    /// Mean of known runtimes in minutes.
    pub mean_runtime: f64,
}

/// Compute count and mean rating/revenue/runtime over `records`.
pub fn summarize(records: &[MovieRecord]) -> Summary {
    Summary {
        count: records.len(),
        mean_rating: mean_or_zero(records.iter().filter_map(|record| record.rating)),
        mean_revenue_millions: mean_or_zero(
            records
                .iter()
                .filter_map(|record| record.revenue)
                .map(to_millions),
        ),
        mean_runtime: mean_or_zero(records.iter().filter_map(|record| record.runtime)),
    }
}

/// Express revenue in millions.
///
/// Values `>= 1_000_000` are taken as raw currency units and divided down;
/// smaller values are assumed to already be millions. This is a heuristic:
/// a dataset mixing both units will be silently mis-scaled.
pub fn to_millions(revenue: f64) -> f64 {
    if revenue >= REVENUE_RAW_UNIT_THRESHOLD {
        revenue / MILLION
    } else {
        revenue
    }
}

/// Median of `values`, or `None` when empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Median of known ratings in `records`.
pub fn median_rating(records: &[MovieRecord]) -> Option<f64> {
    let ratings: Vec<f64> = records.iter().filter_map(|record| record.rating).collect();
    median(&ratings)
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn mean_or_zero(values: impl Iterator<Item = f64>) -> f64 {
    mean(values).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rating: Option<f64>, revenue: Option<f64>, runtime: Option<f64>) -> MovieRecord {
        MovieRecord {
            rating,
            revenue,
            runtime,
            ..MovieRecord::titled("m")
        }
    }

    #[test]
    fn summarize_empty_is_all_zero() {
        assert_eq!(
            summarize(&[]),
            Summary {
                count: 0,
                mean_rating: 0.0,
                mean_revenue_millions: 0.0,
                mean_runtime: 0.0,
            }
        );
    }

    #[test]
    fn summarize_ignores_unknown_values_but_counts_records() {
        let records = vec![
            record(Some(8.0), Some(2_000_000.0), None),
            record(None, Some(4.0), Some(100.0)),
            record(Some(6.0), None, Some(120.0)),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.count, 3);
        assert!((summary.mean_rating - 7.0).abs() < 1e-9);
        assert!((summary.mean_revenue_millions - 3.0).abs() < 1e-9);
        assert!((summary.mean_runtime - 110.0).abs() < 1e-9);
    }

    #[test]
    fn summarize_with_no_known_fields_falls_back_to_zero() {
        let summary = summarize(&[record(None, None, None)]);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean_rating, 0.0);
        assert_eq!(summary.mean_revenue_millions, 0.0);
        assert_eq!(summary.mean_runtime, 0.0);
    }

    #[test]
    fn to_millions_scales_only_raw_units() {
        assert!((to_millions(28_341_469.0) - 28.341469).abs() < 1e-9);
        assert_eq!(to_millions(45.0), 45.0);
        assert_eq!(to_millions(1_000_000.0), 1.0);
        assert_eq!(to_millions(999_999.0), 999_999.0);
    }

    #[test]
    fn median_handles_odd_even_and_empty() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(
            median_rating(&[record(Some(9.0), None, None), record(None, None, None)]),
            Some(9.0)
        );
    }
}
