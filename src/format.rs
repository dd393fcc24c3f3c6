//! Display strings for metric cards and the ranked table.

use serde::Serialize;

use crate::data::MovieRecord;
use crate::metrics::{Summary, to_millions};

/// Metric card texts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetricCards {
    /// Record count with thousands separators.
    pub movies: String,
    /// Mean rating, two decimals.
    pub mean_rating: String,
    /// Mean revenue in millions, two decimals.
    pub mean_revenue_millions: String,
    /// Mean runtime in whole minutes.
    pub mean_runtime: String,
}

impl From<&Summary> for MetricCards {
    fn from(summary: &Summary) -> Self {
        Self {
            movies: format_thousands(summary.count as f64),
            mean_rating: format_fixed_or_zero(summary.mean_rating, 2),
            mean_revenue_millions: format_fixed_or_zero(summary.mean_revenue_millions, 2),
            mean_runtime: format_fixed_or_zero(summary.mean_runtime, 0),
        }
    }
}

/// One ranked-table row; unknown fields render as empty strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Title.
    pub title: String,
    /// Release year.
    pub year: String,
    /// Comma-joined genre tags.
    pub genres: String,
    /// Rating, one decimal.
    pub rating: String,
    /// Votes with thousands separators.
    pub votes: String,
    /// Revenue in millions.
    pub revenue_millions: String,
    /// Runtime in minutes.
    pub runtime: String,
}

impl From<&MovieRecord> for TableRow {
    fn from(record: &MovieRecord) -> Self {
        Self {
            title: record.title.clone(),
            year: record.year.map(|year| year.to_string()).unwrap_or_default(),
            genres: record.genres.join(", "),
            rating: record
                .rating
                .map(|rating| format!("{rating:.1}"))
                .unwrap_or_default(),
            votes: record.votes.map(format_thousands).unwrap_or_default(),
            revenue_millions: record
                .revenue
                .map(|revenue| format!("{:.1}", to_millions(revenue)))
                .unwrap_or_default(),
            runtime: record
                .runtime
                .map(|runtime| runtime.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Table rows for `records`, in order.
pub fn table_rows(records: &[MovieRecord]) -> Vec<TableRow> {
    records.iter().map(TableRow::from).collect()
}

/// Group the integer part of `value` with commas (`2700000` -> `2,700,000`).
///
/// Fractional digits, if any, are kept as-is after the grouped part.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = value.abs().to_string();
    let (integer, fraction) = match raw.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (raw.as_str(), None),
    };
    let mut grouped_reversed = String::with_capacity(integer.len() + (integer.len() / 3));
    for (idx, ch) in integer.chars().rev().enumerate() {
        if idx > 0 && idx % 3 == 0 {
            grouped_reversed.push(',');
        }
        grouped_reversed.push(ch);
    }
    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.extend(grouped_reversed.chars().rev());
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn format_fixed_or_zero(value: f64, decimals: usize) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}
