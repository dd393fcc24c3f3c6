//! Chart-facing aggregate series.
//!
//! Each builder is an independent reducer over the filtered set with its own
//! null policy: records missing a field a builder needs are skipped by that
//! builder only.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize, Serializer};

use crate::constants::metrics::{POINT_WEIGHT_EXPONENT, POINT_WEIGHT_MAX, POINT_WEIGHT_MIN};
use crate::data::{GenreTag, MovieRecord, Title};
use crate::metrics::to_millions;
use crate::types::SeriesLabel;

/// Parallel label/value sequences for a bar or line chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeries<L> {
    /// Category or axis labels.
    pub labels: Vec<L>,
    /// Value per label, same length as `labels`.
    pub values: Vec<f64>,
}

impl<L> LabeledSeries<L> {
    /// Number of (label, value) pairs.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when the series has no points.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate `(label, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&L, f64)> {
        self.labels.iter().zip(self.values.iter().copied())
    }
}

/// Equal-width runtime histogram.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin labels formatted as `"<low>-<high>"`.
    pub labels: Vec<SeriesLabel>,
    /// Number of values in each bin.
    pub counts: Vec<usize>,
}

/// One point of the revenue-vs-rating scatter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Rating.
    pub x: f64,
    /// Revenue in millions.
    pub y: f64,
    /// Marker size derived from vote count.
    pub weight: f64,
    /// Title shown in tooltips.
    pub title: Title,
}

/// The four chart series derived from one filtered set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    /// Mean rating per genre.
    pub genre_rating: LabeledSeries<GenreTag>,
    /// Mean rating per release year.
    #[serde(serialize_with = "serialize_year_series")]
    pub year_rating: LabeledSeries<f64>,
    /// Runtime distribution.
    pub runtime_histogram: Histogram,
    /// Revenue-vs-rating scatter.
    pub revenue_rating: Vec<ScatterPoint>,
}

/// Largest magnitude at which every integer is exactly representable (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Year label that serializes whole years as integers (`1957`, not `1957.0`).
struct YearLabel(f64);

impl Serialize for YearLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let year = self.0;
        if year.fract() == 0.0 && year.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(year as i64)
        } else {
            serializer.serialize_f64(year)
        }
    }
}

fn serialize_year_series<S: Serializer>(
    series: &LabeledSeries<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    LabeledSeries {
        labels: series.labels.iter().copied().map(YearLabel).collect(),
        values: series.values.clone(),
    }
    .serialize(serializer)
}

/// Build all four series over `records`.
pub fn build_aggregates(records: &[MovieRecord], num_bins: usize) -> Aggregates {
    let runtimes: Vec<f64> = records.iter().filter_map(|record| record.runtime).collect();
    Aggregates {
        genre_rating: genre_mean_rating(records),
        year_rating: year_mean_rating(records),
        runtime_histogram: runtime_histogram(&runtimes, num_bins),
        revenue_rating: revenue_rating_points(records),
    }
}

/// Mean rating per genre tag, labels sorted ascending.
///
/// A record contributes to every tag it lists, once per occurrence.
pub fn genre_mean_rating(records: &[MovieRecord]) -> LabeledSeries<GenreTag> {
    let mut by_genre: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in records {
        let Some(rating) = record.rating else {
            continue;
        };
        for genre in &record.genres {
            let entry = by_genre.entry(genre.as_str()).or_insert((0.0, 0));
            entry.0 += rating;
            entry.1 += 1;
        }
    }
    let mut series = LabeledSeries {
        labels: Vec::with_capacity(by_genre.len()),
        values: Vec::with_capacity(by_genre.len()),
    };
    for (genre, (sum, count)) in by_genre {
        series.labels.push(genre.to_string());
        series.values.push(sum / count as f64);
    }
    series
}

/// Mean rating per release year, labels sorted ascending.
pub fn year_mean_rating(records: &[MovieRecord]) -> LabeledSeries<f64> {
    let mut by_year: HashMap<u64, (f64, usize)> = HashMap::new();
    for record in records {
        let (Some(year), Some(rating)) = (record.year, record.rating) else {
            continue;
        };
        // `+ 0.0` folds -0.0 into 0.0 so both land in one bucket.
        let entry = by_year.entry((year + 0.0).to_bits()).or_insert((0.0, 0));
        entry.0 += rating;
        entry.1 += 1;
    }
    let mut years: Vec<(f64, f64)> = by_year
        .into_iter()
        .map(|(bits, (sum, count))| (f64::from_bits(bits), sum / count as f64))
        .collect();
    years.sort_by(|a, b| a.0.total_cmp(&b.0));
    LabeledSeries {
        labels: years.iter().map(|(year, _)| *year).collect(),
        values: years.iter().map(|(_, mean)| *mean).collect(),
    }
}

/// Bin runtime values into equal-width integer-edged bins.
///
/// Width is `max(1, ceil((max - min) / num_bins))`; edges start at
/// `floor(min)` and continue while `edge <= ceil(max) + width`, so the bin
/// count can differ slightly from `num_bins`. Indexes past the last bin are
/// clamped into it. `num_bins == 0` is treated as 1.
///
/// The edge count is computed up front and capped at `num_bins + 4`, so
/// magnitudes where `edge + width == edge`, or ranges too wide to subtract,
/// still produce a bounded histogram.
pub fn runtime_histogram(values: &[f64], num_bins: usize) -> Histogram {
    if values.is_empty() {
        return Histogram::default();
    }
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(*value), max.max(*value))
        });
    let bins = num_bins.max(1);
    let width = scaled_distance(min, max, bins as f64).ceil().max(1.0);
    let first_edge = min.floor();
    if !width.is_finite() || !first_edge.is_finite() {
        return Histogram {
            labels: vec![format!("{first_edge}-{}", max.ceil())],
            counts: vec![values.len()],
        };
    }

    let last_edge = max.ceil() + width;
    let span = scaled_distance(first_edge, last_edge, width).floor();
    let edge_count = if span.is_finite() && span >= 0.0 {
        (span as usize).saturating_add(1)
    } else {
        2
    }
    .clamp(2, bins.saturating_add(4));
    let edges: Vec<f64> = (0..edge_count)
        .map(|i| first_edge + i as f64 * width)
        .collect();

    let mut counts = vec![0usize; edge_count - 1];
    let last_bin = counts.len() - 1;
    for value in values {
        let offset = scaled_distance(first_edge, *value, width).floor();
        let idx = if offset > 0.0 { offset as usize } else { 0 };
        counts[idx.min(last_bin)] += 1;
    }
    let labels = edges
        .windows(2)
        .map(|pair| format!("{}-{}", pair[0], pair[1]))
        .collect();
    Histogram { labels, counts }
}

/// `(high - low) / scale`, dividing first when the subtraction overflows.
fn scaled_distance(low: f64, high: f64, scale: f64) -> f64 {
    let direct = (high - low) / scale;
    if direct.is_finite() {
        direct
    } else {
        high / scale - low / scale
    }
}

/// Scatter points for records with known revenue and rating.
pub fn revenue_rating_points(records: &[MovieRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .filter_map(|record| {
            let (Some(revenue), Some(rating)) = (record.revenue, record.rating) else {
                return None;
            };
            Some(ScatterPoint {
                x: rating,
                y: to_millions(revenue),
                weight: point_weight(record.votes),
                title: record.title.clone(),
            })
        })
        .collect()
}

/// Marker weight `clamp(votes^0.25, 3, 8)`; unknown or negative votes count as 0.
pub fn point_weight(votes: Option<f64>) -> f64 {
    votes
        .unwrap_or(0.0)
        .max(0.0)
        .powf(POINT_WEIGHT_EXPONENT)
        .clamp(POINT_WEIGHT_MIN, POINT_WEIGHT_MAX)
}
