#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Chart-facing aggregate series.
pub mod aggregates;
/// Dashboard configuration types.
pub mod config;
/// Centralized constants used across normalization, metrics, and sources.
pub mod constants;
/// Raw row and normalized record types.
pub mod data;
/// Reusable report runners shared by demo binaries.
pub mod example_apps;
/// Filter specification and evaluator.
pub mod filter;
/// Display formatting for metric cards and ranked tables.
pub mod format;
/// Dataset ingestion and explicit dashboard state.
pub mod ingestion;
/// Summary metrics helpers.
pub mod metrics;
/// Row normalization into movie records.
pub mod normalize;
/// End-to-end view computation.
pub mod pipeline;
/// Top-N ranking.
pub mod ranking;
/// Row source traits and built-in sources.
pub mod source;
/// Shared type aliases.
pub mod types;

mod errors;

pub use aggregates::{
    Aggregates, Histogram, LabeledSeries, ScatterPoint, build_aggregates, genre_mean_rating,
    revenue_rating_points, runtime_histogram, year_mean_rating,
};
pub use config::{DashboardConfig, FieldAliases};
pub use data::{MovieRecord, RawRow};
pub use errors::DashboardError;
pub use filter::{FilterSpec, filter_records};
pub use ingestion::{DashboardState, Dataset, IngestReport, genre_universe};
pub use metrics::{Summary, summarize, to_millions};
pub use normalize::{normalize, normalize_with};
pub use pipeline::{DashboardView, compute_view};
pub use ranking::top_n;
pub use source::{CsvRowSource, InMemoryRowSource, RowSource, SampleSource};
pub use types::{FieldName, GenreTag, SeriesLabel, SourceId, Title};
