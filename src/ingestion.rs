//! Dataset ingestion and explicit dashboard state.
//!
//! A dataset is created once per ingestion event and replaces the previous
//! one wholesale; nothing is merged. Ingestion in a host UI is typically an
//! async file read whose completion calls into `DashboardState`; when two
//! reads overlap, whichever completes last wins. That race is accepted and
//! not guarded against here: the revision counter only records the order in
//! which datasets were installed.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::data::{GenreTag, MovieRecord, RawRow};
use crate::errors::DashboardError;
use crate::filter::{FilterSpec, filter_records};
use crate::normalize::normalize_rows;
use crate::pipeline::{DashboardView, view_of_filtered};
use crate::source::RowSource;
use crate::types::SourceId;

/// Distinct genre tags across `records`, sorted ascending.
pub fn genre_universe(records: &[MovieRecord]) -> BTreeSet<GenreTag> {
    records
        .iter()
        .flat_map(|record| record.genres.iter().cloned())
        .collect()
}

/// Normalized records from one ingestion event plus derived metadata.
#[derive(Clone, Debug)]
pub struct Dataset {
    source_id: SourceId,
    records: Vec<MovieRecord>,
    genre_universe: BTreeSet<GenreTag>,
    loaded_at: DateTime<Utc>,
    revision: u64,
}

impl Dataset {
    /// Dataset with no records (the state before any ingestion).
    pub fn empty() -> Self {
        Self::from_records("", Vec::new(), 0)
    }

    /// Build a dataset, deriving its genre universe from `records`.
    pub fn from_records(
        source_id: impl Into<SourceId>,
        records: Vec<MovieRecord>,
        revision: u64,
    ) -> Self {
        let genre_universe = genre_universe(&records);
        Self {
            source_id: source_id.into(),
            records,
            genre_universe,
            loaded_at: Utc::now(),
            revision,
        }
    }

    /// All normalized records, unfiltered.
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Every genre seen in the dataset; never narrowed by filtering.
    pub fn genre_universe(&self) -> &BTreeSet<GenreTag> {
        &self.genre_universe
    }

    /// Smallest and largest known year, if any record has one.
    pub fn year_bounds(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|record| record.year)
            .fold(None, |bounds, year| match bounds {
                None => Some((year, year)),
                Some((min, max)) => Some((f64::min(min, year), f64::max(max, year))),
            })
    }

    /// Id of the source this dataset was read from.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// When the dataset was installed.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Monotonic install counter (0 = nothing ingested yet).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

/// Outcome of a successful ingestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestReport {
    /// Source the rows came from.
    pub source_id: SourceId,
    /// Raw rows returned by the source.
    pub rows_read: usize,
    /// Rows that normalized into records.
    pub records_kept: usize,
    /// Rows dropped for a missing title.
    pub rows_dropped: usize,
    /// Size of the new genre universe.
    pub genres: usize,
    /// Dataset revision installed by this ingestion.
    pub revision: u64,
}

/// Application state owned by the presentation shell.
///
/// Holds the current dataset, filter spec, and ranked-table size. Every
/// `view` call recomputes the whole pipeline from the dataset.
#[derive(Clone, Debug)]
pub struct DashboardState {
    config: DashboardConfig,
    dataset: Dataset,
    filter: FilterSpec,
    top_n: usize,
}

impl DashboardState {
    /// Create an empty state after validating `config`.
    pub fn new(config: DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;
        let top_n = config.top_n;
        Ok(Self {
            config,
            dataset: Dataset::empty(),
            filter: FilterSpec::default(),
            top_n,
        })
    }

    /// Replace the dataset with the normalized form of `rows`.
    ///
    /// Year bounds of the filter are reset to the new dataset's year range,
    /// and active genres absent from the new genre universe are dropped.
    pub fn ingest_rows(&mut self, source_id: impl Into<SourceId>, rows: &[RawRow]) -> IngestReport {
        let source_id = source_id.into();
        let batch = normalize_rows(&self.config.field_aliases, rows);
        let revision = self.dataset.revision.saturating_add(1);
        let dataset = Dataset::from_records(source_id.clone(), batch.records, revision);

        let (year_min, year_max) = match dataset.year_bounds() {
            Some((min, max)) => (Some(min), Some(max)),
            None => (None, None),
        };
        self.filter.year_min = year_min;
        self.filter.year_max = year_max;
        let universe = dataset.genre_universe();
        self.filter.active_genres.retain(|tag| universe.contains(tag));

        let report = IngestReport {
            source_id,
            rows_read: rows.len(),
            records_kept: dataset.len(),
            rows_dropped: batch.dropped,
            genres: dataset.genre_universe().len(),
            revision,
        };
        if report.rows_dropped > 0 {
            debug!(
                source = %report.source_id,
                dropped = report.rows_dropped,
                "dropped rows without a usable title"
            );
        }
        info!(
            source = %report.source_id,
            records = report.records_kept,
            genres = report.genres,
            revision,
            "dataset ingested"
        );
        self.dataset = dataset;
        report
    }

    /// Read `source` and ingest its rows, keeping the prior dataset on failure.
    pub fn ingest_from(&mut self, source: &dyn RowSource) -> Result<IngestReport, DashboardError> {
        let result = source.read_rows();
        self.ingest_result(source.id(), result)
    }

    /// Ingest the outcome of an externally performed read.
    ///
    /// On `Err` the failure is logged as a warning, the current dataset stays
    /// in place, and the error is handed back for display.
    pub fn ingest_result(
        &mut self,
        source_id: &str,
        result: Result<Vec<RawRow>, DashboardError>,
    ) -> Result<IngestReport, DashboardError> {
        match result {
            Ok(rows) => Ok(self.ingest_rows(source_id, &rows)),
            Err(err) => {
                warn!(
                    source = source_id,
                    error = %err,
                    kept_revision = self.dataset.revision,
                    "ingestion failed; keeping current dataset"
                );
                Err(err)
            }
        }
    }

    /// Current dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Current filter spec.
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Mutable access for filter-state collaborators.
    pub fn filter_mut(&mut self) -> &mut FilterSpec {
        &mut self.filter
    }

    /// Replace the filter spec.
    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
    }

    /// Toggle one genre chip. Returns whether the genre is now active.
    pub fn toggle_genre(&mut self, tag: &str) -> bool {
        self.filter.toggle_genre(tag)
    }

    /// Clear every filter constraint.
    pub fn reset_filters(&mut self) {
        self.filter.reset();
    }

    /// Ranked-table size.
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Set the ranked-table size; `0` falls back to the configured size.
    pub fn set_top_n(&mut self, top_n: usize) {
        self.top_n = if top_n == 0 { self.config.top_n } else { top_n };
    }

    /// Configuration in effect.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Filtered subset of the current dataset.
    pub fn filtered(&self) -> Vec<MovieRecord> {
        filter_records(self.dataset.records(), &self.filter)
    }

    /// Recompute the full view for the current dataset and filter.
    pub fn view(&self) -> DashboardView {
        view_of_filtered(&self.filtered(), self.top_n, self.config.histogram_bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryRowSource;

    fn movie(title: &str, year: &str, genres: &str) -> RawRow {
        RawRow::new()
            .with_field("title", title)
            .with_field("year", year)
            .with_field("genres", genres)
            .with_field("rating", "7.0")
    }

    fn state() -> DashboardState {
        DashboardState::new(DashboardConfig::default()).unwrap()
    }

    #[test]
    fn new_state_is_empty_and_rejects_invalid_config() {
        let state = state();
        assert!(state.dataset().is_empty());
        assert_eq!(state.dataset().revision(), 0);
        assert_eq!(state.top_n(), 10);
        assert_eq!(state.view().summary.count, 0);

        let invalid = DashboardConfig {
            histogram_bins: 0,
            ..DashboardConfig::default()
        };
        assert!(DashboardState::new(invalid).is_err());
    }

    #[test]
    fn ingest_replaces_dataset_and_rebuilds_genre_universe() {
        let mut state = state();
        let first = state.ingest_rows("one", &[movie("A", "1990", "Drama|Crime"), movie("", "1991", "X")]);
        assert_eq!(first.rows_read, 2);
        assert_eq!(first.records_kept, 1);
        assert_eq!(first.rows_dropped, 1);
        assert_eq!(first.revision, 1);
        assert_eq!(
            state.dataset().genre_universe().iter().collect::<Vec<_>>(),
            vec!["Crime", "Drama"]
        );

        let second = state.ingest_rows("two", &[movie("B", "2000", "Comedy")]);
        assert_eq!(second.revision, 2);
        assert_eq!(state.dataset().source_id(), "two");
        assert_eq!(state.dataset().len(), 1);
        assert_eq!(
            state.dataset().genre_universe().iter().collect::<Vec<_>>(),
            vec!["Comedy"]
        );
    }

    #[test]
    fn ingest_sets_year_bounds_and_prunes_stale_genres() {
        let mut state = state();
        state.toggle_genre("Drama");
        state.toggle_genre("Western");
        state.ingest_rows(
            "one",
            &[
                movie("A", "1994", "Drama"),
                movie("B", "2010", "Action"),
                movie("C", "", "Drama"),
            ],
        );
        assert_eq!(state.filter().year_min, Some(1994.0));
        assert_eq!(state.filter().year_max, Some(2010.0));
        assert_eq!(
            state.filter().active_genres.iter().collect::<Vec<_>>(),
            vec!["Drama"]
        );
        assert_eq!(state.view().summary.count, 2);
    }

    #[test]
    fn genre_universe_is_not_narrowed_by_filtering() {
        let mut state = state();
        state.ingest_rows("one", &[movie("A", "1994", "Drama"), movie("B", "2010", "Action")]);
        state.filter_mut().title_query = "A".to_string();
        state.toggle_genre("Drama");
        assert_eq!(state.filtered().len(), 1);
        assert_eq!(state.dataset().genre_universe().len(), 2);
    }

    #[test]
    fn failed_ingestion_keeps_prior_dataset() {
        let mut state = state();
        state.ingest_rows("good", &[movie("A", "1994", "Drama")]);
        let err = state
            .ingest_result(
                "broken",
                Err(DashboardError::SourceUnavailable {
                    source_id: "broken".to_string(),
                    reason: "unreadable".to_string(),
                }),
            )
            .unwrap_err();
        assert!(matches!(err, DashboardError::SourceUnavailable { .. }));
        assert_eq!(state.dataset().source_id(), "good");
        assert_eq!(state.dataset().revision(), 1);
        assert_eq!(state.dataset().len(), 1);
    }

    #[test]
    fn ingest_from_reads_row_source() {
        let mut state = state();
        let source = InMemoryRowSource::new("memory", vec![movie("A", "1994", "Drama")]);
        let report = state.ingest_from(&source).unwrap();
        assert_eq!(report.source_id, "memory");
        assert_eq!(state.view().top.len(), 1);
    }

    #[test]
    fn reset_and_top_n_controls() {
        let mut state = state();
        state.ingest_rows("one", &[movie("A", "1994", "Drama"), movie("B", "2010", "Action")]);
        state.set_filter(FilterSpec::default().with_genre("Action"));
        assert_eq!(state.view().summary.count, 1);
        state.reset_filters();
        assert_eq!(state.view().summary.count, 2);

        state.set_top_n(1);
        assert_eq!(state.view().top.len(), 1);
        state.set_top_n(0);
        assert_eq!(state.top_n(), 10);
    }

    #[test]
    fn year_bounds_absent_without_known_years() {
        let dataset = Dataset::from_records("x", vec![MovieRecord::titled("A")], 1);
        assert_eq!(dataset.year_bounds(), None);
        assert!(dataset.loaded_at() <= Utc::now());
    }
}
