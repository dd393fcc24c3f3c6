use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::{GenreTag, MovieRecord};

/// User-chosen constraints applied to the full record set.
///
/// Missing data is never penalized: a record with an unknown year passes
/// both year bounds and a record with unknown votes passes `min_votes`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Inclusive lower year bound (`None` = unbounded).
    pub year_min: Option<f64>,
    /// Inclusive upper year bound (`None` = unbounded).
    pub year_max: Option<f64>,
    /// Minimum vote count for records whose votes are known.
    pub min_votes: f64,
    /// Genre restriction with match-any semantics (empty = unrestricted).
    pub active_genres: BTreeSet<GenreTag>,
    /// Case-insensitive title substring (empty = unrestricted).
    pub title_query: String,
}

impl FilterSpec {
    /// Set both year bounds.
    pub fn with_year_range(mut self, year_min: Option<f64>, year_max: Option<f64>) -> Self {
        self.year_min = year_min;
        self.year_max = year_max;
        self
    }

    /// Set the minimum vote count.
    pub fn with_min_votes(mut self, min_votes: f64) -> Self {
        self.min_votes = min_votes;
        self
    }

    /// Add a genre to the active set.
    pub fn with_genre(mut self, tag: impl Into<GenreTag>) -> Self {
        self.active_genres.insert(tag.into());
        self
    }

    /// Set the title query.
    pub fn with_title_query(mut self, query: impl Into<String>) -> Self {
        self.title_query = query.into();
        self
    }

    /// Add `tag` if absent, remove it if present. Returns whether it is now active.
    pub fn toggle_genre(&mut self, tag: &str) -> bool {
        if self.active_genres.remove(tag) {
            false
        } else {
            self.active_genres.insert(tag.to_string());
            true
        }
    }

    /// Clear every constraint.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` when `record` satisfies every constraint.
    pub fn matches(&self, record: &MovieRecord) -> bool {
        self.matches_with_query(record, &self.title_query.to_lowercase())
    }

    fn matches_with_query(&self, record: &MovieRecord, lowered_query: &str) -> bool {
        if self
            .year_min
            .zip(record.year)
            .is_some_and(|(year_min, year)| year < year_min)
        {
            return false;
        }
        if self
            .year_max
            .zip(record.year)
            .is_some_and(|(year_max, year)| year > year_max)
        {
            return false;
        }
        if record.votes.is_some_and(|votes| votes < self.min_votes) {
            return false;
        }
        if !self.active_genres.is_empty()
            && !record
                .genres
                .iter()
                .any(|genre| self.active_genres.contains(genre))
        {
            return false;
        }
        if !lowered_query.is_empty() && !record.title.to_lowercase().contains(lowered_query) {
            return false;
        }
        true
    }
}

/// Stable subsequence of `records` matching `spec`.
pub fn filter_records(records: &[MovieRecord], spec: &FilterSpec) -> Vec<MovieRecord> {
    let lowered_query = spec.title_query.to_lowercase();
    records
        .iter()
        .filter(|record| spec.matches_with_query(record, &lowered_query))
        .cloned()
        .collect()
}
