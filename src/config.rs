use std::borrow::Cow;

use crate::constants::aliases;
use crate::constants::metrics::DEFAULT_HISTOGRAM_BINS;
use crate::constants::ranking::DEFAULT_TOP_N;
use crate::errors::DashboardError;

/// Ordered field-name candidates for each domain field.
///
/// Lookups are case-sensitive; add spelling variants explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldAliases {
    /// Candidates for the title field.
    pub title: Vec<Cow<'static, str>>,
    /// Candidates for the release year.
    pub year: Vec<Cow<'static, str>>,
    /// Candidates for the genre list.
    pub genres: Vec<Cow<'static, str>>,
    /// Candidates for the rating.
    pub rating: Vec<Cow<'static, str>>,
    /// Candidates for the vote count.
    pub votes: Vec<Cow<'static, str>>,
    /// Candidates for the revenue.
    pub revenue: Vec<Cow<'static, str>>,
    /// Candidates for the runtime.
    pub runtime: Vec<Cow<'static, str>>,
}

fn borrowed(names: &[&'static str]) -> Vec<Cow<'static, str>> {
    names.iter().map(|name| Cow::Borrowed(*name)).collect()
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            title: borrowed(aliases::TITLE),
            year: borrowed(aliases::YEAR),
            genres: borrowed(aliases::GENRES),
            rating: borrowed(aliases::RATING),
            votes: borrowed(aliases::VOTES),
            revenue: borrowed(aliases::REVENUE),
            runtime: borrowed(aliases::RUNTIME),
        }
    }
}

impl FieldAliases {
    /// Append an extra title alias, tried after the existing ones.
    pub fn with_title_alias(mut self, alias: impl Into<Cow<'static, str>>) -> Self {
        self.title.push(alias.into());
        self
    }
}

/// Top-level dashboard configuration.
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    /// Requested number of runtime histogram bins.
    pub histogram_bins: usize,
    /// Initial size of the ranked table.
    pub top_n: usize,
    /// Field alias table used by the normalizer.
    pub field_aliases: FieldAliases,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            top_n: DEFAULT_TOP_N,
            field_aliases: FieldAliases::default(),
        }
    }
}

impl DashboardConfig {
    /// Reject configurations that could never produce a usable view.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.histogram_bins == 0 {
            return Err(DashboardError::Configuration(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        if self.field_aliases.title.is_empty() {
            return Err(DashboardError::Configuration(
                "field_aliases.title must name at least one field".to_string(),
            ));
        }
        Ok(())
    }
}
