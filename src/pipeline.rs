use serde::{Deserialize, Serialize};

use crate::aggregates::{Aggregates, build_aggregates};
use crate::data::MovieRecord;
use crate::filter::{FilterSpec, filter_records};
use crate::metrics::{Summary, summarize};
use crate::ranking::top_n;

/// Everything the presentation layer renders for one filter state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Scalar metric cards.
    pub summary: Summary,
    /// Chart series.
    pub aggregates: Aggregates,
    /// Ranked table rows.
    pub top: Vec<MovieRecord>,
}

/// Run filter, then summary/aggregates/ranking over the filtered subset.
///
/// Recomputes from scratch on every call; the three consumers are
/// independent and only share the filtered input.
pub fn compute_view(
    records: &[MovieRecord],
    spec: &FilterSpec,
    table_size: usize,
    histogram_bins: usize,
) -> DashboardView {
    let filtered = filter_records(records, spec);
    view_of_filtered(&filtered, table_size, histogram_bins)
}

/// Derive the view from an already-filtered subset.
pub fn view_of_filtered(
    filtered: &[MovieRecord],
    table_size: usize,
    histogram_bins: usize,
) -> DashboardView {
    DashboardView {
        summary: summarize(filtered),
        aggregates: build_aggregates(filtered, histogram_bins),
        top: top_n(filtered, table_size),
    }
}
