use std::cmp::Ordering;

use crate::data::MovieRecord;

/// Highest-rated records, at most `n` of them.
///
/// Unrated records are excluded. Ordering is rating descending, then votes
/// descending with unknown votes compared as 0; records that remain tied keep
/// their input order.
pub fn top_n(records: &[MovieRecord], n: usize) -> Vec<MovieRecord> {
    let mut rated: Vec<&MovieRecord> = records
        .iter()
        .filter(|record| record.rating.is_some())
        .collect();
    // `sort_by` is stable, which keeps fully tied records in input order.
    rated.sort_by(|a, b| rank_order(a, b));
    rated.into_iter().take(n).cloned().collect()
}

fn rank_order(a: &MovieRecord, b: &MovieRecord) -> Ordering {
    let rating = |record: &MovieRecord| record.rating.unwrap_or(f64::NEG_INFINITY);
    let votes = |record: &MovieRecord| record.votes.unwrap_or(0.0);
    rating(b)
        .partial_cmp(&rating(a))
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            votes(b)
                .partial_cmp(&votes(a))
                .unwrap_or(Ordering::Equal)
        })
}
