//! Record normalization: loosely-typed rows into `MovieRecord`s.
//!
//! Every domain field is resolved through an ordered alias list (see
//! `FieldAliases`). The first alias holding a present, non-blank value wins;
//! later aliases are not consulted even if that value fails to parse.

use std::borrow::Cow;

use serde_json::Value;

use crate::config::FieldAliases;
use crate::constants::normalize::{GENRE_SEPARATORS, NUMERIC_NOISE};
use crate::data::{GenreTag, MovieRecord, RawRow};

/// Records kept from a batch of rows plus the number of rows dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedBatch {
    /// Normalized records in input order.
    pub records: Vec<MovieRecord>,
    /// Rows discarded because no title could be resolved.
    pub dropped: usize,
}

/// Normalize one row using the default alias table.
///
/// Returns `None` when the row has no usable title.
pub fn normalize(row: &RawRow) -> Option<MovieRecord> {
    normalize_with(&FieldAliases::default(), row)
}

/// Normalize one row using an explicit alias table.
pub fn normalize_with(aliases: &FieldAliases, row: &RawRow) -> Option<MovieRecord> {
    let title = resolve(row, &aliases.title)
        .and_then(value_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())?;

    let genres = resolve(row, &aliases.genres)
        .and_then(value_text)
        .map(|text| split_genres(&text))
        .unwrap_or_default();

    Some(MovieRecord {
        title,
        year: resolve_number(row, &aliases.year),
        genres,
        rating: resolve_number(row, &aliases.rating),
        votes: resolve_number(row, &aliases.votes),
        revenue: resolve_number(row, &aliases.revenue),
        runtime: resolve_number(row, &aliases.runtime),
    })
}

/// Normalize a full row set, counting rows that had to be dropped.
pub fn normalize_rows<'a, I>(aliases: &FieldAliases, rows: I) -> NormalizedBatch
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let mut batch = NormalizedBatch::default();
    for row in rows {
        match normalize_with(aliases, row) {
            Some(record) => batch.records.push(record),
            None => batch.dropped += 1,
        }
    }
    batch
}

/// Coerce a loosely-typed value into a finite number.
///
/// Strings have currency symbols, thousands separators, and whitespace
/// stripped before parsing. Blank, non-finite, and non-scalar values yield
/// `None`.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|parsed| parsed.is_finite()),
        Value::String(text) => parse_number_str(text),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// String form of `parse_number`.
pub fn parse_number_str(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|ch| !ch.is_whitespace() && !NUMERIC_NOISE.contains(ch))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

/// Split a genre field on `,` or `|`, trimming tokens and dropping empty ones.
pub fn split_genres(text: &str) -> Vec<GenreTag> {
    text.split(GENRE_SEPARATORS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn resolve<'a>(row: &'a RawRow, candidates: &[Cow<'static, str>]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|name| row.get(name))
        .find(|value| !is_blank(value))
}

fn resolve_number(row: &RawRow, candidates: &[Cow<'static, str>]) -> Option<f64> {
    resolve(row, candidates).and_then(parse_number)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

fn value_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().map(|(name, value)| (*name, *value)).collect()
    }

    #[test]
    fn blank_or_missing_title_drops_row() {
        assert!(normalize(&row(&[("year", "1999")])).is_none());
        assert!(normalize(&row(&[("title", ""), ("year", "1999")])).is_none());
        assert!(normalize(&row(&[("title", "   ")])).is_none());
        assert!(normalize(&RawRow::new().with_field("title", Value::Null)).is_none());
    }

    #[test]
    fn title_falls_back_through_aliases_in_order() {
        let record = normalize(&row(&[("title", ""), ("Title", "Heat"), ("primaryTitle", "X")]))
            .expect("record");
        assert_eq!(record.title, "Heat");

        let record = normalize(&row(&[("primaryTitle", "  Up  ")])).expect("record");
        assert_eq!(record.title, "Up");
    }

    #[test]
    fn non_numeric_year_becomes_none_but_row_is_kept() {
        let record = normalize(&row(&[("title", "Heat"), ("year", "nineteen")])).expect("record");
        assert_eq!(record.year, None);
    }

    #[test]
    fn numeric_fields_strip_currency_commas_and_whitespace() {
        let record = normalize(&row(&[
            ("title", "Heat"),
            ("gross", "$ 187,436,818"),
            ("numVotes", "700,000"),
            ("runtimeMinutes", " 170 "),
            ("imdbRating", "8.3"),
            ("startYear", "1995"),
        ]))
        .expect("record");
        assert_eq!(record.revenue, Some(187_436_818.0));
        assert_eq!(record.votes, Some(700_000.0));
        assert_eq!(record.runtime, Some(170.0));
        assert_eq!(record.rating, Some(8.3));
        assert_eq!(record.year, Some(1995.0));
    }

    #[test]
    fn first_non_blank_alias_wins_even_if_unparseable() {
        let record = normalize(&row(&[
            ("title", "Heat"),
            ("rating", ""),
            ("imdb_rating", "n/a"),
            ("imdbRating", "8.3"),
        ]))
        .expect("record");
        assert_eq!(record.rating, None);
    }

    #[test]
    fn json_numbers_and_non_finite_strings() {
        let record = normalize(
            &RawRow::new()
                .with_field("title", "Heat")
                .with_field("rating", 8.3)
                .with_field("votes", "inf")
                .with_field("runtime", "NaN")
                .with_field("year", true),
        )
        .expect("record");
        assert_eq!(record.rating, Some(8.3));
        assert_eq!(record.votes, None);
        assert_eq!(record.runtime, None);
        assert_eq!(record.year, None);
    }

    #[test]
    fn genres_split_on_comma_and_pipe_keeping_order_and_duplicates() {
        assert_eq!(
            split_genres("Drama| Crime,,Drama |"),
            vec!["Drama".to_string(), "Crime".to_string(), "Drama".to_string()]
        );
        let record = normalize(&row(&[("title", "Heat")])).expect("record");
        assert!(record.genres.is_empty());
        let record = normalize(&row(&[("title", "Heat"), ("Genre", "Action,Crime")])).expect("record");
        assert_eq!(record.genres, vec!["Action".to_string(), "Crime".to_string()]);
    }

    #[test]
    fn normalize_rows_counts_dropped_rows() {
        let rows = vec![
            row(&[("title", "A")]),
            row(&[("year", "2001")]),
            row(&[("title", "B")]),
        ];
        let batch = normalize_rows(&FieldAliases::default(), &rows);
        assert_eq!(batch.dropped, 1);
        assert_eq!(
            batch.records.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
    }

    #[test]
    fn custom_aliases_are_honored() {
        let aliases = FieldAliases::default().with_title_alias("name");
        let record = normalize_with(&aliases, &row(&[("name", "Ran")])).expect("record");
        assert_eq!(record.title, "Ran");
        assert!(normalize(&row(&[("name", "Ran")])).is_none());
    }

    #[test]
    fn parse_number_str_handles_currency_symbols() {
        assert_eq!(parse_number_str("€1.234"), Some(1.234));
        assert_eq!(parse_number_str("₹ 45"), Some(45.0));
        assert_eq!(parse_number_str("  "), None);
        assert_eq!(parse_number_str("12abc"), None);
    }
}
