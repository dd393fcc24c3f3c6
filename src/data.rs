use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::types::{FieldName, GenreTag, Title};

/// Loosely-typed input row as delivered by a row source.
///
/// Field order follows the source header. Values are untyped: CSV cells
/// arrive as strings, programmatic callers may pass numbers or nulls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    fields: IndexMap<FieldName, Value>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any existing value for `name`.
    pub fn with_field(mut self, name: impl Into<FieldName>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace the value for `name`.
    pub fn insert(&mut self, name: impl Into<FieldName>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Value stored under the exact (case-sensitive) field `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field names in source order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<FieldName>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

/// One normalized movie entry.
///
/// Numeric fields are `None` when the source value was missing or failed
/// coercion; they are never stored as `NaN` and never defaulted to zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Non-empty display title.
    pub title: Title,
    /// Release year.
    pub year: Option<f64>,
    /// Genre tags in source order (duplicates kept).
    pub genres: Vec<GenreTag>,
    /// Average rating.
    pub rating: Option<f64>,
    /// Number of votes behind the rating.
    pub votes: Option<f64>,
    /// Box-office revenue in raw currency units (or millions, see `metrics::to_millions`).
    pub revenue: Option<f64>,
    /// Runtime in minutes.
    pub runtime: Option<f64>,
}

impl MovieRecord {
    /// Record with only a title; every other field unknown.
    pub fn titled(title: impl Into<Title>) -> Self {
        Self {
            title: title.into(),
            year: None,
            genres: Vec::new(),
            rating: None,
            votes: None,
            revenue: None,
            runtime: None,
        }
    }

    /// Returns `true` when `tag` appears in the record's genre list.
    pub fn has_genre(&self, tag: &str) -> bool {
        self.genres.iter().any(|genre| genre == tag)
    }
}
