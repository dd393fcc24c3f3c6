/// Movie title as displayed in tables and tooltips.
/// Examples: `The Godfather`, `3 Idiots`
pub type Title = String;
/// A single genre tag split out of a source genre field.
/// Examples: `Drama`, `Sci-Fi`, `Bollywood`
pub type GenreTag = String;
/// Column/field name in a raw ingested row.
/// Examples: `title`, `imdbRating`, `runtimeMinutes`
pub type FieldName = String;
/// Identifier for the row source that produced a dataset.
/// Examples: `sample`, `csv:/data/imdb_top.csv`
pub type SourceId = String;
/// Display label for a chart category or histogram bin.
/// Examples: `Drama`, `96-109`
pub type SeriesLabel = String;
