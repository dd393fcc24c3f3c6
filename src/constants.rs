/// Ordered field-name aliases tried by the record normalizer.
///
/// The first alias whose value is present and non-blank wins.
pub mod aliases {
    /// Candidate field names for the movie title.
    pub const TITLE: &[&str] = &["title", "Title", "primaryTitle"];
    /// Candidate field names for the release year.
    pub const YEAR: &[&str] = &["year", "Year", "startYear"];
    /// Candidate field names for the genre list.
    pub const GENRES: &[&str] = &["genres", "Genre"];
    /// Candidate field names for the average rating.
    pub const RATING: &[&str] = &["rating", "imdb_rating", "imdbRating", "averageRating"];
    /// Candidate field names for the vote count.
    pub const VOTES: &[&str] = &["votes", "numVotes", "imdbVotes"];
    /// Candidate field names for box-office revenue.
    pub const REVENUE: &[&str] = &["revenue", "gross", "box_office"];
    /// Candidate field names for runtime in minutes.
    pub const RUNTIME: &[&str] = &["runtime", "runtimeMinutes", "Runtime"];
}

/// Constants used while coercing loosely-typed cells.
pub mod normalize {
    /// Separators accepted between genre tags.
    pub const GENRE_SEPARATORS: &[char] = &[',', '|'];
    /// Characters stripped from numeric cells before parsing (whitespace is stripped separately).
    pub const NUMERIC_NOISE: &[char] = &['$', '€', '£', '¥', '₹', ','];
}

/// Constants used by summary metrics and aggregate series.
pub mod metrics {
    /// Revenue at or above this value is assumed to be raw currency units.
    pub const REVENUE_RAW_UNIT_THRESHOLD: f64 = 1_000_000.0;
    /// Divisor converting raw currency units into millions.
    pub const MILLION: f64 = 1_000_000.0;
    /// Default number of runtime histogram bins.
    pub const DEFAULT_HISTOGRAM_BINS: usize = 10;
    /// Smallest scatter point weight (also used for unknown vote counts).
    pub const POINT_WEIGHT_MIN: f64 = 3.0;
    /// Largest scatter point weight.
    pub const POINT_WEIGHT_MAX: f64 = 8.0;
    /// Exponent applied to vote counts when deriving point weights.
    pub const POINT_WEIGHT_EXPONENT: f64 = 0.25;
}

/// Constants used by the ranked table.
pub mod ranking {
    /// Default number of rows in the top-N table.
    pub const DEFAULT_TOP_N: usize = 10;
    /// Message shown when the filtered set has no rankable records.
    pub const EMPTY_TABLE_MESSAGE: &str = "No data for current filters.";
}

/// Constants used by bundled row sources.
pub mod sources {
    /// Source id of the bundled sample dataset.
    pub const SAMPLE_SOURCE_ID: &str = "sample";
    /// Prefix applied to source ids of CSV-backed sources.
    pub const CSV_SOURCE_PREFIX: &str = "csv";
}
