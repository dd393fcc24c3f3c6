/// CSV-backed row source (file path or in-memory text).
pub mod csv_source;
/// Bundled sample dataset.
pub mod sample;
