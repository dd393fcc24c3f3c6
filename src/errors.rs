use std::io;

use thiserror::Error;

use crate::types::SourceId;

/// Error type for row ingestion, decoding, and configuration failures.
///
/// Pipeline stages never return this; only the ingestion seams do.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source could not be opened or read.
    #[error("row source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable {
        /// Identifier of the failing source.
        source_id: SourceId,
        /// Underlying failure description.
        reason: String,
    },
    /// Malformed CSV input.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A `DashboardConfig` failed validation.
    #[error("configuration error: {0}")]
    Configuration(String),
}
