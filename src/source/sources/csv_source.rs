use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::sources::CSV_SOURCE_PREFIX;
use crate::data::RawRow;
use crate::errors::DashboardError;
use crate::source::RowSource;
use crate::types::SourceId;

#[derive(Clone, Debug)]
enum CsvInput {
    Path(PathBuf),
    Text(String),
}

/// Row source decoding delimited text with a header row.
///
/// Header names are kept verbatim (case-sensitive). Every cell becomes a
/// string value; numeric coercion is left to the normalizer. Ragged rows are
/// accepted: missing trailing cells are absent from the row and extra cells
/// are ignored. Records that fail to decode are skipped with a warning.
#[derive(Clone, Debug)]
pub struct CsvRowSource {
    id: SourceId,
    input: CsvInput,
    delimiter: u8,
}

impl CsvRowSource {
    /// Source reading the file at `path` on every `read_rows` call.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: format!("{CSV_SOURCE_PREFIX}:{}", path.display()),
            input: CsvInput::Path(path),
            delimiter: b',',
        }
    }

    /// Source over CSV text already held in memory.
    pub fn from_text(id: impl Into<SourceId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            input: CsvInput::Text(text.into()),
            delimiter: b',',
        }
    }

    /// Override the field delimiter (defaults to `,`).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Path backing this source, if it reads from disk.
    pub fn path(&self) -> Option<&Path> {
        match &self.input {
            CsvInput::Path(path) => Some(path.as_path()),
            CsvInput::Text(_) => None,
        }
    }
}

impl RowSource for CsvRowSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn read_rows(&self) -> Result<Vec<RawRow>, DashboardError> {
        match &self.input {
            CsvInput::Path(path) => {
                let file = File::open(path).map_err(|err| DashboardError::SourceUnavailable {
                    source_id: self.id.clone(),
                    reason: format!("failed to open '{}': {err}", path.display()),
                })?;
                read_csv_rows_with(&self.id, file, self.delimiter)
            }
            CsvInput::Text(text) => read_csv_rows_with(&self.id, text.as_bytes(), self.delimiter),
        }
    }
}

/// Decode comma-delimited rows from `reader`.
pub fn read_csv_rows<R: Read>(source_id: &str, reader: R) -> Result<Vec<RawRow>, DashboardError> {
    read_csv_rows_with(source_id, reader, b',')
}

fn read_csv_rows_with<R: Read>(
    source_id: &str,
    reader: R,
    delimiter: u8,
) -> Result<Vec<RawRow>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|name| name.trim().is_empty()) {
        debug!(source = source_id, "csv input has no header row; no rows read");
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                skipped += 1;
                // +2: records start after the header and lines are 1-based.
                warn!(source = source_id, line = idx + 2, error = %err, "skipping undecodable csv record");
                continue;
            }
        };
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name, Value::from(cell)))
            .collect();
        rows.push(row);
    }

    debug!(source = source_id, rows = rows.len(), skipped, "csv rows decoded");
    Ok(rows)
}
