/// Dataset loader: fetches the launch CSV once and materializes a table.
///
/// The locator is either an `http(s)://` URL, fetched with the synchronous
/// `ureq` client, or a filesystem path. Header validation runs before any row
/// is parsed so a missing column is reported by name.
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::{DataError, LaunchRecord, LaunchTable, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Where the launch CSV lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// Classify a locator string as a URL or a local path.
    pub fn parse(locator: &str) -> Self {
        let trimmed = locator.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the launch table from `locator`.
///
/// `timeout` only applies to URL sources.
pub fn load(locator: &str, timeout: Duration) -> Result<LaunchTable, DataError> {
    let source = DataSource::parse(locator);
    let reader = open(&source, timeout)?;
    from_reader(reader)
}

fn open(source: &DataSource, timeout: Duration) -> Result<Box<dyn Read>, DataError> {
    match source {
        DataSource::Url(url) => {
            let resp = ureq::get(url)
                .timeout(timeout)
                .call()
                .map_err(|e| DataError::Retrieval {
                    locator: url.clone(),
                    reason: e.to_string(),
                })?;
            Ok(Box::new(resp.into_reader()))
        }
        DataSource::Path(path) => {
            let file = File::open(path).map_err(|e| DataError::Retrieval {
                locator: path.display().to_string(),
                reason: e.to_string(),
            })?;
            Ok(Box::new(file))
        }
    }
}

/// Parse launch records from any CSV reader.
pub fn from_reader<R: Read>(reader: R) -> Result<LaunchTable, DataError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    validate_headers(&headers)?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let row: LaunchRecord =
            record
                .deserialize(Some(&headers))
                .map_err(|e| DataError::MalformedRow {
                    line,
                    reason: e.to_string(),
                })?;
        validate_row(&row, line)?;
        rows.push(row);
    }

    Ok(LaunchTable::new(rows))
}

fn validate_headers(headers: &StringRecord) -> Result<(), DataError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn(column));
        }
    }
    Ok(())
}

fn validate_row(row: &LaunchRecord, line: u64) -> Result<(), DataError> {
    if !row.payload_mass.is_finite() || row.payload_mass < 0.0 {
        return Err(DataError::InvalidValue {
            line,
            reason: format!("payload mass must be non-negative, got {}", row.payload_mass),
        });
    }
    if row.class > 1 {
        return Err(DataError::InvalidValue {
            line,
            reason: format!("outcome class must be 0 or 1, got {}", row.class),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
