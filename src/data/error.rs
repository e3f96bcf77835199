use thiserror::Error;

/// Failures raised while loading or querying the launch table.
#[derive(Debug, Error)]
pub enum DataError {
    /// The resource could not be fetched or opened.
    #[error("failed to retrieve launch data from {locator}: {reason}")]
    Retrieval { locator: String, reason: String },

    /// A required column is absent from the CSV header.
    #[error("launch data is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A row could not be parsed into a launch record.
    #[error("malformed launch record on line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// A row parsed but violates a table invariant.
    #[error("invalid value on line {line}: {reason}")]
    InvalidValue { line: u64, reason: String },

    /// An operation that needs at least one row was given none.
    #[error("launch table is empty")]
    EmptyDataset,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
