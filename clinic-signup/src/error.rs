use thiserror::Error;

/// A date token that cannot be turned into a calendar date.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token did not split into month, day and year.
    #[error("date '{input}' must look like M/D/YY (found {found} part(s))")]
    WrongPartCount { input: String, found: usize },

    /// One of the parts is not a plain number.
    #[error("date '{input}' has a non-numeric part '{part}'")]
    NotNumeric { input: String, part: String },

    /// The year part is longer than two digits.
    #[error("date '{input}' must use a two-digit year")]
    YearOutOfRange { input: String },

    /// Month/day combination does not exist (e.g. 2/30/16).
    #[error("date '{input}' is not a valid calendar date")]
    Impossible { input: String },
}

/// Problems with the per-date capacity value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("capacity is missing: pass --capacity or fill the first cell of the first row")]
    MissingCapacity,

    #[error("capacity '{0}' is not a number")]
    NotNumeric(String),

    #[error("capacity must be a positive integer, got {0}")]
    NotPositive(i64),
}

/// Every fatal condition a signup run can hit.
#[derive(Debug, Error)]
pub enum SignupError {
    /// A date on a specific roster row failed to parse (rows are 1-based data rows).
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("failed to read roster CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
