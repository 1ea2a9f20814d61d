//! Error types for the data-loader crate.
//!
//! Everything that can go wrong while reading the ratings table or turning it
//! into a rating matrix ends up in [`DataLoadError`]. Malformed records are
//! all reported as [`DataLoadError::Schema`] so callers can treat "bad input"
//! as one category.

use thiserror::Error;

/// Errors that can occur during loading and matrix construction
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader itself failed (bad quoting, invalid UTF-8, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record does not match the declared `(user id, movie title, rating)` shape
    ///
    /// `line` is the 1-based data line for CSV input, or the 1-based position
    /// of the record when building from memory.
    #[error("Schema error at record {line}: {reason}")]
    Schema { line: usize, reason: String },
}

impl DataLoadError {
    pub(crate) fn schema(line: usize, reason: impl Into<String>) -> Self {
        DataLoadError::Schema {
            line,
            reason: reason.into(),
        }
    }

    /// True when the failure is caused by malformed input rather than I/O
    pub fn is_schema(&self) -> bool {
        matches!(self, DataLoadError::Schema { .. })
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_message() {
        let err = DataLoadError::schema(7, "Missing movie title");
        assert!(err.is_schema());
        assert_eq!(err.to_string(), "Schema error at record 7: Missing movie title");
    }

    #[test]
    fn test_io_error_is_not_schema() {
        let err: DataLoadError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_schema());
    }
}
