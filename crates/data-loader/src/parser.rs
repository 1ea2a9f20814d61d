//! Parser for the finalized ratings table.
//!
//! Format: CSV with a header row and three columns
//!
//! ```text
//! user id,movie title,rating
//! 1,"Godfather, The (1972)",5.0
//! 1,Toy Story (1995),4.0
//! ```
//!
//! Titles containing commas are quoted. Rows that do not deserialize into a
//! [`RatingRecord`] are reported as [`DataLoadError::Schema`] with the 1-based
//! physical line the row starts on, counted after the header. A quoted title
//! spanning several lines advances the count by all of them.

use crate::error::{DataLoadError, Result};
use crate::types::{RatingMatrix, RatingRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Parse ratings from any reader
pub fn parse_ratings_reader<R: Read>(reader: R) -> Result<Vec<RatingRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize::<RatingRecord>().enumerate() {
        let line = idx + 1;
        match row {
            Ok(record) => records.push(record),
            Err(err) if is_schema_error(&err) => {
                let line = err
                    .position()
                    .map(|pos| (pos.line() as usize).saturating_sub(1))
                    .unwrap_or(line);
                return Err(DataLoadError::Schema {
                    line,
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(records)
}

/// Parse the ratings CSV file at `path`
pub fn parse_ratings_csv(path: &Path) -> Result<Vec<RatingRecord>> {
    let file = File::open(path)?;
    parse_ratings_reader(file)
}

/// Deserialization and column-count problems are input errors, everything else is I/O
fn is_schema_error(err: &csv::Error) -> bool {
    matches!(
        err.kind(),
        csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. }
    )
}

impl RatingMatrix {
    /// Load the ratings CSV and build the matrix from it
    ///
    /// This is the main entry point for loading data.
    pub fn load_from_csv(path: &Path) -> Result<Self> {
        info!("Loading ratings table from {:?}", path);
        let records = parse_ratings_csv(path)?;
        info!("Parsed {} rating records", records.len());
        RatingMatrix::from_records(records)
    }
}
