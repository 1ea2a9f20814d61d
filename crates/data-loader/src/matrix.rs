//! RatingMatrix construction.
//!
//! [`RatingMatrixBuilder`] collects ratings and turns them into a dense
//! [`RatingMatrix`] in one pass:
//! - validate every record (user id, title, rating value, duplicates)
//! - fix the column order (first-encountered title order)
//! - fix the row order (sorted ascending user ids)
//! - fill the matrix, absent pairs stay `0.0`

use crate::error::{DataLoadError, Result};
use crate::types::{RatingMatrix, RatingRecord, UserId};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info, instrument};

/// Accumulates rating records and builds a [`RatingMatrix`].
///
/// ```ignore
/// let matrix = RatingMatrixBuilder::new()
///     .with_records(records)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct RatingMatrixBuilder {
    records: Vec<RatingRecord>,
}

impl RatingMatrixBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Add a batch of records (builder pattern)
    pub fn with_records(mut self, records: impl IntoIterator<Item = RatingRecord>) -> Self {
        self.records.extend(records);
        self
    }

    /// Add a single record
    pub fn insert_record(&mut self, record: RatingRecord) {
        self.records.push(record);
    }

    /// Number of records collected so far
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate the collected records and build the dense matrix.
    ///
    /// Fails with [`DataLoadError::Schema`] when:
    /// - there are no records at all
    /// - a user id is 0
    /// - a movie title is empty or whitespace only
    /// - a rating is not finite or not strictly positive
    /// - the same `(user, movie)` pair appears twice
    #[instrument(skip(self), fields(records = self.records.len()))]
    pub fn build(self) -> Result<RatingMatrix> {
        if self.records.is_empty() {
            return Err(DataLoadError::schema(0, "Ratings table is empty"));
        }

        // Pass 1: validate and collect the row and column sets
        let mut user_set: BTreeSet<UserId> = BTreeSet::new();
        let mut movie_titles: Vec<String> = Vec::new();
        let mut movie_columns: HashMap<String, usize> = HashMap::new();
        let mut pairs: HashSet<(UserId, usize)> = HashSet::with_capacity(self.records.len());

        for (idx, record) in self.records.iter().enumerate() {
            let line = idx + 1;
            validate_record(record, line)?;

            user_set.insert(record.user_id);
            let column = match movie_columns.get(&record.movie_title) {
                Some(&column) => column,
                None => {
                    let column = movie_titles.len();
                    movie_titles.push(record.movie_title.clone());
                    movie_columns.insert(record.movie_title.clone(), column);
                    column
                }
            };

            if !pairs.insert((record.user_id, column)) {
                return Err(DataLoadError::schema(
                    line,
                    format!(
                        "Duplicate rating for user {} and movie {:?}",
                        record.user_id, record.movie_title
                    ),
                ));
            }
        }

        let user_ids: Vec<UserId> = user_set.into_iter().collect();
        let user_rows: HashMap<UserId, usize> = user_ids
            .iter()
            .enumerate()
            .map(|(row, &user_id)| (user_id, row))
            .collect();
        debug!(
            "Matrix shape: {} users x {} movies",
            user_ids.len(),
            movie_titles.len()
        );

        // Pass 2: fill cells
        let width = movie_titles.len();
        let mut values = vec![0.0_f32; user_ids.len() * width];
        let mut seen: Vec<Vec<usize>> = vec![Vec::new(); user_ids.len()];

        for record in &self.records {
            let row = user_rows[&record.user_id];
            let column = movie_columns[&record.movie_title];
            values[row * width + column] = record.rating;
            seen[row].push(column);
        }

        info!(
            "Built rating matrix: {} users, {} movies, {} ratings",
            user_ids.len(),
            width,
            self.records.len()
        );

        Ok(RatingMatrix {
            user_ids,
            movie_titles,
            values,
            seen,
            user_rows,
            movie_columns,
        })
    }
}

impl RatingMatrix {
    /// Build a matrix straight from a list of records
    pub fn from_records(records: impl IntoIterator<Item = RatingRecord>) -> Result<Self> {
        RatingMatrixBuilder::new().with_records(records).build()
    }
}

/// Check one record against the declared `(user id >= 1, title, rating > 0)` shape
fn validate_record(record: &RatingRecord, line: usize) -> Result<()> {
    if record.user_id == 0 {
        return Err(DataLoadError::schema(line, "User id must be >= 1"));
    }
    if record.movie_title.trim().is_empty() {
        return Err(DataLoadError::schema(line, "Movie title is empty"));
    }
    if !record.rating.is_finite() || record.rating <= 0.0 {
        return Err(DataLoadError::schema(
            line,
            format!(
                "Rating must be a positive number, got {} for movie {:?}",
                record.rating, record.movie_title
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<RatingRecord> {
        vec![
            RatingRecord::new(3, "Heat (1995)", 4.0),
            RatingRecord::new(1, "Toy Story (1995)", 5.0),
            RatingRecord::new(1, "Heat (1995)", 3.0),
            RatingRecord::new(2, "Fargo (1996)", 4.5),
        ]
    }

    #[test]
    fn test_rows_sorted_by_user_id() {
        let matrix = RatingMatrix::from_records(sample_records()).unwrap();
        assert_eq!(matrix.user_ids(), &[1, 2, 3]);
        assert_eq!(matrix.row_of(3), Some(2));
    }

    #[test]
    fn test_columns_in_first_seen_order() {
        let matrix = RatingMatrix::from_records(sample_records()).unwrap();
        assert_eq!(
            matrix.movie_titles(),
            &["Heat (1995)", "Toy Story (1995)", "Fargo (1996)"]
        );
    }

    #[test]
    fn test_missing_cells_are_zero() {
        let matrix = RatingMatrix::from_records(sample_records()).unwrap();
        // user 1: Heat, Toy Story
        assert_eq!(matrix.row(0), &[3.0, 5.0, 0.0]);
        // user 2: Fargo only
        assert_eq!(matrix.row(1), &[0.0, 0.0, 4.5]);
        // user 3: Heat only
        assert_eq!(matrix.row(2), &[4.0, 0.0, 0.0]);
        assert_eq!(matrix.counts(), (3, 3, 4));
    }

    #[test]
    fn test_seen_titles_follow_input_order() {
        let matrix = RatingMatrix::from_records(sample_records()).unwrap();
        assert_eq!(
            matrix.movies_seen_by(1).unwrap(),
            vec!["Toy Story (1995)", "Heat (1995)"]
        );
        assert!(matrix.movies_seen_by(42).is_none());
    }

    #[test]
    fn test_builder_accumulates_records() {
        let mut builder = RatingMatrixBuilder::new();
        assert!(builder.is_empty());
        builder.insert_record(RatingRecord::new(1, "Heat (1995)", 4.0));
        let builder = builder.with_records(vec![RatingRecord::new(2, "Heat (1995)", 2.0)]);
        assert_eq!(builder.len(), 2);

        let matrix = builder.build().unwrap();
        assert_eq!(matrix.n_users(), 2);
        assert_eq!(matrix.n_movies(), 1);
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let mut records = sample_records();
        records.push(RatingRecord::new(1, "Heat (1995)", 2.0));

        let err = RatingMatrix::from_records(records).unwrap_err();
        assert!(matches!(err, DataLoadError::Schema { line: 5, .. }));
    }

    #[test]
    fn test_invalid_records_rejected() {
        let cases = vec![
            RatingRecord::new(0, "Heat (1995)", 4.0),
            RatingRecord::new(1, "   ", 4.0),
            RatingRecord::new(1, "Heat (1995)", 0.0),
            RatingRecord::new(1, "Heat (1995)", -1.0),
            RatingRecord::new(1, "Heat (1995)", f32::NAN),
        ];
        for record in cases {
            let result = RatingMatrix::from_records(vec![record.clone()]);
            assert!(
                matches!(result, Err(DataLoadError::Schema { line: 1, .. })),
                "record {:?} should be rejected",
                record
            );
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = RatingMatrixBuilder::new().build().unwrap_err();
        assert!(err.is_schema());
    }
}
