//! Core domain types for the ratings table and the user×movie matrix.
//!
//! - [`RatingRecord`] is one row of the finalized ratings table.
//! - [`RatingMatrix`] is the dense matrix every downstream component reads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user (1-based in the MovieLens tables)
pub type UserId = u32;

// =============================================================================
// RatingRecord
// =============================================================================

/// One `(user, movie, rating)` row of the ratings table.
///
/// The ETL job that produces the table has already averaged repeated ratings,
/// so a `(user_id, movie_title)` pair is expected at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(rename = "user id")]
    pub user_id: UserId,
    #[serde(rename = "movie title")]
    pub movie_title: String,
    pub rating: f32,
}

impl RatingRecord {
    pub fn new(user_id: UserId, movie_title: impl Into<String>, rating: f32) -> Self {
        Self {
            user_id,
            movie_title: movie_title.into(),
            rating,
        }
    }
}

// =============================================================================
// RatingMatrix
// =============================================================================

/// Dense user×movie rating matrix.
///
/// Rows follow the sorted ascending order of user IDs. Columns follow the
/// order in which movie titles were first encountered in the input. That
/// column order is fixed at build time and is the meaning of every score
/// vector computed against this matrix.
///
/// Cells without a rating hold `0.0`. Ratings are required to be strictly
/// positive, so a zero cell always means "unrated".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingMatrix {
    pub(crate) user_ids: Vec<UserId>,
    pub(crate) movie_titles: Vec<String>,
    /// Row-major, `user_ids.len() * movie_titles.len()` cells
    pub(crate) values: Vec<f32>,
    /// Columns each row rated, in the order the records arrived
    pub(crate) seen: Vec<Vec<usize>>,

    // Reverse lookups
    pub(crate) user_rows: HashMap<UserId, usize>,
    pub(crate) movie_columns: HashMap<String, usize>,
}

impl RatingMatrix {
    /// Number of rows (distinct users)
    pub fn n_users(&self) -> usize {
        self.user_ids.len()
    }

    /// Number of columns (distinct movies)
    pub fn n_movies(&self) -> usize {
        self.movie_titles.len()
    }

    /// User IDs in row order
    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    /// Movie titles in column order
    pub fn movie_titles(&self) -> &[String] {
        &self.movie_titles
    }

    /// Row index of a user, if the user appears in the table
    pub fn row_of(&self, user_id: UserId) -> Option<usize> {
        self.user_rows.get(&user_id).copied()
    }

    /// Column index of a movie title
    pub fn column_of(&self, title: &str) -> Option<usize> {
        self.movie_columns.get(title).copied()
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.user_rows.contains_key(&user_id)
    }

    /// User ID stored at a row index
    pub fn user_at(&self, row: usize) -> Option<UserId> {
        self.user_ids.get(row).copied()
    }

    /// Full rating row for a row index
    ///
    /// # Panics
    /// Panics if `row >= n_users()`.
    pub fn row(&self, row: usize) -> &[f32] {
        let width = self.n_movies();
        &self.values[row * width..(row + 1) * width]
    }

    /// Single cell; `0.0` means unrated
    pub fn value(&self, row: usize, column: usize) -> f32 {
        self.row(row)[column]
    }

    /// Columns rated by the user at `row`, in input order
    pub fn seen_columns(&self, row: usize) -> &[usize] {
        &self.seen[row]
    }

    /// Titles of the movies a user rated, in input order
    ///
    /// Returns `None` for a user that is not in the matrix.
    pub fn movies_seen_by(&self, user_id: UserId) -> Option<Vec<&str>> {
        let row = self.row_of(user_id)?;
        Some(
            self.seen[row]
                .iter()
                .map(|&column| self.movie_titles[column].as_str())
                .collect(),
        )
    }

    /// Internal consistency check, used after deserializing a stored matrix
    ///
    /// Besides the dimensions, both reverse lookups must point back to their
    /// keys and user IDs must be strictly ascending.
    pub fn is_well_formed(&self) -> bool {
        self.values.len() == self.n_users() * self.n_movies()
            && self.seen.len() == self.n_users()
            && self.user_rows.len() == self.n_users()
            && self.movie_columns.len() == self.n_movies()
            && self.user_ids.windows(2).all(|pair| pair[0] < pair[1])
            && self
                .user_ids
                .iter()
                .enumerate()
                .all(|(row, id)| self.user_rows.get(id) == Some(&row))
            && self
                .movie_titles
                .iter()
                .enumerate()
                .all(|(column, title)| self.movie_columns.get(title) == Some(&column))
            && self
                .seen
                .iter()
                .flatten()
                .all(|&column| column < self.n_movies())
    }

    /// Counts for debugging/validation: (users, movies, rated cells)
    pub fn counts(&self) -> (usize, usize, usize) {
        let rated = self.seen.iter().map(|columns| columns.len()).sum();
        (self.n_users(), self.n_movies(), rated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RatingMatrix {
        RatingMatrix::from_records(vec![
            RatingRecord::new(1, "Heat (1995)", 4.0),
            RatingRecord::new(2, "Casino (1995)", 3.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_built_matrix_is_well_formed() {
        assert!(sample().is_well_formed());
    }

    #[test]
    fn test_row_lookup_must_point_back_to_user() {
        let mut matrix = sample();
        matrix.user_rows.insert(1, 99);
        assert!(!matrix.is_well_formed());
    }

    #[test]
    fn test_column_lookup_must_point_back_to_title() {
        let mut matrix = sample();
        matrix.movie_columns.insert("Heat (1995)".to_string(), 1);
        assert!(!matrix.is_well_formed());
    }

    #[test]
    fn test_user_ids_must_ascend() {
        let mut matrix = sample();
        matrix.user_ids.swap(0, 1);
        assert!(!matrix.is_well_formed());
    }
}
