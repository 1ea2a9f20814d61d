//! # Data Loader Crate
//!
//! This crate turns the finalized ratings table into the dense user×movie
//! matrix the recommender works on.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (UserId, RatingRecord, RatingMatrix)
//! - **parser**: Parse the `user id,movie title,rating` CSV table
//! - **matrix**: Validate records and build the matrix
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::RatingMatrix;
//! use std::path::Path;
//!
//! let matrix = RatingMatrix::load_from_csv(Path::new("data/refined_dataset.csv"))?;
//! let seen = matrix.movies_seen_by(1).unwrap();
//! println!("User 1 rated {} movies", seen.len());
//! ```
//!
//! ## Input precondition
//!
//! Ratings must be strictly positive. A `0.0` cell in the matrix means
//! "unrated", and the builder rejects records that would blur that line.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod matrix;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use matrix::RatingMatrixBuilder;
pub use parser::{parse_ratings_csv, parse_ratings_reader};
pub use types::{RatingMatrix, RatingRecord, UserId};
