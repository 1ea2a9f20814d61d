//! # Neighbors Crate
//!
//! Nearest-neighbor search over the users of a [`RatingMatrix`]:
//! "which users rate movies the most like this one?"
//!
//! ## Components
//!
//! - **distance**: cosine distance between rating rows
//! - **index**: [`NeighborIndex`], exact brute-force k-NN
//! - **persist**: save / load a trained index
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::RatingMatrix;
//! use neighbors::NeighborIndex;
//! use std::sync::Arc;
//!
//! let matrix = Arc::new(RatingMatrix::load_from_csv(path)?);
//! let index = NeighborIndex::build(matrix);
//!
//! for neighbor in index.query(1, 5)? {
//!     println!("user {} at distance {:.3}", neighbor.user_id, neighbor.distance);
//! }
//! ```
//!
//! [`RatingMatrix`]: data_loader::RatingMatrix

// Public modules
pub mod distance;
pub mod error;
pub mod index;
pub mod persist;

// Re-export commonly used types
pub use error::{NeighborError, Result};
pub use index::{Neighbor, NeighborIndex};
