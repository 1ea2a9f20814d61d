//! Recommender crate: the facade the front-end talks to.
//!
//! - [`Recommender`]: moviesSeenBy / similarUsers / recommend over one snapshot
//! - [`SharedRecommender`]: swap in a rebuilt snapshot without blocking readers
//! - [`RecommenderConfig`]: weighting scheme and query defaults

pub mod config;
pub mod error;
pub mod facade;
pub mod snapshot;

pub use config::RecommenderConfig;
pub use error::{RecommenderError, Result};
pub use facade::Recommender;
pub use snapshot::SharedRecommender;

// Types callers need to read query results
pub use data_loader::{RatingRecord, UserId};
pub use neighbors::Neighbor;
pub use pipeline::{DegeneratePolicy, WeightingScheme};
