//! Errors raised while aggregating and filtering scores.

use data_loader::UserId;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PipelineError {
    /// Neighbor weights sum to zero (or there are no neighbors at all)
    #[error("Cannot weight {neighbors} neighbors: weights sum to zero")]
    DegenerateWeights { neighbors: usize },

    /// A recommendation count below 1 was requested
    #[error("Invalid recommendation count {0}: must be at least 1")]
    InvalidCount(usize),

    /// Score vector and movie title list disagree on the number of movies
    #[error("Score vector has {scores} entries but there are {movies} movies")]
    ScoreLengthMismatch { scores: usize, movies: usize },

    /// A neighbor refers to a user that the matrix does not contain
    #[error("Neighbor {0} is not in the rating matrix")]
    UnknownNeighbor(UserId),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
