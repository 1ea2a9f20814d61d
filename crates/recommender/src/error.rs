//! Errors surfaced by the recommender facade.
//!
//! Every failure is a typed, local validation failure; nothing here is
//! transient, so nothing is retried.

use data_loader::{DataLoadError, UserId};
use neighbors::NeighborError;
use pipeline::PipelineError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommenderError {
    /// The user id is not in the dataset
    #[error("User {0} not found")]
    UnknownUser(UserId),

    #[error(transparent)]
    Data(#[from] DataLoadError),

    #[error(transparent)]
    Neighbor(#[from] NeighborError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The configuration file could not be read or parsed
    #[error("Invalid configuration in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl RecommenderError {
    /// True for every flavor of "this user does not exist"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RecommenderError::UnknownUser(_)
                | RecommenderError::Neighbor(NeighborError::UnknownUser(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, RecommenderError>;
