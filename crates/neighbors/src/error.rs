//! Errors raised by the neighbor index.

use data_loader::UserId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeighborError {
    /// The user has no row in the indexed matrix
    #[error("User {0} not found")]
    UnknownUser(UserId),

    /// `k` must satisfy `1 <= k < n_users`
    #[error("Invalid neighbor count {k}: must be between 1 and {max}")]
    InvalidK { k: usize, max: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored index deserialized fine but its parts do not line up
    #[error("Corrupt index: {0}")]
    CorruptIndex(String),
}

pub type Result<T> = std::result::Result<T, NeighborError>;
