//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to ranked candidates.

use crate::candidate::Candidate;
use crate::error::Result;
use std::collections::HashSet;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared by concurrent queries
/// - Filters take ownership of the Vec<Candidate> and return a filtered Vec
/// - Candidates arrive in rank order and filters must not reorder them
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to ranked candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter, best first (takes ownership)
    /// * `watched` - Titles the target user has already rated
    fn apply(&self, candidates: Vec<Candidate>, watched: &HashSet<String>)
        -> Result<Vec<Candidate>>;
}
