//! Filter to remove movies the user has already watched.
//!
//! There's no point in recommending movies the user has already rated.

use crate::candidate::Candidate;
use crate::error::Result;
use crate::traits::Filter;
use std::collections::HashSet;

/// Removes candidates whose title the user has already rated.
///
/// ## Algorithm
/// Uses the watched HashSet for O(1) lookups. Rank order is preserved.
pub struct AlreadyWatchedFilter;

impl Filter for AlreadyWatchedFilter {
    fn name(&self) -> &str {
        "AlreadyWatchedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        watched: &HashSet<String>,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !watched.contains(&candidate.title))
            .collect();
        Ok(filtered)
    }
}
