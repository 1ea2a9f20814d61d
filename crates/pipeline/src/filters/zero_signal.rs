//! Filter to stop at the first candidate without neighbor signal.
//!
//! A movie none of the neighbors rated aggregates to exactly `0.0`. Once the
//! ranking reaches such a movie there is no evidence left to recommend from.

use crate::candidate::Candidate;
use crate::error::Result;
use crate::traits::Filter;
use std::collections::HashSet;

/// Truncates ranked candidates at the first exactly-zero score.
///
/// ## Algorithm
/// Two passes over the ranked list:
/// 1. Find the rank of the first candidate whose score is `0.0`
///    (the list length when there is none)
/// 2. Keep only the candidates ranked before it
///
/// Scores are never negative when every rating is positive, so in a list
/// ranked best-first every entry past the boundary is zero as well.
pub struct ZeroSignalFilter;

impl ZeroSignalFilter {
    /// Rank position where zero-signal candidates begin
    pub fn boundary(candidates: &[Candidate]) -> usize {
        candidates
            .iter()
            .position(|candidate| candidate.score == 0.0)
            .unwrap_or(candidates.len())
    }
}

impl Filter for ZeroSignalFilter {
    fn name(&self) -> &str {
        "ZeroSignalFilter"
    }

    fn apply(
        &self,
        mut candidates: Vec<Candidate>,
        _watched: &HashSet<String>,
    ) -> Result<Vec<Candidate>> {
        let boundary = Self::boundary(&candidates);
        candidates.truncate(boundary);
        Ok(candidates)
    }
}
