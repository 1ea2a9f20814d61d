//! Turns aggregate scores into the final recommendation list.
//!
//! ## Algorithm
//! 1. Rank every movie column by descending score (ties: ascending column)
//! 2. Run the ranked list through the filter pipeline:
//!    - [`ZeroSignalFilter`] cuts the list where zero-signal scores begin
//!    - [`AlreadyWatchedFilter`] drops titles the user has rated
//! 3. Keep the first `n` survivors

use crate::candidate::Candidate;
use crate::error::{PipelineError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{AlreadyWatchedFilter, ZeroSignalFilter};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Rank movie columns by descending score.
///
/// The sort is stable over column order, so equal scores keep ascending
/// column index.
pub fn rank_candidates(scores: &[f32], movie_names: &[String]) -> Vec<Candidate> {
    let mut ranked: Vec<Candidate> = scores
        .iter()
        .zip(movie_names)
        .enumerate()
        .map(|(column, (&score, title))| Candidate::new(column, title.clone(), score))
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Ranks, filters and truncates aggregate scores
pub struct RecommendationFilter {
    pipeline: FilterPipeline,
}

impl RecommendationFilter {
    /// The standard pipeline: zero-signal cutoff, then already-watched removal
    pub fn new() -> Self {
        Self {
            pipeline: FilterPipeline::new()
                .add_filter(ZeroSignalFilter)
                .add_filter(AlreadyWatchedFilter),
        }
    }

    /// Up to `n` unseen titles, best first.
    ///
    /// Returns fewer than `n` titles when the unseen candidates with signal
    /// run out; that is not an error.
    ///
    /// ## Errors
    /// - [`PipelineError::InvalidCount`] if `n < 1`
    /// - [`PipelineError::ScoreLengthMismatch`] if `scores` and `movie_names`
    ///   have different lengths
    #[instrument(skip(self, scores, seen, movie_names), fields(movies = movie_names.len()))]
    pub fn filter(
        &self,
        scores: &[f32],
        seen: &HashSet<String>,
        movie_names: &[String],
        n: usize,
    ) -> Result<Vec<String>> {
        if n < 1 {
            return Err(PipelineError::InvalidCount(n));
        }
        if scores.len() != movie_names.len() {
            return Err(PipelineError::ScoreLengthMismatch {
                scores: scores.len(),
                movies: movie_names.len(),
            });
        }

        let ranked = rank_candidates(scores, movie_names);
        let mut survivors = self.pipeline.apply(ranked, seen)?;
        survivors.truncate(n);

        debug!("Selected {} of {} requested titles", survivors.len(), n);
        Ok(survivors.into_iter().map(|c| c.title).collect())
    }
}

impl Default for RecommendationFilter {
    fn default() -> Self {
        Self::new()
    }
}
