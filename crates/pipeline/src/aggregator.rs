//! Distance-weighted aggregation of neighbor ratings.
//!
//! ## Algorithm
//! 1. Turn each neighbor's distance into a raw weight (see [`WeightingScheme`])
//! 2. Normalize the raw weights so they sum to 1
//! 3. Score of a movie = Σ weight_i × rating of neighbor i for that movie
//!
//! Scores are not clipped or renormalized. A movie no neighbor rated scores
//! exactly `0.0`.

use crate::error::{PipelineError, Result};
use data_loader::RatingMatrix;
use neighbors::Neighbor;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// How a neighbor's cosine distance becomes its raw weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightingScheme {
    /// Raw weight = distance. Farther neighbors count more.
    ///
    /// This reproduces the reference recommender output exactly.
    #[default]
    Distance,
    /// Raw weight = 1 - distance, i.e. cosine similarity.
    /// Closer neighbors count more.
    Similarity,
}

/// What to do when the raw weights sum to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Give every neighbor weight `1 / k`
    #[default]
    EqualWeights,
    /// Return [`PipelineError::DegenerateWeights`]
    Fail,
}

/// Turns a neighbor list into one aggregate score per movie column
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingAggregator {
    scheme: WeightingScheme,
    on_degenerate: DegeneratePolicy,
}

impl RatingAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the weighting scheme (default: Distance)
    pub fn with_scheme(mut self, scheme: WeightingScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Configure the zero-weight-sum policy (default: EqualWeights)
    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.on_degenerate = policy;
        self
    }

    pub fn scheme(&self) -> WeightingScheme {
        self.scheme
    }

    /// Normalized weights, one per neighbor, summing to 1
    pub fn weights(&self, neighbors: &[Neighbor]) -> Result<Vec<f64>> {
        if neighbors.is_empty() {
            return Err(PipelineError::DegenerateWeights { neighbors: 0 });
        }

        let raw: Vec<f64> = neighbors
            .iter()
            .map(|n| match self.scheme {
                WeightingScheme::Distance => n.distance as f64,
                WeightingScheme::Similarity => 1.0 - n.distance as f64,
            })
            .collect();
        let total: f64 = raw.iter().sum();

        // NaN lands here too
        if !(total > 0.0) {
            return match self.on_degenerate {
                DegeneratePolicy::EqualWeights => {
                    warn!(
                        "Neighbor weights sum to {}, falling back to equal weights",
                        total
                    );
                    let equal = 1.0 / neighbors.len() as f64;
                    Ok(vec![equal; neighbors.len()])
                }
                DegeneratePolicy::Fail => Err(PipelineError::DegenerateWeights {
                    neighbors: neighbors.len(),
                }),
            };
        }

        Ok(raw.into_iter().map(|w| w / total).collect())
    }

    /// Weighted score per movie column of `matrix`
    #[instrument(skip(self, matrix, neighbors), fields(k = neighbors.len()))]
    pub fn aggregate(&self, matrix: &RatingMatrix, neighbors: &[Neighbor]) -> Result<Vec<f32>> {
        let weights = self.weights(neighbors)?;

        let rows: Vec<&[f32]> = neighbors
            .iter()
            .map(|n| {
                matrix
                    .row_of(n.user_id)
                    .map(|row| matrix.row(row))
                    .ok_or(PipelineError::UnknownNeighbor(n.user_id))
            })
            .collect::<Result<_>>()?;

        let scores: Vec<f32> = (0..matrix.n_movies())
            .into_par_iter()
            .map(|column| {
                rows.iter()
                    .zip(&weights)
                    .map(|(row, &w)| w * row[column] as f64)
                    .sum::<f64>() as f32
            })
            .collect();

        debug!(
            "Aggregated {} movie scores ({} with signal)",
            scores.len(),
            scores.iter().filter(|&&s| s != 0.0).count()
        );
        Ok(scores)
    }
}
