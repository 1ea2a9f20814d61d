//! NeighborIndex - exact k-nearest-neighbor search over matrix rows
//!
//! ## Algorithm
//! 1. At build time, precompute the norm of every row
//! 2. At query time, compute the cosine distance from the query row to
//!    every row (in parallel with Rayon)
//! 3. Select the k+1 closest rows, ordered by (distance, row index)
//! 4. Drop the query row itself and keep the first k
//!
//! Search is brute force on purpose: every query sees every row, so the
//! result is exact and reproducible. Cost is O(rows × columns) per query.

use crate::distance::{cosine_distance_with_norms, norm};
use crate::error::{NeighborError, Result};
use data_loader::{RatingMatrix, UserId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// One entry of a neighbor query result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub user_id: UserId,
    /// Cosine distance to the query user, in `[0, 2]`
    pub distance: f32,
}

/// Nearest-neighbor index over the rows of a [`RatingMatrix`].
///
/// The index is immutable once built. It owns a shared reference to the
/// matrix (read-only, so no Mutex needed) and can be cloned cheaply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborIndex {
    pub(crate) matrix: Arc<RatingMatrix>,
    pub(crate) norms: Vec<f64>,
}

impl NeighborIndex {
    /// Train the index on a matrix.
    ///
    /// "Training" for brute-force cosine search is just caching row norms,
    /// so this cannot fail.
    #[instrument(skip(matrix), fields(users = matrix.n_users(), movies = matrix.n_movies()))]
    pub fn build(matrix: Arc<RatingMatrix>) -> Self {
        let norms: Vec<f64> = (0..matrix.n_users())
            .into_par_iter()
            .map(|row| norm(matrix.row(row)))
            .collect();
        info!("Built neighbor index over {} users", norms.len());
        Self { matrix, norms }
    }

    /// The matrix this index was built from
    pub fn matrix(&self) -> &Arc<RatingMatrix> {
        &self.matrix
    }

    /// Number of indexed rows
    pub fn len(&self) -> usize {
        self.norms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.norms.is_empty()
    }

    /// Cosine distance between two rows
    pub fn row_distance(&self, a: usize, b: usize) -> f32 {
        cosine_distance_with_norms(
            self.matrix.row(a),
            self.matrix.row(b),
            self.norms[a],
            self.norms[b],
        )
    }

    /// The `k` users closest to `user_id`, ascending distance.
    ///
    /// Ties are broken by ascending row index, i.e. ascending user id.
    /// The query user is never part of the result.
    ///
    /// ## Errors
    /// - [`NeighborError::UnknownUser`] if the user has no row
    /// - [`NeighborError::InvalidK`] if `k < 1` or `k >= len()`
    #[instrument(skip(self))]
    pub fn query(&self, user_id: UserId, k: usize) -> Result<Vec<Neighbor>> {
        let row = self
            .matrix
            .row_of(user_id)
            .ok_or(NeighborError::UnknownUser(user_id))?;

        let n_rows = self.len();
        if k < 1 || k >= n_rows {
            return Err(NeighborError::InvalidK {
                k,
                max: n_rows.saturating_sub(1),
            });
        }

        let mut distances: Vec<(usize, f32)> = (0..n_rows)
            .into_par_iter()
            .map(|other| (other, self.row_distance(row, other)))
            .collect();

        // k+1 so the query row itself can be dropped
        let wanted = k + 1;
        if wanted < distances.len() {
            distances.select_nth_unstable_by(wanted - 1, by_distance_then_row);
            distances.truncate(wanted);
        }
        distances.sort_unstable_by(by_distance_then_row);

        let neighbors: Vec<Neighbor> = distances
            .into_iter()
            .filter(|&(other, _)| other != row)
            .take(k)
            .map(|(other, distance)| Neighbor {
                user_id: self.matrix.user_ids()[other],
                distance,
            })
            .collect();

        debug!(
            "Found {} neighbors for user {} (closest distance: {:?})",
            neighbors.len(),
            user_id,
            neighbors.first().map(|n| n.distance)
        );
        Ok(neighbors)
    }
}

/// Ascending distance, ties by ascending row index
fn by_distance_then_row(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0))
}
