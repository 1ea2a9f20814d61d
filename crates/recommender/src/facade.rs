//! # Recommender facade
//!
//! Answers the three questions the front-end asks:
//! 1. Which movies has user X rated?
//! 2. Which K users are closest to X?
//! 3. Which N movies should X watch next?
//!
//! A [`Recommender`] is an explicit context object: it owns the trained
//! [`NeighborIndex`] (which owns the [`RatingMatrix`]) and is handed to every
//! query. Nothing is cached globally. Cloning is cheap and every clone reads
//! the same immutable snapshot.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::config::RecommenderConfig;
use crate::error::{RecommenderError, Result};
use data_loader::{RatingMatrix, RatingRecord, UserId};
use neighbors::{Neighbor, NeighborIndex};
use pipeline::{PipelineError, RatingAggregator, RecommendationFilter};

/// Main entry point for recommendation queries
#[derive(Clone)]
pub struct Recommender {
    index: Arc<NeighborIndex>,
    aggregator: RatingAggregator,
    filter: Arc<RecommendationFilter>,
    config: RecommenderConfig,
}

impl Recommender {
    /// Wrap an already trained index
    pub fn new(index: Arc<NeighborIndex>, config: RecommenderConfig) -> Self {
        let aggregator = RatingAggregator::new()
            .with_scheme(config.weighting)
            .with_degenerate_policy(config.on_degenerate);
        Self {
            index,
            aggregator,
            filter: Arc::new(RecommendationFilter::new()),
            config,
        }
    }

    /// Build matrix and index from in-memory records
    pub fn from_records(
        records: impl IntoIterator<Item = RatingRecord>,
        config: RecommenderConfig,
    ) -> Result<Self> {
        let matrix = RatingMatrix::from_records(records)?;
        Ok(Self::from_matrix(matrix, config))
    }

    /// Build matrix and index from the ratings CSV
    pub fn from_csv(path: &Path, config: RecommenderConfig) -> Result<Self> {
        let matrix = RatingMatrix::load_from_csv(path)?;
        Ok(Self::from_matrix(matrix, config))
    }

    /// Load a previously saved index instead of training a new one
    pub fn from_saved_index(path: &Path, config: RecommenderConfig) -> Result<Self> {
        let index = NeighborIndex::load(path)?;
        Ok(Self::new(Arc::new(index), config))
    }

    fn from_matrix(matrix: RatingMatrix, config: RecommenderConfig) -> Self {
        let index = NeighborIndex::build(Arc::new(matrix));
        Self::new(Arc::new(index), config)
    }

    pub fn matrix(&self) -> &RatingMatrix {
        self.index.matrix()
    }

    pub fn index(&self) -> &Arc<NeighborIndex> {
        &self.index
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.matrix().contains_user(user_id)
    }

    /// Titles the user rated, in the order of the ratings table
    pub fn movies_seen_by(&self, user_id: UserId) -> Result<Vec<String>> {
        let titles = self
            .matrix()
            .movies_seen_by(user_id)
            .ok_or(RecommenderError::UnknownUser(user_id))?;
        Ok(titles.into_iter().map(String::from).collect())
    }

    /// The `k` users closest to `user_id`, ascending distance
    #[instrument(skip(self))]
    pub fn similar_users(&self, user_id: UserId, k: usize) -> Result<Vec<Neighbor>> {
        self.ensure_user(user_id)?;
        Ok(self.index.query(user_id, k)?)
    }

    /// Up to `n_movies` unseen titles, best first, using `k_neighbors` neighbors.
    ///
    /// Identical arguments against the same snapshot always give the same list.
    #[instrument(skip(self))]
    pub fn recommend(
        &self,
        user_id: UserId,
        k_neighbors: usize,
        n_movies: usize,
    ) -> Result<Vec<String>> {
        let start_time = Instant::now();

        // Fail fast, before any O(rows × columns) work
        self.ensure_user(user_id)?;
        if n_movies < 1 {
            return Err(PipelineError::InvalidCount(n_movies).into());
        }

        let neighbors = self.index.query(user_id, k_neighbors)?;
        debug!("Found {} neighbors for user {}", neighbors.len(), user_id);

        let matrix = self.matrix();
        let scores = self.aggregator.aggregate(matrix, &neighbors)?;

        let seen: HashSet<String> = self.movies_seen_by(user_id)?.into_iter().collect();
        let recommendations =
            self.filter
                .filter(&scores, &seen, matrix.movie_titles(), n_movies)?;

        info!(
            "Recommended {} movies for user {} in {:.2?}",
            recommendations.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// `recommend` with the configured defaults for k and n
    pub fn recommend_default(&self, user_id: UserId) -> Result<Vec<String>> {
        self.recommend(
            user_id,
            self.config.default_neighbors,
            self.config.default_recommendations,
        )
    }

    fn ensure_user(&self, user_id: UserId) -> Result<()> {
        if self.contains_user(user_id) {
            Ok(())
        } else {
            Err(RecommenderError::UnknownUser(user_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neighbors::NeighborError;
    use pipeline::WeightingScheme;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    /// Five users, four movies. User 3 rated only "Heat".
    fn build_test_recommender() -> Recommender {
        let records = vec![
            RatingRecord::new(1, "Heat (1995)", 5.0),
            RatingRecord::new(1, "Casino (1995)", 4.0),
            RatingRecord::new(1, "Fargo (1996)", 3.0),
            RatingRecord::new(2, "Heat (1995)", 4.0),
            RatingRecord::new(2, "Se7en (1995)", 5.0),
            RatingRecord::new(3, "Heat (1995)", 4.5),
            RatingRecord::new(4, "Casino (1995)", 2.0),
            RatingRecord::new(4, "Fargo (1996)", 5.0),
            RatingRecord::new(5, "Heat (1995)", 3.0),
            RatingRecord::new(5, "Casino (1995)", 3.0),
            RatingRecord::new(5, "Fargo (1996)", 3.0),
            RatingRecord::new(5, "Se7en (1995)", 3.0),
        ];
        Recommender::from_records(records, RecommenderConfig::default()).unwrap()
    }

    // ============================================================================
    // Unit Tests
    // ============================================================================

    #[test]
    fn test_movies_seen_by() {
        let recommender = build_test_recommender();
        assert_eq!(
            recommender.movies_seen_by(1).unwrap(),
            vec!["Heat (1995)", "Casino (1995)", "Fargo (1996)"]
        );
        assert_eq!(recommender.movies_seen_by(3).unwrap(), vec!["Heat (1995)"]);
    }

    #[test]
    fn test_unknown_user_everywhere() {
        let recommender = build_test_recommender();
        assert!(matches!(
            recommender.movies_seen_by(42),
            Err(RecommenderError::UnknownUser(42))
        ));
        assert!(matches!(
            recommender.similar_users(42, 2),
            Err(RecommenderError::UnknownUser(42))
        ));
        assert!(matches!(
            recommender.recommend(42, 2, 3),
            Err(RecommenderError::UnknownUser(42))
        ));
    }

    #[test]
    fn test_unknown_user_checked_before_parameters() {
        let recommender = build_test_recommender();
        assert!(matches!(
            recommender.recommend(42, 0, 0),
            Err(RecommenderError::UnknownUser(42))
        ));
    }

    #[test]
    fn test_similar_users_for_sparse_user() {
        let recommender = build_test_recommender();
        let similar = recommender.similar_users(3, 2).unwrap();

        assert_eq!(similar.len(), 2);
        assert_ne!(similar[0].user_id, similar[1].user_id);
        assert!(similar.iter().all(|n| n.user_id != 3));
        assert!(similar[0].distance <= similar[1].distance);
    }

    #[test]
    fn test_recommend_excludes_the_only_seen_movie() {
        let recommender = build_test_recommender();
        let recommendations = recommender.recommend(3, 2, 3).unwrap();

        // Heat is every neighbor's rated movie and would score highest
        assert!(!recommendations.contains(&"Heat (1995)".to_string()));
        assert!(recommendations.len() <= 3);
    }

    #[test]
    fn test_five_user_example_exact_output() {
        let recommender = build_test_recommender();

        let similar: Vec<UserId> = recommender
            .similar_users(3, 2)
            .unwrap()
            .iter()
            .map(|n| n.user_id)
            .collect();
        assert_eq!(similar, vec![1, 2]);

        // Distance weights 0.439 / 0.561: Se7en 2.80, Casino 1.76, Fargo 1.32
        assert_eq!(
            recommender.recommend(3, 2, 3).unwrap(),
            vec!["Se7en (1995)", "Casino (1995)", "Fargo (1996)"]
        );
    }

    #[test]
    fn test_k_boundaries() {
        let recommender = build_test_recommender();
        assert!(recommender.recommend(1, 4, 3).is_ok());
        assert!(matches!(
            recommender.recommend(1, 5, 3),
            Err(RecommenderError::Neighbor(NeighborError::InvalidK { k: 5, max: 4 }))
        ));
        assert!(matches!(
            recommender.similar_users(1, 0),
            Err(RecommenderError::Neighbor(NeighborError::InvalidK { .. }))
        ));
    }

    #[test]
    fn test_invalid_count() {
        let recommender = build_test_recommender();
        assert!(matches!(
            recommender.recommend(1, 2, 0),
            Err(RecommenderError::Pipeline(PipelineError::InvalidCount(0)))
        ));
    }

    #[test]
    fn test_user_who_saw_everything_gets_empty_list() {
        let recommender = build_test_recommender();
        assert!(recommender.recommend(5, 4, 10).unwrap().is_empty());
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let recommender = build_test_recommender();
        let first = recommender.recommend(2, 3, 4).unwrap();
        for _ in 0..5 {
            assert_eq!(recommender.recommend(2, 3, 4).unwrap(), first);
        }
    }

    #[test]
    fn test_recommend_default_uses_config() {
        let records = vec![
            RatingRecord::new(1, "Heat (1995)", 5.0),
            RatingRecord::new(2, "Heat (1995)", 4.0),
            RatingRecord::new(2, "Casino (1995)", 4.0),
        ];
        let config = RecommenderConfig::default()
            .with_default_neighbors(1)
            .with_default_recommendations(1)
            .with_weighting(WeightingScheme::Similarity);
        let recommender = Recommender::from_records(records, config).unwrap();

        assert_eq!(recommender.recommend_default(1).unwrap(), vec!["Casino (1995)"]);
    }

    #[test]
    fn test_saved_index_round_trip_through_facade() {
        let recommender = build_test_recommender();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knn_model.json");
        recommender.index().save(&path).unwrap();

        let loaded = Recommender::from_saved_index(&path, RecommenderConfig::default()).unwrap();
        assert_eq!(
            loaded.recommend(3, 2, 3).unwrap(),
            recommender.recommend(3, 2, 3).unwrap()
        );
    }
}
