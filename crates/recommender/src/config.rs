//! Recommender configuration.
//!
//! Defaults match the original front-end: 3 similar users, 3 recommended
//! movies, raw-distance weighting. A JSON file can override any subset:
//!
//! ```json
//! { "weighting": "similarity", "default_recommendations": 10 }
//! ```

use crate::error::{RecommenderError, Result};
use pipeline::{DegeneratePolicy, WeightingScheme};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    /// How neighbor distances become weights
    pub weighting: WeightingScheme,
    /// What to do when all neighbor weights are zero
    pub on_degenerate: DegeneratePolicy,
    /// Neighbors used when the caller does not say
    pub default_neighbors: usize,
    /// Recommendations returned when the caller does not say
    pub default_recommendations: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            weighting: WeightingScheme::Distance,
            on_degenerate: DegeneratePolicy::EqualWeights,
            default_neighbors: 3,
            default_recommendations: 3,
        }
    }
}

impl RecommenderConfig {
    pub fn with_weighting(mut self, weighting: WeightingScheme) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.on_degenerate = policy;
        self
    }

    pub fn with_default_neighbors(mut self, k: usize) -> Self {
        self.default_neighbors = k;
        self
    }

    pub fn with_default_recommendations(mut self, n: usize) -> Self {
        self.default_recommendations = n;
        self
    }

    /// Read a JSON config file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| RecommenderError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| RecommenderError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::default();
        assert_eq!(config.weighting, WeightingScheme::Distance);
        assert_eq!(config.default_neighbors, 3);
        assert_eq!(config.default_recommendations, 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recommender.json");
        std::fs::write(&path, r#"{ "weighting": "similarity", "default_neighbors": 5 }"#).unwrap();

        let config = RecommenderConfig::from_json_file(&path).unwrap();
        assert_eq!(config.weighting, WeightingScheme::Similarity);
        assert_eq!(config.default_neighbors, 5);
        assert_eq!(config.default_recommendations, 3);
        assert_eq!(config.on_degenerate, DegeneratePolicy::EqualWeights);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recommender.json");
        std::fs::write(&path, r#"{ "neighbours": 5 }"#).unwrap();

        let err = RecommenderConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, RecommenderError::Config { .. }));
    }

    #[test]
    fn test_builder_methods() {
        let config = RecommenderConfig::default()
            .with_weighting(WeightingScheme::Similarity)
            .with_degenerate_policy(DegeneratePolicy::Fail)
            .with_default_neighbors(7)
            .with_default_recommendations(9);
        assert_eq!(config.on_degenerate, DegeneratePolicy::Fail);
        assert_eq!(config.default_neighbors, 7);
        assert_eq!(config.default_recommendations, 9);
    }
}
