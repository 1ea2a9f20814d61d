//! Pipeline from neighbor list to recommendation list.
//!
//! This crate provides:
//! - RatingAggregator for distance-weighted score vectors
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - RecommendationFilter, the ranked/filtered/truncated end of the line
//!
//! ## Architecture
//! The pipeline processes a request in stages:
//! 1. RatingAggregator weights the neighbors' rating rows into one score per movie
//! 2. Scores are ranked best first
//! 3. Filters remove zero-signal and already watched candidates
//! 4. The first `n` remaining titles are returned
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{RatingAggregator, RecommendationFilter};
//!
//! let scores = RatingAggregator::new().aggregate(&matrix, &neighbors)?;
//! let titles = RecommendationFilter::new().filter(&scores, &seen, matrix.movie_titles(), 10)?;
//! ```

pub mod aggregator;
pub mod candidate;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod ranking;
pub mod traits;

// Re-export main types
pub use aggregator::{DegeneratePolicy, RatingAggregator, WeightingScheme};
pub use candidate::Candidate;
pub use error::{PipelineError, Result};
pub use filter_pipeline::FilterPipeline;
pub use ranking::{rank_candidates, RecommendationFilter};
pub use traits::Filter;
