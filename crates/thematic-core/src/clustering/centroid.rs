//! Seed aggregation
//!
//! Each theme's seeds are embedded and averaged into one centroid. No
//! normalization and no randomness: identical seeds give identical centroids.

use crate::embeddings::mean_vector;
use crate::error::{AnalysisError, Result};

/// Element-wise mean of one theme's seed embeddings
pub fn theme_centroid(theme: &str, seed_embeddings: &[Vec<f32>]) -> Result<Vec<f32>> {
    if seed_embeddings.is_empty() {
        return Err(AnalysisError::invalid_theme(theme, "no seed embeddings"));
    }

    mean_vector(seed_embeddings).ok_or_else(|| {
        AnalysisError::invalid_theme(theme, "seed embeddings have inconsistent dimensions")
    })
}
