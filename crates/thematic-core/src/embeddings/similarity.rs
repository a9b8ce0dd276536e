//! Vector math shared by the partitioner and the analytics.
//!
//! All functions take plain slices so they work on code embeddings, seed
//! centroids and cluster centers alike.

/// Compute cosine similarity between two vectors
///
/// Returns 0.0 when the lengths differ or either vector has zero norm.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot_product = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot_product += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = (norm_a * norm_b).sqrt();
    if denominator > 0.0 {
        dot_product / denominator
    } else {
        0.0
    }
}

/// Squared Euclidean distance, the k-means objective
#[inline]
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::MAX;
    }

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Element-wise arithmetic mean of a set of equal-length vectors
///
/// Returns `None` for an empty set or when the vectors disagree on length.
/// Unlike a search centroid the result is NOT normalized: k-means centers
/// live in the raw embedding space.
pub fn mean_vector<V: AsRef<[f32]>>(vectors: &[V]) -> Option<Vec<f32>> {
    let first = vectors.first()?.as_ref();
    let dim = first.len();
    let mut sum = vec![0.0_f64; dim];

    for v in vectors {
        let v = v.as_ref();
        if v.len() != dim {
            return None;
        }
        for (acc, &x) in sum.iter_mut().zip(v) {
            *acc += x as f64;
        }
    }

    let count = vectors.len() as f64;
    Some(sum.into_iter().map(|s| (s / count) as f32).collect())
}

// ============================================================================
// TESTS
// ============================================================================
