//! Seeded K-Means
//!
//! Lloyd's algorithm with the initial centers supplied by the caller (the
//! theme centroids) instead of picked at random. With a single deterministic
//! initialization there is nothing to restart, so one run is the result.
//!
//! ## Loop
//!
//! 1. Assign every point to its nearest center (squared Euclidean distance,
//!    ties go to the lowest cluster index).
//! 2. Move each center to the mean of its points. A center with no points
//!    stays where it is.
//! 3. Stop when no label changes, when the total squared center shift drops
//!    to `tolerance × mean per-dimension variance`, or at the iteration cap.
//!
//! Labels are always recomputed against the final centers, so the returned
//! assignment and centers agree even when the cap is hit.

use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::embeddings::squared_euclidean;
use crate::error::{AnalysisError, Result};

/// Partitioner settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeansConfig {
    /// Iteration cap
    pub max_iterations: usize,
    /// Relative center-shift tolerance
    pub tolerance: f64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl From<&AnalysisConfig> for KMeansConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        }
    }
}

/// How the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionStats {
    /// Update steps performed
    pub iterations: usize,
    /// False when the iteration cap was hit first
    pub converged: bool,
    /// Sum of squared distances from each point to its center
    pub inertia: f64,
    /// Total squared center movement in the last update
    pub center_shift: f64,
}

/// Assignment plus final centers
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionOutcome {
    /// Cluster index for every input point, in input order
    pub assignments: Vec<usize>,
    /// Final cluster centers, in seed order
    pub centers: Vec<Vec<f32>>,
    /// Loop statistics
    pub stats: PartitionStats,
}

/// Lloyd's k-means initialized from caller-supplied centers
#[derive(Debug, Clone, Default)]
pub struct SeededKMeans {
    config: KMeansConfig,
}

impl SeededKMeans {
    /// Create a partitioner
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Partition `points` into `seeds.len()` clusters.
    ///
    /// Fails with `InsufficientData` when there are fewer points than seeds.
    pub fn fit(&self, points: &[Vec<f32>], seeds: &[Vec<f32>]) -> Result<PartitionOutcome> {
        let k = seeds.len();
        if k == 0 {
            return Err(AnalysisError::InvalidInput(
                "at least one initial center is required".to_string(),
            ));
        }
        if points.len() < k {
            return Err(AnalysisError::InsufficientData {
                codes: points.len(),
                themes: k,
            });
        }
        if self.config.max_iterations == 0 {
            return Err(AnalysisError::InvalidConfig(
                "maxIterations must be at least 1".to_string(),
            ));
        }

        let dim = seeds[0].len();
        if let Some(bad) = seeds.iter().chain(points).find(|v| v.len() != dim) {
            return Err(AnalysisError::InvalidInput(format!(
                "vector of {} dimensions among {}-dimensional centers",
                bad.len(),
                dim
            )));
        }

        let threshold = self.config.tolerance * mean_variance(points, dim);

        let mut centers = seeds.to_vec();
        let mut labels = assign(points, &centers);
        let mut iterations = 0;
        let mut converged = false;
        let mut center_shift = 0.0;

        while iterations < self.config.max_iterations {
            iterations += 1;

            let updated = update_centers(points, &labels, &centers);
            center_shift = total_shift(&centers, &updated);
            centers = updated;

            let relabeled = assign(points, &centers);
            let stable = relabeled == labels;
            labels = relabeled;

            tracing::debug!(iteration = iterations, center_shift, stable, "k-means step");

            if stable || center_shift <= threshold {
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::warn!(
                iterations,
                center_shift,
                threshold,
                "Seeded k-means hit the iteration cap before converging; returning best assignment"
            );
        }

        let inertia = points
            .iter()
            .zip(&labels)
            .map(|(p, &c)| squared_euclidean(p, &centers[c]) as f64)
            .sum();

        Ok(PartitionOutcome {
            assignments: labels,
            centers,
            stats: PartitionStats {
                iterations,
                converged,
                inertia,
                center_shift,
            },
        })
    }
}

/// Index of the nearest center for each point
fn assign(points: &[Vec<f32>], centers: &[Vec<f32>]) -> Vec<usize> {
    points
        .iter()
        .map(|p| {
            let mut best = 0;
            let mut best_distance = squared_euclidean(p, &centers[0]);
            for (c, center) in centers.iter().enumerate().skip(1) {
                let d = squared_euclidean(p, center);
                // strict: an equal distance keeps the lower index
                if d < best_distance {
                    best = c;
                    best_distance = d;
                }
            }
            best
        })
        .collect()
}

/// Mean of each cluster's points; empty clusters keep their center
fn update_centers(points: &[Vec<f32>], labels: &[usize], centers: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let dim = centers[0].len();
    let mut sums = vec![vec![0.0_f64; dim]; centers.len()];
    let mut counts = vec![0usize; centers.len()];

    for (p, &c) in points.iter().zip(labels) {
        counts[c] += 1;
        for (acc, &x) in sums[c].iter_mut().zip(p) {
            *acc += x as f64;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(centers)
        .map(|((sum, count), old)| {
            if count == 0 {
                old.clone()
            } else {
                sum.into_iter().map(|s| (s / count as f64) as f32).collect()
            }
        })
        .collect()
}

fn total_shift(old: &[Vec<f32>], new: &[Vec<f32>]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(a, b)| squared_euclidean(a, b) as f64)
        .sum()
}

/// Mean over dimensions of the per-dimension (population) variance
fn mean_variance(points: &[Vec<f32>], dim: usize) -> f64 {
    if points.is_empty() || dim == 0 {
        return 0.0;
    }
    let n = points.len() as f64;
    let mut total = 0.0;
    for d in 0..dim {
        let mean = points.iter().map(|p| p[d] as f64).sum::<f64>() / n;
        total += points
            .iter()
            .map(|p| {
                let diff = p[d] as f64 - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
    }
    total / dim as f64
}

// ============================================================================
// TESTS
// ============================================================================
