//! Inter-theme similarity
//!
//! Compares themes by what actually landed in them: the mean embedding of
//! each theme's assigned codes, not the seed centroid. High off-diagonal
//! values mean two theme definitions are not pulling apart.
//!
//! A theme with no codes has no mean. Its whole row and column (diagonal
//! included) is 0.0 and `populated` marks it.

use serde::{Deserialize, Serialize};

use crate::embeddings::{cosine_similarity, mean_vector};
use crate::error::{AnalysisError, Result};

/// K×K cosine similarity between theme means
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityMatrix {
    /// Theme names, row/column order
    pub themes: Vec<String>,
    /// Row-major similarity values
    pub values: Vec<Vec<f32>>,
    /// Whether each theme received at least one code
    pub populated: Vec<bool>,
}

/// A pair of themes whose assigned codes overlap semantically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeOverlap {
    /// Theme declared earlier
    pub first: String,
    /// Theme declared later
    pub second: String,
    /// Cosine similarity of the two theme means
    pub similarity: f32,
}

impl SimilarityMatrix {
    /// Build the matrix from per-code embeddings and their cluster indices
    pub fn compute(
        theme_names: &[String],
        embeddings: &[Vec<f32>],
        assignments: &[usize],
    ) -> Result<Self> {
        if embeddings.len() != assignments.len() {
            return Err(AnalysisError::InvalidInput(format!(
                "{} embeddings but {} assignments",
                embeddings.len(),
                assignments.len()
            )));
        }

        let k = theme_names.len();
        let mut members: Vec<Vec<&[f32]>> = vec![Vec::new(); k];
        for (embedding, &cluster) in embeddings.iter().zip(assignments) {
            members
                .get_mut(cluster)
                .ok_or_else(|| {
                    AnalysisError::InvalidInput(format!(
                        "cluster index {} out of range for {} themes",
                        cluster, k
                    ))
                })?
                .push(embedding.as_slice());
        }

        let means: Vec<Option<Vec<f32>>> = members.iter().map(|m| mean_vector(m)).collect();
        let populated: Vec<bool> = means.iter().map(Option::is_some).collect();

        let mut values = vec![vec![0.0_f32; k]; k];
        for i in 0..k {
            let Some(a) = &means[i] else { continue };
            values[i][i] = 1.0;
            for j in (i + 1)..k {
                let Some(b) = &means[j] else { continue };
                let sim = cosine_similarity(a, b);
                values[i][j] = sim;
                values[j][i] = sim;
            }
        }

        Ok(Self {
            themes: theme_names.to_vec(),
            values,
            populated,
        })
    }

    /// Similarity between two themes by name
    pub fn get(&self, a: &str, b: &str) -> Option<f32> {
        let i = self.themes.iter().position(|t| t == a)?;
        let j = self.themes.iter().position(|t| t == b)?;
        Some(self.values[i][j])
    }

    /// Off-diagonal pairs at or above `threshold`, most similar first
    pub fn overlapping_pairs(&self, threshold: f32) -> Vec<ThemeOverlap> {
        let mut pairs = Vec::new();
        for i in 0..self.themes.len() {
            for j in (i + 1)..self.themes.len() {
                if !(self.populated[i] && self.populated[j]) {
                    continue;
                }
                let similarity = self.values[i][j];
                if similarity >= threshold {
                    pairs.push(ThemeOverlap {
                        first: self.themes[i].clone(),
                        second: self.themes[j].clone(),
                        similarity,
                    });
                }
            }
        }
        pairs.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pairs
    }
}
