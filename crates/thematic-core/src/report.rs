//! Render-ready report
//!
//! Bundles the partition and every analytic into one serializable value so a
//! rendering or persistence collaborator can take it as-is (charts, word
//! cloud, scatter plot, similarity heatmap).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::{SimilarityMatrix, ThemeOverlap};
use crate::clustering::{ClusteredResult, PartitionStats};
use crate::error::Result;
use crate::pipeline::ThematicAnalysis;

/// Off-diagonal similarity above which two themes are reported as overlapping
pub const DEFAULT_OVERLAP_THRESHOLD: f32 = 0.8;

/// Codes assigned to one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeCountEntry {
    pub theme: String,
    pub count: usize,
}

/// Occurrences of one distinct code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeFrequency {
    pub code: String,
    pub count: usize,
}

/// One scatter-plot point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedCode {
    pub code: String,
    pub theme: String,
    pub x: f32,
    pub y: f32,
}

/// Full output of one clustering pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Identifier a persistence layer can key on
    pub run_id: Uuid,
    /// When the report was built
    pub generated_at: DateTime<Utc>,
    /// Embedding model used
    pub model: String,
    /// Theme → codes, every declared theme in declaration order
    pub clusters: ClusteredResult,
    /// Count descending
    pub theme_counts: Vec<ThemeCountEntry>,
    /// Distinct codes, most frequent first
    pub code_frequencies: Vec<CodeFrequency>,
    /// One point per code, in clustering order
    pub projection: Vec<ProjectedCode>,
    /// Share of total variance carried by each projected axis
    pub explained_variance_ratio: [f32; 2],
    /// Cosine similarity between theme means
    pub similarity: SimilarityMatrix,
    /// Theme pairs at or above [`DEFAULT_OVERLAP_THRESHOLD`]
    pub overlaps: Vec<ThemeOverlap>,
    /// How the partitioner loop ended
    pub stats: PartitionStats,
}

impl AnalysisReport {
    pub fn from_analysis(analysis: &ThematicAnalysis) -> Result<Self> {
        let projection = analysis.projection()?;
        let similarity = analysis.similarity()?;
        let names = analysis.theme_names();

        let points = analysis
            .codes()
            .iter()
            .zip(analysis.assignments())
            .zip(&projection.points)
            .map(|((code, &cluster), [x, y])| ProjectedCode {
                code: code.clone(),
                theme: names[cluster].clone(),
                x: *x,
                y: *y,
            })
            .collect();

        Ok(Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            model: analysis.model().to_string(),
            clusters: analysis.clusters().clone(),
            theme_counts: analysis
                .theme_counts()
                .ranked()
                .into_iter()
                .map(|(theme, count)| ThemeCountEntry { theme, count })
                .collect(),
            code_frequencies: analysis
                .code_frequencies()
                .into_iter()
                .map(|(code, count)| CodeFrequency { code, count })
                .collect(),
            projection: points,
            explained_variance_ratio: projection.explained_variance_ratio,
            overlaps: similarity.overlapping_pairs(DEFAULT_OVERLAP_THRESHOLD),
            similarity,
            stats: analysis.stats(),
        })
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
