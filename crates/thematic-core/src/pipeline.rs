//! The clustering pass
//!
//! [`ThematicAnalyzer`] wires the pieces together:
//!
//! ```text
//! codes ──embed──▶ code vectors ─────────────┐
//! seeds ──embed──▶ seed vectors ─▶ centroids ─┴▶ seeded k-means ─▶ ClusteredResult
//! ```
//!
//! Validation happens before the first embedding call, so malformed input
//! never costs an inference. A pass is synchronous and owns all of its
//! intermediate state; only the embedder is shared.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::analytics::{Projection, SimilarityMatrix, ThemeCounts, code_frequencies, project_2d};
use crate::clustering::{
    ClusteredResult, KMeansConfig, PartitionOutcome, PartitionStats, SeededKMeans, theme_centroid,
};
use crate::config::AnalysisConfig;
use crate::embeddings::{EmbeddingError, TextEmbedder};
use crate::error::{AnalysisError, Result};
use crate::input::ThemeSet;
use crate::report::AnalysisReport;

/// Runs clustering passes with an injected embedder
pub struct ThematicAnalyzer<E> {
    embedder: E,
    config: AnalysisConfig,
}

impl<E: TextEmbedder> ThematicAnalyzer<E> {
    /// Analyzer with default configuration
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            config: AnalysisConfig::default(),
        }
    }

    /// Analyzer with a validated configuration
    pub fn with_config(embedder: E, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { embedder, config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Validate raw `(theme, seeds)` pairs, then run [`Self::analyze`]
    pub fn analyze_with_seeds<S, I, N, V, T>(
        &self,
        codes: &[S],
        themes: I,
    ) -> Result<ThematicAnalysis>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let themes = ThemeSet::from_pairs(themes)?;
        self.analyze(codes, &themes)
    }

    /// Partition `codes` into one cluster per theme.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if a code is blank
    /// - `InsufficientData` if there are fewer codes than themes
    /// - `EmbeddingUnavailable` if the embedder fails or misbehaves
    pub fn analyze<S: AsRef<str>>(
        &self,
        codes: &[S],
        themes: &ThemeSet,
    ) -> Result<ThematicAnalysis> {
        if let Some(position) = codes.iter().position(|c| c.as_ref().trim().is_empty()) {
            return Err(AnalysisError::InvalidInput(format!(
                "code at position {} is empty",
                position
            )));
        }
        if codes.len() < themes.len() {
            return Err(AnalysisError::InsufficientData {
                codes: codes.len(),
                themes: themes.len(),
            });
        }

        let mut ordered: Vec<String> = codes.iter().map(|c| c.as_ref().to_string()).collect();
        if let Some(seed) = self.config.shuffle_seed {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            ordered.shuffle(&mut rng);
        }

        let code_texts: Vec<&str> = ordered.iter().map(String::as_str).collect();
        let code_embeddings = self.embed(&code_texts)?;

        // All seeds go through one batch, then get split back per theme
        let seed_texts: Vec<&str> = themes
            .iter()
            .flat_map(|t| t.seeds().iter().map(String::as_str))
            .collect();
        let seed_embeddings = self.embed(&seed_texts)?;

        let mut centroids = Vec::with_capacity(themes.len());
        let mut offset = 0;
        for theme in themes {
            let count = theme.seeds().len();
            centroids.push(theme_centroid(
                theme.name(),
                &seed_embeddings[offset..offset + count],
            )?);
            offset += count;
        }

        let kmeans = SeededKMeans::new(KMeansConfig::from(&self.config));
        let outcome = kmeans.fit(&code_embeddings, &centroids)?;

        let theme_names = themes.names();
        let clusters = ClusteredResult::assemble(&theme_names, &ordered, &outcome.assignments)?;

        tracing::info!(
            codes = ordered.len(),
            themes = theme_names.len(),
            empty_themes = clusters.empty_themes().len(),
            iterations = outcome.stats.iterations,
            converged = outcome.stats.converged,
            inertia = outcome.stats.inertia,
            model = self.embedder.model_name(),
            "Thematic clustering pass complete"
        );

        Ok(ThematicAnalysis {
            model: self.embedder.model_name().to_string(),
            codes: ordered,
            code_embeddings,
            theme_names,
            seed_centroids: centroids,
            outcome,
            clusters,
        })
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let vectors = self.embedder.embed_batch(texts)?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::EmbeddingFailed(format!(
                "embedder returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            ))
            .into());
        }

        let expected = self.embedder.dimensions();
        if let Some(bad) = vectors.iter().find(|v| v.len() != expected) {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                got: bad.len(),
            }
            .into());
        }

        Ok(vectors)
    }
}

/// Everything one pass produced
///
/// `codes`, `code_embeddings` and the assignment share one order: the order
/// codes were clustered in (input order, or shuffled when configured).
#[derive(Debug, Clone)]
pub struct ThematicAnalysis {
    model: String,
    codes: Vec<String>,
    code_embeddings: Vec<Vec<f32>>,
    theme_names: Vec<String>,
    seed_centroids: Vec<Vec<f32>>,
    outcome: PartitionOutcome,
    clusters: ClusteredResult,
}

impl ThematicAnalysis {
    /// Theme name → assigned codes
    pub fn clusters(&self) -> &ClusteredResult {
        &self.clusters
    }

    /// Model the pass was embedded with
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Codes in clustering order
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn code_embeddings(&self) -> &[Vec<f32>] {
        &self.code_embeddings
    }

    /// Cluster index per code, aligned with [`Self::codes`]
    pub fn assignments(&self) -> &[usize] {
        &self.outcome.assignments
    }

    pub fn theme_names(&self) -> &[String] {
        &self.theme_names
    }

    /// Initial centers derived from the seeds
    pub fn seed_centroids(&self) -> &[Vec<f32>] {
        &self.seed_centroids
    }

    /// Centers after the last update
    pub fn final_centers(&self) -> &[Vec<f32>] {
        &self.outcome.centers
    }

    pub fn stats(&self) -> PartitionStats {
        self.outcome.stats
    }

    pub fn theme_counts(&self) -> ThemeCounts {
        ThemeCounts::from_clusters(&self.clusters)
    }

    pub fn code_frequencies(&self) -> Vec<(String, usize)> {
        code_frequencies(&self.codes)
    }

    /// PCA of the code embeddings, aligned with [`Self::codes`]
    pub fn projection(&self) -> Result<Projection> {
        project_2d(&self.code_embeddings)
    }

    pub fn similarity(&self) -> Result<SimilarityMatrix> {
        SimilarityMatrix::compute(
            &self.theme_names,
            &self.code_embeddings,
            &self.outcome.assignments,
        )
    }

    /// Render-ready summary of the pass
    pub fn report(&self) -> Result<AnalysisReport> {
        AnalysisReport::from_analysis(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================
