//! # Thematic Core
//!
//! Semi-supervised thematic analysis of free-text feedback. Researchers name
//! a handful of themes and give each a few seed words; every extracted code
//! is then assigned to exactly one theme by k-means in a sentence-embedding
//! space, started from the seed centroids.
//!
//! - **Embeddings**: injected [`TextEmbedder`] capability; local
//!   all-MiniLM-L6-v2 via fastembed behind the `embeddings` feature
//! - **Seed centroids**: element-wise mean of each theme's seed embeddings
//! - **Seeded K-Means**: deterministic Lloyd iterations, one cluster per theme
//! - **Analytics**: theme counts, code frequencies, 2D PCA projection and an
//!   inter-theme similarity matrix
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use thematic_core::{LocalEmbedder, ThematicAnalyzer, ThemeSet};
//!
//! let themes = ThemeSet::from_pairs([
//!     ("Positive", vec!["great", "love", "excellent"]),
//!     ("Negative", vec!["improved", "not expected"]),
//! ])?;
//! let codes = ["great product", "loved the design", "could be improved"];
//!
//! let analyzer = ThematicAnalyzer::new(LocalEmbedder::new());
//! let analysis = analyzer.analyze(&codes, &themes)?;
//! for cluster in analysis.clusters() {
//!     println!("{}: {:?}", cluster.theme, cluster.codes);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `embeddings` (default): local embedding generation with fastembed

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod analytics;
pub mod clustering;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod input;
pub mod pipeline;
pub mod report;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use analytics::{
    Projection, SimilarityMatrix, ThemeCounts, ThemeOverlap, code_frequencies, project_2d,
};
pub use clustering::{
    ClusteredResult, KMeansConfig, PartitionOutcome, PartitionStats, SeededKMeans, ThemeCluster,
    theme_centroid,
};
pub use config::AnalysisConfig;
pub use embeddings::{
    CachedEmbedder, EmbeddingError, TextEmbedder, cosine_similarity, squared_euclidean,
};
#[cfg(feature = "embeddings")]
pub use embeddings::LocalEmbedder;
pub use error::{AnalysisError, Result};
pub use input::{
    ThemeSet, ThemeSpec, collect_codes, normalize_text, split_codewords, unique_codes,
};
pub use pipeline::{ThematicAnalysis, ThematicAnalyzer};
pub use report::{AnalysisReport, CodeFrequency, ProjectedCode, ThemeCountEntry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
