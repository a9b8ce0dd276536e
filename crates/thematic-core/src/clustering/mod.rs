//! Seeded clustering
//!
//! - [`theme_centroid`]: seed embeddings → one centroid per theme
//! - [`SeededKMeans`]: Lloyd's k-means started from those centroids
//! - [`ClusteredResult`]: the assignment regrouped by theme

mod assemble;
mod centroid;
mod kmeans;

pub use assemble::{ClusteredResult, ThemeCluster};
pub use centroid::theme_centroid;
pub use kmeans::{KMeansConfig, PartitionOutcome, PartitionStats, SeededKMeans};
