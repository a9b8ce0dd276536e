//! Semantic Embeddings Module
//!
//! Provides the embedding capability the clustering pipeline is built on:
//! - [`TextEmbedder`], the injected text-to-vector capability
//! - [`LocalEmbedder`], local all-MiniLM-L6-v2 inference via fastembed
//! - [`CachedEmbedder`], an LRU memo over any embedder
//! - Vector math (cosine similarity, squared Euclidean distance, means)

#[cfg(feature = "embeddings")]
mod local;
mod provider;
mod similarity;

#[cfg(feature = "embeddings")]
#[cfg_attr(docsrs, doc(cfg(feature = "embeddings")))]
pub use local::{BATCH_SIZE, EMBEDDING_DIMENSIONS, LocalEmbedder, MAX_TEXT_LENGTH, MODEL_NAME};

pub use provider::{CachedEmbedder, DEFAULT_CACHE_SIZE, EmbeddingError, TextEmbedder};
pub use similarity::{cosine_similarity, mean_vector, squared_euclidean};
