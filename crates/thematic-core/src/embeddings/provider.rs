//! The embedder capability
//!
//! The clustering pipeline never reaches for a global model. The host builds
//! one [`TextEmbedder`] (usually a [`super::LocalEmbedder`], optionally wrapped
//! in a [`CachedEmbedder`]) and injects it, which keeps the core testable with
//! deterministic fakes.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Embedding error types
#[non_exhaustive]
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmbeddingError {
    /// Failed to initialize the embedding model
    #[error("Model initialization failed: {0}")]
    ModelInit(String),
    /// Failed to generate embedding
    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(String),
    /// Invalid input (empty batch, etc.)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The model produced vectors of an unexpected size
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Dimensions reported by the embedder
        expected: usize,
        /// Dimensions actually produced
        got: usize,
    },
}

// ============================================================================
// EMBEDDER TRAIT
// ============================================================================

/// Maps short texts to fixed-length dense vectors.
///
/// Implementations must use one model for their whole lifetime: vectors from
/// different models are not comparable. Output `i` is the embedding of input
/// `i`, and empty strings map to a degenerate (zero) vector rather than an
/// error.
pub trait TextEmbedder: Send + Sync {
    /// Identifier of the underlying model
    fn model_name(&self) -> &str;

    /// Dimensionality of every produced vector
    fn dimensions(&self) -> usize;

    /// Embed a batch of texts, preserving order
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

impl<T: TextEmbedder + ?Sized> TextEmbedder for &T {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }
}

impl<T: TextEmbedder + ?Sized> TextEmbedder for Arc<T> {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }
}

impl<T: TextEmbedder + ?Sized> TextEmbedder for Box<T> {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_batch(texts)
    }
}

// ============================================================================
// CACHED EMBEDDER
// ============================================================================

/// Default number of cached vectors
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// LRU memo in front of another embedder.
///
/// Codes repeat heavily across submissions ("unclear instructions" shows up
/// everywhere), so only cache misses are forwarded. Cached vectors are the
/// inner embedder's own output, which keeps results identical.
pub struct CachedEmbedder<E> {
    inner: E,
    cache: Mutex<LruCache<String, Vec<f32>>>,
}

impl<E: TextEmbedder> CachedEmbedder<E> {
    /// Wrap `inner` with a cache holding up to `capacity` vectors
    /// (a zero capacity falls back to [`DEFAULT_CACHE_SIZE`])
    pub fn new(inner: E, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_CACHE_SIZE))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// The wrapped embedder
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Number of vectors currently cached
    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl<E: TextEmbedder> TextEmbedder for CachedEmbedder<E> {
    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut results: Vec<Option<Vec<f32>>> = vec![None; texts.len()];
        let mut misses: Vec<&str> = Vec::new();
        let mut miss_slots: Vec<usize> = Vec::new();

        {
            let mut cache = self
                .cache
                .lock()
                .map_err(|e| EmbeddingError::EmbeddingFailed(format!("Lock poisoned: {}", e)))?;
            for (i, text) in texts.iter().enumerate() {
                match cache.get(*text) {
                    Some(v) => results[i] = Some(v.clone()),
                    None => {
                        misses.push(text);
                        miss_slots.push(i);
                    }
                }
            }
        }

        if !misses.is_empty() {
            // The inner call runs without holding the cache lock
            let fresh = self.inner.embed_batch(&misses)?;
            if fresh.len() != misses.len() {
                return Err(EmbeddingError::EmbeddingFailed(format!(
                    "expected {} embeddings, got {}",
                    misses.len(),
                    fresh.len()
                )));
            }

            let mut cache = self
                .cache
                .lock()
                .map_err(|e| EmbeddingError::EmbeddingFailed(format!("Lock poisoned: {}", e)))?;
            for ((slot, text), vector) in miss_slots.into_iter().zip(misses).zip(fresh) {
                cache.put(text.to_string(), vector.clone());
                results[slot] = Some(vector);
            }
        }

        tracing::trace!(requested = texts.len(), "cached embedder batch served");

        results
            .into_iter()
            .map(|r| {
                r.ok_or_else(|| EmbeddingError::EmbeddingFailed("missing embedding".to_string()))
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
