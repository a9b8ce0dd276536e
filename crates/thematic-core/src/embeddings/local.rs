//! Local Sentence Embeddings
//!
//! Uses fastembed v5 for local ONNX inference.
//!
//! ## Model
//!
//! - **all-MiniLM-L6-v2** (384d): small, fast and tuned for short sentences,
//!   which is exactly what feedback codes and theme seeds are.
//!
//! The model is loaded once per process. Every [`LocalEmbedder`] shares the
//! same handle, so hosts can construct as many capability objects as they
//! like without triggering another download or session build.

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::{Mutex, OnceLock};

use super::provider::{EmbeddingError, TextEmbedder};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Output dimensions of all-MiniLM-L6-v2
pub const EMBEDDING_DIMENSIONS: usize = 384;

/// Maximum text length for embedding (truncated if longer)
pub const MAX_TEXT_LENGTH: usize = 2048;

/// Batch size for efficient embedding generation
pub const BATCH_SIZE: usize = 32;

/// Model identifier reported in analysis reports
pub const MODEL_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";

// ============================================================================
// GLOBAL MODEL (with Mutex for fastembed v5 API)
// ============================================================================

/// The loaded model. Only a successful load is stored.
static EMBEDDING_MODEL: OnceLock<Mutex<TextEmbedding>> = OnceLock::new();

/// Serializes load attempts so concurrent first callers trigger one download
static MODEL_LOAD_LOCK: Mutex<()> = Mutex::new(());

/// Get the default cache directory for fastembed models
/// Uses FASTEMBED_CACHE_PATH env var, or falls back to platform cache directory
fn get_cache_dir() -> std::path::PathBuf {
    if let Ok(path) = std::env::var("FASTEMBED_CACHE_PATH") {
        return std::path::PathBuf::from(path);
    }

    // Linux: ~/.cache/thematic/fastembed
    // macOS: ~/Library/Caches/org.thematic.core/fastembed
    if let Some(proj_dirs) = directories::ProjectDirs::from("org", "thematic", "core") {
        return proj_dirs.cache_dir().join("fastembed");
    }

    if let Some(base_dirs) = directories::BaseDirs::new() {
        return base_dirs.home_dir().join(".cache/thematic/fastembed");
    }

    std::path::PathBuf::from(".fastembed_cache")
}

fn load_model() -> Result<TextEmbedding, String> {
    let cache_dir = get_cache_dir();

    if let Err(e) = std::fs::create_dir_all(&cache_dir) {
        tracing::warn!("Failed to create cache directory {:?}: {}", cache_dir, e);
    }

    tracing::info!(cache_dir = ?cache_dir, "Loading {}", MODEL_NAME);

    let options = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
        .with_show_download_progress(false)
        .with_cache_dir(cache_dir);

    TextEmbedding::try_new(options).map_err(|e| {
        format!(
            "Failed to initialize all-MiniLM-L6-v2 embedding model: {}. \
            Ensure ONNX runtime is available and model files can be downloaded.",
            e
        )
    })
}

/// Return the value in `cell`, running `load` if it is still empty.
///
/// A failed load leaves the cell empty, so the next caller tries again
/// (a dropped download or a full disk is not permanent).
fn load_once<'a, T>(
    cell: &'a OnceLock<Mutex<T>>,
    load_lock: &Mutex<()>,
    load: impl FnOnce() -> Result<T, String>,
) -> Result<&'a Mutex<T>, EmbeddingError> {
    if let Some(loaded) = cell.get() {
        return Ok(loaded);
    }

    let _guard = load_lock
        .lock()
        .map_err(|e| EmbeddingError::ModelInit(format!("Load lock poisoned: {}", e)))?;

    // Another caller may have finished loading while we waited
    if let Some(loaded) = cell.get() {
        return Ok(loaded);
    }

    let value = load().map_err(|e| {
        tracing::warn!("Embedding model load failed, will retry on next use: {}", e);
        EmbeddingError::ModelInit(e)
    })?;
    Ok(cell.get_or_init(|| Mutex::new(value)))
}

/// Lock the global embedding model, loading it on first use
fn get_model() -> Result<std::sync::MutexGuard<'static, TextEmbedding>, EmbeddingError> {
    load_once(&EMBEDDING_MODEL, &MODEL_LOAD_LOCK, load_model)?
        .lock()
        .map_err(|e| EmbeddingError::ModelInit(format!("Lock poisoned: {}", e)))
}

/// Truncate on a char boundary at or below `MAX_TEXT_LENGTH` bytes
fn truncate_text(text: &str) -> &str {
    if text.len() <= MAX_TEXT_LENGTH {
        return text;
    }
    let mut end = MAX_TEXT_LENGTH;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

// ============================================================================
// LOCAL EMBEDDER
// ============================================================================

/// Capability handle for the process-wide all-MiniLM-L6-v2 model
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEmbedder;

impl LocalEmbedder {
    /// Create a new handle (the model itself loads lazily)
    pub fn new() -> Self {
        Self
    }

    /// Load the model now (downloads if necessary) and surface any error
    pub fn init(&self) -> Result<(), EmbeddingError> {
        let _model = get_model()?;
        Ok(())
    }
}

impl TextEmbedder for LocalEmbedder {
    fn model_name(&self) -> &str {
        MODEL_NAME
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSIONS
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        // Blank inputs never reach the model
        let mut all_embeddings = vec![vec![0.0_f32; EMBEDDING_DIMENSIONS]; texts.len()];
        let pending: Vec<(usize, &str)> = texts
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.trim().is_empty())
            .map(|(i, t)| (i, truncate_text(t)))
            .collect();

        if pending.is_empty() {
            return Ok(all_embeddings);
        }

        let mut model = get_model()?;

        for chunk in pending.chunks(BATCH_SIZE) {
            let batch: Vec<&str> = chunk.iter().map(|(_, t)| *t).collect();

            let embeddings = model
                .embed(batch, None)
                .map_err(|e| EmbeddingError::EmbeddingFailed(e.to_string()))?;

            if embeddings.len() != chunk.len() {
                return Err(EmbeddingError::EmbeddingFailed(format!(
                    "model returned {} embeddings for {} texts",
                    embeddings.len(),
                    chunk.len()
                )));
            }

            for ((slot, _), emb) in chunk.iter().zip(embeddings) {
                if emb.len() != EMBEDDING_DIMENSIONS {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected: EMBEDDING_DIMENSIONS,
                        got: emb.len(),
                    });
                }
                all_embeddings[*slot] = emb;
            }
        }

        Ok(all_embeddings)
    }
}

// ============================================================================
// TESTS
// ============================================================================
