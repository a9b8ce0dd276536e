//! Analysis error taxonomy

use crate::embeddings::EmbeddingError;

/// Errors that abort a clustering pass
///
/// Non-convergence of the partitioner is deliberately absent: it is reported
/// through [`crate::PartitionStats::converged`] instead.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// A theme has no usable seeds (or no usable name)
    #[error("Invalid theme '{theme}': {reason}")]
    InvalidTheme {
        /// Theme name as declared
        theme: String,
        /// What is wrong with it
        reason: String,
    },

    /// Fewer codes than themes
    #[error("Insufficient data: {codes} codes cannot be partitioned into {themes} themes")]
    InsufficientData {
        /// Number of codes supplied
        codes: usize,
        /// Number of themes declared
        themes: usize,
    },

    /// The embedding model failed to load or infer
    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(#[from] EmbeddingError),

    /// Structurally invalid input (empty code, no themes, duplicate names)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AnalysisError {
    pub(crate) fn invalid_theme(theme: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTheme {
            theme: theme.into(),
            reason: reason.into(),
        }
    }

    /// "Not enough data yet": recoverable by collecting more feedback
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    /// Whether retrying the same call could succeed.
    ///
    /// Only model loading and inference failures qualify. A failed model load
    /// is not cached, so the next call attempts it again. Wrong-sized vectors
    /// and rejected input repeat on every call.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::EmbeddingUnavailable(
                EmbeddingError::ModelInit(_) | EmbeddingError::EmbeddingFailed(_)
            )
        )
    }
}

/// Analysis result type
pub type Result<T> = std::result::Result<T, AnalysisError>;
