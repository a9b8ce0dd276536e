//! Test Data Factory
//!
//! Provides:
//! - [`LexiconEmbedder`], which places words on fixed semantic axes
//! - Wrappers that count or fail embedding calls
//! - Canned code/theme sets mirroring real course feedback

use std::sync::atomic::{AtomicUsize, Ordering};

use thematic_core::{EmbeddingError, TextEmbedder, ThemeSet};

/// Output size of [`LexiconEmbedder`]
pub const LEXICON_DIMENSIONS: usize = 8;

/// Word → axis table. Unknown words contribute nothing.
const LEXICON: &[(&str, usize)] = &[
    // 0: praise
    ("great", 0),
    ("love", 0),
    ("loved", 0),
    ("excellent", 0),
    ("engaging", 0),
    ("helpful", 0),
    // 1: criticism
    ("improved", 1),
    ("not", 1),
    ("expected", 1),
    ("confusing", 1),
    ("unclear", 1),
    // 2: workload
    ("workload", 2),
    ("heavy", 2),
    ("deadlines", 2),
    ("assignments", 2),
    // 3: support
    ("ta", 3),
    ("office", 3),
    ("hours", 3),
    ("support", 3),
    // 4: pacing
    ("pace", 4),
    ("rushed", 4),
    ("slow", 4),
];

/// Deterministic bag-of-concepts embedder.
///
/// Each known word adds a unit vector on its axis; the sum is L2-normalized.
/// Text with no known words maps to the zero vector.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconEmbedder;

impl LexiconEmbedder {
    /// Embed a single text
    pub fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0_f32; LEXICON_DIMENSIONS];
        for word in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            if let Some((_, axis)) = LEXICON.iter().find(|(w, _)| *w == word) {
                v[*axis] += 1.0;
            }
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl TextEmbedder for LexiconEmbedder {
    fn model_name(&self) -> &str {
        "lexicon-fixture"
    }

    fn dimensions(&self) -> usize {
        LEXICON_DIMENSIONS
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }
}

/// Counts `embed_batch` calls and texts on the way through
#[derive(Debug, Default)]
pub struct CountingEmbedder<E> {
    inner: E,
    calls: AtomicUsize,
    texts: AtomicUsize,
}

impl<E> CountingEmbedder<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            texts: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn texts(&self) -> usize {
        self.texts.load(Ordering::SeqCst)
    }
}

impl<E: TextEmbedder> TextEmbedder for CountingEmbedder<E> {
    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.fetch_add(texts.len(), Ordering::SeqCst);
        self.inner.embed_batch(texts)
    }
}

/// Always fails as if the model could not be loaded
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingEmbedder;

impl TextEmbedder for FailingEmbedder {
    fn model_name(&self) -> &str {
        "failing-fixture"
    }

    fn dimensions(&self) -> usize {
        LEXICON_DIMENSIONS
    }

    fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::ModelInit(
            "model files unavailable".to_string(),
        ))
    }
}

/// The classic five-code sentiment example
pub fn sentiment_codes() -> Vec<String> {
    [
        "great product",
        "loved the design",
        "service was excellent",
        "could be improved",
        "not what i expected",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Positive / Negative themes for [`sentiment_codes`]
pub fn sentiment_themes() -> ThemeSet {
    ThemeSet::from_pairs([
        ("Positive", vec!["great", "love", "excellent"]),
        ("Negative", vec!["improved", "not expected"]),
    ])
    .expect("fixture themes are valid")
}

/// Course feedback codes, duplicates included
pub fn feedback_codes() -> Vec<String> {
    [
        "heavy workload",
        "engaging lectures",
        "unclear instructions",
        "ta unavailable during office hours",
        "too many assignments",
        "rushed pace",
        "heavy workload",
        "helpful ta support",
        "confusing rubric",
        "slow pace early on",
        "tight deadlines",
        "excellent examples",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Four course themes for [`feedback_codes`]
pub fn feedback_themes() -> ThemeSet {
    ThemeSet::from_pairs([
        ("Workload", vec!["heavy workload", "deadlines"]),
        ("Support", vec!["office hours", "ta support"]),
        ("Clarity", vec!["unclear", "confusing"]),
        ("Pacing", vec!["rushed pace", "slow"]),
    ])
    .expect("fixture themes are valid")
}
