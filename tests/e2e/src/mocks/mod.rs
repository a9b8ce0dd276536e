//! Deterministic embedders and canned inputs

mod fixtures;

pub use fixtures::{
    CountingEmbedder, FailingEmbedder, LEXICON_DIMENSIONS, LexiconEmbedder, feedback_codes,
    feedback_themes, sentiment_codes, sentiment_themes,
};
