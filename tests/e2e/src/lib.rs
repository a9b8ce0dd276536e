//! End-to-end test support for the thematic clustering engine
//!
//! Real sentence-embedding models are large and not bit-stable across
//! versions, so these tests run the full pipeline against deterministic
//! embedders from [`mocks`].

pub mod mocks;
