//! Analysis configuration
//!
//! Defaults match a single seeded Lloyd run: at most 300 iterations and a
//! center-shift tolerance of 1e-4 relative to the data's mean per-dimension
//! variance. Every field can be overridden from the environment.

use serde::{Deserialize, Serialize};

use crate::embeddings::DEFAULT_CACHE_SIZE;
use crate::error::{AnalysisError, Result};

/// Default iteration cap for the partitioner
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

/// Default relative convergence tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Environment variable names
pub const ENV_MAX_ITERATIONS: &str = "THEMATIC_MAX_ITERATIONS";
/// Relative tolerance override
pub const ENV_TOLERANCE: &str = "THEMATIC_TOLERANCE";
/// Shuffle seed override (`none` disables)
pub const ENV_SHUFFLE_SEED: &str = "THEMATIC_SHUFFLE_SEED";
/// Embedding cache capacity override
pub const ENV_EMBEDDING_CACHE_SIZE: &str = "THEMATIC_EMBEDDING_CACHE_SIZE";

/// Tunables for one clustering pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Iteration cap for the seeded k-means loop
    pub max_iterations: usize,
    /// Center-shift tolerance, scaled by the mean per-dimension variance
    pub tolerance: f64,
    /// Shuffle the codes with this seed before embedding (`None` keeps input order)
    pub shuffle_seed: Option<u64>,
    /// Capacity of the embedding LRU cache used by hosts
    pub embedding_cache_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            shuffle_seed: None,
            embedding_cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl AnalysisConfig {
    /// Defaults overlaid with `THEMATIC_*` environment variables
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary key lookup.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, ENV_MAX_ITERATIONS) {
            self.max_iterations = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_TOLERANCE) {
            self.tolerance = v;
        }
        if let Some(raw) = lookup(ENV_SHUFFLE_SEED) {
            let raw = raw.trim();
            if raw.eq_ignore_ascii_case("none") || raw.is_empty() {
                self.shuffle_seed = None;
            } else {
                match raw.parse() {
                    Ok(seed) => self.shuffle_seed = Some(seed),
                    Err(_) => tracing::warn!("Ignoring unparseable {}={}", ENV_SHUFFLE_SEED, raw),
                }
            }
        }
        if let Some(v) = parse_var(&lookup, ENV_EMBEDDING_CACHE_SIZE) {
            self.embedding_cache_size = v;
        }
        self
    }

    /// Reject values the partitioner cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(AnalysisError::InvalidConfig(
                "maxIterations must be at least 1".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "tolerance must be a finite non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring unparseable {}={}", key, raw);
            None
        }
    }
}
