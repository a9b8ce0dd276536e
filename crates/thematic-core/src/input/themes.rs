//! Theme definitions
//!
//! A [`ThemeSpec`] can only be built through validation, so a theme without a
//! usable seed never reaches the embedder.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::codes::normalize_text;
use crate::error::{AnalysisError, Result};

/// A researcher-defined theme and its seed texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawThemeSpec")]
pub struct ThemeSpec {
    name: String,
    seeds: Vec<String>,
}

/// Unvalidated wire form
#[derive(Debug, Deserialize)]
struct RawThemeSpec {
    name: String,
    #[serde(default)]
    seeds: Vec<String>,
}

impl TryFrom<RawThemeSpec> for ThemeSpec {
    type Error = AnalysisError;

    fn try_from(raw: RawThemeSpec) -> Result<Self> {
        ThemeSpec::new(raw.name, raw.seeds)
    }
}

impl ThemeSpec {
    /// Validate a theme.
    ///
    /// The name and each seed are trimmed; blank seeds are dropped. Fails with
    /// `InvalidTheme` if the name is blank or no seed survives.
    pub fn new<N, I, S>(name: N, seeds: I) -> Result<Self>
    where
        N: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.as_ref().trim().to_string();
        if name.is_empty() {
            return Err(AnalysisError::invalid_theme(name, "theme name is empty"));
        }

        let seeds: Vec<String> = seeds
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if seeds.is_empty() {
            return Err(AnalysisError::invalid_theme(name, "no non-empty seeds"));
        }

        Ok(Self { name, seeds })
    }

    /// Parse the comma-separated form researchers type ("great, love, excellent").
    /// Seeds are lowercased like codes.
    pub fn from_seed_list(name: &str, seed_list: &str) -> Result<Self> {
        Self::new(name, seed_list.split(',').map(normalize_text))
    }

    /// Theme name (cluster identifier)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seeds in declaration order, never empty
    pub fn seeds(&self) -> &[String] {
        &self.seeds
    }
}

/// Ordered, validated collection of themes for one pass
///
/// Declaration order is significant: theme `i` seeds cluster `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ThemeSpec>", into = "Vec<ThemeSpec>")]
pub struct ThemeSet {
    themes: Vec<ThemeSpec>,
}

impl TryFrom<Vec<ThemeSpec>> for ThemeSet {
    type Error = AnalysisError;

    fn try_from(themes: Vec<ThemeSpec>) -> Result<Self> {
        ThemeSet::new(themes)
    }
}

impl From<ThemeSet> for Vec<ThemeSpec> {
    fn from(set: ThemeSet) -> Self {
        set.themes
    }
}

impl ThemeSet {
    /// Validate a list of themes: at least one, names unique
    pub fn new(themes: Vec<ThemeSpec>) -> Result<Self> {
        if themes.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "at least one theme is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for theme in &themes {
            if !seen.insert(theme.name()) {
                return Err(AnalysisError::invalid_theme(
                    theme.name(),
                    "theme name declared more than once",
                ));
            }
        }

        Ok(Self { themes })
    }

    /// Build and validate from `(name, seeds)` pairs
    pub fn from_pairs<I, N, V, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let themes = pairs
            .into_iter()
            .map(|(name, seeds)| ThemeSpec::new(name, seeds))
            .collect::<Result<Vec<_>>>()?;
        Self::new(themes)
    }

    /// Number of themes (K)
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Always false for a validated set
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Themes in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, ThemeSpec> {
        self.themes.iter()
    }

    /// Theme names in declaration order
    pub fn names(&self) -> Vec<String> {
        self.themes.iter().map(|t| t.name.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a ThemeSet {
    type Item = &'a ThemeSpec;
    type IntoIter = std::slice::Iter<'a, ThemeSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.themes.iter()
    }
}
