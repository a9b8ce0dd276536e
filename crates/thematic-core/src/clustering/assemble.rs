//! Result assembly
//!
//! Inverts the per-code assignment into theme → codes. Every declared theme
//! appears, in declaration order, even when no code landed in it.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Codes assigned to one theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeCluster {
    /// Theme name
    pub theme: String,
    /// Codes in the order they were assigned
    pub codes: Vec<String>,
}

/// Ordered mapping from theme name to its assigned codes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusteredResult {
    clusters: Vec<ThemeCluster>,
}

impl ClusteredResult {
    /// Group `codes` by `assignments` (cluster index into `theme_names`)
    pub fn assemble<S: AsRef<str>>(
        theme_names: &[String],
        codes: &[S],
        assignments: &[usize],
    ) -> Result<Self> {
        if codes.len() != assignments.len() {
            return Err(AnalysisError::InvalidInput(format!(
                "{} codes but {} assignments",
                codes.len(),
                assignments.len()
            )));
        }

        let mut clusters: Vec<ThemeCluster> = theme_names
            .iter()
            .map(|name| ThemeCluster {
                theme: name.clone(),
                codes: Vec::new(),
            })
            .collect();

        for (code, &cluster) in codes.iter().zip(assignments) {
            let slot = clusters.get_mut(cluster).ok_or_else(|| {
                AnalysisError::InvalidInput(format!(
                    "cluster index {} out of range for {} themes",
                    cluster,
                    theme_names.len()
                ))
            })?;
            slot.codes.push(code.as_ref().to_string());
        }

        Ok(Self { clusters })
    }

    /// Codes assigned to `theme`, if the theme was declared
    pub fn get(&self, theme: &str) -> Option<&[String]> {
        self.clusters
            .iter()
            .find(|c| c.theme == theme)
            .map(|c| c.codes.as_slice())
    }

    /// Clusters in theme declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, ThemeCluster> {
        self.clusters.iter()
    }

    /// Number of themes (including empty ones)
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Theme names in declaration order
    pub fn themes(&self) -> impl Iterator<Item = &str> {
        self.clusters.iter().map(|c| c.theme.as_str())
    }

    /// Total number of assigned codes
    pub fn total_codes(&self) -> usize {
        self.clusters.iter().map(|c| c.codes.len()).sum()
    }

    /// Themes nobody's feedback landed in
    pub fn empty_themes(&self) -> Vec<&str> {
        self.clusters
            .iter()
            .filter(|c| c.codes.is_empty())
            .map(|c| c.theme.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a ClusteredResult {
    type Item = &'a ThemeCluster;
    type IntoIter = std::slice::Iter<'a, ThemeCluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}
