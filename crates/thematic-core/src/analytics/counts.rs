//! Frequency summaries

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::clustering::ClusteredResult;

/// Number of codes per theme
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeCounts {
    counts: HashMap<String, usize>,
}

impl ThemeCounts {
    /// Count codes per theme (empty themes count as zero)
    pub fn from_clusters(clusters: &ClusteredResult) -> Self {
        Self {
            counts: clusters
                .iter()
                .map(|c| (c.theme.clone(), c.codes.len()))
                .collect(),
        }
    }

    /// Count for one theme
    pub fn get(&self, theme: &str) -> Option<usize> {
        self.counts.get(theme).copied()
    }

    /// Sum over all themes
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Presentation order: count descending, then name
    pub fn ranked(&self) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> =
            self.counts.iter().map(|(k, &v)| (k.clone(), v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}

/// How often each distinct code occurs, most frequent first (ties by text)
pub fn code_frequencies<S: AsRef<str>>(codes: &[S]) -> Vec<(String, usize)> {
    let mut counter: HashMap<&str, usize> = HashMap::new();
    for code in codes {
        *counter.entry(code.as_ref()).or_default() += 1;
    }
    let mut ranked: Vec<(String, usize)> = counter
        .into_iter()
        .map(|(code, n)| (code.to_string(), n))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}
